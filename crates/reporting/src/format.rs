//! Display formatting for report cells.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Widest location cell, in characters.
pub const LOCATION_DISPLAY_WIDTH: usize = 28;

const ELLIPSIS: &str = "...";

/// `2024-06-01 09:30`
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Tonnes with trailing zeros dropped: `250 t`, `100.5 t`.
pub fn quantity(tonnes: Decimal) -> String {
    format!("{} t", tonnes.normalize())
}

/// `$87,500.00`, `-$120,500.00`.
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Clip to `width` characters, marking the cut with `...`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_and_pads() {
        assert_eq!(currency(dec!(87500)), "$87,500.00");
        assert_eq!(currency(dec!(3600)), "$3,600.00");
        assert_eq!(currency(dec!(999.5)), "$999.50");
        assert_eq!(currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(currency(dec!(-120500)), "-$120,500.00");
        assert_eq!(currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn quantity_drops_trailing_zeros() {
        assert_eq!(quantity(dec!(250.00)), "250 t");
        assert_eq!(quantity(dec!(100.50)), "100.5 t");
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("Silo 1", 28), "Silo 1");
        let long = "Central Grain Terminal, North Loading Dock";
        let cut = truncate(long, LOCATION_DISPLAY_WIDTH);
        assert_eq!(cut.chars().count(), LOCATION_DISPLAY_WIDTH);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with("Central Grain Terminal"));
    }

    #[test]
    fn timestamp_is_minute_precision() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 45).unwrap();
        assert_eq!(timestamp(at), "2024-06-01 09:30");
    }
}
