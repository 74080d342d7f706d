use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::ReportError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-day range, evaluated in UTC.
///
/// The start bound is midnight of `start`; the end bound is 23:59:59 of `end`
/// (with the fractional second saturated so nothing stamped within that last
/// second falls outside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRange {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(skip)]
    start_at: DateTime<Utc>,
    #[serde(skip)]
    end_at: DateTime<Utc>,
}

impl ReportRange {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::validation(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| ReportError::validation("invalid end-of-day time"))?;

        Ok(Self {
            start,
            end,
            start_at: start.and_time(NaiveTime::MIN).and_utc(),
            end_at: end.and_time(end_of_day).and_utc(),
        })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        Self::from_dates(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_at && at <= self.end_at
    }

    /// `report_<start>_to_<end>.<ext>`
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "report_{}_to_{}.{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT),
            extension
        )
    }
}

fn parse_date(which: &str, raw: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        ReportError::validation(format!("{which} date `{raw}` is not YYYY-MM-DD: {e}"))
    })
}
