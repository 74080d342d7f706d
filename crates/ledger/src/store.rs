use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use graindash_core::{Clock, DomainError, DomainResult, OperationId, SystemClock};

use crate::operation::{Operation, OperationDraft, OperationPatch, OperationType};

/// Authoritative operation collection.
///
/// Every listing is ordered newest first (`created_at` descending, ties broken
/// by descending id). Callers only ever receive copies.
pub trait LedgerStore: Send + Sync {
    /// Validate `draft`, assign the next id and the current time, store it.
    fn create(&self, draft: OperationDraft) -> DomainResult<Operation>;

    /// Like `create`, with a caller-chosen `created_at` (imports, demo data).
    fn create_at(&self, draft: OperationDraft, created_at: DateTime<Utc>) -> DomainResult<Operation>;

    fn get(&self, id: OperationId) -> Option<Operation>;

    fn list(&self) -> Vec<Operation>;

    /// Merge `patch` into the stored record. `NotFound` if the id is absent,
    /// `Validation` if the merged record is invalid (store left unchanged).
    fn update(&self, id: OperationId, patch: OperationPatch) -> DomainResult<Operation>;

    /// Hard delete. Returns whether a record was actually removed.
    fn delete(&self, id: OperationId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_by_type(&self, kind: OperationType) -> Vec<Operation> {
        self.list()
            .into_iter()
            .filter(|op| op.kind() == kind)
            .collect()
    }

    /// Records with `start <= created_at <= end`.
    fn list_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Operation> {
        if start > end {
            return Vec::new();
        }
        self.list()
            .into_iter()
            .filter(|op| op.created_at() >= start && op.created_at() <= end)
            .collect()
    }
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn create(&self, draft: OperationDraft) -> DomainResult<Operation> {
        (**self).create(draft)
    }

    fn create_at(&self, draft: OperationDraft, created_at: DateTime<Utc>) -> DomainResult<Operation> {
        (**self).create_at(draft, created_at)
    }

    fn get(&self, id: OperationId) -> Option<Operation> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Operation> {
        (**self).list()
    }

    fn update(&self, id: OperationId, patch: OperationPatch) -> DomainResult<Operation> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: OperationId) -> bool {
        (**self).delete(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn list_by_type(&self, kind: OperationType) -> Vec<Operation> {
        (**self).list_by_type(kind)
    }

    fn list_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Operation> {
        (**self).list_by_date_range(start, end)
    }
}

/// Newest first: `created_at` descending, then id descending.
pub fn sort_newest_first(ops: &mut [Operation]) {
    ops.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

#[derive(Debug)]
struct LedgerState {
    records: BTreeMap<OperationId, Operation>,
    next_id: u64,
}

/// In-process, non-persistent ledger. Rebuilt empty on every start.
///
/// A single `RwLock` gives single-writer semantics: each mutation runs to
/// completion before the next one is admitted, and readers always see a
/// consistent snapshot.
pub struct InMemoryLedgerStore {
    inner: RwLock<LedgerState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(LedgerState {
                records: BTreeMap::new(),
                next_id: 1,
            }),
            clock,
        }
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InMemoryLedgerStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryLedgerStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn poisoned() -> DomainError {
    DomainError::storage("ledger lock poisoned")
}

impl LedgerStore for InMemoryLedgerStore {
    fn create(&self, draft: OperationDraft) -> DomainResult<Operation> {
        self.create_at(draft, self.clock.now())
    }

    fn create_at(&self, draft: OperationDraft, created_at: DateTime<Utc>) -> DomainResult<Operation> {
        draft.validate()?;

        let mut state = self.inner.write().map_err(|_| poisoned())?;
        let id = OperationId::new(state.next_id)?;
        let op = Operation::new(id, draft, created_at)?;

        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| DomainError::storage("operation id space exhausted"))?;
        state.records.insert(id, op.clone());

        tracing::info!(
            operation_id = %id,
            kind = op.kind().as_str(),
            quantity = %op.quantity(),
            "operation created"
        );
        Ok(op)
    }

    fn get(&self, id: OperationId) -> Option<Operation> {
        let state = self.inner.read().ok()?;
        state.records.get(&id).cloned()
    }

    fn list(&self) -> Vec<Operation> {
        let state = match self.inner.read() {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        let mut ops: Vec<Operation> = state.records.values().cloned().collect();
        sort_newest_first(&mut ops);
        ops
    }

    fn update(&self, id: OperationId, patch: OperationPatch) -> DomainResult<Operation> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        let current = state.records.get(&id).ok_or(DomainError::NotFound)?;

        let merged = current.apply_patch(&patch)?;
        state.records.insert(id, merged.clone());

        tracing::info!(operation_id = %id, kind = merged.kind().as_str(), "operation updated");
        Ok(merged)
    }

    fn delete(&self, id: OperationId) -> bool {
        let removed = match self.inner.write() {
            Ok(mut state) => state.records.remove(&id).is_some(),
            Err(_) => false,
        };

        if removed {
            tracing::info!(operation_id = %id, "operation deleted");
        } else {
            tracing::debug!(operation_id = %id, "delete of absent operation ignored");
        }
        removed
    }

    fn len(&self) -> usize {
        self.inner.read().map(|s| s.records.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationStatus;
    use chrono::{Duration, TimeZone};
    use graindash_core::FixedClock;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn test_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn test_store() -> (Arc<FixedClock>, InMemoryLedgerStore) {
        let clock = Arc::new(FixedClock::new(test_start()));
        let store = InMemoryLedgerStore::with_clock(clock.clone());
        (clock, store)
    }

    fn draft(kind: OperationType, quantity: Decimal) -> OperationDraft {
        OperationDraft::new(kind, quantity, dec!(1000), "Silo 1")
    }

    fn id(raw: u64) -> OperationId {
        OperationId::new(raw).unwrap()
    }

    #[test]
    fn create_then_get_returns_draft_plus_identity() {
        let (_clock, store) = test_store();
        let d = draft(OperationType::Sale, dec!(180)).with_status(OperationStatus::Pending);

        let created = store.create(d.clone()).unwrap();
        let fetched = store.get(created.id()).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.id(), id(1));
        assert_eq!(fetched.created_at(), test_start());
        assert_eq!(fetched.kind(), d.kind);
        assert_eq!(fetched.quantity(), d.quantity);
        assert_eq!(fetched.value(), d.value);
        assert_eq!(fetched.location(), d.location);
        assert_eq!(fetched.status(), d.status);
    }

    #[test]
    fn invalid_draft_is_rejected_without_consuming_an_id() {
        let (_clock, store) = test_store();
        let err = store.create(draft(OperationType::Feed, dec!(0))).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
        assert!(store.is_empty());

        let op = store.create(draft(OperationType::Feed, dec!(5))).unwrap();
        assert_eq!(op.id(), id(1));
    }

    #[test]
    fn out_of_range_amounts_are_rejected_before_insert() {
        let (_clock, store) = test_store();
        let err = store
            .create(draft(OperationType::Purchase, Decimal::MAX))
            .unwrap_err();
        assert_eq!(err.field(), Some("quantity"));

        let mut huge_value = draft(OperationType::Sale, dec!(1));
        huge_value.value = Decimal::MAX;
        assert_eq!(store.create(huge_value).unwrap_err().field(), Some("value"));
        assert!(store.is_empty());
    }

    #[test]
    fn create_at_keeps_the_given_timestamp() {
        let (_clock, store) = test_store();
        let earlier = test_start() - Duration::hours(5);
        let op = store
            .create_at(draft(OperationType::Drying, dec!(12)), earlier)
            .unwrap();
        assert_eq!(op.created_at(), earlier);
        assert_eq!(op.id(), id(1));
    }

    #[test]
    fn poisoned_lock_fails_writes_and_empties_reads() {
        let (_clock, store) = test_store();
        store.create(draft(OperationType::Purchase, dec!(1))).unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer died");
        }));

        let err = store.create(draft(OperationType::Sale, dec!(1))).unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(matches!(
            store.update(id(1), OperationPatch::default()),
            Err(DomainError::Storage(_))
        ));
        assert!(store.get(id(1)).is_none());
        assert!(store.list().is_empty());
        assert!(!store.delete(id(1)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn get_missing_id_is_none() {
        let (_clock, store) = test_store();
        assert!(store.get(id(99)).is_none());
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let (_clock, store) = test_store();
        let a = store.create(draft(OperationType::Purchase, dec!(1))).unwrap();
        let b = store.create(draft(OperationType::Purchase, dec!(2))).unwrap();
        assert!(store.delete(b.id()));

        let c = store.create(draft(OperationType::Purchase, dec!(3))).unwrap();
        assert_eq!(a.id(), id(1));
        assert_eq!(c.id(), id(3));
    }

    #[test]
    fn list_is_newest_first_with_id_tie_break() {
        let (clock, store) = test_store();
        store.create(draft(OperationType::Purchase, dec!(1))).unwrap();
        store.create(draft(OperationType::Sale, dec!(2))).unwrap();
        clock.advance(Duration::hours(1));
        store.create(draft(OperationType::Feed, dec!(3))).unwrap();
        clock.set(test_start() - Duration::days(1));
        store.create(draft(OperationType::Drying, dec!(4))).unwrap();

        let ids: Vec<u64> = store.list().iter().map(|op| op.id().get()).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn delete_unknown_id_returns_false_and_leaves_store_unchanged() {
        let (_clock, store) = test_store();
        store.create(draft(OperationType::Purchase, dec!(10))).unwrap();
        let before = store.list();

        assert!(!store.delete(id(42)));
        assert_eq!(store.list(), before);

        assert!(store.delete(id(1)));
        assert!(!store.delete(id(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let (_clock, store) = test_store();
        let err = store.update(id(5), OperationPatch::default()).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn update_preserves_identity_and_timestamp() {
        let (clock, store) = test_store();
        let created = store.create(draft(OperationType::Purchase, dec!(250))).unwrap();
        clock.advance(Duration::days(3));

        let patch = OperationPatch {
            kind: Some(OperationType::Sale),
            location: Some("Port Terminal".to_string()),
            ..OperationPatch::default()
        };
        let updated = store.update(created.id(), patch).unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.kind(), OperationType::Sale);
        assert_eq!(updated.location(), "Port Terminal");
        assert_eq!(store.get(created.id()).unwrap(), updated);
    }

    #[test]
    fn invalid_update_leaves_stored_record_unchanged() {
        let (_clock, store) = test_store();
        let created = store.create(draft(OperationType::Purchase, dec!(250))).unwrap();

        let patch = OperationPatch {
            quantity: Some(dec!(-1)),
            ..OperationPatch::default()
        };
        let err = store.update(created.id(), patch).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
        assert_eq!(store.get(created.id()).unwrap(), created);
    }

    #[test]
    fn filters_by_type_and_inclusive_date_range() {
        let (clock, store) = test_store();
        store.create(draft(OperationType::Purchase, dec!(1))).unwrap();
        clock.advance(Duration::days(1));
        store.create(draft(OperationType::Sale, dec!(2))).unwrap();
        clock.advance(Duration::days(1));
        store.create(draft(OperationType::Purchase, dec!(3))).unwrap();

        let purchases: Vec<u64> = store
            .list_by_type(OperationType::Purchase)
            .iter()
            .map(|op| op.id().get())
            .collect();
        assert_eq!(purchases, vec![3, 1]);

        let start = test_start();
        let end = test_start() + Duration::days(1);
        let in_range: Vec<u64> = store
            .list_by_date_range(start, end)
            .iter()
            .map(|op| op.id().get())
            .collect();
        assert_eq!(in_range, vec![2, 1]);

        assert!(store.list_by_date_range(end, start).is_empty());
    }

    #[test]
    fn shared_handle_sees_the_same_records() {
        let (_clock, store) = test_store();
        let shared: Arc<InMemoryLedgerStore> = Arc::new(store);
        let handle: Arc<dyn LedgerStore> = shared.clone();

        handle.create(draft(OperationType::Drying, dec!(120))).unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(handle.list_by_type(OperationType::Drying).len(), 1);
    }

    fn arb_kind() -> impl Strategy<Value = OperationType> {
        prop_oneof![
            Just(OperationType::Purchase),
            Just(OperationType::Sale),
            Just(OperationType::Drying),
            Just(OperationType::Feed),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: whatever the insertion times, `list()` is non-increasing
        /// by `created_at` with ties ordered by descending id.
        #[test]
        fn list_is_always_sorted(offsets in prop::collection::vec(-5i64..5i64, 1..40)) {
            let (clock, store) = test_store();
            for offset in offsets {
                clock.set(test_start() + Duration::minutes(offset));
                store.create(draft(OperationType::Purchase, dec!(1))).unwrap();
            }

            let ops = store.list();
            for pair in ops.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.created_at() >= b.created_at());
                if a.created_at() == b.created_at() {
                    prop_assert!(a.id() > b.id());
                }
            }
        }

        /// Property: no combination of patch fields changes `id` or `created_at`.
        #[test]
        fn update_never_changes_identity(
            kind in prop::option::of(arb_kind()),
            quantity in prop::option::of(-100i64..1000i64),
            value in prop::option::of(-100i64..100_000i64),
            location in prop::option::of("[ a-zA-Z]{0,12}"),
        ) {
            let (clock, store) = test_store();
            let created = store.create(draft(OperationType::Purchase, dec!(10))).unwrap();
            clock.advance(Duration::hours(6));

            let patch = OperationPatch {
                kind,
                quantity: quantity.map(Decimal::from),
                value: value.map(Decimal::from),
                location,
                status: None,
            };

            let _ = store.update(created.id(), patch);
            let stored = store.get(created.id()).unwrap();
            prop_assert_eq!(stored.id(), created.id());
            prop_assert_eq!(stored.created_at(), created.created_at());
        }
    }
}
