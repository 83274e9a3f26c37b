//! In-memory persistence primitives for vitrine.
//!
//! [`Store`] is a lock-guarded state cell; a single `write` call is the unit
//! of atomicity, so multi-record mutations that must not interleave go through
//! one closure. [`Table`] builds a keyed record store on top of it, with rows
//! keyed by time-ordered UUIDs so iteration roughly follows creation order.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
}

impl StoreError {
    /// Create a not-found error for the given entity and primary key
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

/// A stored record with a UUID primary key.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error messages and logs
    const ENTITY: &'static str;

    /// Primary key of this record
    fn id(&self) -> Uuid;
}

/// Shared mutable state behind a read-write lock.
///
/// All access goes through closures so guards never escape; everything done
/// inside one `write` call is atomic with respect to other callers.
#[derive(Debug)]
pub struct Store<S> {
    state: RwLock<S>,
}

impl<S: Default> Store<S> {
    /// Create a store with default-initialized state
    pub fn new() -> Self {
        Self {
            state: RwLock::new(S::default()),
        }
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Store<S> {
    /// Run a closure with shared access to the state
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a closure with exclusive access to the state
    pub fn write<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Keyed record store for a single entity type.
#[derive(Debug)]
pub struct Table<T: Record> {
    rows: Store<BTreeMap<Uuid, T>>,
}

impl<T: Record> Table<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self { rows: Store::new() }
    }

    /// Insert a row, returning the stored copy
    pub fn insert(&self, row: T) -> T {
        let stored = row.clone();
        self.rows.write(|rows| {
            rows.insert(row.id(), row);
        });
        tracing::debug!(entity = T::ENTITY, id = %stored.id(), "row inserted");
        stored
    }

    /// Fetch a row by primary key
    pub fn get(&self, id: Uuid) -> Result<T, StoreError> {
        self.rows.read(|rows| {
            rows.get(&id)
                .cloned()
                .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
        })
    }

    /// List all rows
    pub fn list(&self) -> Vec<T> {
        self.rows.read(|rows| rows.values().cloned().collect())
    }

    /// List rows matching a predicate
    pub fn list_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read(|rows| rows.values().filter(|row| pred(row)).cloned().collect())
    }

    /// Atomically mutate a row in place and return the updated copy.
    ///
    /// The closure runs under the write lock, so read-modify-write sequences
    /// (e.g. counter increments) cannot lose updates to concurrent callers.
    pub fn update_with(&self, id: Uuid, f: impl FnOnce(&mut T)) -> Result<T, StoreError> {
        self.rows.write(|rows| match rows.get_mut(&id) {
            Some(row) => {
                f(row);
                Ok(row.clone())
            }
            None => Err(StoreError::not_found(T::ENTITY, id)),
        })
    }

    /// Remove a row by primary key, returning the removed record
    pub fn remove(&self, id: Uuid) -> Result<T, StoreError> {
        let removed = self.rows.write(|rows| {
            rows.remove(&id)
                .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
        })?;
        tracing::debug!(entity = T::ENTITY, id = %id, "row removed");
        Ok(removed)
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        id: Uuid,
        value: u64,
    }

    impl Record for Counter {
        const ENTITY: &'static str = "counter";

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn row(value: u64) -> Counter {
        Counter {
            id: Uuid::now_v7(),
            value,
        }
    }

    #[test]
    fn insert_then_get_returns_the_row() {
        let table = Table::new();
        let stored = table.insert(row(7));

        assert_eq!(table.get(stored.id).unwrap(), stored);
    }

    #[test]
    fn get_missing_row_is_not_found() {
        let table: Table<Counter> = Table::new();
        let id = Uuid::now_v7();

        match table.get(id) {
            Err(StoreError::NotFound { entity, id: got }) => {
                assert_eq!(entity, "counter");
                assert_eq!(got, id);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn list_where_filters_rows() {
        let table = Table::new();
        table.insert(row(1));
        table.insert(row(2));
        table.insert(row(3));

        let even = table.list_where(|c| c.value % 2 == 0);
        assert_eq!(even.len(), 1);
        assert_eq!(even[0].value, 2);
        assert_eq!(table.list().len(), 3);
    }

    #[test]
    fn update_with_applies_increments_exactly() {
        let table = Table::new();
        let stored = table.insert(row(0));

        for _ in 0..5 {
            table.update_with(stored.id, |c| c.value += 1).unwrap();
        }

        assert_eq!(table.get(stored.id).unwrap().value, 5);
    }

    #[test]
    fn update_missing_row_is_not_found() {
        let table: Table<Counter> = Table::new();
        assert!(table.update_with(Uuid::now_v7(), |c| c.value += 1).is_err());
    }

    #[test]
    fn remove_deletes_the_row() {
        let table = Table::new();
        let stored = table.insert(row(9));

        let removed = table.remove(stored.id).unwrap();
        assert_eq!(removed.value, 9);
        assert!(table.get(stored.id).is_err());
        assert!(table.remove(stored.id).is_err());
    }
}
