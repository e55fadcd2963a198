//! Resource Tables
//!
//! One [`ResourceTable`] exists per resource kind and is the exclusive owner
//! of that kind's records. The table pairs an [`IdPool`] (handle identity)
//! with a `SecondaryMap` (record storage), so a record is reachable exactly
//! as long as its handle is live.

use slotmap::{Key, SecondaryMap};

use crate::resources::pool::IdPool;

/// Handle-keyed record storage for a single resource kind.
pub struct ResourceTable<K: Key, V> {
    pool: IdPool<K>,
    records: SecondaryMap<K, V>,
}

impl<K: Key, V> ResourceTable<K, V> {
    /// Creates a table bounded to `capacity` live records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: IdPool::new(capacity),
            records: SecondaryMap::new(),
        }
    }

    /// Inserts a record, minting its handle. `None` when the pool is full.
    pub fn insert(&mut self, record: V) -> Option<K> {
        let handle = self.pool.allocate()?;
        self.records.insert(handle, record);
        Some(handle)
    }

    /// Removes a record, releasing its handle. Idempotent.
    pub fn remove(&mut self, handle: K) -> Option<V> {
        let record = self.records.remove(handle);
        self.pool.release(handle);
        record
    }

    #[must_use]
    pub fn get(&self, handle: K) -> Option<&V> {
        self.records.get(handle)
    }

    pub fn get_mut(&mut self, handle: K) -> Option<&mut V> {
        self.records.get_mut(handle)
    }

    /// Whether `handle` refers to a currently-live record.
    #[must_use]
    pub fn contains(&self, handle: K) -> bool {
        self.pool.contains(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Iterates over live `(handle, record)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.records.iter()
    }

    /// Drops every record and releases every handle.
    pub fn clear(&mut self) {
        self.records.clear();
        self.pool.clear();
    }
}
