//! Handle ID Pool
//!
//! Mints and recycles the small opaque handles that identify resources.
//!
//! # Design
//!
//! Each resource kind owns an independent [`IdPool`] parameterized by its
//! own key type, so handles of different kinds are never interchangeable
//! even when they carry the same slot index. Keys are generational
//! (index + reuse counter): a handle released and later reallocated gets a
//! new generation, so a stale handle from a prior allocation epoch is
//! detectably invalid instead of silently aliasing a new resource.
//!
//! The pool is bounded. `allocate` returns `None` once the configured
//! capacity worth of handles is live; `release` is a no-op on handles that
//! are already free or were never minted here, so double-release can never
//! corrupt state or free a live neighbor.

use slotmap::{Key, SlotMap};

/// A capacity-bounded allocator of generational handles for one resource kind.
pub struct IdPool<K: Key> {
    slots: SlotMap<K, ()>,
    capacity: usize,
}

impl<K: Key> IdPool<K> {
    /// Creates a pool that will hold at most `capacity` live handles.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            capacity,
        }
    }

    /// Mints a new handle, or `None` when the pool is exhausted.
    ///
    /// No allocation-order guarantee; the only promise is that the returned
    /// value is distinct from every currently-live handle of this pool.
    pub fn allocate(&mut self) -> Option<K> {
        if self.slots.len() >= self.capacity {
            log::warn!("id pool exhausted ({} handles live)", self.capacity);
            return None;
        }
        Some(self.slots.insert(()))
    }

    /// Returns a handle to the pool.
    ///
    /// Releasing a stale or foreign handle is a silent no-op.
    pub fn release(&mut self, handle: K) {
        if self.slots.remove(handle).is_none() {
            log::debug!("release of a stale handle ignored");
        }
    }

    /// Whether `handle` is currently live in this pool.
    #[must_use]
    pub fn contains(&self, handle: K) -> bool {
        self.slots.contains_key(handle)
    }

    /// Number of currently-live handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no handles are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Configured maximum number of live handles.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Releases every live handle at once.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
