//! Instances & Collections
//!
//! An instance is a binding of independently-owned resource handles; a
//! collection is an ordered, capacity-bounded group of instances submitted
//! together to a view. The ownership split is the load-bearing invariant of
//! this layer: instances *reference*, collections *contain*, resource
//! tables *own*. Disposing an instance never touches the resources it
//! referenced, and disposing a collection disposes exactly its member
//! instances.

use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::renderer::backend::ViewId;
use crate::resources::{
    AppearanceHandle, GeometryDataHandle, GeometryTopologyHandle, RenderStateHandle,
    SpatialTransformHandle,
};

new_key_type! {
    /// Handle to an instance record.
    pub struct InstanceHandle;
    /// Handle to a collection.
    pub struct CollectionHandle;
}

/// Resource handles an instance binds together.
///
/// Spatial transform and render state are optional; an instance without
/// them draws with identity placement and the backend's default state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceInfo {
    pub geometry_data: GeometryDataHandle,
    pub geometry_topology: GeometryTopologyHandle,
    pub appearance: AppearanceHandle,
    pub spatial_transform: Option<SpatialTransformHandle>,
    pub render_state: Option<RenderStateHandle>,
}

/// An instance record: the bound handles plus the collection that contains it.
#[derive(Debug, Clone, Copy)]
pub struct InstanceRecord {
    pub info: InstanceInfo,
    pub collection: CollectionHandle,
}

/// One entry of a frozen batch handed to the backend at collection finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceBinding {
    pub instance: InstanceHandle,
    pub info: InstanceInfo,
}

/// Creation parameters for a collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionInfo {
    /// Maximum number of member instances.
    pub capacity: usize,
}

impl Default for CollectionInfo {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// An ordered, capacity-bounded group of instances.
#[derive(Debug)]
pub struct Collection {
    capacity: usize,
    instances: SmallVec<[InstanceHandle; 8]>,
    finalized: bool,
    views: SmallVec<[ViewId; 2]>,
}

impl Collection {
    #[must_use]
    pub fn new(info: &CollectionInfo) -> Self {
        Self {
            capacity: info.capacity,
            instances: SmallVec::new(),
            finalized: false,
            views: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.instances.len() >= self.capacity
    }

    /// Whether the collection froze for batched submission.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Member instances in insertion order.
    #[must_use]
    pub fn instances(&self) -> &[InstanceHandle] {
        &self.instances
    }

    /// Views this collection was attached to at finalize.
    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    pub(crate) fn push_instance(&mut self, instance: InstanceHandle) {
        self.instances.push(instance);
    }

    pub(crate) fn remove_instance(&mut self, instance: InstanceHandle) {
        self.instances.retain(|h| *h != instance);
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }

    pub(crate) fn attach_view(&mut self, view: ViewId) {
        self.views.push(view);
    }

    pub(crate) fn take_instances(&mut self) -> SmallVec<[InstanceHandle; 8]> {
        std::mem::take(&mut self.instances)
    }
}
