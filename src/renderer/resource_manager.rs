//! Scene Resource Manager
//!
//! The single owner of every resource table, instance and collection for
//! one render-system context. All mutation goes through `&mut self`, which
//! is the layer's whole concurrency contract: confine the manager to the
//! render/update thread and the single-writer assumption holds by
//! construction. There is no hidden global state; create as many managers
//! as there are render systems.
//!
//! Operations come in one family per resource kind
//! (`<kind>_create` / `<kind>_update` / `<kind>_finalize` / `<kind>_dispose`)
//! plus the instance/collection composition family. Creation failures are
//! returned to the caller; dispose is always best-effort, idempotent and
//! silent, so any teardown order — including teardown of a half-initialized
//! drawable — cannot itself fail.

use glam::Mat4;

use crate::errors::{ResourceKind, Result, SceneError};
use crate::renderer::backend::{ContextId, RenderBackend, ViewId};
use crate::renderer::collection::{
    Collection, CollectionHandle, CollectionInfo, InstanceBinding, InstanceHandle, InstanceInfo,
    InstanceRecord,
};
use crate::renderer::limits::SceneLimits;
use crate::resources::{
    AppearanceHandle, AppearanceRecord, GeometryDataDescriptor, GeometryDataHandle,
    GeometryDataRecord, GeometryTopologyHandle, GeometryTopologyRecord, RenderStateHandle,
    RenderStateRecord, ResourceTable, SpatialTransformHandle, SpatialTransformRecord,
    VertexAttribute,
};

/// Owner of all resource tables and the backend seam for one render system.
pub struct ResourceManager {
    backend: Box<dyn RenderBackend>,
    geometry_data: ResourceTable<GeometryDataHandle, GeometryDataRecord>,
    topologies: ResourceTable<GeometryTopologyHandle, GeometryTopologyRecord>,
    appearances: ResourceTable<AppearanceHandle, AppearanceRecord>,
    transforms: ResourceTable<SpatialTransformHandle, SpatialTransformRecord>,
    render_states: ResourceTable<RenderStateHandle, RenderStateRecord>,
    instances: ResourceTable<InstanceHandle, InstanceRecord>,
    collections: ResourceTable<CollectionHandle, Collection>,
}

impl ResourceManager {
    #[must_use]
    pub fn new(backend: Box<dyn RenderBackend>, limits: &SceneLimits) -> Self {
        Self {
            backend,
            geometry_data: ResourceTable::new(limits.geometry_data),
            topologies: ResourceTable::new(limits.geometry_topology),
            appearances: ResourceTable::new(limits.appearance),
            transforms: ResourceTable::new(limits.spatial_transform),
            render_states: ResourceTable::new(limits.render_state),
            instances: ResourceTable::new(limits.instances),
            collections: ResourceTable::new(limits.collections),
        }
    }

    // ========================================================================
    // Geometry data
    // ========================================================================

    pub fn geometry_data_create(
        &mut self,
        desc: &GeometryDataDescriptor,
    ) -> Result<GeometryDataHandle> {
        desc.validate()?;
        let record = GeometryDataRecord::new(desc);
        let handle =
            self.geometry_data
                .insert(record)
                .ok_or_else(|| SceneError::PoolExhausted {
                    kind: ResourceKind::GeometryData,
                    capacity: self.geometry_data.capacity(),
                })?;
        // Record is present right after insert
        let record = self.geometry_data.get(handle).unwrap();
        self.backend.geometry_data_created(handle, record);
        Ok(handle)
    }

    /// Writes `bytes` into one attribute stream at `byte_offset`.
    ///
    /// Each attribute (position, normal, color, texcoord) is updated
    /// independently by byte range; rejected after finalize.
    pub fn geometry_data_update(
        &mut self,
        handle: GeometryDataHandle,
        attribute: VertexAttribute,
        byte_offset: u64,
        bytes: &[u8],
    ) -> Result<()> {
        let record = self
            .geometry_data
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::GeometryData,
            })?;
        record.update_attribute(attribute, byte_offset, bytes)?;
        self.backend.geometry_data_updated(
            handle,
            attribute,
            byte_offset..byte_offset + bytes.len() as u64,
        );
        Ok(())
    }

    pub fn geometry_data_update_indices(
        &mut self,
        handle: GeometryDataHandle,
        byte_offset: u64,
        bytes: &[u8],
    ) -> Result<()> {
        let record = self
            .geometry_data
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::GeometryData,
            })?;
        record.update_indices(byte_offset, bytes)?;
        self.backend
            .geometry_data_indices_updated(handle, byte_offset..byte_offset + bytes.len() as u64);
        Ok(())
    }

    /// One-way transition to "ready for binding"; later updates are rejected
    /// so the backend can build immutable GPU buffers exactly once.
    pub fn geometry_data_finalize(&mut self, handle: GeometryDataHandle) -> Result<()> {
        let record = self
            .geometry_data
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::GeometryData,
            })?;
        record.finalize()?;
        let record = self.geometry_data.get(handle).unwrap();
        self.backend.geometry_data_finalized(handle, record);
        Ok(())
    }

    pub fn geometry_data_dispose(&mut self, handle: GeometryDataHandle) {
        if self.geometry_data.remove(handle).is_some() {
            self.backend.geometry_data_disposed(handle);
        }
    }

    #[must_use]
    pub fn geometry_data(&self, handle: GeometryDataHandle) -> Option<&GeometryDataRecord> {
        self.geometry_data.get(handle)
    }

    // ========================================================================
    // Geometry topology
    // ========================================================================

    pub fn geometry_topology_create(
        &mut self,
        record: GeometryTopologyRecord,
    ) -> Result<GeometryTopologyHandle> {
        let handle = self
            .topologies
            .insert(record)
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::GeometryTopology,
                capacity: self.topologies.capacity(),
            })?;
        self.backend
            .geometry_topology_created(handle, self.topologies.get(handle).unwrap());
        Ok(handle)
    }

    pub fn geometry_topology_dispose(&mut self, handle: GeometryTopologyHandle) {
        if self.topologies.remove(handle).is_some() {
            self.backend.geometry_topology_disposed(handle);
        }
    }

    #[must_use]
    pub fn geometry_topology(
        &self,
        handle: GeometryTopologyHandle,
    ) -> Option<&GeometryTopologyRecord> {
        self.topologies.get(handle)
    }

    // ========================================================================
    // Appearance
    // ========================================================================

    pub fn appearance_create(&mut self, record: AppearanceRecord) -> Result<AppearanceHandle> {
        let handle = self
            .appearances
            .insert(record)
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::Appearance,
                capacity: self.appearances.capacity(),
            })?;
        self.backend
            .appearance_created(handle, self.appearances.get(handle).unwrap());
        Ok(handle)
    }

    pub fn appearance_update(
        &mut self,
        handle: AppearanceHandle,
        record: AppearanceRecord,
    ) -> Result<()> {
        let slot = self
            .appearances
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::Appearance,
            })?;
        *slot = record;
        self.backend.appearance_updated(handle, &record);
        Ok(())
    }

    pub fn appearance_dispose(&mut self, handle: AppearanceHandle) {
        if self.appearances.remove(handle).is_some() {
            self.backend.appearance_disposed(handle);
        }
    }

    #[must_use]
    pub fn appearance(&self, handle: AppearanceHandle) -> Option<&AppearanceRecord> {
        self.appearances.get(handle)
    }

    // ========================================================================
    // Spatial transform (streaming)
    // ========================================================================

    pub fn spatial_transform_create(&mut self, matrix: Mat4) -> Result<SpatialTransformHandle> {
        let handle = self
            .transforms
            .insert(SpatialTransformRecord::new(matrix))
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::SpatialTransform,
                capacity: self.transforms.capacity(),
            })?;
        self.backend
            .spatial_transform_created(handle, self.transforms.get(handle).unwrap());
        Ok(handle)
    }

    pub fn spatial_transform_update(
        &mut self,
        handle: SpatialTransformHandle,
        matrix: Mat4,
    ) -> Result<()> {
        let record = self
            .transforms
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::SpatialTransform,
            })?;
        record.set_matrix(matrix);
        let record = *record;
        self.backend.spatial_transform_updated(handle, &record);
        Ok(())
    }

    pub fn spatial_transform_dispose(&mut self, handle: SpatialTransformHandle) {
        if self.transforms.remove(handle).is_some() {
            self.backend.spatial_transform_disposed(handle);
        }
    }

    #[must_use]
    pub fn spatial_transform(
        &self,
        handle: SpatialTransformHandle,
    ) -> Option<&SpatialTransformRecord> {
        self.transforms.get(handle)
    }

    // ========================================================================
    // Render state (streaming)
    // ========================================================================

    pub fn render_state_create(&mut self, record: RenderStateRecord) -> Result<RenderStateHandle> {
        let handle = self
            .render_states
            .insert(record)
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::RenderState,
                capacity: self.render_states.capacity(),
            })?;
        self.backend
            .render_state_created(handle, self.render_states.get(handle).unwrap());
        Ok(handle)
    }

    pub fn render_state_update(
        &mut self,
        handle: RenderStateHandle,
        record: RenderStateRecord,
    ) -> Result<()> {
        let slot = self
            .render_states
            .get_mut(handle)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::RenderState,
            })?;
        *slot = record;
        self.backend.render_state_updated(handle, &record);
        Ok(())
    }

    pub fn render_state_dispose(&mut self, handle: RenderStateHandle) {
        if self.render_states.remove(handle).is_some() {
            self.backend.render_state_disposed(handle);
        }
    }

    #[must_use]
    pub fn render_state(&self, handle: RenderStateHandle) -> Option<&RenderStateRecord> {
        self.render_states.get(handle)
    }

    // ========================================================================
    // Collections & instances
    // ========================================================================

    pub fn collection_create(&mut self, info: &CollectionInfo) -> Result<CollectionHandle> {
        self.collections
            .insert(Collection::new(info))
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::Collection,
                capacity: self.collections.capacity(),
            })
    }

    /// Binds the referenced handles into a new instance appended to the
    /// collection.
    ///
    /// Every referenced handle must be currently live; mutual compatibility
    /// of geometry data and topology is the backend's draw-time concern, not
    /// checked here.
    pub fn collection_instance_create(
        &mut self,
        collection: CollectionHandle,
        info: &InstanceInfo,
    ) -> Result<InstanceHandle> {
        self.validate_instance_refs(info)?;

        let coll = self
            .collections
            .get(collection)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::Collection,
            })?;
        if coll.is_finalized() {
            return Err(SceneError::CollectionFinalized);
        }
        if coll.is_full() {
            return Err(SceneError::PoolExhausted {
                kind: ResourceKind::Instance,
                capacity: coll.capacity(),
            });
        }

        let instance = self
            .instances
            .insert(InstanceRecord {
                info: *info,
                collection,
            })
            .ok_or_else(|| SceneError::PoolExhausted {
                kind: ResourceKind::Instance,
                capacity: self.instances.capacity(),
            })?;
        self.collections
            .get_mut(collection)
            .unwrap()
            .push_instance(instance);
        Ok(instance)
    }

    /// Removes one instance from its collection. Idempotent.
    ///
    /// The resources the instance referenced are untouched; they belong to
    /// their original creator.
    pub fn collection_instance_dispose(
        &mut self,
        collection: CollectionHandle,
        instance: InstanceHandle,
    ) {
        let Some(record) = self.instances.get(instance) else {
            return;
        };
        if record.collection != collection {
            log::debug!("instance dispose against a foreign collection ignored");
            return;
        }
        self.instances.remove(instance);
        if let Some(coll) = self.collections.get_mut(collection) {
            coll.remove_instance(instance);
        }
    }

    /// Freezes the collection for batched submission and optionally attaches
    /// it to a context/view. Must be called exactly once per usable
    /// collection.
    pub fn collection_finalize(
        &mut self,
        collection: CollectionHandle,
        context: Option<ContextId>,
        view: Option<ViewId>,
    ) -> Result<()> {
        let coll = self
            .collections
            .get_mut(collection)
            .ok_or(SceneError::HandleNotFound {
                kind: ResourceKind::Collection,
            })?;
        if coll.is_finalized() {
            return Err(SceneError::AlreadyFinalized {
                kind: ResourceKind::Collection,
            });
        }
        coll.mark_finalized();
        if let Some(view) = view {
            coll.attach_view(view);
        }

        let batch: Vec<InstanceBinding> = self
            .collections
            .get(collection)
            .unwrap()
            .instances()
            .iter()
            .filter_map(|&instance| {
                self.instances.get(instance).map(|record| InstanceBinding {
                    instance,
                    info: record.info,
                })
            })
            .collect();
        self.backend.collection_finalized(collection, context, &batch);
        if let Some(view) = view {
            self.backend.view_add_collection(view, collection);
        }
        Ok(())
    }

    /// Disposes the collection and every contained instance in one step.
    /// Idempotent; later per-instance disposes are redundant no-ops.
    pub fn collection_dispose(&mut self, collection: CollectionHandle) {
        let Some(mut coll) = self.collections.remove(collection) else {
            return;
        };
        for instance in coll.take_instances() {
            self.instances.remove(instance);
        }
        self.backend.collection_disposed(collection);
    }

    #[must_use]
    pub fn collection(&self, handle: CollectionHandle) -> Option<&Collection> {
        self.collections.get(handle)
    }

    #[must_use]
    pub fn instance(&self, handle: InstanceHandle) -> Option<&InstanceRecord> {
        self.instances.get(handle)
    }

    /// Number of live instances across all collections.
    #[must_use]
    pub fn live_instance_count(&self) -> usize {
        self.instances.len()
    }

    fn validate_instance_refs(&self, info: &InstanceInfo) -> Result<()> {
        if !self.geometry_data.contains(info.geometry_data) {
            return Err(SceneError::InvalidReference {
                kind: ResourceKind::GeometryData,
            });
        }
        if !self.topologies.contains(info.geometry_topology) {
            return Err(SceneError::InvalidReference {
                kind: ResourceKind::GeometryTopology,
            });
        }
        if !self.appearances.contains(info.appearance) {
            return Err(SceneError::InvalidReference {
                kind: ResourceKind::Appearance,
            });
        }
        if let Some(transform) = info.spatial_transform {
            if !self.transforms.contains(transform) {
                return Err(SceneError::InvalidReference {
                    kind: ResourceKind::SpatialTransform,
                });
            }
        }
        if let Some(state) = info.render_state {
            if !self.render_states.contains(state) {
                return Err(SceneError::InvalidReference {
                    kind: ResourceKind::RenderState,
                });
            }
        }
        Ok(())
    }
}
