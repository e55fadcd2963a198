//! Collection & Instance Tests
//!
//! Tests for:
//! - Reference validation at instance creation
//! - Capacity bound and finalize freeze of collections
//! - Collection dispose reaching exactly its own member instances
//! - Batch hand-off and view attachment observed through a recording backend

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use strata::errors::{ResourceKind, SceneError};
use strata::renderer::{
    CollectionHandle, CollectionInfo, ContextId, InstanceBinding, InstanceInfo, NullBackend,
    RenderBackend, ResourceManager, SceneLimits, ViewId,
};
use strata::resources::{
    AppearanceRecord, AttributeSet, GeometryDataDescriptor, GeometryTopologyRecord,
    PrimitiveTopology, ShaderTemplate,
};

fn manager() -> ResourceManager {
    ResourceManager::new(Box::new(NullBackend), &SceneLimits::default())
}

/// Creates one geometry/topology/appearance triple and returns an instance
/// info binding them, with no optional handles.
fn make_refs(res: &mut ResourceManager) -> InstanceInfo {
    let geometry_data = res
        .geometry_data_create(&GeometryDataDescriptor {
            vertex_count: 3,
            index_count: 0,
            attributes: AttributeSet::POSITION,
        })
        .unwrap();
    let geometry_topology = res
        .geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: false,
        })
        .unwrap();
    let appearance = res
        .appearance_create(AppearanceRecord::new(ShaderTemplate::Flat))
        .unwrap();
    InstanceInfo {
        geometry_data,
        geometry_topology,
        appearance,
        spatial_transform: None,
        render_state: None,
    }
}

// ============================================================================
// Reference validation
// ============================================================================

#[test]
fn instance_create_rejects_dead_geometry_reference() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let collection = res.collection_create(&CollectionInfo::default()).unwrap();

    res.geometry_data_dispose(info.geometry_data);
    let err = res.collection_instance_create(collection, &info).unwrap_err();
    assert!(matches!(
        err,
        SceneError::InvalidReference {
            kind: ResourceKind::GeometryData
        }
    ));
}

#[test]
fn instance_create_rejects_dead_optional_reference() {
    let mut res = manager();
    let mut info = make_refs(&mut res);
    let collection = res.collection_create(&CollectionInfo::default()).unwrap();

    let spatial = res.spatial_transform_create(Mat4::IDENTITY).unwrap();
    res.spatial_transform_dispose(spatial);
    info.spatial_transform = Some(spatial);

    let err = res.collection_instance_create(collection, &info).unwrap_err();
    assert!(matches!(
        err,
        SceneError::InvalidReference {
            kind: ResourceKind::SpatialTransform
        }
    ));
}

// ============================================================================
// Capacity and finalize freeze
// ============================================================================

#[test]
fn collection_capacity_bounds_instance_creation() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let collection = res
        .collection_create(&CollectionInfo { capacity: 1 })
        .unwrap();

    res.collection_instance_create(collection, &info).unwrap();
    let err = res.collection_instance_create(collection, &info).unwrap_err();
    assert!(matches!(
        err,
        SceneError::PoolExhausted {
            kind: ResourceKind::Instance,
            capacity: 1
        }
    ));
}

#[test]
fn finalized_collection_rejects_new_instances() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let collection = res.collection_create(&CollectionInfo::default()).unwrap();

    res.collection_instance_create(collection, &info).unwrap();
    res.collection_finalize(collection, None, None).unwrap();

    let err = res.collection_instance_create(collection, &info).unwrap_err();
    assert!(matches!(err, SceneError::CollectionFinalized));

    assert!(matches!(
        res.collection_finalize(collection, None, None),
        Err(SceneError::AlreadyFinalized {
            kind: ResourceKind::Collection
        })
    ));
}

// ============================================================================
// Dispose semantics
// ============================================================================

#[test]
fn collection_dispose_reaches_only_its_own_instances() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let a = res.collection_create(&CollectionInfo::default()).unwrap();
    let b = res.collection_create(&CollectionInfo::default()).unwrap();

    let in_a = res.collection_instance_create(a, &info).unwrap();
    let in_b = res.collection_instance_create(b, &info).unwrap();
    assert_eq!(res.live_instance_count(), 2);

    res.collection_dispose(a);
    assert!(res.instance(in_a).is_none());
    assert!(res.instance(in_b).is_some());
    assert_eq!(res.live_instance_count(), 1);

    // Referenced resources are untouched; they belong to their creator
    assert!(res.geometry_data(info.geometry_data).is_some());
    assert!(res.appearance(info.appearance).is_some());

    // Disposing again is a no-op
    res.collection_dispose(a);
    assert_eq!(res.live_instance_count(), 1);
}

#[test]
fn instance_dispose_is_idempotent_and_keeps_resources() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let collection = res.collection_create(&CollectionInfo::default()).unwrap();
    let instance = res.collection_instance_create(collection, &info).unwrap();

    res.collection_instance_dispose(collection, instance);
    res.collection_instance_dispose(collection, instance);

    assert!(res.instance(instance).is_none());
    assert_eq!(res.collection(collection).unwrap().len(), 0);
    assert!(res.geometry_data(info.geometry_data).is_some());
}

#[test]
fn instance_dispose_against_foreign_collection_is_ignored() {
    let mut res = manager();
    let info = make_refs(&mut res);
    let a = res.collection_create(&CollectionInfo::default()).unwrap();
    let b = res.collection_create(&CollectionInfo::default()).unwrap();
    let instance = res.collection_instance_create(a, &info).unwrap();

    res.collection_instance_dispose(b, instance);
    assert!(res.instance(instance).is_some());
    assert_eq!(res.collection(a).unwrap().len(), 1);
}

// ============================================================================
// Batch hand-off
// ============================================================================

#[derive(Debug, Default)]
struct BackendLog {
    batches: Vec<(CollectionHandle, Option<ContextId>, Vec<InstanceBinding>)>,
    view_adds: Vec<(ViewId, CollectionHandle)>,
    disposed: Vec<CollectionHandle>,
}

/// Records the collection-level notifications for later inspection.
struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
}

impl RenderBackend for RecordingBackend {
    fn collection_finalized(
        &mut self,
        handle: CollectionHandle,
        context: Option<ContextId>,
        batch: &[InstanceBinding],
    ) {
        self.log
            .borrow_mut()
            .batches
            .push((handle, context, batch.to_vec()));
    }

    fn collection_disposed(&mut self, handle: CollectionHandle) {
        self.log.borrow_mut().disposed.push(handle);
    }

    fn view_add_collection(&mut self, view: ViewId, collection: CollectionHandle) {
        self.log.borrow_mut().view_adds.push((view, collection));
    }
}

#[test]
fn finalize_hands_ordered_batch_to_backend_and_attaches_view() {
    let log = Rc::new(RefCell::new(BackendLog::default()));
    let mut res = ResourceManager::new(
        Box::new(RecordingBackend { log: Rc::clone(&log) }),
        &SceneLimits::default(),
    );

    let info = make_refs(&mut res);
    let collection = res.collection_create(&CollectionInfo::default()).unwrap();
    let first = res.collection_instance_create(collection, &info).unwrap();
    let second = res.collection_instance_create(collection, &info).unwrap();

    let view = ViewId(3);
    res.collection_finalize(collection, Some(ContextId(1)), Some(view))
        .unwrap();

    let log = log.borrow();
    assert_eq!(log.batches.len(), 1);
    let (handle, context, batch) = &log.batches[0];
    assert_eq!(*handle, collection);
    assert_eq!(*context, Some(ContextId(1)));
    // Insertion order is preserved in the frozen batch
    assert_eq!(
        batch.iter().map(|b| b.instance).collect::<Vec<_>>(),
        vec![first, second]
    );
    assert_eq!(log.view_adds, vec![(view, collection)]);

    assert_eq!(res.collection(collection).unwrap().views(), &[view]);
}

#[test]
fn dispose_notifies_backend_once() {
    let log = Rc::new(RefCell::new(BackendLog::default()));
    let mut res = ResourceManager::new(
        Box::new(RecordingBackend { log: Rc::clone(&log) }),
        &SceneLimits::default(),
    );

    let collection = res.collection_create(&CollectionInfo::default()).unwrap();
    res.collection_dispose(collection);
    res.collection_dispose(collection);

    assert_eq!(log.borrow().disposed, vec![collection]);
}
