//! Resource lifecycle layer
//!
//! Composition of handles into instances and collections, the per-kind
//! lifecycle operations, and the backend seam the external renderer plugs
//! into:
//! - `backend`: the [`RenderBackend`] trait and opaque external ids
//! - `collection`: instances, collections and the frozen batch format
//! - `limits`: per-kind pool capacities
//! - `resource_manager`: the owner of everything above

pub mod backend;
pub mod collection;
pub mod limits;
pub mod resource_manager;

pub use backend::{ContextId, NullBackend, RenderBackend, TextureId, ViewId};
pub use collection::{
    Collection, CollectionHandle, CollectionInfo, InstanceBinding, InstanceHandle, InstanceInfo,
    InstanceRecord,
};
pub use limits::SceneLimits;
pub use resource_manager::ResourceManager;
