//! Resource Limits
//!
//! Per-kind handle pool capacities for one [`ResourceManager`] instance.
//! The defaults are sized for a typical interactive scene; tests shrink
//! them to exercise exhaustion paths.
//!
//! [`ResourceManager`]: crate::renderer::ResourceManager

/// Pool capacities, one per resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLimits {
    pub geometry_data: usize,
    pub geometry_topology: usize,
    pub appearance: usize,
    pub spatial_transform: usize,
    pub render_state: usize,
    pub instances: usize,
    pub collections: usize,
}

impl Default for SceneLimits {
    fn default() -> Self {
        Self {
            geometry_data: 4096,
            geometry_topology: 1024,
            appearance: 1024,
            spatial_transform: 8192,
            render_state: 256,
            instances: 16384,
            collections: 256,
        }
    }
}
