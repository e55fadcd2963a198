//! Error Types
//!
//! This module defines the error types used throughout the resource layer.
//!
//! # Overview
//!
//! The main error type [`SceneError`] covers every recoverable failure mode:
//! - Handle pool exhaustion
//! - Operations on unknown or stale handles
//! - Malformed creation descriptors
//! - Lifecycle violations (mutating frozen resources or collections)
//!
//! There is no fatal error in this layer. Creation failures are returned to
//! the caller, which aborts its own `init` and remains safely disposable;
//! dispose paths never surface errors at all.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, SceneError>`.

use thiserror::Error;

/// The resource kind an error refers to.
///
/// Carried in error variants so a caller composing several resources can
/// tell which allocation or lookup went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    GeometryData,
    GeometryTopology,
    Appearance,
    SpatialTransform,
    RenderState,
    Instance,
    Collection,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::GeometryData => "geometry data",
            ResourceKind::GeometryTopology => "geometry topology",
            ResourceKind::Appearance => "appearance",
            ResourceKind::SpatialTransform => "spatial transform",
            ResourceKind::RenderState => "render state",
            ResourceKind::Instance => "instance",
            ResourceKind::Collection => "collection",
        };
        f.write_str(name)
    }
}

/// The main error type for the scene resource layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    // ========================================================================
    // Allocation Errors
    // ========================================================================
    /// The handle pool for a resource kind has no free slots left.
    #[error("{kind} pool exhausted ({capacity} handles live)")]
    PoolExhausted {
        /// Resource kind whose pool is full
        kind: ResourceKind,
        /// Configured pool capacity
        capacity: usize,
    },

    // ========================================================================
    // Handle Errors
    // ========================================================================
    /// Operation on a handle that is unknown, stale, or already disposed.
    #[error("{kind} handle not found (stale or never allocated)")]
    HandleNotFound {
        /// Resource kind of the offending handle
        kind: ResourceKind,
    },

    /// Instance creation referenced a handle that is not currently live.
    #[error("instance references a dead {kind} handle")]
    InvalidReference {
        /// Resource kind of the dead reference
        kind: ResourceKind,
    },

    // ========================================================================
    // Descriptor & Update Errors
    // ========================================================================
    /// Creation parameters were internally inconsistent.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// An update region exceeded the resource's allocated extent.
    #[error("update region out of bounds: offset {offset} + len {len} exceeds extent {extent}")]
    OutOfBounds {
        /// Byte offset of the update region
        offset: u64,
        /// Byte length of the update region
        len: u64,
        /// Allocated extent of the target region
        extent: u64,
    },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// Mutation attempted on a geometry-data resource after finalize.
    #[error("{kind} resource is finalized and no longer accepts updates")]
    AlreadyFinalized {
        /// Resource kind that was frozen
        kind: ResourceKind,
    },

    /// Structural change attempted on a collection after finalize.
    #[error("collection is finalized; instances can no longer be added")]
    CollectionFinalized,
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
