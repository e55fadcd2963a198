//! Scene-level objects
//!
//! Drawables and the bounding-volume type the surrounding scene consumes:
//! - `bounds`: axis-aligned bounding box accumulation
//! - `drawable`: the drawable capability set and its concrete variants

pub mod bounds;
pub mod drawable;

pub use bounds::BoundingBox;
pub use drawable::{
    BenchmarkDrawable, Drawable, DrawableCore, DrawableState, DrawableType, GridDrawable,
    MultiQuadricDrawable, QuadricDrawable, QuadricShape, TriadDrawable, VolumeSliceDrawable,
};
