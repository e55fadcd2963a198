//! Spatial Transform Records
//!
//! A spatial transform carries an instance's model matrix together with its
//! cached inverse (backends want both: one for positioning, one for normal
//! transformation). Transforms stream: updates are accepted for the whole
//! lifetime of the record and recompute the inverse eagerly.

use glam::Mat4;

/// A spatial-transform resource record.
#[derive(Debug, Clone, Copy)]
pub struct SpatialTransformRecord {
    matrix: Mat4,
    inverse: Mat4,
}

impl Default for SpatialTransformRecord {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl SpatialTransformRecord {
    #[must_use]
    pub fn new(matrix: Mat4) -> Self {
        Self {
            matrix,
            inverse: matrix.inverse(),
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    #[must_use]
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Replaces the model matrix and refreshes the cached inverse.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.inverse = matrix.inverse();
    }
}
