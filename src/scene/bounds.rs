//! Bounding Volume
//!
//! An axis-aligned box accumulated from drawable geometry and consumed by
//! the surrounding scene for camera-fit and culling decisions. Points enter
//! in homogeneous coordinates (w-divided on the way in); the box itself
//! tracks min/max corners with w pinned to 1.
//!
//! The default box is *empty* (min = +∞, max = −∞ per axis), so the first
//! `expand_by` establishes a degenerate box at that point.

use glam::{Vec3, Vec4};

/// Axis-aligned bounding box over homogeneous points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vec4,
    max: Vec4,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// The empty box: contains nothing, absorbs any point on first expand.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Vec4::new(f32::INFINITY, f32::INFINITY, f32::INFINITY, 1.0),
            max: Vec4::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY, 1.0),
        }
    }

    #[must_use]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.extend(1.0),
            max: max.extend(1.0),
        }
    }

    #[must_use]
    pub fn min(&self) -> Vec4 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Vec4 {
        self.max
    }

    /// Whether no point has been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain a homogeneous point.
    pub fn expand_by(&mut self, point: Vec4) {
        let p = if point.w == 0.0 || point.w == 1.0 {
            point.truncate()
        } else {
            point.truncate() / point.w
        };
        self.min = self.min.truncate().min(p).extend(1.0);
        self.max = self.max.truncate().max(p).extend(1.0);
    }

    /// Grows the box to contain a Cartesian point.
    pub fn expand_by_point3(&mut self, point: Vec3) {
        self.expand_by(point.extend(1.0));
    }

    /// Grows the box to contain every position in a vertex array.
    pub fn expand_by_positions(&mut self, positions: &[[f32; 3]]) {
        for p in positions {
            self.expand_by_point3(Vec3::from_array(*p));
        }
    }

    /// The smallest box containing both operands.
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.truncate().min(other.min.truncate()).extend(1.0),
            max: self.max.truncate().max(other.max.truncate()).extend(1.0),
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min.truncate() + self.max.truncate()) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max.truncate() - self.min.truncate()
    }

    /// Length of the min-to-max diagonal; zero for the empty box.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.size().length()
    }

    /// Closed-interval containment test. The empty box contains nothing.
    #[must_use]
    pub fn is_inside(&self, point: Vec4) -> bool {
        if self.is_empty() {
            return false;
        }
        let p = if point.w == 0.0 || point.w == 1.0 {
            point.truncate()
        } else {
            point.truncate() / point.w
        };
        p.cmpge(self.min.truncate()).all() && p.cmple(self.max.truncate()).all()
    }

    /// Moves every face inward by `margin` per axis.
    ///
    /// An axis whose extent is smaller than `2 * margin` collapses to its
    /// center, so the result stays a valid (possibly degenerate) box.
    #[must_use]
    pub fn shrink_by(&self, margin: f32) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let mut min = self.min.truncate() + Vec3::splat(margin);
        let mut max = self.max.truncate() - Vec3::splat(margin);
        let center = self.center();
        for i in 0..3 {
            if min[i] > max[i] {
                min[i] = center[i];
                max[i] = center[i];
            }
        }
        BoundingBox {
            min: min.extend(1.0),
            max: max.extend(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_from_empty() {
        let mut bb = BoundingBox::empty();
        assert!(bb.is_empty());

        bb.expand_by(Vec4::new(-1.0, 0.0, 0.0, 1.0));
        bb.expand_by(Vec4::new(1.0, 0.0, 0.0, 1.0));
        bb.expand_by(Vec4::new(0.0, 1.0, 0.0, 1.0));

        assert_eq!(bb.min(), Vec4::new(-1.0, 0.0, 0.0, 1.0));
        assert_eq!(bb.max(), Vec4::new(1.0, 1.0, 0.0, 1.0));
        assert!(!bb.is_empty());
    }

    #[test]
    fn test_expand_divides_by_w() {
        let mut bb = BoundingBox::empty();
        bb.expand_by(Vec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(bb.min().truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_is_inside_closed_interval() {
        let bb = BoundingBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(bb.is_inside(Vec4::new(1.0, 1.0, 1.0, 1.0)));
        assert!(bb.is_inside(Vec4::ZERO.with_w(1.0)));
        assert!(!bb.is_inside(Vec4::new(1.1, 0.0, 0.0, 1.0)));
        assert!(!BoundingBox::empty().is_inside(Vec4::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_shrink_collapses_to_center() {
        let bb = BoundingBox::from_min_max(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 4.0));
        let shrunk = bb.shrink_by(1.0);
        assert_eq!(shrunk.min().truncate(), Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(shrunk.max().truncate(), Vec3::new(3.0, 0.5, 3.0));
    }

    #[test]
    fn test_union_and_diagonal() {
        let a = BoundingBox::from_min_max(Vec3::splat(-1.0), Vec3::ZERO);
        let b = BoundingBox::from_min_max(Vec3::ZERO, Vec3::splat(1.0));
        let u = a.union(&b);
        assert_eq!(u.size(), Vec3::splat(2.0));
        assert!((u.diagonal() - (12.0f32).sqrt()).abs() < 1e-6);
        assert_eq!(BoundingBox::empty().diagonal(), 0.0);
    }
}
