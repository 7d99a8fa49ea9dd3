/// Axis-aligned bounding volumes.
///
/// `AABB` is the 3D world-space box used for frustum tests.
/// `AABB2D` is its footprint on the ground plane (world X/Z), used by the
/// quadtree spatial index.

use glam::{Mat4, Vec2, Vec3};

/// Axis-Aligned Bounding Box (3D)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with half extents `half`.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self { min: center - half, max: center + half }
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Ground-plane footprint: the X/Z projection of this box.
    pub fn footprint(&self) -> AABB2D {
        AABB2D {
            min: Vec2::new(self.min.x, self.min.z),
            max: Vec2::new(self.max.x, self.max.z),
        }
    }
}

/// Axis-aligned rectangle on the ground plane.
///
/// `x` maps to world X, `y` maps to world Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB2D {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB2D {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test, touching edges count as intersecting.
    pub fn intersects(&self, other: &AABB2D) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
    }

    pub fn contains(&self, other: &AABB2D) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
    }

    /// Smallest rectangle enclosing both.
    pub fn union(&self, other: &AABB2D) -> AABB2D {
        AABB2D { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Compute the rectangle of quadrant `index` (0-3).
    ///
    /// Bit layout: bit0 = X, bit1 = Z (0 = low half, 1 = high half).
    pub fn quadrant(&self, index: u8) -> AABB2D {
        let center = self.center();
        AABB2D {
            min: Vec2::new(
                if index & 1 == 0 { self.min.x } else { center.x },
                if index & 2 == 0 { self.min.y } else { center.y },
            ),
            max: Vec2::new(
                if index & 1 == 0 { center.x } else { self.max.x },
                if index & 2 == 0 { center.y } else { self.max.y },
            ),
        }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
