// Copyright 2026 the candela authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounding volumes used by shadow-caster queries.

use super::vector::Vec3;
use super::EPSILON;

/// An axis-aligned bounding box.
///
/// The host's shadow-caster bounds query returns one of these per light; a
/// degenerate box means no geometry casts into the light's frustum and the
/// planner skips the light entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Aabb {
    /// The corner with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from two corner points.
    ///
    /// The corners are reordered component-wise so `min` is always the
    /// smaller corner regardless of argument order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates an `Aabb` from a center point and half-extents.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::from_min_max(center - half_extents, center + half_extents)
    }

    /// Returns the extent of the box along each axis.
    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns `true` if the box encloses no volume.
    ///
    /// A box collapsed to a point or a plane still rasterizes nothing as a
    /// shadow caster, so any zero (or negative) axis extent counts.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let e = self.extents();
        e.x < EPSILON || e.y < EPSILON || e.z < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_min_max_reorders_corners() {
        let b = Aabb::from_min_max(Vec3::new(1.0, -1.0, 5.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_point_box_is_degenerate() {
        let b = Aabb::from_min_max(Vec3::ZERO, Vec3::ZERO);
        assert!(b.is_degenerate());
    }

    #[test]
    fn test_flat_box_is_degenerate() {
        let b = Aabb::from_min_max(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
        assert!(b.is_degenerate());
    }

    #[test]
    fn test_solid_box_is_not_degenerate() {
        let b = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        assert!(!b.is_degenerate());
    }
}
