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

//! Shadow-space matrix derivation.
//!
//! Builds the matrix that maps a world-space point directly into shadow-map
//! texture coordinates (xy in `[0, 1]`, z in the depth-buffer convention),
//! and the tile matrix that remaps a full-slice result into one quadrant of
//! the 2x2 cascade atlas. The same derivation is applied to every light and
//! cascade; there are no per-light precision adjustments.

use candela_core::math::{Mat4, Vec4};

/// Derives the world-to-shadow-texture matrix for one shadow render.
///
/// The host computes shadow projections in natural depth convention
/// (near = 0, far = 1). When the target depth buffer is reversed,
/// `reversed_z` negates row 2 of the projection before composing, so the
/// sampled depth matches what the shadow pass wrote.
pub fn world_to_shadow_matrix(view: &Mat4, projection: &Mat4, reversed_z: bool) -> Mat4 {
    let mut projection = *projection;
    if reversed_z {
        for col in &mut projection.cols {
            col.z = -col.z;
        }
    }
    // Clip space [-1, 1] into texture space [0, 1].
    let scale_offset = Mat4::from_cols(
        Vec4::new(0.5, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.5, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.5, 0.0),
        Vec4::new(0.5, 0.5, 0.5, 1.0),
    );
    scale_offset * projection * *view
}

/// The matrix remapping a full-slice `[0, 1]` result into the quadrant at
/// `tile_offset` (column, row) of a 2x2 atlas slice.
///
/// Left-multiply onto a [`world_to_shadow_matrix`] result.
pub fn tile_matrix(tile_offset: (u32, u32)) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(0.5, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 0.5, 0.0, 0.0),
        Vec4::Z,
        Vec4::new(
            tile_offset.0 as f32 * 0.5,
            tile_offset.1 as f32 * 0.5,
            0.0,
            1.0,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use candela_core::math::Vec3;

    fn shadow_view_projection() -> (Mat4, Mat4) {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
        )
        .unwrap();
        let projection = Mat4::orthographic_rh_zo(-5.0, 5.0, -5.0, 5.0, 0.1, 20.0);
        (view, projection)
    }

    #[test]
    fn test_world_origin_maps_to_texture_center() {
        let (view, projection) = shadow_view_projection();
        let m = world_to_shadow_matrix(&view, &projection, false);
        let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x / p.w, 0.5, epsilon = 1e-5);
        assert_relative_eq!(p.y / p.w, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_reversed_z_flips_depth() {
        let (view, projection) = shadow_view_projection();
        let natural = world_to_shadow_matrix(&view, &projection, false);
        let reversed = world_to_shadow_matrix(&view, &projection, true);
        let p = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let a = natural * p;
        let b = reversed * p;
        // xy are untouched, z mirrors around 0.5 after the offset.
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z / a.w + b.z / b.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_tile_matrices_partition_unit_square() {
        let offsets = [(0u32, 0u32), (1, 0), (0, 1), (1, 1)];
        for &(col, row) in &offsets {
            let m = tile_matrix((col, row));
            let lo = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
            let hi = m * Vec4::new(1.0, 1.0, 0.0, 1.0);
            assert_relative_eq!(lo.x, col as f32 * 0.5, epsilon = 1e-6);
            assert_relative_eq!(lo.y, row as f32 * 0.5, epsilon = 1e-6);
            assert_relative_eq!(hi.x, col as f32 * 0.5 + 0.5, epsilon = 1e-6);
            assert_relative_eq!(hi.y, row as f32 * 0.5 + 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_frustum_corners_land_in_quadrant() {
        let (view, projection) = shadow_view_projection();
        for &(col, row) in &[(0u32, 0u32), (1, 0), (0, 1), (1, 1)] {
            let m = tile_matrix((col, row)) * world_to_shadow_matrix(&view, &projection, false);
            let inverse_vp = (projection * view).inverse().unwrap();
            // The 8 clip-space frustum corners, pulled back to world space.
            for &x in &[-1.0f32, 1.0] {
                for &y in &[-1.0f32, 1.0] {
                    for &z in &[0.0f32, 1.0] {
                        let world = inverse_vp * Vec4::new(x, y, z * 2.0 - 1.0, 1.0);
                        let world = world / world.w;
                        let shadow = m * Vec4::new(world.x, world.y, world.z, 1.0);
                        let u = shadow.x / shadow.w;
                        let v = shadow.y / shadow.w;
                        let (u_min, v_min) = (col as f32 * 0.5, row as f32 * 0.5);
                        assert!(u >= u_min - 1e-4 && u <= u_min + 0.5 + 1e-4);
                        assert!(v >= v_min - 1e-4 && v <= v_min + 0.5 + 1e-4);
                    }
                }
            }
        }
    }
}
