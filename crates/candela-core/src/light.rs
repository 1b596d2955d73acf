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

//! The per-frame visible-light record supplied by the host.
//!
//! The host's culling pass decides which lights can affect the current
//! camera and hands the pipeline one [`VisibleLight`] per survivor. The
//! record is read-only to the pipeline: the light packer flattens it into
//! GPU arrays and the shadow planner decides whether it casts shadows, but
//! neither ever writes back.

use crate::math::{LinearRgba, Mat4, Vec3, Vec4};

/// The kind of a visible light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Sun-like light: parallel rays, no position, no distance falloff.
    Directional,
    /// Omni-directional local light with inverse-square distance falloff.
    Point,
    /// Cone-shaped local light with distance and angular falloff.
    Spot,
}

/// How a light casts shadows, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowMode {
    /// The light casts no shadows; the planner skips it.
    #[default]
    None,
    /// Hard-edged shadows (single shadow-map tap).
    Hard,
    /// Soft shadows (the shader applies percentage-closer filtering).
    Soft,
}

/// A light the host's culling pass determined may affect the current camera.
///
/// The world transform is carried as the light's local-to-world matrix; the
/// packer derives the position from column 3 and the forward direction from
/// column 2, exactly as the host authored them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLight {
    /// What kind of light this is.
    pub kind: LightKind,
    /// The light's local-to-world transform.
    pub local_to_world: Mat4,
    /// Final linear-space color with intensity pre-multiplied by the host.
    pub color: LinearRgba,
    /// Maximum influence distance in world units (point/spot only).
    pub range: f32,
    /// Full outer cone angle in radians (spot only).
    pub spot_angle: f32,
    /// Whether and how the light casts shadows.
    pub shadow_mode: ShadowMode,
    /// Shadow opacity in [0, 1]; 0 disables sampling shader-side.
    pub shadow_strength: f32,
    /// Depth bias applied while rasterizing this light's shadow maps.
    pub shadow_bias: f32,
    /// Near plane used when the host computes this light's shadow matrices.
    pub shadow_near_plane: f32,
}

impl VisibleLight {
    /// The direction the light points, i.e. the direction light travels.
    ///
    /// Column 2 of the local-to-world matrix, not normalized here; hosts
    /// supply orthonormal light transforms.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.local_to_world.get_col(2).truncate()
    }

    /// The light's world-space position (column 3 of the transform).
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.local_to_world.get_col(3).truncate()
    }

    /// Returns `true` if this light wants to cast shadows at all.
    #[inline]
    pub fn casts_shadows(&self) -> bool {
        self.shadow_mode != ShadowMode::None
    }
}

impl Default for VisibleLight {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            local_to_world: Mat4::IDENTITY,
            color: LinearRgba::WHITE,
            range: 10.0,
            spot_angle: 60.0_f32.to_radians(),
            shadow_mode: ShadowMode::None,
            shadow_strength: 1.0,
            shadow_bias: 0.001,
            shadow_near_plane: 0.2,
        }
    }
}

impl VisibleLight {
    /// Convenience constructor for a light at `position` pointing along `forward`.
    ///
    /// Builds an orthonormal basis around `forward`, which must not be zero.
    pub fn with_pose(kind: LightKind, position: Vec3, forward: Vec3) -> Self {
        let f = forward.normalize();
        let up = if f.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
        let right = up.cross(f).normalize();
        let up = f.cross(right);
        Self {
            kind,
            local_to_world: Mat4::from_cols(
                Vec4::from_vec3(right, 0.0),
                Vec4::from_vec3(up, 0.0),
                Vec4::from_vec3(f, 0.0),
                Vec4::from_vec3(position, 1.0),
            ),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_forward_reads_column_two() {
        let light = VisibleLight::with_pose(
            LightKind::Spot,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(light.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_with_pose_builds_orthonormal_basis() {
        let light = VisibleLight::with_pose(
            LightKind::Directional,
            Vec3::ZERO,
            Vec3::new(1.0, -2.0, 0.5),
        );
        let f = light.forward();
        let r = light.local_to_world.get_col(0).truncate();
        let u = light.local_to_world.get_col(1).truncate();
        assert!(approx_eq(f.length(), 1.0));
        assert!(approx_eq(f.dot(r), 0.0));
        assert!(approx_eq(f.dot(u), 0.0));
        assert!(approx_eq(r.dot(u), 0.0));
    }

    #[test]
    fn test_straight_down_light_has_valid_basis() {
        let light = VisibleLight::with_pose(
            LightKind::Directional,
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
        );
        assert!(approx_eq(
            light.local_to_world.get_col(0).truncate().length(),
            1.0
        ));
    }

    #[test]
    fn test_shadow_mode_default_is_none() {
        assert!(!VisibleLight::default().casts_shadows());
        let lit = VisibleLight {
            shadow_mode: ShadowMode::Soft,
            ..Default::default()
        };
        assert!(lit.casts_shadows());
    }
}
