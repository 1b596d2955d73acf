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

//! The light packer.
//!
//! Flattens the frame's visible lights into the four parallel GPU arrays the
//! lighting shader reads. The arrays are rebuilt from scratch every frame;
//! indexing is dense over the visible-light list, in order.

use candela_core::light::{LightKind, VisibleLight};
use candela_core::math::{Vec3, EPSILON};

/// Ratio of the empirical inner-cone penumbra heuristic: the inner
/// half-angle's tangent is `(64 - 18) / 64` of the outer's. Preserved as an
/// empirical constant, not physically derived.
const INNER_TAN_RATIO: f32 = (64.0 - 18.0) / 64.0;

/// The visible lights encoded as parallel GPU arrays.
///
/// All four arrays have the same length, one element per visible light.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedLights {
    /// World positions (w = 1), or negated travel directions for
    /// directional lights (w = 0).
    pub positions: Vec<[f32; 4]>,
    /// Linear colors with pre-multiplied intensity.
    pub colors: Vec<[f32; 4]>,
    /// Attenuation encodings: x = inverse-square range, z = angular falloff
    /// scale, w = angular falloff bias, or 1 for no angular falloff.
    pub attenuations: Vec<[f32; 4]>,
    /// Negated spot directions (w = 0); zero for non-spot lights.
    pub spot_directions: Vec<[f32; 4]>,
}

impl PackedLights {
    /// Encodes `lights` into fresh arrays.
    pub fn pack(lights: &[VisibleLight]) -> Self {
        let mut packed = Self {
            positions: Vec::with_capacity(lights.len()),
            colors: Vec::with_capacity(lights.len()),
            attenuations: Vec::with_capacity(lights.len()),
            spot_directions: Vec::with_capacity(lights.len()),
        };
        for light in lights {
            let (position, attenuation, spot_direction) = match light.kind {
                LightKind::Directional => {
                    (to_vec4(-light.forward(), 0.0), [0.0, 0.0, 0.0, 1.0], [0.0; 4])
                }
                LightKind::Point => (
                    to_vec4(light.position(), 1.0),
                    [inverse_square_range(light.range), 0.0, 0.0, 1.0],
                    [0.0; 4],
                ),
                LightKind::Spot => {
                    let outer = 0.5 * light.spot_angle;
                    let outer_cos = outer.cos();
                    let inner_cos = (INNER_TAN_RATIO * outer.tan()).atan().cos();
                    let angle_range = (inner_cos - outer_cos).max(EPSILON);
                    (
                        to_vec4(light.position(), 1.0),
                        [
                            inverse_square_range(light.range),
                            0.0,
                            1.0 / angle_range,
                            -outer_cos / angle_range,
                        ],
                        to_vec4(-light.forward(), 0.0),
                    )
                }
            };
            packed.positions.push(position);
            packed.colors.push(light.color.to_vec4().to_array());
            packed.attenuations.push(attenuation);
            packed.spot_directions.push(spot_direction);
        }
        packed
    }

    /// The number of packed lights.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no lights were packed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[inline]
fn to_vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[inline]
fn inverse_square_range(range: f32) -> f32 {
    1.0 / (range * range).max(EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use candela_core::math::LinearRgba;

    fn directional(forward: Vec3) -> VisibleLight {
        VisibleLight::with_pose(LightKind::Directional, Vec3::ZERO, forward)
    }

    #[test]
    fn test_directional_encoding() {
        let packed = PackedLights::pack(&[directional(Vec3::new(0.0, -1.0, 0.0))]);
        assert_eq!(packed.len(), 1);
        assert_eq!(packed.positions[0], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(packed.attenuations[0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(packed.spot_directions[0], [0.0; 4]);
    }

    #[test]
    fn test_point_encoding() {
        let light = VisibleLight {
            kind: LightKind::Point,
            range: 10.0,
            ..VisibleLight::with_pose(LightKind::Point, Vec3::new(1.0, 2.0, 3.0), Vec3::Z)
        };
        let packed = PackedLights::pack(&[light]);
        assert_eq!(packed.positions[0], [1.0, 2.0, 3.0, 1.0]);
        assert_relative_eq!(packed.attenuations[0][0], 0.01, epsilon = 1e-6);
        assert_eq!(packed.attenuations[0][3], 1.0);
        assert_eq!(packed.spot_directions[0], [0.0; 4]);
    }

    #[test]
    fn test_spot_encoding() {
        let light = VisibleLight {
            kind: LightKind::Spot,
            range: 5.0,
            spot_angle: 60.0_f32.to_radians(),
            ..VisibleLight::with_pose(LightKind::Spot, Vec3::new(0.0, 4.0, 0.0), -Vec3::Y)
        };
        let packed = PackedLights::pack(&[light]);
        assert_eq!(packed.positions[0], [0.0, 4.0, 0.0, 1.0]);
        assert_eq!(packed.spot_directions[0], [0.0, 1.0, 0.0, 0.0]);

        let outer = 30.0_f32.to_radians();
        let outer_cos = outer.cos();
        let inner_cos = ((46.0 / 64.0) * outer.tan()).atan().cos();
        let angle_range = inner_cos - outer_cos;
        assert_relative_eq!(packed.attenuations[0][0], 1.0 / 25.0, epsilon = 1e-6);
        assert_relative_eq!(
            packed.attenuations[0][2],
            1.0 / angle_range,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            packed.attenuations[0][3],
            -outer_cos / angle_range,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_zero_range_guard() {
        let light = VisibleLight {
            kind: LightKind::Point,
            range: 0.0,
            ..Default::default()
        };
        let packed = PackedLights::pack(&[light]);
        assert!(packed.attenuations[0][0].is_finite());
    }

    #[test]
    fn test_zero_spot_angle_guard() {
        let light = VisibleLight {
            kind: LightKind::Spot,
            spot_angle: 0.0,
            ..Default::default()
        };
        let packed = PackedLights::pack(&[light]);
        assert!(packed.attenuations[0][2].is_finite());
        assert!(packed.attenuations[0][3].is_finite());
    }

    #[test]
    fn test_colors_carried_verbatim() {
        let light = VisibleLight {
            color: LinearRgba::new(2.0, 0.5, 0.25, 1.0),
            ..Default::default()
        };
        let packed = PackedLights::pack(&[light]);
        assert_eq!(packed.colors[0], [2.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_pack_is_deterministic() {
        let lights = vec![
            directional(Vec3::new(1.0, -1.0, 0.0)),
            VisibleLight {
                kind: LightKind::Spot,
                ..VisibleLight::with_pose(LightKind::Spot, Vec3::X, Vec3::Z)
            },
        ];
        assert_eq!(PackedLights::pack(&lights), PackedLights::pack(&lights));
    }

    #[test]
    fn test_empty_input() {
        let packed = PackedLights::pack(&[]);
        assert!(packed.is_empty());
        assert!(packed.colors.is_empty());
    }
}
