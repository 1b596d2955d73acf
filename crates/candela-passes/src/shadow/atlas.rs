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

//! The shadow atlas renderer.
//!
//! Rasterizes depth-only geometry into the shared texture array, one layer
//! per visible light, with sub-rectangle viewports per cascade. Tile
//! neighbors bleed through linear filtering at tile edges, so each cascade
//! draw is scissored 4 texels inside its tile.

use candela_core::light::VisibleLight;
use candela_core::traits::{CommandEncoder, Rect, TextureId};

use crate::shadow::planner::ShadowPlan;

/// Margin, in texels, scissored off every cascade tile edge.
const TILE_SCISSOR_MARGIN: f32 = 4.0;

/// The frame's shadow atlas: a square depth texture array, one layer per
/// visible light. Non-casting lights reserve an unused layer; uniformity
/// over memory.
///
/// Allocation and release are owned by the frame orchestrator's resource
/// guard; this type only records the handle and geometry.
#[derive(Debug, Clone, Copy)]
pub struct ShadowAtlas {
    /// The depth texture array handle.
    pub texture: TextureId,
    /// Width and height of every layer, in texels.
    pub size: u32,
    /// Number of array layers.
    pub layers: u32,
}

impl ShadowAtlas {
    /// Records the shadow pass for every planned light.
    ///
    /// Per light: bind its layer as the depth target (which clears it),
    /// then for each present cascade set the tile viewport and inset
    /// scissor, bind the cascade matrices and the light's depth bias, and
    /// issue the filtered caster draw. Scissor and bias state are reset
    /// once at the end.
    pub fn render(
        &self,
        encoder: &mut dyn CommandEncoder,
        plan: &ShadowPlan,
        lights: &[VisibleLight],
    ) {
        for (light_index, slot) in plan.lights.iter().enumerate() {
            let Some(shadow_light) = slot else {
                continue;
            };
            encoder.set_shadow_target(self.texture, light_index as u32);
            let tile = shadow_light.tile_size as f32;
            for cascade in shadow_light.cascades.iter().flatten() {
                let viewport = Rect::new(
                    cascade.tile_offset.0 as f32 * tile,
                    cascade.tile_offset.1 as f32 * tile,
                    tile,
                    tile,
                );
                encoder.set_viewport(viewport);
                encoder.enable_scissor(viewport.inset(TILE_SCISSOR_MARGIN));
                encoder.set_view_projection(&cascade.split.view, &cascade.split.projection);
                encoder.set_shadow_bias(lights[light_index].shadow_bias);
                encoder.draw_shadow_casters(light_index, &cascade.split);
            }
        }
        encoder.set_shadow_bias(0.0);
        encoder.disable_scissor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candela_core::camera::CameraView;
    use candela_core::light::{LightKind, ShadowMode};
    use candela_core::math::{LinearRgba, Mat4, Vec3, Vec4};
    use candela_core::traits::{DrawFlags, ShadowSplit};

    use crate::settings::{PipelineSettings, ShadowMapSize};
    use crate::shadow::planner::{ShadowCascade, ShadowLight};

    #[derive(Debug, PartialEq)]
    enum Command {
        Target(u32),
        Viewport(Rect),
        Scissor(Rect),
        ScissorOff,
        Bias(f32),
        Draw(usize),
    }

    #[derive(Default)]
    struct RecordingEncoder {
        commands: Vec<Command>,
    }

    impl CommandEncoder for RecordingEncoder {
        fn set_shadow_target(&mut self, _atlas: TextureId, layer: u32) {
            self.commands.push(Command::Target(layer));
        }
        fn set_viewport(&mut self, rect: Rect) {
            self.commands.push(Command::Viewport(rect));
        }
        fn enable_scissor(&mut self, rect: Rect) {
            self.commands.push(Command::Scissor(rect));
        }
        fn disable_scissor(&mut self) {
            self.commands.push(Command::ScissorOff);
        }
        fn set_view_projection(&mut self, _view: &Mat4, _projection: &Mat4) {}
        fn set_shadow_bias(&mut self, bias: f32) {
            self.commands.push(Command::Bias(bias));
        }
        fn draw_shadow_casters(&mut self, light_index: usize, _split: &ShadowSplit) {
            self.commands.push(Command::Draw(light_index));
        }
        fn setup_camera(&mut self, _camera: &CameraView) {}
        fn clear_render_target(&mut self, _depth: bool, _color: bool, _color_value: LinearRgba) {}
        fn draw_opaque(&mut self, _flags: DrawFlags) {}
        fn draw_skybox(&mut self) {}
        fn draw_transparent(&mut self, _flags: DrawFlags) {}
    }

    fn cascade(offset: (u32, u32)) -> Option<ShadowCascade> {
        Some(ShadowCascade {
            split: ShadowSplit {
                view: Mat4::IDENTITY,
                projection: Mat4::IDENTITY,
                culling_sphere: Vec4::ZERO,
            },
            world_to_shadow: Mat4::IDENTITY,
            tile_offset: offset,
        })
    }

    fn atlas(size: u32, layers: u32) -> ShadowAtlas {
        ShadowAtlas {
            texture: TextureId(7),
            size,
            layers,
        }
    }

    #[test]
    fn test_four_cascade_light_draws_into_each_quadrant() {
        let plan = ShadowPlan {
            lights: vec![Some(ShadowLight {
                tile_size: 1024,
                cascades: vec![
                    cascade((0, 0)),
                    cascade((1, 0)),
                    cascade((0, 1)),
                    cascade((1, 1)),
                ],
                strength: 1.0,
            })],
            ..Default::default()
        };
        let light = VisibleLight {
            shadow_mode: ShadowMode::Soft,
            shadow_bias: 0.002,
            ..Default::default()
        };
        let mut encoder = RecordingEncoder::default();
        atlas(2048, 1).render(&mut encoder, &plan, &[light]);

        assert_eq!(encoder.commands[0], Command::Target(0));
        let viewports: Vec<_> = encoder
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Viewport(r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(
            viewports,
            vec![
                Rect::new(0.0, 0.0, 1024.0, 1024.0),
                Rect::new(1024.0, 0.0, 1024.0, 1024.0),
                Rect::new(0.0, 1024.0, 1024.0, 1024.0),
                Rect::new(1024.0, 1024.0, 1024.0, 1024.0),
            ]
        );
        assert_eq!(
            encoder.commands[2],
            Command::Scissor(Rect::new(4.0, 4.0, 1016.0, 1016.0))
        );
        assert!(encoder.commands.contains(&Command::Bias(0.002)));
        // Bias reset and scissor disable close the pass.
        let n = encoder.commands.len();
        assert_eq!(encoder.commands[n - 2], Command::Bias(0.0));
        assert_eq!(encoder.commands[n - 1], Command::ScissorOff);
    }

    #[test]
    fn test_empty_cascades_clear_layer_without_draws() {
        let plan = ShadowPlan {
            lights: vec![Some(ShadowLight {
                tile_size: 512,
                cascades: vec![None, None, None, None],
                strength: 0.0,
            })],
            ..Default::default()
        };
        let mut encoder = RecordingEncoder::default();
        atlas(1024, 1).render(&mut encoder, &plan, &[VisibleLight::default()]);
        assert_eq!(encoder.commands[0], Command::Target(0));
        assert!(!encoder.commands.iter().any(|c| matches!(c, Command::Draw(_))));
    }

    #[test]
    fn test_unplanned_lights_get_no_layer_bind() {
        let plan = ShadowPlan {
            lights: vec![None, None],
            ..Default::default()
        };
        let mut encoder = RecordingEncoder::default();
        atlas(1024, 2).render(
            &mut encoder,
            &plan,
            &[VisibleLight::default(), VisibleLight::default()],
        );
        assert!(!encoder.commands.iter().any(|c| matches!(c, Command::Target(_))));
    }

    #[test]
    fn test_spot_viewport_covers_whole_slice() {
        let light = VisibleLight {
            kind: LightKind::Spot,
            shadow_mode: ShadowMode::Hard,
            ..VisibleLight::with_pose(LightKind::Spot, Vec3::ZERO, Vec3::Z)
        };
        let settings = PipelineSettings {
            shadow_map_size: ShadowMapSize::Size1024,
            ..Default::default()
        };
        let plan = ShadowPlan {
            lights: vec![Some(ShadowLight {
                tile_size: settings.shadow_map_size.texels(),
                cascades: vec![cascade((0, 0))],
                strength: 1.0,
            })],
            ..Default::default()
        };
        let mut encoder = RecordingEncoder::default();
        atlas(1024, 1).render(&mut encoder, &plan, &[light]);
        assert_eq!(
            encoder.commands[1],
            Command::Viewport(Rect::new(0.0, 0.0, 1024.0, 1024.0))
        );
    }
}
