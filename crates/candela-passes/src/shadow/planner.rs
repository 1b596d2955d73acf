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

//! The shadow caster planner.
//!
//! Decides, per visible light, which shadow renders happen this frame:
//! cascade matrices and tile placement for directional lights, the single
//! full-slice render for spot lights, nothing for point lights. The plan is
//! recomputed fully each frame; nothing here persists.
//!
//! Per-light failures never abort the frame. A declined cascade or an empty
//! shadow-caster bounds leaves the cascade slot empty and forces the light's
//! shadow strength to 0 so the shader skips sampling it.

use bytemuck::Zeroable;
use candela_core::light::{LightKind, ShadowMode, VisibleLight};
use candela_core::math::Mat4;
use candela_core::traits::{CullingView, ShadowSplit};

use crate::settings::PipelineSettings;
use crate::shadow::space::{tile_matrix, world_to_shadow_matrix};

/// One planned shadow render: the host's split plus the derived sampling
/// matrix and atlas tile placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCascade {
    /// The host-computed shadow view/projection and culling sphere.
    pub split: ShadowSplit,
    /// World space into this cascade's region of the atlas slice.
    pub world_to_shadow: Mat4,
    /// (column, row) of this cascade's tile within the 2x2 slice grid.
    pub tile_offset: (u32, u32),
}

/// A light's planned shadow renders for the frame.
///
/// Present for every light that requests shadows (and is of a supported
/// kind), even when every cascade was declined; the atlas renderer still
/// clears such a light's layer, and the zeroed strength disables sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLight {
    /// Edge length of each cascade tile, in texels.
    pub tile_size: u32,
    /// One slot per cascade; `None` where the host declined.
    pub cascades: Vec<Option<ShadowCascade>>,
    /// Final shadow strength: the light's own, or 0 if any cascade is empty.
    pub strength: f32,
}

/// One light's row of the cascade offset table, GPU layout.
///
/// Lets the shader locate a light's cascades inside the globally packed
/// matrix and sphere arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct CascadeTableEntry {
    /// Index of the light's first matrix in the packed matrix array.
    pub first_cascade: i32,
    /// Number of consecutive cascade slots the light owns (0 = no shadows).
    pub cascade_count: i32,
    /// Index of the light's first sphere in the packed sphere array.
    pub first_sphere: i32,
    /// Pads the entry to 16 bytes.
    pub pad: i32,
}

/// The frame's complete shadow plan with its packed GPU tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadowPlan {
    /// Per visible light, the planned shadow renders (or `None`).
    pub lights: Vec<Option<ShadowLight>>,
    /// All lights' world-to-shadow matrices, packed end to end. Declined
    /// slots hold identity so table offsets stay contiguous.
    pub matrices: Vec<[[f32; 4]; 4]>,
    /// One table row per visible light.
    pub cascade_table: Vec<CascadeTableEntry>,
    /// Directional cascade culling spheres, radius pre-squared in w.
    pub culling_spheres: Vec<[f32; 4]>,
    /// Per visible light: strength, softness flag, 1/map size, map size.
    pub shadow_settings: Vec<[f32; 4]>,
    /// Whether any light renders soft shadows this frame.
    pub any_soft: bool,
    /// Whether any light renders hard shadows this frame.
    pub any_hard: bool,
    /// Whether any light carries multiple cascades this frame.
    pub any_cascades: bool,
}

impl ShadowPlan {
    /// Plans every visible light's shadow renders and builds the packed
    /// offset tables in one forward pass.
    pub fn plan(
        culling: &dyn CullingView,
        settings: &PipelineSettings,
        reversed_z: bool,
    ) -> Self {
        let map_size = settings.shadow_map_size.texels();
        let lights = culling.visible_lights();
        let mut plan = ShadowPlan::default();
        let mut skipped_points = 0usize;

        for (index, light) in lights.iter().enumerate() {
            let planned = plan_light(culling, settings, reversed_z, index, light, &mut skipped_points);
            let mut table_entry = CascadeTableEntry::zeroed();
            let mut settings_entry =
                [0.0, 0.0, 1.0 / map_size as f32, map_size as f32];

            if let Some(shadow_light) = &planned {
                table_entry.first_cascade = plan.matrices.len() as i32;
                table_entry.cascade_count = shadow_light.cascades.len() as i32;
                table_entry.first_sphere = plan.culling_spheres.len() as i32;
                for slot in &shadow_light.cascades {
                    match slot {
                        Some(cascade) => {
                            plan.matrices.push(cascade.world_to_shadow.to_cols_array_2d());
                            if light.kind == LightKind::Directional {
                                let s = cascade.split.culling_sphere;
                                plan.culling_spheres.push([s.x, s.y, s.z, s.w * s.w]);
                            }
                        }
                        None => {
                            plan.matrices.push(Mat4::IDENTITY.to_cols_array_2d());
                            if light.kind == LightKind::Directional {
                                plan.culling_spheres.push([0.0; 4]);
                            }
                        }
                    }
                }
                settings_entry[0] = shadow_light.strength;
                settings_entry[1] = if light.shadow_mode == ShadowMode::Soft {
                    1.0
                } else {
                    0.0
                };
                if shadow_light.strength > 0.0 {
                    match light.shadow_mode {
                        ShadowMode::Soft => plan.any_soft = true,
                        ShadowMode::Hard => plan.any_hard = true,
                        ShadowMode::None => {}
                    }
                    if shadow_light.cascades.len() > 1 {
                        plan.any_cascades = true;
                    }
                }
            }

            plan.lights.push(planned);
            plan.cascade_table.push(table_entry);
            plan.shadow_settings.push(settings_entry);
        }

        if skipped_points > 0 {
            log::debug!(
                "skipped {skipped_points} point light(s) requesting shadows; \
                 point-light shadow maps are unsupported"
            );
        }
        plan
    }

    /// Whether any planned light has at least one drawable cascade.
    pub fn has_renders(&self) -> bool {
        self.lights
            .iter()
            .flatten()
            .any(|l| l.cascades.iter().any(Option::is_some))
    }
}

fn plan_light(
    culling: &dyn CullingView,
    settings: &PipelineSettings,
    reversed_z: bool,
    index: usize,
    light: &VisibleLight,
    skipped_points: &mut usize,
) -> Option<ShadowLight> {
    if !light.casts_shadows() {
        return None;
    }
    let cascade_count = match light.kind {
        LightKind::Directional => settings.cascades.count(),
        LightKind::Spot => 1,
        LightKind::Point => {
            *skipped_points += 1;
            return None;
        }
    };
    if cascade_count == 0 {
        return None;
    }

    let map_size = settings.shadow_map_size.texels();
    let tile_size = if cascade_count > 1 { map_size / 2 } else { map_size };

    let has_casters = culling
        .shadow_caster_bounds(index)
        .is_some_and(|bounds| !bounds.is_degenerate());
    if !has_casters {
        // Nothing casts into this light's frustum. Keep the plan entry so
        // the atlas layer still gets cleared; strength 0 disables sampling.
        return Some(ShadowLight {
            tile_size,
            cascades: vec![None; cascade_count as usize],
            strength: 0.0,
        });
    }

    let mut cascades = Vec::with_capacity(cascade_count as usize);
    let mut declined = false;
    for cascade_index in 0..cascade_count {
        let split = match light.kind {
            LightKind::Directional => culling.directional_shadow_split(
                index,
                cascade_index,
                cascade_count,
                settings.cascades.split_fractions(),
                tile_size,
                light.shadow_near_plane,
            ),
            LightKind::Spot => culling.spot_shadow_split(index),
            LightKind::Point => unreachable!(),
        };
        match split {
            Some(split) => {
                let tile_offset = if cascade_count > 1 {
                    (cascade_index % 2, cascade_index / 2)
                } else {
                    (0, 0)
                };
                let mut world_to_shadow =
                    world_to_shadow_matrix(&split.view, &split.projection, reversed_z);
                if cascade_count > 1 {
                    world_to_shadow = tile_matrix(tile_offset) * world_to_shadow;
                }
                cascades.push(Some(ShadowCascade {
                    split,
                    world_to_shadow,
                    tile_offset,
                }));
            }
            None => {
                log::warn!("host declined shadow matrices for light {index}, cascade {cascade_index}");
                declined = true;
                cascades.push(None);
            }
        }
    }

    let strength = if declined { 0.0 } else { light.shadow_strength };
    Some(ShadowLight {
        tile_size,
        cascades,
        strength,
    })
}
