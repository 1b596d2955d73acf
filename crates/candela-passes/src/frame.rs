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

//! The per-camera frame orchestrator.
//!
//! Sequences culling, shadow planning, the atlas depth pass, light packing,
//! global binding, and the geometry passes for one camera. All per-frame
//! GPU resources are tracked by a scoped guard and released on every exit
//! path, including error propagation.
//!
//! Multiple cameras are rendered by calling [`CameraRenderer::render`] once
//! per camera; each call allocates and releases its own resources, and all
//! command recording is single-threaded.

use std::borrow::Cow;

use candela_core::camera::{CameraView, ClearFlags};
use candela_core::error::{RenderError, ResourceError};
use candela_core::math::LinearRgba;
use candela_core::traits::{
    BufferBinding, BufferDescriptor, BufferId, CullingParams, CullingView, DrawFlags, FrameHost,
    GlobalBindingSink, GraphicsDevice, ScalarBinding, ShaderKeyword, ShadowAtlasDescriptor,
    TextureBinding, TextureId, VectorBinding,
};

use crate::lighting::PackedLights;
use crate::settings::PipelineSettings;
use crate::shadow::{ShadowAtlas, ShadowPlan};

/// Tracks every GPU resource created for one camera's frame and destroys
/// them all when dropped, so early returns and `?` propagation can never
/// leak a frame-scoped allocation.
struct FrameResources<'a> {
    device: &'a dyn GraphicsDevice,
    buffers: Vec<BufferId>,
    textures: Vec<TextureId>,
}

impl<'a> FrameResources<'a> {
    fn new(device: &'a dyn GraphicsDevice) -> Self {
        Self {
            device,
            buffers: Vec::new(),
            textures: Vec::new(),
        }
    }

    fn create_buffer(
        &mut self,
        label: &'static str,
        element_stride: u32,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let id = self.device.create_buffer_with_data(
            &BufferDescriptor {
                label: Some(Cow::Borrowed(label)),
                element_stride,
            },
            data,
        )?;
        self.buffers.push(id);
        Ok(id)
    }

    fn create_shadow_atlas(&mut self, size: u32, layers: u32) -> Result<TextureId, ResourceError> {
        let id = self.device.create_shadow_atlas(&ShadowAtlasDescriptor {
            label: Some(Cow::Borrowed("candela_shadow_atlas")),
            size,
            layers,
        })?;
        self.textures.push(id);
        Ok(id)
    }
}

impl Drop for FrameResources<'_> {
    fn drop(&mut self) {
        for id in self.buffers.drain(..) {
            if let Err(err) = self.device.destroy_buffer(id) {
                log::warn!("failed to destroy frame buffer {id:?}: {err}");
            }
        }
        for id in self.textures.drain(..) {
            if let Err(err) = self.device.destroy_texture(id) {
                log::warn!("failed to destroy frame texture {id:?}: {err}");
            }
        }
    }
}

/// Renders one camera per call against an injected host.
#[derive(Debug, Clone, Copy)]
pub struct CameraRenderer {
    reversed_z: bool,
}

impl CameraRenderer {
    /// Creates a renderer for a host whose depth buffer convention is
    /// `reversed_z` (near = 1, far = 0).
    pub fn new(reversed_z: bool) -> Self {
        Self { reversed_z }
    }

    /// Renders one camera: shadows, lighting tables, then geometry.
    ///
    /// An unrenderable camera (the culler returns `None`) is skipped
    /// cleanly: no GPU state is touched and `Ok(())` is returned.
    ///
    /// # Errors
    ///
    /// [`RenderError`] when a frame-scoped GPU allocation fails. Resources
    /// created before the failure are released before returning.
    pub fn render(
        &self,
        host: &mut FrameHost<'_>,
        camera: &CameraView,
        settings: &PipelineSettings,
    ) -> Result<(), RenderError> {
        let shadow_distance = settings.shadow_distance.min(camera.far_clip);
        let Some(culling) = host
            .culler
            .cull(camera, &CullingParams { shadow_distance })
        else {
            log::debug!("camera produced no culling results, skipping");
            return Ok(());
        };
        let culling = culling.as_ref();

        let mut resources = FrameResources::new(host.device);
        let lights = culling.visible_lights();
        log::debug!(
            "rendering camera: {} visible light(s), shadow distance {shadow_distance}",
            lights.len()
        );

        let plan = ShadowPlan::plan(culling, settings, self.reversed_z);

        // One layer per visible light, casters or not; skipped outright
        // when no light requested shadows this frame.
        let atlas = if plan.lights.iter().all(Option::is_none) {
            None
        } else {
            let size = settings.shadow_map_size.texels();
            let texture = resources.create_shadow_atlas(size, lights.len() as u32)?;
            let atlas = ShadowAtlas {
                texture,
                size,
                layers: lights.len() as u32,
            };
            atlas.render(&mut *host.encoder, &plan, lights);
            Some(atlas)
        };

        let packed = PackedLights::pack(lights);
        bind_globals(
            &mut *host.bindings,
            &mut resources,
            culling,
            &packed,
            &plan,
            atlas.as_ref(),
        )?;

        let encoder = &mut *host.encoder;
        encoder.setup_camera(camera);
        let clear_color = LinearRgba::from_srgb(
            camera.background.r,
            camera.background.g,
            camera.background.b,
            camera.background.a,
        );
        encoder.clear_render_target(
            camera.clear_flags.clears_depth(),
            camera.clear_flags.clears_color(),
            clear_color,
        );

        let flags = DrawFlags {
            dynamic_batching: settings.dynamic_batching,
            gpu_instancing: settings.gpu_instancing,
        };
        encoder.draw_opaque(flags);
        if camera.clear_flags == ClearFlags::Skybox {
            encoder.draw_skybox();
        }
        encoder.draw_transparent(flags);

        drop(resources);
        Ok(())
    }
}

fn bind_globals(
    bindings: &mut dyn GlobalBindingSink,
    resources: &mut FrameResources<'_>,
    culling: &dyn CullingView,
    packed: &PackedLights,
    plan: &ShadowPlan,
    atlas: Option<&ShadowAtlas>,
) -> Result<(), RenderError> {
    bindings.set_int(ScalarBinding::LightsCount, culling.mapped_light_count() as i32);

    if !packed.is_empty() {
        let positions = resources.create_buffer(
            "candela_light_positions",
            16,
            bytemuck::cast_slice(&packed.positions),
        )?;
        bindings.set_buffer(BufferBinding::LightsPositions, positions);
        let colors = resources.create_buffer(
            "candela_light_colors",
            16,
            bytemuck::cast_slice(&packed.colors),
        )?;
        bindings.set_buffer(BufferBinding::LightsColors, colors);
        let attenuations = resources.create_buffer(
            "candela_light_attenuations",
            16,
            bytemuck::cast_slice(&packed.attenuations),
        )?;
        bindings.set_buffer(BufferBinding::LightsAttenuations, attenuations);
        let spot_directions = resources.create_buffer(
            "candela_light_spot_directions",
            16,
            bytemuck::cast_slice(&packed.spot_directions),
        )?;
        bindings.set_buffer(BufferBinding::LightsSpotDirections, spot_directions);
    }

    let index_map = culling.light_index_map();
    if !index_map.is_empty() {
        let indices = resources.create_buffer(
            "candela_light_index_map",
            4,
            bytemuck::cast_slice(&index_map),
        )?;
        bindings.set_buffer(BufferBinding::LightsIndices, indices);
    }

    if !plan.matrices.is_empty() {
        let matrices = resources.create_buffer(
            "candela_world_to_shadow",
            64,
            bytemuck::cast_slice(&plan.matrices),
        )?;
        bindings.set_buffer(BufferBinding::WorldToShadowMatrices, matrices);
    }
    if !plan.cascade_table.is_empty() {
        let table = resources.create_buffer(
            "candela_cascade_table",
            16,
            bytemuck::cast_slice(&plan.cascade_table),
        )?;
        bindings.set_buffer(BufferBinding::CascadeTable, table);
    }
    if !plan.culling_spheres.is_empty() {
        let spheres = resources.create_buffer(
            "candela_culling_spheres",
            16,
            bytemuck::cast_slice(&plan.culling_spheres),
        )?;
        bindings.set_buffer(BufferBinding::CullingSpheres, spheres);
    }
    if !plan.shadow_settings.is_empty() {
        let shadow_settings = resources.create_buffer(
            "candela_shadow_settings",
            16,
            bytemuck::cast_slice(&plan.shadow_settings),
        )?;
        bindings.set_buffer(BufferBinding::ShadowSettings, shadow_settings);
    }

    if let Some(atlas) = atlas {
        bindings.set_texture(TextureBinding::ShadowMaps, atlas.texture);
        let size = atlas.size as f32;
        bindings.set_vec4(
            VectorBinding::ShadowMapSize,
            [1.0 / size, 1.0 / size, size, size],
        );
    }

    bindings.set_keyword(ShaderKeyword::SoftShadows, plan.any_soft);
    bindings.set_keyword(ShaderKeyword::HardShadows, plan.any_hard);
    bindings.set_keyword(ShaderKeyword::Cascades, plan.any_cascades);
    Ok(())
}

impl Default for CameraRenderer {
    /// A renderer assuming a reversed depth buffer, the common convention
    /// on desktop graphics backends.
    fn default() -> Self {
        Self::new(true)
    }
}
