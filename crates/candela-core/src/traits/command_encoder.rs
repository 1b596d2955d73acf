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

//! Command recording for the shadow and geometry passes.

use super::culling::ShadowSplit;
use super::graphics_device::TextureId;
use crate::camera::CameraView;
use crate::math::{LinearRgba, Mat4};

/// A viewport or scissor rectangle in texels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns this rectangle shrunk by `margin` texels on every side.
    #[inline]
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }
}

/// Batching options forwarded to the host's geometry draw submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawFlags {
    /// Allow the host to dynamically batch small meshes.
    pub dynamic_batching: bool,
    /// Allow the host to instance identical meshes.
    pub gpu_instancing: bool,
}

/// The command-recording seam to the host.
///
/// All methods record into the host's single command stream for the current
/// camera; nothing here is concurrent. Recording order is the execution
/// order.
pub trait CommandEncoder {
    /// Binds one layer of the shadow atlas as the depth target and clears it.
    fn set_shadow_target(&mut self, atlas: TextureId, layer: u32);

    /// Restricts rasterization to `rect`.
    fn set_viewport(&mut self, rect: Rect);

    /// Enables scissor testing over `rect`.
    fn enable_scissor(&mut self, rect: Rect);

    /// Disables scissor testing.
    fn disable_scissor(&mut self);

    /// Binds the view and projection matrices for subsequent draws.
    fn set_view_projection(&mut self, view: &Mat4, projection: &Mat4);

    /// Sets the depth bias applied while rasterizing shadow casters.
    fn set_shadow_bias(&mut self, bias: f32);

    /// Issues the depth-only draws for every caster the host's shadow
    /// culling admits for `light_index` under `split`.
    fn draw_shadow_casters(&mut self, light_index: usize, split: &ShadowSplit);

    /// Binds the camera's target and per-camera constants.
    fn setup_camera(&mut self, camera: &CameraView);

    /// Clears the camera's target. `color` is linear-space.
    fn clear_render_target(&mut self, clear_depth: bool, clear_color: bool, color: LinearRgba);

    /// Draws the opaque geometry, sorted front-to-back.
    fn draw_opaque(&mut self, flags: DrawFlags);

    /// Draws the sky.
    fn draw_skybox(&mut self);

    /// Draws the transparent geometry, sorted back-to-front.
    fn draw_transparent(&mut self, flags: DrawFlags);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(1024.0, 0.0, 1024.0, 1024.0).inset(4.0);
        assert_eq!(r, Rect::new(1028.0, 4.0, 1016.0, 1016.0));
    }
}
