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

//! Global shader inputs consumed by the lit geometry passes.

use super::graphics_device::{BufferId, TextureId};

/// The structured-buffer bindings the lighting shader reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferBinding {
    /// Per-light positions (directional lights store the negated forward).
    LightsPositions,
    /// Per-light linear colors.
    LightsColors,
    /// Per-light attenuation encodings.
    LightsAttenuations,
    /// Per-light spot directions (zero for non-spot lights).
    LightsSpotDirections,
    /// Per-object light-index remap table.
    LightsIndices,
    /// Packed world-to-shadow matrices, all lights' cascades end to end.
    WorldToShadowMatrices,
    /// Per-light (first cascade, cascade count, first sphere) offsets.
    CascadeTable,
    /// Packed cascade culling spheres, radius pre-squared.
    CullingSpheres,
    /// Per-light (strength, softness, texel size, map size) vectors.
    ShadowSettings,
}

/// Scalar global inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarBinding {
    /// Number of index-mapped lights this frame.
    LightsCount,
}

/// Vector global inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorBinding {
    /// (1/size, 1/size, size, size) of the shadow atlas.
    ShadowMapSize,
}

/// Texture global inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureBinding {
    /// The shadow atlas texture array.
    ShadowMaps,
}

/// Shader feature keywords toggled per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKeyword {
    /// At least one light renders soft shadows this frame.
    SoftShadows,
    /// At least one light renders hard shadows this frame.
    HardShadows,
    /// At least one light carries multiple cascades this frame.
    Cascades,
}

/// The binding seam to the host's global shader state.
///
/// Zero-length data is expressed by *not* binding the buffer and setting the
/// relevant count or keyword to its off state; sinks never receive empty
/// buffers.
pub trait GlobalBindingSink {
    /// Binds a structured buffer.
    fn set_buffer(&mut self, binding: BufferBinding, buffer: BufferId);

    /// Sets a scalar input.
    fn set_int(&mut self, binding: ScalarBinding, value: i32);

    /// Sets a vector input.
    fn set_vec4(&mut self, binding: VectorBinding, value: [f32; 4]);

    /// Binds a texture input.
    fn set_texture(&mut self, binding: TextureBinding, texture: TextureId);

    /// Enables or disables a shader feature keyword.
    fn set_keyword(&mut self, keyword: ShaderKeyword, enabled: bool);
}
