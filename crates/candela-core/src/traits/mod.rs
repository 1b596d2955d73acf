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

//! The narrow host-engine contracts the pipeline is written against.
//!
//! Culling results, command recording, GPU allocation, and global shader
//! binding are irreducible host services; everything here exists so the
//! pipeline can treat them as injected dependencies rather than reimplement
//! them. Hosts implement these traits once; tests implement them with mocks.

mod binding_sink;
mod command_encoder;
mod culling;
mod graphics_device;

pub use binding_sink::{
    BufferBinding, GlobalBindingSink, ScalarBinding, ShaderKeyword, TextureBinding, VectorBinding,
};
pub use command_encoder::{CommandEncoder, DrawFlags, Rect};
pub use culling::{CullingParams, CullingView, SceneCuller, ShadowSplit};
pub use graphics_device::{BufferDescriptor, BufferId, GraphicsDevice, ShadowAtlasDescriptor, TextureId};

/// The bundle of host services one camera render needs.
///
/// Grouping the four seams keeps `CameraRenderer::render` signatures stable
/// and lets the borrow checker treat each service independently.
pub struct FrameHost<'a> {
    /// Produces per-camera culling results.
    pub culler: &'a mut dyn SceneCuller,
    /// Allocates and releases frame-scoped GPU resources.
    pub device: &'a dyn GraphicsDevice,
    /// Records draw and state commands for the frame.
    pub encoder: &'a mut dyn CommandEncoder,
    /// Receives the global shader inputs for the geometry passes.
    pub bindings: &'a mut dyn GlobalBindingSink,
}
