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

//! Frame-scoped GPU resource allocation.

use crate::error::ResourceError;
use std::borrow::Cow;
use std::fmt::Debug;

/// An opaque handle to a host-owned GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// An opaque handle to a host-owned GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Describes a structured GPU buffer to be created and filled in one call.
#[derive(Debug, Clone)]
pub struct BufferDescriptor {
    /// A debug label for the buffer.
    pub label: Option<Cow<'static, str>>,
    /// Size in bytes of one element of the buffer.
    pub element_stride: u32,
}

/// Describes the shared shadow atlas: a square depth texture array.
#[derive(Debug, Clone)]
pub struct ShadowAtlasDescriptor {
    /// A debug label for the texture.
    pub label: Option<Cow<'static, str>>,
    /// Width and height of every layer, in texels.
    pub size: u32,
    /// Number of array layers, one per visible light.
    pub layers: u32,
}

/// The allocation seam to the host's graphics device.
///
/// Every resource the pipeline creates through this trait is frame-scoped:
/// created after culling, destroyed before the camera's render call returns.
/// Handles must never be retained across frames.
pub trait GraphicsDevice: Send + Sync + Debug {
    /// Creates a GPU buffer and initializes it with `data`.
    ///
    /// # Errors
    ///
    /// [`ResourceError`] if the host cannot allocate or upload the buffer.
    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError>;

    /// Destroys a GPU buffer.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidHandle`] if the id does not name a live buffer.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    /// Creates the shadow atlas texture array for this frame.
    ///
    /// # Errors
    ///
    /// [`ResourceError`] if the host cannot allocate the texture.
    fn create_shadow_atlas(
        &self,
        descriptor: &ShadowAtlasDescriptor,
    ) -> Result<TextureId, ResourceError>;

    /// Destroys a texture previously created through this trait.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidHandle`] if the id does not name a live texture.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;
}
