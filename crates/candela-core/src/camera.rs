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

//! The per-camera view snapshot the orchestrator renders from.

use crate::math::LinearRgba;

/// What the camera's render target is cleared to before the geometry passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearFlags {
    /// Clear depth; the sky pass repaints every color texel anyway.
    #[default]
    Skybox,
    /// Clear depth and color to the camera's background color.
    Color,
    /// Clear depth only, leaving stale color in place.
    Depth,
    /// Clear nothing.
    Nothing,
}

impl ClearFlags {
    /// Whether the depth buffer is cleared under this policy.
    #[inline]
    pub fn clears_depth(&self) -> bool {
        !matches!(self, ClearFlags::Nothing)
    }

    /// Whether the color buffer is cleared under this policy.
    #[inline]
    pub fn clears_color(&self) -> bool {
        matches!(self, ClearFlags::Color)
    }
}

/// A snapshot of one camera for one frame.
///
/// The pipeline never owns cameras; the host hands it one of these per
/// `render` call, alongside the culler that understands the same camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Distance to the far clip plane; clamps the shadow draw distance.
    pub far_clip: f32,
    /// The clear policy for this camera's target.
    pub clear_flags: ClearFlags,
    /// Background color in sRGB as authored; converted to linear at clear.
    pub background: LinearRgba,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            far_clip: 1000.0,
            clear_flags: ClearFlags::default(),
            background: LinearRgba::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_policies() {
        assert!(ClearFlags::Skybox.clears_depth());
        assert!(!ClearFlags::Skybox.clears_color());
        assert!(ClearFlags::Color.clears_color());
        assert!(ClearFlags::Depth.clears_depth());
        assert!(!ClearFlags::Nothing.clears_depth());
        assert!(!ClearFlags::Nothing.clears_color());
    }
}
