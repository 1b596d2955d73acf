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

//! The pipeline's configuration surface.
//!
//! Everything a host (or a RON settings file) can tune: batching flags,
//! shadow map resolution, shadow draw distance, and the directional cascade
//! setup. The surface is deliberately small; per-light knobs live on
//! [`candela_core::VisibleLight`] instead.

use candela_core::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The square per-layer resolution of the shadow atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowMapSize {
    /// 256 x 256 texels per layer.
    Size256,
    /// 512 x 512 texels per layer.
    Size512,
    /// 1024 x 1024 texels per layer.
    #[default]
    Size1024,
    /// 2048 x 2048 texels per layer.
    Size2048,
    /// 4096 x 4096 texels per layer.
    Size4096,
}

impl ShadowMapSize {
    /// The resolution in texels.
    #[inline]
    pub const fn texels(&self) -> u32 {
        match self {
            ShadowMapSize::Size256 => 256,
            ShadowMapSize::Size512 => 512,
            ShadowMapSize::Size1024 => 1024,
            ShadowMapSize::Size2048 => 2048,
            ShadowMapSize::Size4096 => 4096,
        }
    }
}

/// How directional shadow maps are split into cascades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CascadeSetup {
    /// Directional lights cast no shadows at all.
    Off,
    /// One cascade covering the whole shadow distance.
    One,
    /// Two cascades; `split` is the normalized breakpoint between them.
    Two {
        /// Normalized distance of the near/far breakpoint, in (0, 1).
        split: f32,
    },
    /// Four cascades tiled 2x2 per atlas slice.
    Four {
        /// Normalized breakpoints between consecutive cascades, ascending.
        splits: [f32; 3],
    },
}

impl Default for CascadeSetup {
    fn default() -> Self {
        CascadeSetup::Four {
            splits: [0.067, 0.2, 0.467],
        }
    }
}

impl CascadeSetup {
    /// The number of cascades a directional light renders.
    #[inline]
    pub const fn count(&self) -> u32 {
        match self {
            CascadeSetup::Off => 0,
            CascadeSetup::One => 1,
            CascadeSetup::Two { .. } => 2,
            CascadeSetup::Four { .. } => 4,
        }
    }

    /// The normalized split fractions handed to the host's cascade query,
    /// unused components zero. The single-cascade setup passes a full-range
    /// unit fraction.
    pub fn split_fractions(&self) -> Vec3 {
        match self {
            CascadeSetup::Off => Vec3::ZERO,
            CascadeSetup::One => Vec3::X,
            CascadeSetup::Two { split } => Vec3::new(*split, 0.0, 0.0),
            CascadeSetup::Four { splits } => Vec3::new(splits[0], splits[1], splits[2]),
        }
    }
}

/// An invalid configuration value.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// The shadow draw distance must be positive.
    #[error("shadow distance must be positive, got {0}")]
    NonPositiveShadowDistance(f32),
    /// A cascade split fraction fell outside (0, 1) or out of order.
    #[error("cascade split fractions must be ascending within (0, 1): {0:?}")]
    InvalidSplitFractions(Vec<f32>),
}

/// The full configuration surface of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Allow the host to dynamically batch small meshes.
    pub dynamic_batching: bool,
    /// Allow the host to instance identical meshes.
    pub gpu_instancing: bool,
    /// Per-layer resolution of the shadow atlas.
    pub shadow_map_size: ShadowMapSize,
    /// Maximum distance shadows are drawn at, in world units.
    pub shadow_distance: f32,
    /// Directional cascade configuration.
    pub cascades: CascadeSetup,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            dynamic_batching: true,
            gpu_instancing: true,
            shadow_map_size: ShadowMapSize::default(),
            shadow_distance: 100.0,
            cascades: CascadeSetup::default(),
        }
    }
}

impl PipelineSettings {
    /// Checks the settings for values the pipeline cannot render with.
    ///
    /// # Errors
    ///
    /// [`SettingsError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.shadow_distance <= 0.0 {
            return Err(SettingsError::NonPositiveShadowDistance(
                self.shadow_distance,
            ));
        }
        let fractions: &[f32] = match &self.cascades {
            CascadeSetup::Off | CascadeSetup::One => &[],
            CascadeSetup::Two { split } => std::slice::from_ref(split),
            CascadeSetup::Four { splits } => splits,
        };
        let mut previous = 0.0f32;
        for &f in fractions {
            if f <= previous || f >= 1.0 {
                return Err(SettingsError::InvalidSplitFractions(fractions.to_vec()));
            }
            previous = f;
        }
        Ok(())
    }

    /// Parses settings from a RON string.
    ///
    /// # Errors
    ///
    /// The `ron` deserialization error verbatim; validation is separate.
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Serializes the settings as RON.
    ///
    /// # Errors
    ///
    /// The `ron` serialization error verbatim.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
