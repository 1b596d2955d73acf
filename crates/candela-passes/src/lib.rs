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

//! # Candela Passes
//!
//! The per-frame stages of the candela forward-lighting pipeline: light
//! packing, cascaded shadow planning, the shadow atlas depth pass, and the
//! per-camera frame orchestrator that sequences them.
//!
//! All host-engine interaction goes through the trait seams in
//! [`candela_core::traits`]; hand a [`candela_core::traits::FrameHost`] to
//! [`CameraRenderer::render`] once per camera per frame.
//!
//! Point lights participate in lighting but never in shadow mapping; their
//! shadow requests are skipped. Shadow failures (declined cascades, empty
//! caster bounds) are encoded as zeroed shadow strength rather than errors,
//! so a frame always renders.

#![warn(missing_docs)]

pub mod frame;
pub mod lighting;
pub mod settings;
pub mod shadow;

pub use frame::CameraRenderer;
pub use lighting::PackedLights;
pub use settings::{CascadeSetup, PipelineSettings, SettingsError, ShadowMapSize};
pub use shadow::{ShadowAtlas, ShadowPlan};
