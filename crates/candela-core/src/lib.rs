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

//! # Candela Core
//!
//! Foundational crate containing the math primitives, light types, and host
//! interface contracts shared by the candela render-pipeline stages.
//!
//! The pipeline itself never talks to a graphics API directly. Everything it
//! needs from the host engine (scene culling, shadow-matrix computation,
//! GPU resource allocation, command recording, and global shader bindings)
//! is expressed as the narrow `dyn` traits in [`traits`], so the per-frame
//! stages in `candela-passes` stay engine-agnostic and testable against
//! mock hosts.

#![warn(missing_docs)]

pub mod camera;
pub mod error;
pub mod light;
pub mod math;
pub mod traits;

pub use camera::{CameraView, ClearFlags};
pub use error::{RenderError, ResourceError};
pub use light::{LightKind, ShadowMode, VisibleLight};
