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

//! Cascaded shadow mapping: matrix derivation, per-frame planning, and the
//! atlas depth pass.

pub mod atlas;
pub mod planner;
pub mod space;

pub use atlas::ShadowAtlas;
pub use planner::{CascadeTableEntry, ShadowCascade, ShadowLight, ShadowPlan};
pub use space::{tile_matrix, world_to_shadow_matrix};
