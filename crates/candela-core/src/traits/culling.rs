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

//! Scene culling and shadow-matrix computation queries.

use crate::camera::CameraView;
use crate::light::VisibleLight;
use crate::math::{Aabb, Mat4, Vec3, Vec4};

/// One shadow render computed by the host for a light (and cascade).
///
/// The culling sphere's `w` holds the *unsquared* radius as the host
/// produced it; the planner squares it before upload. It is meaningless for
/// spot splits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSplit {
    /// View matrix of the shadow render.
    pub view: Mat4,
    /// Projection matrix of the shadow render, natural (non-reversed) depth.
    pub projection: Mat4,
    /// Cascade-selection sphere: center in xyz, radius in w.
    pub culling_sphere: Vec4,
}

/// Parameters handed to the host's culling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingParams {
    /// Maximum distance shadows are drawn at, already clamped to the
    /// camera's far clip plane by the orchestrator.
    pub shadow_distance: f32,
}

/// One camera's culling results, alive for a single frame.
///
/// Everything the pipeline knows about the scene flows through this view:
/// the visible lights, the shadow-caster bounds test, and the matrix
/// computation queries the planner delegates to the host.
pub trait CullingView {
    /// The lights that may affect this camera, densely indexed `0..N`.
    fn visible_lights(&self) -> &[VisibleLight];

    /// The number of index-mapped lights, which may exceed the visible
    /// count when the host routes reflection-probe indices through the
    /// same remap table.
    fn mapped_light_count(&self) -> usize;

    /// The per-object light-index remap table, one `i32` per mapped slot.
    fn light_index_map(&self) -> Vec<i32>;

    /// World-space bounds of the geometry casting shadows for the light,
    /// or `None` when nothing casts into its frustum.
    fn shadow_caster_bounds(&self, light_index: usize) -> Option<Aabb>;

    /// Computes one directional cascade's shadow matrices and culling data.
    ///
    /// `split_fractions` are the normalized cascade breakpoints (unused
    /// components zero), `tile_resolution` the cascade's tile size in
    /// texels. Returns `None` when the host cannot produce valid matrices,
    /// e.g. for degenerate caster geometry.
    fn directional_shadow_split(
        &self,
        light_index: usize,
        cascade_index: u32,
        cascade_count: u32,
        split_fractions: Vec3,
        tile_resolution: u32,
        near_plane: f32,
    ) -> Option<ShadowSplit>;

    /// Computes a spot light's single shadow split, or `None` when the
    /// host declines.
    fn spot_shadow_split(&self, light_index: usize) -> Option<ShadowSplit>;
}

/// Produces culling results for a camera.
pub trait SceneCuller {
    /// Culls the scene for `camera`.
    ///
    /// Returns `None` when the camera cannot produce a valid culling
    /// frustum; the orchestrator must then skip the camera entirely,
    /// touching no GPU state.
    fn cull(&mut self, camera: &CameraView, params: &CullingParams)
        -> Option<Box<dyn CullingView + '_>>;
}
