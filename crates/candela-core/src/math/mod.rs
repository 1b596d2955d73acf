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

//! Mathematics primitives for the lighting and shadow pipeline.
//!
//! This module provides the vector, matrix, color, and bounding-volume types
//! the pipeline stages operate on. Matrices are column-major, compatible with
//! modern graphics APIs. All angles are in **radians**.

/// A small constant for floating-point comparisons and division guards.
///
/// The same epsilon guards every attenuation division in the light packer, so
/// zero-range and zero-angle lights can never produce infinities or NaNs.
pub const EPSILON: f32 = 1e-5;

pub mod color;
pub mod geometry;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::geometry::Aabb;
pub use self::matrix::Mat4;
pub use self::vector::{Vec3, Vec4};

/// Compares two floats for approximate equality using [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
