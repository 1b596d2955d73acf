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

//! Linear-space RGBA colors.

use super::vector::Vec4;

/// An RGBA color in linear space.
///
/// All lighting math operates in linear space. Host-authored colors (camera
/// backgrounds, light colors from an editor) are usually sRGB and must pass
/// through [`LinearRgba::from_srgb`] before they reach the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct LinearRgba {
    /// The red channel.
    pub r: f32,
    /// The green channel.
    pub g: f32,
    /// The blue channel.
    pub b: f32,
    /// The alpha channel.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new color from linear components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque color from linear components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Converts sRGB components into a linear-space color. Alpha is linear.
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
            a,
        }
    }

    /// Returns the channels as a `Vec4` (r, g, b, a).
    #[inline]
    pub const fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for LinearRgba {
    /// Returns opaque white.
    fn default() -> Self {
        Self::WHITE
    }
}

/// Converts one sRGB channel to linear using the piecewise IEC 61966-2-1 curve.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_srgb_conversion_endpoints() {
        let black = LinearRgba::from_srgb(0.0, 0.0, 0.0, 1.0);
        let white = LinearRgba::from_srgb(1.0, 1.0, 1.0, 1.0);
        assert_eq!(black, LinearRgba::BLACK);
        assert!(approx_eq(white.r, 1.0));
    }

    #[test]
    fn test_srgb_midtone_darkens() {
        // sRGB 0.5 falls to roughly 0.214 in linear space.
        let mid = LinearRgba::from_srgb(0.5, 0.5, 0.5, 1.0);
        assert!((mid.g - 0.2140).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_is_untouched() {
        let c = LinearRgba::from_srgb(0.2, 0.4, 0.6, 0.5);
        assert!(approx_eq(c.a, 0.5));
    }
}
