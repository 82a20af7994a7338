//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the output geometry) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — WebP quality (1–100, default 90). Clamped on construction.
//! - [`WebpEncoding`] — Quality plus lossy/lossless mode.
//! - [`PixelFormat`] — Keep the decoded channel layout or force RGBA.
//! - [`ResizeFilter`] / [`RotateInterpolation`] — Resampling choices, named
//!   the way they appear in `image-prep.toml`.
//! - [`ResizeParams`] — Everything a resize needs: source, output, exact target size, encoding.
//! - [`RotateParams`] — Everything a rotation needs: source, output, angle, canvas size, encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Quality setting for WebP encoding (1-100).
///
/// For lossy output this is the usual quality knob. For lossless output
/// libwebp reads it as compression effort: 100 is the smallest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// WebP container settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebpEncoding {
    pub quality: Quality,
    pub lossless: bool,
}

impl WebpEncoding {
    pub fn lossy(quality: Quality) -> Self {
        Self {
            quality,
            lossless: false,
        }
    }

    pub fn lossless(effort: Quality) -> Self {
        Self {
            quality: effort,
            lossless: true,
        }
    }
}

impl fmt::Display for WebpEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.lossless { "lossless" } else { "lossy" };
        write!(f, "webp {} q{}", mode, self.quality.value())
    }
}

/// Pixel format normalization applied after the transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelFormat {
    /// Keep the decoded channel layout (RGB stays RGB, RGBA stays RGBA).
    #[default]
    Preserve,
    /// Always add an alpha channel.
    Rgba,
}

/// Resampling filter for resizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    /// Linear (bilinear) filter.
    Triangle,
    /// Cubic filter (bicubic).
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

/// Interpolation used when sampling a rotated image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotateInterpolation {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
}

/// Parameters for a resize to exact dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub filter: ResizeFilter,
    pub pixel_format: PixelFormat,
    pub encoding: WebpEncoding,
}

/// Parameters for a rotation about the image center.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Counter-clockwise angle in degrees.
    pub degrees: f32,
    /// Output canvas; the rotated image is centered on it.
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub interpolation: RotateInterpolation,
    pub pixel_format: PixelFormat,
    pub encoding: WebpEncoding,
}
