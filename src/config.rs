//! Job configuration module.
//!
//! Handles loading, validating, and merging `image-prep.toml`. Stock defaults
//! reproduce the two original asset jobs; a user file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! input = "public/Projects/Soma/soma_extended.png"
//! output = "public/Projects/Soma/Soma1.webp"
//! target_width = 2800       # Output width; height keeps the aspect ratio
//! filter = "lanczos3"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//! quality = 95              # WebP quality (1-100)
//! lossless = false
//! pixel_format = "rgba"     # preserve | rgba
//! on_error = "propagate"    # propagate | report
//!
//! [rotate]
//! input = "public/Projects/Soma/soma2.png"
//! output = "public/Projects/Soma/Soma2.webp"
//! angle = 135.0             # Degrees, counter-clockwise
//! expand = true             # Grow the canvas instead of clipping corners
//! interpolation = "bicubic" # nearest | bilinear | bicubic
//! quality = 100             # Compression effort when lossless
//! lossless = true
//! pixel_format = "preserve"
//! on_error = "report"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::rust_backend::WEBP_MAX_DIMENSION;
use crate::imaging::{
    PixelFormat, Quality, ResizeConfig, ResizeFilter, RotateConfig, RotateInterpolation,
    WebpEncoding,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "image-prep.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// What a job does when it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Return the error; the process exits non-zero.
    #[default]
    Propagate,
    /// Print the error as a status line and finish normally.
    Report,
}

/// Top-level configuration loaded from `image-prep.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Width-fit resize job.
    pub resize: ResizeJobConfig,
    /// Rotation job.
    pub rotate: RotateJobConfig,
}

/// Settings for the width-fit resize job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeJobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Output width in pixels; height follows the source aspect ratio.
    pub target_width: u32,
    pub filter: ResizeFilter,
    /// WebP quality (1 = worst, 100 = best).
    pub quality: u32,
    pub lossless: bool,
    pub pixel_format: PixelFormat,
    pub on_error: FailurePolicy,
}

impl Default for ResizeJobConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("public/Projects/Soma/soma_extended.png"),
            output: PathBuf::from("public/Projects/Soma/Soma1.webp"),
            target_width: 2800,
            filter: ResizeFilter::Lanczos3,
            quality: 95,
            lossless: false,
            pixel_format: PixelFormat::Rgba,
            on_error: FailurePolicy::Propagate,
        }
    }
}

impl ResizeJobConfig {
    /// Operation-level settings for [`crate::imaging::resize_to_width`].
    pub fn to_resize_config(&self) -> ResizeConfig {
        ResizeConfig {
            target_width: self.target_width,
            filter: self.filter,
            pixel_format: self.pixel_format,
            encoding: encoding(self.quality, self.lossless),
        }
    }
}

/// Settings for the rotation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateJobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Counter-clockwise angle in degrees.
    pub angle: f32,
    /// Grow the canvas so the rotated corners are not clipped.
    pub expand: bool,
    pub interpolation: RotateInterpolation,
    /// WebP quality; compression effort when `lossless` is set.
    pub quality: u32,
    pub lossless: bool,
    pub pixel_format: PixelFormat,
    pub on_error: FailurePolicy,
}

impl Default for RotateJobConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("public/Projects/Soma/soma2.png"),
            output: PathBuf::from("public/Projects/Soma/Soma2.webp"),
            angle: 135.0,
            expand: true,
            interpolation: RotateInterpolation::Bicubic,
            quality: 100,
            lossless: true,
            pixel_format: PixelFormat::Preserve,
            on_error: FailurePolicy::Report,
        }
    }
}

impl RotateJobConfig {
    /// Operation-level settings for [`crate::imaging::rotate_to_canvas`].
    pub fn to_rotate_config(&self) -> RotateConfig {
        RotateConfig {
            degrees: self.angle,
            expand: self.expand,
            interpolation: self.interpolation,
            pixel_format: self.pixel_format,
            encoding: encoding(self.quality, self.lossless),
        }
    }
}

fn encoding(quality: u32, lossless: bool) -> WebpEncoding {
    let quality = Quality::new(quality);
    if lossless {
        WebpEncoding::lossless(quality)
    } else {
        WebpEncoding::lossy(quality)
    }
}

fn validate_paths(section: &str, input: &Path, output: &Path) -> Result<(), ConfigError> {
    if input == output {
        return Err(ConfigError::Validation(format!(
            "{section}.output must differ from {section}.input"
        )));
    }
    let is_webp = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("webp"));
    if !is_webp {
        return Err(ConfigError::Validation(format!(
            "{section}.output must have a .webp extension"
        )));
    }
    Ok(())
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.target_width == 0 {
            return Err(ConfigError::Validation(
                "resize.target_width must be greater than 0".into(),
            ));
        }
        if self.resize.target_width > WEBP_MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "resize.target_width must be at most {WEBP_MAX_DIMENSION}"
            )));
        }
        if !(1..=100).contains(&self.resize.quality) {
            return Err(ConfigError::Validation(
                "resize.quality must be 1-100".into(),
            ));
        }
        if !(1..=100).contains(&self.rotate.quality) {
            return Err(ConfigError::Validation(
                "rotate.quality must be 1-100".into(),
            ));
        }
        if !self.rotate.angle.is_finite() {
            return Err(ConfigError::Validation(
                "rotate.angle must be a finite number of degrees".into(),
            ));
        }
        validate_paths("resize", &self.resize.input, &self.resize.output)?;
        validate_paths("rotate", &self.rotate.input, &self.rotate.output)?;
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file.
///
/// A missing file yields the stock defaults. User values are merged on top
/// of the defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Load config from a file the user named explicitly.
///
/// Same as [`load_config`], except a missing file is an error instead of
/// falling back to the stock defaults.
pub fn load_required_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let overlay =
        load_raw_config(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `image-prep.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-prep configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Relative paths resolve against the working directory.

# ---------------------------------------------------------------------------
# Resize: scale to a fixed width, keep the aspect ratio, save as WebP
# ---------------------------------------------------------------------------
[resize]
input = "public/Projects/Soma/soma_extended.png"
output = "public/Projects/Soma/Soma1.webp"

# Output width in pixels. Height = round(height * target_width / width).
target_width = 2800

# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3.
filter = "lanczos3"

# WebP quality (1 = worst, 100 = best).
quality = 95
lossless = false

# "rgba" always writes an alpha channel; "preserve" keeps the source layout.
pixel_format = "rgba"

# "propagate" exits with an error; "report" prints it and exits cleanly.
on_error = "propagate"

# ---------------------------------------------------------------------------
# Rotate: turn about the center, save as WebP
# ---------------------------------------------------------------------------
[rotate]
input = "public/Projects/Soma/soma2.png"
output = "public/Projects/Soma/Soma2.webp"

# Degrees, counter-clockwise.
angle = 135.0

# Grow the canvas so no corner is clipped. Uncovered area is black, or
# transparent when the source has an alpha channel.
expand = true

# Sampling: nearest, bilinear, bicubic.
interpolation = "bicubic"

# With lossless output, quality is compression effort (100 = smallest file).
quality = 100
lossless = true

pixel_format = "preserve"
on_error = "report"
"##
}
