//! Pure Rust image processing backend, plus libwebp for encoding.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, BMP, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` |
//! | Rotate (quarter turns) | `image::DynamicImage::rotate90/180/270` (lossless) |
//! | Rotate (any angle) | `imageproc::geometric_transformations::warp_into` |
//! | Encode → WebP (lossy + lossless) | `webp::Encoder` (libwebp) |
//!
//! The `image` crate's own WebP encoder is lossless-only, so both modes go
//! through libwebp to keep one encoder and one quality scale.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::quarter_turns;
use super::params::{
    PixelFormat, ResizeFilter, ResizeParams, RotateInterpolation, RotateParams, WebpEncoding,
};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use std::path::Path;
use tracing::{debug, instrument};

/// Largest width or height a WebP bitstream can describe.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Triangle => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Gaussian => FilterType::Gaussian,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

fn interpolation(interp: RotateInterpolation) -> Interpolation {
    match interp {
        RotateInterpolation::Nearest => Interpolation::Nearest,
        RotateInterpolation::Bilinear => Interpolation::Bilinear,
        RotateInterpolation::Bicubic => Interpolation::Bicubic,
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file header, so a mislabeled extension
/// still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let img = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded source"
    );
    Ok(img)
}

/// Apply the pixel-format step and narrow to the 8-bit layouts libwebp takes.
///
/// `Rgba` always yields RGBA8. `Preserve` keeps the presence or absence of
/// alpha, so 16-bit RGB becomes RGB8 and gray+alpha becomes RGBA8.
fn normalize_pixels(img: DynamicImage, format: PixelFormat) -> DynamicImage {
    let wants_alpha = match format {
        PixelFormat::Rgba => true,
        PixelFormat::Preserve => img.color().has_alpha(),
    };
    match (img, wants_alpha) {
        (img @ DynamicImage::ImageRgba8(_), true) => img,
        (img, true) => DynamicImage::ImageRgba8(img.to_rgba8()),
        (img @ DynamicImage::ImageRgb8(_), false) => img,
        (img, false) => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// Rotate counter-clockwise by `params.degrees` onto the requested canvas.
///
/// Quarter turns that exactly fill the canvas use the lossless pixel
/// shuffles. Everything else is resampled about the image center; uncovered
/// canvas is transparent when the source has alpha and black otherwise.
fn rotate_image(img: DynamicImage, params: &RotateParams) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let canvas = (params.canvas_width, params.canvas_height);

    if let Some(turns) = quarter_turns(params.degrees) {
        let turned_dims = if turns % 2 == 1 { (h, w) } else { (w, h) };
        if turned_dims == canvas {
            return match turns % 4 {
                1 => img.rotate270(),
                2 => img.rotate180(),
                3 => img.rotate90(),
                _ => img,
            };
        }
    }

    // Screen counter-clockwise is a negative angle in y-down coordinates.
    let theta = -params.degrees.to_radians();
    let projection = Projection::translate(canvas.0 as f32 / 2.0, canvas.1 as f32 / 2.0)
        * Projection::rotate(theta)
        * Projection::translate(-(w as f32) / 2.0, -(h as f32) / 2.0);
    let interp = interpolation(params.interpolation);

    if img.color().has_alpha() {
        let src = img.to_rgba8();
        let mut out = RgbaImage::new(canvas.0, canvas.1);
        warp_into(&src, &projection, interp, Rgba([0, 0, 0, 0]), &mut out);
        DynamicImage::ImageRgba8(out)
    } else {
        let src = img.to_rgb8();
        let mut out = RgbImage::new(canvas.0, canvas.1);
        warp_into(&src, &projection, interp, Rgb([0, 0, 0]), &mut out);
        DynamicImage::ImageRgb8(out)
    }
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, encoding: WebpEncoding) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "webp" => save_webp(img, path, encoding),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Encode and save as WebP through libwebp.
fn save_webp(img: &DynamicImage, path: &Path, encoding: WebpEncoding) -> Result<(), BackendError> {
    if img.width() > WEBP_MAX_DIMENSION || img.height() > WEBP_MAX_DIMENSION {
        return Err(BackendError::ProcessingFailed(format!(
            "{}x{} exceeds the WebP limit of {} pixels per side",
            img.width(),
            img.height(),
            WEBP_MAX_DIMENSION
        )));
    }

    let encoder = match img {
        DynamicImage::ImageRgba8(buf) => {
            webp::Encoder::from_rgba(buf.as_raw(), buf.width(), buf.height())
        }
        DynamicImage::ImageRgb8(buf) => webp::Encoder::from_rgb(buf.as_raw(), buf.width(), buf.height()),
        other => {
            return Err(BackendError::ProcessingFailed(format!(
                "WebP encoder needs RGB8 or RGBA8, got {:?}",
                other.color()
            )));
        }
    };

    let encoded = encoder
        .encode_simple(encoding.lossless, encoding.quality.value() as f32)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e:?}")))?;
    std::fs::write(path, &*encoded).map_err(BackendError::Io)?;
    debug!(bytes = encoded.len(), %encoding, "wrote {}", path.display());
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            ImageError::IoError(io) => BackendError::Io(io),
            other => BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", other)),
        })?;
        Ok(Dimensions { width, height })
    }

    #[instrument(skip_all, fields(source = %params.source.display()))]
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, filter_type(params.filter));
        let normalized = normalize_pixels(resized, params.pixel_format);
        save_image(&normalized, &params.output, params.encoding)
    }

    #[instrument(skip_all, fields(source = %params.source.display(), degrees = params.degrees))]
    fn rotate(&self, params: &RotateParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let rotated = rotate_image(img, params);
        let normalized = normalize_pixels(rotated, params.pixel_format);
        save_image(&normalized, &params.output, params.encoding)
    }
}
