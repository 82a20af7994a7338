//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_rotated_bounds, calculate_width_fit_dimensions};
use super::params::{
    PixelFormat, Quality, ResizeFilter, ResizeParams, RotateInterpolation, RotateParams,
    WebpEncoding,
};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Source and output geometry of a finished transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOutcome {
    pub original: Dimensions,
    pub result: Dimensions,
}

/// Configuration for a width-fit resize.
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    pub target_width: u32,
    pub filter: ResizeFilter,
    pub pixel_format: PixelFormat,
    pub encoding: WebpEncoding,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target_width: 2800,
            filter: ResizeFilter::Lanczos3,
            pixel_format: PixelFormat::Rgba,
            encoding: WebpEncoding::lossy(Quality::new(95)),
        }
    }
}

/// Configuration for a rotation about the image center.
#[derive(Debug, Clone)]
pub struct RotateConfig {
    /// Counter-clockwise angle in degrees.
    pub degrees: f32,
    /// Grow the canvas so no corner is clipped.
    pub expand: bool,
    pub interpolation: RotateInterpolation,
    pub pixel_format: PixelFormat,
    pub encoding: WebpEncoding,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            degrees: 135.0,
            expand: true,
            interpolation: RotateInterpolation::Bicubic,
            pixel_format: PixelFormat::Preserve,
            encoding: WebpEncoding::lossless(Quality::new(100)),
        }
    }
}

/// Plan a resize operation without executing it.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &ResizeConfig,
) -> ResizeParams {
    let (width, height) =
        calculate_width_fit_dimensions((original.width, original.height), config.target_width);

    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        filter: config.filter,
        pixel_format: config.pixel_format,
        encoding: config.encoding,
    }
}

/// Plan a rotation without executing it.
pub fn plan_rotate(
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &RotateConfig,
) -> RotateParams {
    let (canvas_width, canvas_height) = calculate_rotated_bounds(
        (original.width, original.height),
        config.degrees,
        config.expand,
    );

    RotateParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        degrees: config.degrees,
        canvas_width,
        canvas_height,
        interpolation: config.interpolation,
        pixel_format: config.pixel_format,
        encoding: config.encoding,
    }
}

/// Resize `source` to the configured width, keeping its aspect ratio, and
/// write it to `output`.
pub fn resize_to_width(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ResizeConfig,
) -> Result<TransformOutcome> {
    let original = get_dimensions(backend, source)?;
    resize_identified(backend, source, output, original, config)
}

/// [`resize_to_width`] for a source whose dimensions are already known.
pub fn resize_identified(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &ResizeConfig,
) -> Result<TransformOutcome> {
    let params = plan_resize(source, output, original, config);
    backend.resize(&params)?;

    Ok(TransformOutcome {
        original,
        result: Dimensions::new(params.width, params.height),
    })
}

/// Rotate `source` about its center and write it to `output`.
///
/// With `expand` set the canvas grows to hold every corner.
pub fn rotate_to_canvas(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &RotateConfig,
) -> Result<TransformOutcome> {
    let original = get_dimensions(backend, source)?;
    rotate_identified(backend, source, output, original, config)
}

/// [`rotate_to_canvas`] for a source whose dimensions are already known.
pub fn rotate_identified(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &RotateConfig,
) -> Result<TransformOutcome> {
    let params = plan_rotate(source, output, original, config);
    backend.rotate(&params)?;

    Ok(TransformOutcome {
        original,
        result: Dimensions::new(params.canvas_width, params.canvas_height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::new(1920, 1080)]);

        let dims = get_dimensions(&backend, Path::new("/test.png")).unwrap();
        assert_eq!(dims, Dimensions::new(1920, 1080));
    }

    #[test]
    fn plan_resize_scales_height_with_width() {
        let params = plan_resize(
            Path::new("/soma.png"),
            Path::new("/soma.webp"),
            Dimensions::new(1920, 1080),
            &ResizeConfig::default(),
        );

        // 1080 * (2800 / 1920) = 1575
        assert_eq!((params.width, params.height), (2800, 1575));
        assert_eq!(params.pixel_format, PixelFormat::Rgba);
        assert_eq!(params.encoding, WebpEncoding::lossy(Quality::new(95)));
    }

    #[test]
    fn plan_rotate_expands_canvas() {
        let params = plan_rotate(
            Path::new("/soma2.png"),
            Path::new("/soma2.webp"),
            Dimensions::new(200, 100),
            &RotateConfig::default(),
        );

        assert_eq!((params.canvas_width, params.canvas_height), (214, 214));
        assert!(params.encoding.lossless);
    }

    #[test]
    fn plan_rotate_without_expand_keeps_size() {
        let config = RotateConfig {
            expand: false,
            ..RotateConfig::default()
        };
        let params = plan_rotate(
            Path::new("/a.png"),
            Path::new("/a.webp"),
            Dimensions::new(200, 100),
            &config,
        );

        assert_eq!((params.canvas_width, params.canvas_height), (200, 100));
    }

    #[test]
    fn resize_to_width_identifies_then_resizes() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::new(1400, 700)]);

        let outcome = resize_to_width(
            &backend,
            Path::new("/in.png"),
            Path::new("/out.webp"),
            &ResizeConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.original, Dimensions::new(1400, 700));
        assert_eq!(outcome.result, Dimensions::new(2800, 1400));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/in.png"));
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                output,
                width: 2800,
                height: 1400,
                quality: 95,
                lossless: false,
                ..
            } if output == "/out.webp"
        ));
    }

    #[test]
    fn rotate_to_canvas_reports_canvas_size() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::new(200, 100)]);

        let outcome = rotate_to_canvas(
            &backend,
            Path::new("/in.png"),
            Path::new("/out.webp"),
            &RotateConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.result, Dimensions::new(214, 214));
        assert!(matches!(
            &backend.get_operations()[1],
            RecordedOp::Rotate {
                canvas_width: 214,
                canvas_height: 214,
                quality: 100,
                lossless: true,
                ..
            }
        ));
    }

    #[test]
    fn rotate_identified_skips_identify() {
        let backend = MockBackend::new();

        let outcome = rotate_identified(
            &backend,
            Path::new("/in.png"),
            Path::new("/out.webp"),
            Dimensions::new(40, 10),
            &RotateConfig {
                degrees: 90.0,
                ..RotateConfig::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.result, Dimensions::new(10, 40));
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Rotate { .. }));
    }

    #[test]
    fn identify_failure_skips_transform() {
        let backend = MockBackend::new();

        let result = resize_to_width(
            &backend,
            Path::new("/in.png"),
            Path::new("/out.webp"),
            &ResizeConfig::default(),
        );

        assert!(result.is_err());
        assert_eq!(backend.get_operations().len(), 1);
    }
}
