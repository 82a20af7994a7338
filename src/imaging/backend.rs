//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, resize, and rotate.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): decoding and resizing
//! through the `image` crate, rotation through `imageproc`, WebP encoding
//! through libwebp.

use super::params::{ResizeParams, RotateParams};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Each transform decodes `params.source`, applies exactly one geometric
/// operation plus the pixel-format step, and writes `params.output`. The
/// written image must have the dimensions the params ask for.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize to exactly `params.width` × `params.height` and encode.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Rotate onto a `canvas_width` × `canvas_height` canvas and encode.
    fn rotate(&self, params: &RotateParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{PixelFormat, Quality, ResizeFilter, RotateInterpolation, WebpEncoding};
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub fail_with: Mutex<Option<String>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
            lossless: bool,
            pixel_format: PixelFormat,
        },
        Rotate {
            source: String,
            output: String,
            degrees: f32,
            canvas_width: u32,
            canvas_height: u32,
            quality: u32,
            lossless: bool,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Every transform call fails with `message` after being recorded.
        pub fn failing(dims: Vec<Dimensions>, message: &str) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                fail_with: Mutex::new(Some(message.to_string())),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn outcome(&self) -> Result<(), BackendError> {
            match self.fail_with.lock().unwrap().clone() {
                Some(msg) => Err(BackendError::ProcessingFailed(msg)),
                None => Ok(()),
            }
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                quality: params.encoding.quality.value(),
                lossless: params.encoding.lossless,
                pixel_format: params.pixel_format,
            });
            self.outcome()
        }

        fn rotate(&self, params: &RotateParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Rotate {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                degrees: params.degrees,
                canvas_width: params.canvas_width,
                canvas_height: params.canvas_height,
                quality: params.encoding.quality.value(),
                lossless: params.encoding.lossless,
            });
            self.outcome()
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions::new(800, 600)]);

        let result = backend.identify(Path::new("/test/image.png")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_identify_without_dimensions_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/x.png")).is_err());
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.png".into(),
                output: "/output.webp".into(),
                width: 2800,
                height: 1575,
                filter: ResizeFilter::Lanczos3,
                pixel_format: PixelFormat::Rgba,
                encoding: WebpEncoding::lossy(Quality::new(95)),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 2800,
                height: 1575,
                quality: 95,
                lossless: false,
                pixel_format: PixelFormat::Rgba,
                ..
            }
        ));
    }

    #[test]
    fn mock_failing_rotate_still_records() {
        let backend = MockBackend::failing(vec![], "disk full");

        let err = backend
            .rotate(&RotateParams {
                source: "/source.png".into(),
                output: "/rotated.webp".into(),
                degrees: 135.0,
                canvas_width: 214,
                canvas_height: 214,
                interpolation: RotateInterpolation::Bicubic,
                pixel_format: PixelFormat::Preserve,
                encoding: WebpEncoding::lossless(Quality::new(100)),
            })
            .unwrap_err();

        assert!(err.to_string().contains("disk full"));
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions::new(2800, 1575).to_string(), "2800x1575");
        assert_eq!(Dimensions::from((3, 4)), Dimensions::new(3, 4));
    }
}
