//! Image processing — `image` + `imageproc` for pixels, libwebp for output.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → WebP** | `resize_exact` (Lanczos3 by default) + libwebp lossy |
//! | **Rotate → WebP** | `imageproc` warp onto an expanded canvas + libwebp lossless |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_rotated_bounds, calculate_width_fit_dimensions};
pub use operations::{
    ResizeConfig, RotateConfig, TransformOutcome, get_dimensions, plan_resize, plan_rotate,
    resize_identified, resize_to_width, rotate_identified, rotate_to_canvas,
};
pub use params::{
    PixelFormat, Quality, ResizeFilter, ResizeParams, RotateInterpolation, RotateParams,
    WebpEncoding,
};
pub use rust_backend::RustBackend;
