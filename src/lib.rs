//! # image-prep
//!
//! Turns a single source image into a web-ready WebP asset. Two jobs ship
//! with stock settings:
//!
//! ```text
//! resize   source → width 2800, height by aspect ratio, Lanczos3 → RGBA → WebP lossy q95
//! rotate   source → 135° counter-clockwise, canvas expanded, bicubic  → WebP lossless
//! ```
//!
//! Each job is a straight line: decode, one geometric transform, pixel-format
//! normalization, encode, one status block on stdout. Paths and parameters
//! come from `image-prep.toml`; the CLI only picks which job to run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `image-prep.toml` loading, merging over stock defaults, validation |
//! | [`imaging`] | Dimension math, backend trait, `image`/`imageproc`/libwebp backend |
//! | [`process`] | Runs a job, applies its failure policy, produces a [`process::JobReport`] |
//! | [`output`] | Status-line formatting |
//!
//! # Design Decisions
//!
//! ## WebP Only
//!
//! Both jobs write WebP. The `image` crate's encoder is lossless-only, so
//! encoding goes through libwebp (`webp` crate) for both modes; decoding and
//! pixel work stay in pure Rust.
//!
//! ## Failure Policy Per Job
//!
//! A failing resize exits non-zero; a failing rotate prints `Error: …` and
//! exits cleanly. That difference is data (`on_error` in the config), not
//! two code paths, see [`config::FailurePolicy`].

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
