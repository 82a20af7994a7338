//! CLI output formatting.
//!
//! Every job ends with a short human-readable status block on stdout.
//!
//! # Output Format
//!
//! ## Resize
//!
//! ```text
//! Image saved to public/Projects/Soma/Soma1.webp, Size: 2800x1575
//! ```
//!
//! ## Rotate
//!
//! ```text
//! Original size: 1024x1024
//! Processed image saved to public/Projects/Soma/Soma2.webp
//! New size: 1450x1450
//! ```
//!
//! ## Reported failure
//!
//! ```text
//! Error: Source image not found: public/Projects/Soma/soma2.png
//! ```
//!
//! A rotate job that got as far as reading the source size keeps its
//! first status line:
//!
//! ```text
//! Original size: 1024x1024
//! Error: Image processing failed: WebP encode failed: ...
//! ```
//!
//! ## Check
//!
//! ```text
//! resize
//!     Source: public/Projects/Soma/soma_extended.png (1920x1080)
//!     Output: public/Projects/Soma/Soma1.webp (2800x1575, webp lossy q95)
//! ```
//!
//! # Architecture
//!
//! Each block has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::imaging::Dimensions;
use crate::process::{JobKind, JobOutcome, JobReport};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Status lines for a finished job.
pub fn format_job_report(report: &JobReport) -> Vec<String> {
    match report.kind {
        JobKind::Resize => vec![format!(
            "Image saved to {}, Size: {}",
            report.output.display(),
            report.result
        )],
        JobKind::Rotate => vec![
            format!("Original size: {}", report.original),
            format!("Processed image saved to {}", report.output.display()),
            format!("New size: {}", report.result),
        ],
    }
}

/// Status lines for a job that failed under the `report` policy.
pub fn format_job_failure(
    kind: JobKind,
    original: Option<Dimensions>,
    message: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let (JobKind::Rotate, Some(original)) = (kind, original) {
        lines.push(format!("Original size: {}", original));
    }
    lines.push(format!("Error: {}", message));
    lines
}

pub fn format_job_outcome(outcome: &JobOutcome) -> Vec<String> {
    match outcome {
        JobOutcome::Completed(report) => format_job_report(report),
        JobOutcome::Failed {
            kind,
            original,
            message,
        } => format_job_failure(*kind, *original, message),
    }
}

pub fn print_job_outcome(outcome: &JobOutcome) {
    for line in format_job_outcome(outcome) {
        println!("{}", line);
    }
}

/// Dry-run block for the `check` command.
pub fn format_job_plan(plan: &JobReport) -> Vec<String> {
    vec![
        plan.kind.name().to_string(),
        format!(
            "{}Source: {} ({})",
            indent(1),
            plan.source.display(),
            plan.original
        ),
        format!(
            "{}Output: {} ({}, {})",
            indent(1),
            plan.output.display(),
            plan.result,
            plan.encoding
        ),
    ]
}

/// Dry-run block for a job whose plan could not be made.
pub fn format_plan_failure(kind: JobKind, message: &str) -> Vec<String> {
    vec![
        kind.name().to_string(),
        format!("{}Error: {}", indent(1), message),
    ]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
