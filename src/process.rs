//! Job execution.
//!
//! Each job is one linear pass: check the source exists, make sure the
//! output directory exists, run the transform through an [`ImageBackend`],
//! and describe the result in a [`JobReport`].
//!
//! ## Failure policies
//!
//! What happens when a job fails is set per job by
//! [`FailurePolicy`](crate::config::FailurePolicy):
//!
//! ```text
//! propagate   Err(ProcessError)            → main exits non-zero
//! report      Ok(JobOutcome::Failed { .. }) → "Error: ..." line, exit 0
//! ```
//!
//! The stock config propagates resize failures and reports rotate failures.

use crate::config::{FailurePolicy, ResizeJobConfig, RotateJobConfig};
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, RustBackend, TransformOutcome, WebpEncoding,
    get_dimensions, plan_resize, plan_rotate, resize_identified, rotate_identified,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Resize,
    Rotate,
}

impl JobKind {
    pub fn name(self) -> &'static str {
        match self {
            JobKind::Resize => "resize",
            JobKind::Rotate => "rotate",
        }
    }
}

/// What a job did, or (from the `plan_*` functions) would do.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub kind: JobKind,
    pub source: PathBuf,
    pub output: PathBuf,
    pub original: Dimensions,
    pub result: Dimensions,
    pub encoding: WebpEncoding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(JobReport),
    /// The job failed under [`FailurePolicy::Report`]. `original` is set
    /// when the source was identified before the failure.
    Failed {
        kind: JobKind,
        original: Option<Dimensions>,
        message: String,
    },
}

/// A failed job plus how far it got.
struct JobFailure {
    error: ProcessError,
    original: Option<Dimensions>,
}

impl From<ProcessError> for JobFailure {
    fn from(error: ProcessError) -> Self {
        Self {
            error,
            original: None,
        }
    }
}

impl From<BackendError> for JobFailure {
    fn from(error: BackendError) -> Self {
        ProcessError::from(error).into()
    }
}

/// Run the resize job with the production backend.
pub fn run_resize(job: &ResizeJobConfig) -> Result<JobOutcome, ProcessError> {
    run_resize_with_backend(&RustBackend::new(), job)
}

/// Run the resize job using a specific backend (allows testing with mock).
pub fn run_resize_with_backend(
    backend: &impl ImageBackend,
    job: &ResizeJobConfig,
) -> Result<JobOutcome, ProcessError> {
    let config = job.to_resize_config();
    let result = execute(
        JobKind::Resize,
        backend,
        &job.input,
        &job.output,
        config.encoding,
        |original| resize_identified(backend, &job.input, &job.output, original, &config),
    );
    settle(JobKind::Resize, job.on_error, result)
}

/// Run the rotate job with the production backend.
pub fn run_rotate(job: &RotateJobConfig) -> Result<JobOutcome, ProcessError> {
    run_rotate_with_backend(&RustBackend::new(), job)
}

/// Run the rotate job using a specific backend (allows testing with mock).
pub fn run_rotate_with_backend(
    backend: &impl ImageBackend,
    job: &RotateJobConfig,
) -> Result<JobOutcome, ProcessError> {
    let config = job.to_rotate_config();
    let result = execute(
        JobKind::Rotate,
        backend,
        &job.input,
        &job.output,
        config.encoding,
        |original| rotate_identified(backend, &job.input, &job.output, original, &config),
    );
    settle(JobKind::Rotate, job.on_error, result)
}

fn ensure_source(source: &Path) -> Result<(), ProcessError> {
    if source.is_file() {
        Ok(())
    } else {
        Err(ProcessError::SourceNotFound(source.to_path_buf()))
    }
}

fn execute<F>(
    kind: JobKind,
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    encoding: WebpEncoding,
    transform: F,
) -> Result<JobReport, JobFailure>
where
    F: FnOnce(Dimensions) -> Result<TransformOutcome, BackendError>,
{
    ensure_source(source)?;
    let original = get_dimensions(backend, source)?;
    let identified = |error: ProcessError| JobFailure {
        error,
        original: Some(original),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| identified(e.into()))?;
    }

    let outcome = transform(original).map_err(|e| identified(e.into()))?;
    info!(
        job = kind.name(),
        original = %outcome.original,
        result = %outcome.result,
        "wrote {}",
        output.display()
    );

    Ok(JobReport {
        kind,
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        original: outcome.original,
        result: outcome.result,
        encoding,
    })
}

fn settle(
    kind: JobKind,
    policy: FailurePolicy,
    result: Result<JobReport, JobFailure>,
) -> Result<JobOutcome, ProcessError> {
    match (result, policy) {
        (Ok(report), _) => Ok(JobOutcome::Completed(report)),
        (Err(failure), FailurePolicy::Report) => {
            warn!(job = kind.name(), error = %failure.error, "job failed");
            Ok(JobOutcome::Failed {
                kind,
                original: failure.original,
                message: failure.error.to_string(),
            })
        }
        (Err(failure), FailurePolicy::Propagate) => Err(failure.error),
    }
}

/// Plan the resize job without writing anything.
pub fn plan_resize_job(
    backend: &impl ImageBackend,
    job: &ResizeJobConfig,
) -> Result<JobReport, ProcessError> {
    ensure_source(&job.input)?;
    let config = job.to_resize_config();
    let original = get_dimensions(backend, &job.input)?;
    let params = plan_resize(&job.input, &job.output, original, &config);

    Ok(JobReport {
        kind: JobKind::Resize,
        source: params.source,
        output: params.output,
        original,
        result: Dimensions::new(params.width, params.height),
        encoding: params.encoding,
    })
}

/// Plan the rotate job without writing anything.
pub fn plan_rotate_job(
    backend: &impl ImageBackend,
    job: &RotateJobConfig,
) -> Result<JobReport, ProcessError> {
    ensure_source(&job.input)?;
    let config = job.to_rotate_config();
    let original = get_dimensions(backend, &job.input)?;
    let params = plan_rotate(&job.input, &job.output, original, &config);

    Ok(JobReport {
        kind: JobKind::Rotate,
        source: params.source,
        output: params.output,
        original,
        result: Dimensions::new(params.canvas_width, params.canvas_height),
        encoding: params.encoding,
    })
}
