use clap::{Parser, Subcommand};
use image_prep::config::{ConfigError, ToolConfig};
use image_prep::imaging::RustBackend;
use image_prep::process::{self, JobKind, JobReport, ProcessError};
use image_prep::{config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-prep")]
#[command(about = "Resize and rotate source images into WebP assets")]
#[command(long_about = "\
Resize and rotate source images into WebP assets

Jobs are configured in image-prep.toml (all keys optional):

  [resize]                         # Fixed-width resize, aspect ratio kept
  input = \"public/Projects/Soma/soma_extended.png\"
  output = \"public/Projects/Soma/Soma1.webp\"
  target_width = 2800              # Lanczos3, RGBA, WebP lossy q95

  [rotate]                         # Rotation with expanded canvas
  input = \"public/Projects/Soma/soma2.png\"
  output = \"public/Projects/Soma/Soma2.webp\"
  angle = 135.0                    # Counter-clockwise, bicubic, WebP lossless

Failure handling:
  resize   errors exit non-zero (on_error = \"propagate\")
  rotate   errors print 'Error: ...' and exit 0 (on_error = \"report\")

Set RUST_LOG=debug for diagnostics on stderr.
Run 'image-prep gen-config' to print a documented image-prep.toml.")]
#[command(version)]
struct Cli {
    /// Job configuration file [default: image-prep.toml, stock defaults when missing]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize the configured source to the target width and save as WebP
    Resize,
    /// Rotate the configured source, expanding the canvas, and save as WebP
    Rotate,
    /// Validate the config and show planned output sizes without writing
    Check,
    /// Print a stock image-prep.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Resize => {
            let tool_config = load_tool_config(cli.config.as_deref())?;
            let outcome = process::run_resize(&tool_config.resize)?;
            output::print_job_outcome(&outcome);
        }
        Command::Rotate => {
            let tool_config = load_tool_config(cli.config.as_deref())?;
            let outcome = process::run_rotate(&tool_config.rotate)?;
            output::print_job_outcome(&outcome);
        }
        Command::Check => {
            let tool_config = load_tool_config(cli.config.as_deref())?;
            let config_path = cli
                .config
                .as_deref()
                .unwrap_or(Path::new(config::CONFIG_FILE_NAME));
            println!("==> Checking {}", config_path.display());
            let backend = RustBackend::new();
            let plans = [
                (
                    JobKind::Resize,
                    process::plan_resize_job(&backend, &tool_config.resize),
                ),
                (
                    JobKind::Rotate,
                    process::plan_rotate_job(&backend, &tool_config.rotate),
                ),
            ];
            let failed = print_plans(&plans);
            if failed > 0 {
                return Err(format!("{failed} job(s) cannot run").into());
            }
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// An explicit `--config` must exist; the default file is optional.
fn load_tool_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    match path {
        Some(path) => config::load_required_config(path),
        None => config::load_config(Path::new(config::CONFIG_FILE_NAME)),
    }
}

/// Diagnostics go to stderr so stdout carries only status lines.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print each plan block and return how many jobs could not be planned.
fn print_plans(plans: &[(JobKind, Result<JobReport, ProcessError>)]) -> usize {
    let mut failed = 0;
    for (kind, plan) in plans {
        let lines = match plan {
            Ok(report) => output::format_job_plan(report),
            Err(e) => {
                failed += 1;
                output::format_plan_failure(*kind, &e.to_string())
            }
        };
        output::print_lines(&lines);
    }
    failed
}
