//! FrameGrab CLI — Query the primary display and grab raw frames.
//!
//! Usage:
//!   framegrab dimensions        Print the primary display's size
//!   framegrab grab [OPTIONS]    Capture one or more raw RGB8 frames
//!   framegrab check             Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "framegrab",
    about = "Single-shot raw capture of the primary display",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the primary display's current pixel dimensions
    Dimensions {
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Capture frames and write them as raw RGB8 files with JSON sidecars
    Grab {
        /// Output directory for frame files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of frames to capture
        #[arg(long, default_value = "1")]
        count: u32,

        /// Per-capture deadline in milliseconds (default: block indefinitely)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Check system capabilities
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = framegrab_common::config::AppConfig::try_load()?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    framegrab_common::logging::init_logging(&framegrab_common::config::LoggingConfig {
        level: log_level,
        json: config.logging.json,
        file: config.logging.file.clone(),
    })?;

    match cli.command {
        Commands::Dimensions { json } => commands::dimensions::run(json),
        Commands::Grab {
            output,
            count,
            timeout_ms,
        } => {
            let output = output.unwrap_or_else(|| config.capture.output_dir.clone());
            let timeout_ms = timeout_ms.or(config.capture.timeout_ms);
            commands::grab::run(output, count, timeout_ms)
        }
        Commands::Check => commands::check::run(),
    }
}
