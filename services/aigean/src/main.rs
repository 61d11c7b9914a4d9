//! Command-line tools for Aigean archive captures.
//!
//! Reads local archive files (`.zip`, `.asdf`, and `.hdf5` when built with
//! the `hdf5` feature) and:
//! - prints their metadata
//! - stitches, differences or mosaics them into a PNG

mod commands;
mod report;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use satmap::{parse_padding, parse_resolution, MosaicOptions, SatmapError};
use satmap_loaders::{LoaderConfig, LoaderError};
use satmap_render::{Colormap, RenderConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "aigean")]
#[command(about = "Inspect and combine Aigean archive captures")]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "AIGEAN_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Default missing metadata text keys to empty strings instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata of one or more archive files
    Metadata {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Mosaic two or more archive files into a PNG
    Mosaic {
        /// Target resolution (positive integer); defaults to the finest input
        #[arg(long, value_parser = resolution_arg)]
        resolution: Option<u32>,

        /// Crop the result to its largest gap-free region
        #[arg(long)]
        no_padding: bool,

        /// Keep zero-filled gaps (`true` or `false`)
        #[arg(long, value_parser = padding_arg, conflicts_with = "no_padding")]
        padding: Option<bool>,

        #[command(flatten)]
        output: OutputArgs,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Stitch two same-resolution archive files into a PNG
    Stitch {
        #[command(flatten)]
        output: OutputArgs,

        a: PathBuf,
        b: PathBuf,
    },

    /// Subtract the second archive file from the first over their overlap
    Difference {
        #[command(flatten)]
        output: OutputArgs,

        a: PathBuf,
        b: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory for the PNG (default: AIGEAN_OUTPUT_DIR or the current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Colormap: grayscale or viridis (default: AIGEAN_COLORMAP or viridis)
    #[arg(long)]
    colormap: Option<Colormap>,
}

impl OutputArgs {
    fn render_config(self) -> RenderConfig {
        let mut config = RenderConfig::from_env();
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(colormap) = self.colormap {
            config.colormap = colormap;
        }
        config
    }
}

fn resolution_arg(value: &str) -> Result<u32, String> {
    parse_resolution(value).map_err(|e| e.to_string())
}

fn padding_arg(value: &str) -> Result<bool, String> {
    parse_padding(value).map_err(|e| e.to_string())
}

/// The raster error behind `err`, if any, looking through loader errors.
fn satmap_error(err: &anyhow::Error) -> Option<&SatmapError> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<SatmapError>()
            .or_else(|| match cause.downcast_ref::<LoaderError>() {
                Some(LoaderError::Satmap(inner)) => Some(inner),
                _ => None,
            })
    })
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match satmap_error(&e) {
                Some(inner) => eprintln!("Error [{}]: {:#}", inner.code(), e),
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    let mut loader = LoaderConfig::from_env();
    if args.lenient {
        loader.strict_metadata = false;
    }
    loader
        .validate()
        .map_err(|e| anyhow!("invalid loader configuration: {}", e))?;

    info!(command = ?args.command, strict = loader.strict_metadata, "Starting aigean");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Metadata { files } => commands::metadata(&mut out, &files, &loader)?,
        Command::Mosaic {
            resolution,
            no_padding,
            padding,
            output,
            files,
        } => {
            let options = MosaicOptions {
                resolution,
                padding: padding.unwrap_or(!no_padding),
            };
            commands::mosaic(&mut out, &files, options, &loader, &output.render_config())?;
        }
        Command::Stitch { output, a, b } => {
            commands::stitch_files(&mut out, &a, &b, &loader, &output.render_config())?;
        }
        Command::Difference { output, a, b } => {
            commands::difference_files(&mut out, &a, &b, &loader, &output.render_config())?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_mosaic_args() {
        let args = Args::try_parse_from([
            "aigean",
            "mosaic",
            "--resolution",
            "15",
            "--no-padding",
            "a.zip",
            "b.hdf5",
        ])
        .unwrap();
        match args.command {
            Command::Mosaic {
                resolution,
                no_padding,
                files,
                ..
            } => {
                assert_eq!(resolution, Some(15));
                assert!(no_padding);
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_resolution_rejected() {
        assert!(Args::try_parse_from(["aigean", "mosaic", "--resolution", "0", "a.zip", "b.zip"]).is_err());
        assert!(Args::try_parse_from(["aigean", "mosaic", "--resolution", "1.5", "a.zip", "b.zip"]).is_err());
    }

    #[test]
    fn test_bad_padding_rejected() {
        assert!(Args::try_parse_from(["aigean", "mosaic", "--padding", "7", "a.zip", "b.zip"]).is_err());
        assert!(Args::try_parse_from(["aigean", "mosaic", "--padding", "False", "a.zip", "b.zip"]).is_ok());
    }

    #[test]
    fn test_satmap_error_found_through_loader() {
        let err = anyhow::Error::new(LoaderError::Satmap(SatmapError::NoOverlap)).context("failed to load a.zip");
        assert_eq!(satmap_error(&err).map(SatmapError::code), Some("NoOverlap"));

        let plain = anyhow!("no raster here");
        assert!(satmap_error(&plain).is_none());
    }

    #[test]
    fn test_metadata_requires_files() {
        assert!(Args::try_parse_from(["aigean", "metadata"]).is_err());
    }
}
