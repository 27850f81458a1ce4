//! SVG Probe
//!
//! Inspect how SvgKit reads a document: the parsed scene, sampled
//! animation frames and normalized path data.

mod probe;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use svgkit_common::{init_logging, LogConfig, LogFormat};
use svgkit_scene::ParseOptions;

use probe::{load_document, normalize_path, sample_frames, ProbeError};

#[derive(Parser)]
#[command(name = "svg-probe")]
#[command(about = "Inspect SVG documents, animations and path data")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed scene as JSON
    Parse {
        /// SVG file
        file: PathBuf,

        /// Ignore `<style>` blocks and CSS animations
        #[arg(long)]
        no_css: bool,

        /// Ignore SMIL animation elements
        #[arg(long)]
        no_smil: bool,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Sample animation frames evenly over the timeline
    Sample {
        /// SVG file
        file: PathBuf,

        /// Number of frames, including both ends
        #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
        frames: u32,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Strict-parse path data and print it normalized
    Path {
        /// Path data, e.g. "M0 0 L10 10 Z"
        data: String,
    },
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, ProbeError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = LogConfig::from_level_str(&cli.log_level)
        .map_err(ProbeError::from)?
        .with_format(cli.log_format);
    init_logging(config);

    match cli.command {
        Commands::Parse {
            file,
            no_css,
            no_smil,
            pretty,
        } => {
            let options = ParseOptions {
                css: !no_css,
                smil: !no_smil,
            };
            let doc = load_document(&file, options)?;
            println!("{}", to_json(&doc, pretty)?);
        }

        Commands::Sample {
            file,
            frames,
            pretty,
        } => {
            let doc = load_document(&file, ParseOptions::default())?;
            let report = sample_frames(&doc, frames);
            println!("{}", to_json(&report, pretty)?);
        }

        Commands::Path { data } => {
            println!("{}", normalize_path(&data)?);
        }
    }

    Ok(())
}
