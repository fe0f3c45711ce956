//! reveal - generate coverings and play reveal sessions from the terminal
//!
//! Usage:
//!   reveal modes                          List covering types
//!   reveal cover <W> <H> -n 20 -m shards  Generate a covering (SVG or JSON)
//!   reveal render <IMAGE> -o out.png      Paint a covering over an image
//!   reveal play <W> <H> --script moves    Replay keys/swipes, print outcomes

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use reveal::Settings;

mod cli;

use cli::common::{OutputFormat, TileArgs};

/// Cover images with polygon tiles and uncover them piece by piece.
#[derive(Parser)]
#[command(name = "reveal", about, version, long_about = None)]
struct Args {
    /// Settings file (JSON); missing fields use defaults
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available covering types
    Modes,

    /// Generate a covering for a WIDTH x HEIGHT rectangle
    Cover {
        width: f64,
        height: f64,
        #[command(flatten)]
        tiles: TileArgs,
        /// Output format
        #[arg(value_enum, short, long, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Paint a covering over an image and save it as PNG
    Render {
        image: PathBuf,
        #[command(flatten)]
        tiles: TileArgs,
        /// Uncover this many tiles before rendering
        #[arg(short, long, default_value_t = 0)]
        uncover: usize,
        /// PNG to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replay a script of keys, swipes and actions against a session
    Play {
        width: f64,
        height: f64,
        #[command(flatten)]
        tiles: TileArgs,
        /// Pretend the gallery holds this many images
        #[arg(long, default_value_t = 0)]
        images: usize,
        /// Script file; reads stdin when absent
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        // Set before any other thread exists.
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => Settings::default(),
    };
    debug!("settings: {settings:?}");

    match args.command {
        Command::Modes => {
            cli::cmd_modes();
            Ok(())
        }
        Command::Cover { width, height, tiles, format, output } => {
            cli::cmd_cover(&settings, width, height, &tiles, format, output.as_deref())
        }
        Command::Render { image, tiles, uncover, output } => {
            cli::cmd_render(&settings, &image, &tiles, uncover, &output)
        }
        Command::Play { width, height, tiles, images, script } => {
            cli::cmd_play(settings, width, height, &tiles, images, script.as_deref())
        }
    }
}
