//! `reveal modes` and `reveal cover`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use reveal::svg::{SvgStyle, covering_to_svg};
use reveal::{Covering, Settings};

use super::common::{OutputFormat, TileArgs};

/// JSON shape of `reveal cover -f json`.
#[derive(Serialize)]
struct CoverReport<'a> {
    generated_at: String,
    time_ms: f64,
    #[serde(flatten)]
    covering: &'a Covering,
}

pub fn cmd_modes() {
    println!("Covering types:");
    for mode in reveal::CoveringType::all() {
        println!("  {:<12} {}", mode.name(), mode.description());
    }
}

pub fn cmd_cover(
    settings: &Settings,
    width: f64,
    height: f64,
    tiles: &TileArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let request = tiles.request(settings, width, height)?;
    let start = Instant::now();
    let covering = request.generate().context("Failed to generate covering")?;
    let elapsed = start.elapsed();
    info!(
        "{} {} tiles in {:?} (seed {})",
        covering.len(),
        covering.mode().name(),
        elapsed,
        covering.seed()
    );

    let text = match format {
        OutputFormat::Svg => covering_to_svg(&covering, &SvgStyle::default()),
        OutputFormat::Json => {
            let report = CoverReport {
                generated_at: chrono::Local::now().to_rfc3339(),
                time_ms: elapsed.as_secs_f64() * 1000.0,
                covering: &covering,
            };
            serde_json::to_string_pretty(&report)? + "\n"
        }
    };

    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote: {} ({} tiles)", path.display(), covering.len());
        }
        None => print!("{text}"),
    }
    Ok(())
}
