//! Argument pieces shared by several commands.

use anyhow::{Result, anyhow};
use clap::{Args, ValueEnum};

use reveal::{CoveringRequest, CoveringType, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// Tile options; anything left out comes from the settings.
#[derive(Debug, Clone, Args)]
pub struct TileArgs {
    /// Number of tiles
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    /// Covering type (triangles, rectangles, shards)
    #[arg(short, long)]
    pub mode: Option<String>,
    /// Seed for a reproducible covering
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TileArgs {
    /// Fold the command-line overrides into `settings`.
    pub fn apply(&self, settings: &Settings) -> Result<Settings> {
        let mut settings = settings.clone();
        if let Some(count) = self.count {
            settings.covering_object_count = count;
        }
        if let Some(name) = &self.mode {
            settings.covering_type = parse_mode(name)?;
        }
        Ok(settings)
    }

    pub fn request(&self, settings: &Settings, width: f64, height: f64) -> Result<CoveringRequest> {
        Ok(self
            .apply(settings)?
            .covering_request(width, height)
            .with_seed(self.seed))
    }
}

pub fn parse_mode(name: &str) -> Result<CoveringType> {
    CoveringType::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = CoveringType::all().iter().map(|m| m.name()).collect();
        anyhow!("Unknown covering type '{name}' (expected one of: {})", known.join(", "))
    })
}
