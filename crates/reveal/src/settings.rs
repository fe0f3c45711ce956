//! User-facing settings.
//!
//! Stored as JSON. Missing fields fall back to their defaults, so a
//! settings file only needs to mention what it changes:
//!
//! ```json
//! { "covering_type": "Triangles", "covering_object_count": 24 }
//! ```

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::covering::{CoveringRequest, CoveringType, DEFAULT_MIN_TILE_AREA};
use crate::error::Result;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder or file the host last loaded images from.
    pub image_source: Option<String>,
    pub covering_type: CoveringType,
    /// Number of tiles to cover each image with.
    pub covering_object_count: usize,
    pub show_control_buttons: bool,
    pub verbose: bool,
    /// Ask "which year was the picture taken?" alongside each image.
    pub quiz_year: bool,
    /// Smallest average tile area (px²) a covering may have.
    pub min_tile_area: f64,
    /// Swipe distance (px) below which a touch counts as a tap.
    pub swipe_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            image_source: None,
            covering_type: CoveringType::Rectangles,
            covering_object_count: 10,
            show_control_buttons: true,
            verbose: true,
            quiz_year: false,
            min_tile_area: DEFAULT_MIN_TILE_AREA,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl Settings {
    /// Parse settings JSON. Out-of-range numbers are replaced by defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Replace numeric fields no covering or gesture can work with by
    /// their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.min_tile_area.is_finite() && self.min_tile_area > 0.0) {
            warn!("min_tile_area {} unusable, using {DEFAULT_MIN_TILE_AREA}", self.min_tile_area);
            self.min_tile_area = DEFAULT_MIN_TILE_AREA;
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
            warn!("swipe_threshold {} unusable, using {DEFAULT_SWIPE_THRESHOLD}", self.swipe_threshold);
            self.swipe_threshold = DEFAULT_SWIPE_THRESHOLD;
        }
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!("loaded settings from {}: {settings:?}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Covering request for an image of the given size.
    pub fn covering_request(&self, width: f64, height: f64) -> CoveringRequest {
        CoveringRequest::new(width, height, self.covering_object_count, self.covering_type)
            .with_min_tile_area(self.min_tile_area)
    }

    /// Whether switching from `self` to `other` needs a new covering.
    pub fn covering_differs(&self, other: &Settings) -> bool {
        self.covering_type != other.covering_type
            || self.covering_object_count != other.covering_object_count
            || self.min_tile_area != other.min_tile_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_numbers_fall_back_to_defaults() {
        let s = Settings::from_json(r#"{ "min_tile_area": -1.0, "swipe_threshold": -5.0 }"#).unwrap();
        assert_eq!(s.min_tile_area, DEFAULT_MIN_TILE_AREA);
        assert_eq!(s.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(s.covering_request(10.0, 10.0).max_tiles(), 6);

        let s = Settings { min_tile_area: f64::NAN, swipe_threshold: f64::NAN, ..Settings::default() }.sanitized();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn sane_numbers_are_kept() {
        let s = Settings { min_tile_area: 2.5, swipe_threshold: 0.0, ..Settings::default() }.sanitized();
        assert_eq!(s.min_tile_area, 2.5);
        assert_eq!(s.swipe_threshold, 0.0);
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.covering_type, CoveringType::Rectangles);
        assert_eq!(s.covering_object_count, 10);
        assert!(s.show_control_buttons);
        assert!(s.verbose);
        assert_eq!(s.swipe_threshold, 30.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "covering_type": "Shards", "covering_object_count": 24 }"#).unwrap();
        assert_eq!(s.covering_type, CoveringType::Shards);
        assert_eq!(s.covering_object_count, 24);
        assert_eq!(s.min_tile_area, DEFAULT_MIN_TILE_AREA);
    }

    #[test]
    fn bad_json_is_a_settings_error() {
        let err = Settings::from_json("{ covering_type: ").unwrap_err();
        assert!(matches!(err, crate::Error::Settings(_)));
    }

    #[test]
    fn json_round_trip() {
        let s = Settings {
            quiz_year: true,
            image_source: Some("/pictures".into()),
            ..Settings::default()
        };
        assert_eq!(Settings::from_json(&s.to_json().unwrap()).unwrap(), s);
    }

    #[test]
    fn covering_relevant_changes() {
        let a = Settings::default();
        let b = Settings { verbose: false, ..a.clone() };
        assert!(!a.covering_differs(&b));
        let c = Settings { covering_object_count: 11, ..a.clone() };
        assert!(a.covering_differs(&c));
    }

    #[test]
    fn request_uses_settings() {
        let s = Settings { covering_object_count: 4, ..Settings::default() };
        let r = s.covering_request(100.0, 50.0);
        assert_eq!(r.tile_count, 4);
        assert_eq!(r.mode, CoveringType::Rectangles);
        assert_eq!(r.seed, None);
    }
}
