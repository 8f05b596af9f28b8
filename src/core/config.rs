//! Configuration for how a selected feature is framed and how the viewer
//! presents itself.
//!
//! Zoom framing can be picked from presets or supplied as a custom
//! [`ZoomConfig`], either in code or deserialized from JSON.

use crate::core::constants::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_TITLE, FALLBACK_STATE_VERSION, SHORTCUT_FEATURE,
};
use crate::{Result, WorldViewError};
use serde::{Deserialize, Serialize};

/// Framing parameters applied when zooming to a feature center.
///
/// All values are in ratio units, where the whole world spans `1.0` on each
/// axis. Offsets are applied independently of the zoom level, so a fixed
/// nudge (e.g. making room for a title) looks the same at every zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    /// Fraction of the world shown before padding. Smaller is closer.
    pub zoom_level: f64,
    /// Extra margin added on both sides, as a fraction of `zoom_level`.
    pub padding: f64,
    /// Horizontal nudge; positive shifts the window right.
    pub offset_x: f64,
    /// Vertical nudge; positive shifts the window up.
    pub offset_y: f64,
}

impl ZoomConfig {
    pub fn new(zoom_level: f64, padding: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            zoom_level,
            padding,
            offset_x,
            offset_y,
        }
    }

    /// Same framing without any directional nudge
    pub fn centered(zoom_level: f64, padding: f64) -> Self {
        Self::new(zoom_level, padding, 0.0, 0.0)
    }

    /// Total visible width/height in ratio units, padding included
    pub fn span(&self) -> f64 {
        self.zoom_level * (1.0 + 2.0 * self.padding)
    }

    /// Checks `0 < zoom_level <= 1`, `padding >= 0` and finite offsets
    pub fn validate(&self) -> Result<()> {
        if self.zoom_level.is_nan() || self.zoom_level <= 0.0 || self.zoom_level > 1.0 {
            return Err(WorldViewError::InvalidZoomConfig(format!(
                "zoom level must be in (0, 1], got {}",
                self.zoom_level
            )));
        }
        if self.padding < 0.0 || !self.padding.is_finite() {
            return Err(WorldViewError::InvalidZoomConfig(format!(
                "padding must be a finite value >= 0, got {}",
                self.padding
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(WorldViewError::InvalidZoomConfig(format!(
                "offsets must be finite, got ({}, {})",
                self.offset_x, self.offset_y
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON zoom configuration; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ZoomConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomProfile::default().resolve()
    }
}

/// Zoom framing presets
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomProfile {
    /// Tight framing around a single country, nudged down to clear the title
    Country,
    /// A country and its neighbours
    Regional,
    /// Roughly a continent
    Continental,
    Custom(ZoomConfig),
}

impl ZoomProfile {
    pub fn resolve(&self) -> ZoomConfig {
        match self {
            Self::Country => ZoomConfig {
                zoom_level: 0.15,
                padding: 0.1,
                offset_x: 0.0,
                offset_y: -0.20,
            },
            Self::Regional => ZoomConfig {
                zoom_level: 0.3,
                padding: 0.1,
                offset_x: 0.0,
                offset_y: -0.15,
            },
            Self::Continental => ZoomConfig {
                zoom_level: 0.5,
                padding: 0.05,
                offset_x: 0.0,
                offset_y: -0.05,
            },
            Self::Custom(config) => *config,
        }
    }
}

impl Default for ZoomProfile {
    fn default() -> Self {
        Self::Country
    }
}

/// Presentation options shared by the controller and the chart options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    pub title: String,
    /// Version tag used when the collaborator cannot report its own
    pub fallback_version: String,
    /// Feature selected by the shortcut control
    pub shortcut: String,
    pub animation_duration_ms: u64,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            fallback_version: FALLBACK_STATE_VERSION.to_string(),
            shortcut: SHORTCUT_FEATURE.to_string(),
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_country_profile() {
        let config = ZoomConfig::default();
        assert_eq!(config.zoom_level, 0.15);
        assert_eq!(config.padding, 0.1);
        assert_eq!(config.offset_x, 0.0);
        assert_eq!(config.offset_y, -0.20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_span_includes_padding_on_both_sides() {
        let config = ZoomConfig::centered(0.15, 0.1);
        assert!((config.span() - 0.18).abs() < 1e-12);
        assert_eq!(ZoomConfig::centered(0.4, 0.0).span(), 0.4);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(ZoomConfig::centered(0.0, 0.1).validate().is_err());
        assert!(ZoomConfig::centered(1.5, 0.1).validate().is_err());
        assert!(ZoomConfig::centered(0.2, -0.1).validate().is_err());
        assert!(ZoomConfig::centered(f64::NAN, 0.1).validate().is_err());
        assert!(ZoomConfig::centered(0.2, f64::INFINITY).validate().is_err());
        assert!(ZoomConfig::new(0.2, 0.1, f64::NAN, 0.0).validate().is_err());
        assert!(ZoomConfig::centered(1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_profiles_are_valid() {
        for profile in [
            ZoomProfile::Country,
            ZoomProfile::Regional,
            ZoomProfile::Continental,
        ] {
            assert!(profile.resolve().validate().is_ok(), "{:?}", profile);
        }
        let custom = ZoomConfig::centered(0.5, 0.0);
        assert_eq!(ZoomProfile::Custom(custom).resolve(), custom);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ZoomConfig::from_json_str(r#"{"zoomLevel": 0.25, "offsetY": 0}"#).unwrap();
        assert_eq!(config.zoom_level, 0.25);
        assert_eq!(config.padding, 0.1);
        assert_eq!(config.offset_y, 0.0);

        assert!(matches!(
            ZoomConfig::from_json_str(r#"{"zoomLevel": 2}"#),
            Err(WorldViewError::InvalidZoomConfig(_))
        ));
        assert!(matches!(
            ZoomConfig::from_json_str("not json"),
            Err(WorldViewError::Serialization(_))
        ));
    }

    #[test]
    fn test_viewer_options_defaults() {
        let options = ViewerOptions::default();
        assert_eq!(options.fallback_version, "12.3.1");
        assert_eq!(options.shortcut, "United Kingdom");
        assert_eq!(options.title, "World Map");
    }
}
