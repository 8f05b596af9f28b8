//! Core constants for the equirectangular world extent and viewer defaults.
//! Keeping them in a single place makes it easier to tweak viewer-wide magic numbers.

/// Western edge of the world extent in degrees.
pub const WORLD_LNG_MIN: f64 = -180.0;

/// Eastern edge of the world extent in degrees.
pub const WORLD_LNG_MAX: f64 = 180.0;

/// Total longitudinal span (360°).
pub const WORLD_LNG_RANGE: f64 = WORLD_LNG_MAX - WORLD_LNG_MIN;

/// Southern edge of the world extent in degrees.
pub const WORLD_LAT_MIN: f64 = -90.0;

/// Northern edge of the world extent in degrees.
pub const WORLD_LAT_MAX: f64 = 90.0;

/// Total latitudinal span (180°).
pub const WORLD_LAT_RANGE: f64 = WORLD_LAT_MAX - WORLD_LAT_MIN;

/// State version sent to the rendering collaborator when it reports none.
pub const FALLBACK_STATE_VERSION: &str = "12.3.1";

/// Feature selected by the convenience shortcut control.
pub const SHORTCUT_FEATURE: &str = "United Kingdom";

/// Outline color of the highlighted feature.
pub const HIGHLIGHT_STROKE: &str = "#0066FF";

/// Outline width of the highlighted feature.
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 2.0;

/// Default map title.
pub const DEFAULT_TITLE: &str = "World Map";

/// Zoom/pan animation duration handed to the collaborator.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 1000;

/// Series id of the transparent highlight overlay.
pub const HIGHLIGHT_SERIES_ID: &str = "countryHighlight";
