//! # worldview
//!
//! Country-focused world map viewing.
//!
//! The library turns a country's labeled center point into a normalized
//! viewport window, keeps track of which country is selected, and pushes
//! viewport state into whatever component draws the map. Drawing is done by
//! a [`RenderBridge`] implementation; an in-memory one ships with the crate
//! and an egui-backed one is available behind the `egui` feature.

pub mod core;
pub mod data;
pub mod rendering;
pub mod runtime;
pub mod selection;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;

pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::ViewerBuilder,
    config::{ViewerOptions, ZoomConfig, ZoomProfile},
    geo::LatLng,
    viewport::{compute_window, world_window, AxisRange, ViewportWindow},
};

pub use data::{geojson::GeoJson, index::GeoIndex, metrics::MetricDataset};

pub use rendering::{
    bridge::{ChartState, MemoryBridge},
    options::ChartOptions,
    style::FeatureStyle,
};

pub use selection::controller::{ResetOutcome, SelectOutcome, SelectionController};

pub use traits::{HighlightSource, RenderBridge};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, WorldViewError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum WorldViewError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid zoom configuration: {0}")]
    InvalidZoomConfig(String),

    #[error("No center point known for feature: {0}")]
    UnknownSelection(String),

    #[error("Rendering collaborator is not mounted")]
    CollaboratorUnavailable,

    #[error("Rendering collaborator rejected state: {0}")]
    StateRejected(String),
}

/// Error type alias for convenience
pub type Error = WorldViewError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("logging initialized");
    }
}
