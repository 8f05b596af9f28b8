//! Prelude module for common worldview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use worldview::prelude::*;`

pub use crate::core::{
    builder::ViewerBuilder,
    config::{ViewerOptions, ZoomConfig, ZoomProfile},
    geo::LatLng,
    viewport::{compute_window, world_window, AxisRange, ViewportWindow},
};

pub use crate::data::{
    bundled,
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    index::GeoIndex,
    metrics::{MetricDataset, MetricDatum},
};

pub use crate::rendering::{
    bridge::{ChartState, MemoryBridge},
    options::{ChartOptions, SeriesOptions},
    style::FeatureStyle,
};

pub use crate::selection::{
    controller::{ResetOutcome, SelectOutcome, SelectionController},
    state::SelectionState,
};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::traits::{HighlightSource, RenderBridge};

#[cfg(feature = "egui")]
pub use crate::ui::{
    bridge::EguiBridge,
    controls::{ControlAction, ViewerControls},
    widget::{MapPanel, MapPanelStyle},
};

pub use crate::{Error as WorldViewError, Result};

pub use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
