//! Static world data shipped with the crate.
//!
//! Outlines are simplified to one polygon per country; label points follow
//! Natural Earth's `label_x` / `label_y`. Everything is parsed once, on first
//! use.

use crate::data::geojson::{GeoJson, GeoJsonFeature};
use crate::data::index::GeoIndex;
use crate::data::metrics::MetricDataset;
use once_cell::sync::Lazy;
use serde_json::Value;

const WORLD_GEOJSON: &str = include_str!("../../assets/world.geojson");
const METRICS_JSON: &str = include_str!("../../assets/metrics.json");

static TOPOLOGY: Lazy<Value> = Lazy::new(|| parse_or_null("world topology", WORLD_GEOJSON));

static FEATURES: Lazy<Vec<GeoJsonFeature>> = Lazy::new(|| GeoJson::features_lenient(&TOPOLOGY));

static INDEX: Lazy<GeoIndex> = Lazy::new(|| GeoIndex::from_value(&TOPOLOGY));

static METRICS: Lazy<MetricDataset> =
    Lazy::new(|| MetricDataset::from_value(&parse_or_null("metric dataset", METRICS_JSON)));

fn parse_or_null(what: &str, json: &str) -> Value {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::error!("bundled {} is not valid JSON: {}", what, e);
        Value::Null
    })
}

/// Raw world feature collection
pub fn topology() -> &'static Value {
    &TOPOLOGY
}

/// World features with their geometry, for drawing
pub fn features() -> &'static [GeoJsonFeature] {
    &FEATURES
}

/// Index over the world features
pub fn index() -> &'static GeoIndex {
    &INDEX
}

/// Mock metric values per country
pub fn metrics() -> &'static MetricDataset {
    &METRICS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::SHORTCUT_FEATURE;

    #[test]
    fn test_bundled_index_is_complete() {
        let index = index();
        assert_eq!(index.skipped(), 0);
        assert_eq!(index.len(), features().len());
        assert_eq!(index.center_count(), index.len());
        assert!(index.center(SHORTCUT_FEATURE).is_some());
        assert!(index.names().iter().all(|name| !name.is_empty()));
    }

    #[test]
    fn test_bundled_centers_are_valid() {
        for name in index().names() {
            let center = index().center(name).unwrap();
            assert!(center.is_valid(), "{} has {:?}", name, center);
        }
    }

    #[test]
    fn test_label_points_fall_inside_outlines() {
        for feature in features() {
            let center = feature.label_point().unwrap();
            assert!(feature.contains_point(&center), "{:?}", feature.name());
        }
    }

    #[test]
    fn test_metrics_reference_indexed_names() {
        assert!(!metrics().is_empty());
        for row in metrics().iter() {
            assert!(index().contains(&row.name), "{}", row.name);
        }
    }
}
