//! Name list and center lookup derived from a feature collection.
//!
//! The index is built once from static data and never changes afterwards.
//! Records without a usable name are skipped and counted rather than failing
//! the build, so a corrupt source degrades to a smaller, possibly empty, index.
//! A named record without usable label coordinates stays selectable and is
//! counted as unlocated.

use crate::core::geo::LatLng;
use crate::data::collate::{locale_cmp, sort_names};
use crate::data::geojson::{
    center_of, feature_values, name_of, GeoJson, LABEL_X_PROPERTY, LABEL_Y_PROPERTY,
    NAME_PROPERTY,
};
use crate::prelude::{HashMap, HashSet};
use crate::Result;
use serde_json::Value;

/// Sorted feature names and their labeled centers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoIndex {
    names: Vec<String>,
    centers: HashMap<String, LatLng>,
    skipped: usize,
    unlocated: usize,
}

impl GeoIndex {
    /// Indexes raw feature records
    pub fn from_features<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut builder = IndexBuilder::default();
        for feature in features {
            let properties = feature.get("properties");
            builder.push(
                properties.and_then(|p| p.get(NAME_PROPERTY)),
                properties.and_then(|p| p.get(LABEL_X_PROPERTY)),
                properties.and_then(|p| p.get(LABEL_Y_PROPERTY)),
            );
        }
        builder.finish()
    }

    /// Indexes a loosely-typed document: a `FeatureCollection`, a single
    /// `Feature` or a bare array of features. Any other shape is empty.
    pub fn from_value(value: &Value) -> Self {
        Self::from_features(feature_values(value))
    }

    /// Parses and indexes JSON text. Only text that is not JSON at all is an error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Indexes an already-typed GeoJSON document
    pub fn from_geojson(geojson: &GeoJson) -> Self {
        let mut builder = IndexBuilder::default();
        for feature in geojson.features() {
            let properties = feature.properties.as_ref();
            builder.push(
                properties.and_then(|p| p.get(NAME_PROPERTY)),
                properties.and_then(|p| p.get(LABEL_X_PROPERTY)),
                properties.and_then(|p| p.get(LABEL_Y_PROPERTY)),
            );
        }
        builder.finish()
    }

    /// Distinct non-empty names in dictionary order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Labeled center of a feature
    pub fn center(&self, name: &str) -> Option<LatLng> {
        self.centers.get(name).copied()
    }

    /// Whether the name is selectable (it may still lack a center)
    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|n| locale_cmp(n, name))
            .is_ok()
    }

    /// Number of features that have a known center
    pub fn center_count(&self) -> usize {
        self.centers.len()
    }

    /// Records that had no usable name
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Named records that had no usable label point
    pub fn unlocated(&self) -> usize {
        self.unlocated
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Default)]
struct IndexBuilder {
    names: HashSet<String>,
    centers: HashMap<String, LatLng>,
    skipped: usize,
    unlocated: usize,
}

impl IndexBuilder {
    fn push(&mut self, name: Option<&Value>, label_x: Option<&Value>, label_y: Option<&Value>) {
        let Some(name) = name_of(name) else {
            self.skipped += 1;
            log::debug!("skipping feature without a usable name");
            return;
        };

        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }

        match center_of(label_x, label_y) {
            // later records win on duplicate names
            Some(center) => {
                self.centers.insert(name.to_string(), center);
            }
            None => {
                self.unlocated += 1;
                log::debug!("feature {:?} has no usable label point", name);
            }
        }
    }

    fn finish(self) -> GeoIndex {
        let mut names: Vec<String> = self.names.into_iter().collect();
        sort_names(&mut names);

        log::info!(
            "indexed {} features ({} with centers, {} unlocated, {} skipped)",
            names.len(),
            self.centers.len(),
            self.unlocated,
            self.skipped
        );

        GeoIndex {
            names,
            centers: self.centers,
            skipped: self.skipped,
            unlocated: self.unlocated,
        }
    }
}
