use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Property holding the feature's unique name
pub const NAME_PROPERTY: &str = "name";
/// Property holding the label longitude
pub const LABEL_X_PROPERTY: &str = "label_x";
/// Property holding the label latitude
pub const LABEL_Y_PROPERTY: &str = "label_y";

/// GeoJSON feature types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    pub id: Option<Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<HashMap<String, Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Parses a complete GeoJSON document; any malformed feature fails the whole parse
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::Parse(format!("Invalid GeoJSON: {}", e)))
    }

    /// Extracts every feature that parses on its own, dropping the rest.
    ///
    /// Accepts a `FeatureCollection`, a single `Feature` or a bare array of
    /// features. Anything else yields no features.
    pub fn features_lenient(value: &Value) -> Vec<GeoJsonFeature> {
        feature_values(value)
            .iter()
            .filter_map(|raw| match GeoJsonFeature::deserialize(raw) {
                Ok(feature) => Some(feature),
                Err(e) => {
                    log::debug!("dropping malformed feature: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Gets all features
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
        }
    }
}

impl GeoJsonFeature {
    fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    /// Non-empty `name` property
    pub fn name(&self) -> Option<&str> {
        name_of(self.property(NAME_PROPERTY))
    }

    /// Labeled center from `label_x` / `label_y`
    pub fn label_point(&self) -> Option<LatLng> {
        center_of(
            self.property(LABEL_X_PROPERTY),
            self.property(LABEL_Y_PROPERTY),
        )
    }

    /// Checks whether the feature geometry covers a point
    pub fn contains_point(&self, point: &LatLng) -> bool {
        self.geometry
            .as_ref()
            .map(|geometry| geometry.contains_point(point))
            .unwrap_or(false)
    }
}

impl GeoJsonGeometry {
    /// Outer rings of every polygon in the geometry
    pub fn exterior_rings(&self) -> Vec<&[[f64; 2]]> {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => coordinates
                .first()
                .map(|ring| vec![ring.as_slice()])
                .unwrap_or_default(),
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .filter_map(|polygon| polygon.first().map(|ring| ring.as_slice()))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => geometries
                .iter()
                .flat_map(|geometry| geometry.exterior_rings())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Point-in-polygon test against the outer rings; lines and points never contain
    pub fn contains_point(&self, point: &LatLng) -> bool {
        self.exterior_rings()
            .iter()
            .any(|ring| Self::point_in_polygon(point, ring))
    }

    fn point_in_polygon(point: &LatLng, polygon: &[[f64; 2]]) -> bool {
        if polygon.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = polygon.len() - 1;

        for i in 0..polygon.len() {
            let xi = polygon[i][0]; // longitude
            let yi = polygon[i][1]; // latitude
            let xj = polygon[j][0];
            let yj = polygon[j][1];

            if ((yi > point.lat) != (yj > point.lat))
                && (point.lng < (xj - xi) * (point.lat - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}

/// Raw feature records of a loosely-typed document
pub(crate) fn feature_values(value: &Value) -> &[Value] {
    match value {
        Value::Array(features) => features,
        Value::Object(object) => match object.get("features") {
            Some(Value::Array(features)) => features,
            _ if object.get("type").and_then(Value::as_str) == Some("Feature") => {
                std::slice::from_ref(value)
            }
            _ => &[],
        },
        _ => &[],
    }
}

/// A usable feature name: a non-empty string
pub(crate) fn name_of(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|name| !name.is_empty())
}

/// A usable center: both label coordinates present and numeric
pub(crate) fn center_of(label_x: Option<&Value>, label_y: Option<&Value>) -> Option<LatLng> {
    let lng = label_x.and_then(Value::as_f64)?;
    let lat = label_y.and_then(Value::as_f64)?;
    let center = LatLng::new(lat, lng);
    center.is_finite().then_some(center)
}
