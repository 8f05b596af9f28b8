use crate::core::constants::{
    WORLD_LAT_MIN, WORLD_LAT_RANGE, WORLD_LNG_MIN, WORLD_LNG_RANGE,
};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Normalizes to equirectangular ratio space.
    ///
    /// The full world maps onto `[0,1]×[0,1]`, longitude growing rightward
    /// and latitude growing upward. Out-of-range coordinates are not clamped.
    pub fn to_ratio(&self) -> RatioPoint {
        RatioPoint::new(
            (self.lng - WORLD_LNG_MIN) / WORLD_LNG_RANGE,
            (self.lat - WORLD_LAT_MIN) / WORLD_LAT_RANGE,
        )
    }

    /// Inverse of [`LatLng::to_ratio`]
    pub fn from_ratio(point: RatioPoint) -> Self {
        Self::new(
            point.y * WORLD_LAT_RANGE + WORLD_LAT_MIN,
            point.x * WORLD_LNG_RANGE + WORLD_LNG_MIN,
        )
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in normalized ratio space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPoint {
    pub x: f64,
    pub y: f64,
}

impl RatioPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> RatioPoint {
        RatioPoint::new(self.x + dx, self.y + dy)
    }

    /// Clamps both components to `[0, 1]`; a NaN component lands on the midpoint
    pub fn clamp_unit(&self) -> RatioPoint {
        RatioPoint::new(clamp_unit(self.x), clamp_unit(self.y))
    }
}

impl Default for RatioPoint {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}
