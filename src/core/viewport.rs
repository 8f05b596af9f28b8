use crate::core::config::ZoomConfig;
use crate::core::geo::{LatLng, RatioPoint};
use serde::{Deserialize, Serialize};

/// A `[start, end]` interval on one axis of ratio space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole axis, `[0, 1]`
    pub fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Interval of width `span` around `center`, cut (not slid) at the unit bounds
    pub fn around(center: f64, span: f64) -> Self {
        let half = (span / 2.0).max(0.0);
        Self::new((center - half).max(0.0), (center + half).min(1.0))
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// `0 <= start <= end <= 1`
    pub fn is_normalized(&self) -> bool {
        self.start >= 0.0 && self.start <= self.end && self.end <= 1.0
    }

    /// Position of `value` relative to this interval (0 at start, 1 at end)
    pub fn fraction_of(&self, value: f64) -> f64 {
        let width = self.width();
        if width > 0.0 {
            (value - self.start) / width
        } else {
            0.5
        }
    }
}

/// Visible part of the world expressed in ratio space.
///
/// Serializes as `{"ratioX": {...}, "ratioY": {...}}`, the zoom shape the
/// rendering collaborator expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportWindow {
    #[serde(rename = "ratioX")]
    pub ratio_x: AxisRange,
    #[serde(rename = "ratioY")]
    pub ratio_y: AxisRange,
}

impl ViewportWindow {
    pub fn new(ratio_x: AxisRange, ratio_y: AxisRange) -> Self {
        Self { ratio_x, ratio_y }
    }

    pub fn is_normalized(&self) -> bool {
        self.ratio_x.is_normalized() && self.ratio_y.is_normalized()
    }

    pub fn is_world(&self) -> bool {
        *self == world_window()
    }

    pub fn contains(&self, point: RatioPoint) -> bool {
        self.ratio_x.contains(point.x) && self.ratio_y.contains(point.y)
    }

    /// Window `t` of the way from `self` to `target`; `t` is clamped to `[0, 1]`
    pub fn lerp(&self, target: &ViewportWindow, t: f64) -> ViewportWindow {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: f64, b: f64| a + (b - a) * t;
        ViewportWindow::new(
            AxisRange::new(
                mix(self.ratio_x.start, target.ratio_x.start),
                mix(self.ratio_x.end, target.ratio_x.end),
            ),
            AxisRange::new(
                mix(self.ratio_y.start, target.ratio_y.start),
                mix(self.ratio_y.end, target.ratio_y.end),
            ),
        )
    }
}

impl Default for ViewportWindow {
    fn default() -> Self {
        world_window()
    }
}

/// The unzoomed full-world view
pub fn world_window() -> ViewportWindow {
    ViewportWindow::new(AxisRange::full(), AxisRange::full())
}

/// Frames `center` according to `config`.
///
/// The center is normalized to ratio space, nudged by the configured
/// offsets and clamped into the unit square. Each axis then gets an interval
/// of `config.span()` around it, cut at 0 and 1. Near an edge the window is
/// narrower than the span instead of being shifted back inside.
pub fn compute_window(center: LatLng, config: &ZoomConfig) -> ViewportWindow {
    let ratio = center
        .to_ratio()
        .offset(config.offset_x, config.offset_y)
        .clamp_unit();
    let span = config.span();

    ViewportWindow::new(AxisRange::around(ratio.x, span), AxisRange::around(ratio.y, span))
}
