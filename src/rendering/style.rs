use crate::core::constants::{HIGHLIGHT_STROKE, HIGHLIGHT_STROKE_WIDTH};
use serde::{Deserialize, Serialize};

/// Color keyword for fully see-through paint
pub const TRANSPARENT: &str = "transparent";

/// Per-feature paint handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl FeatureStyle {
    /// Blue outline around the selected feature, fill left to lower layers
    pub fn highlight() -> Self {
        Self {
            stroke: Some(HIGHLIGHT_STROKE.to_string()),
            stroke_width: Some(HIGHLIGHT_STROKE_WIDTH),
            stroke_opacity: Some(1.0),
            fill: None,
            fill_opacity: None,
        }
    }

    /// Paints nothing, so the overlay never hides the choropleth beneath
    pub fn transparent() -> Self {
        Self {
            stroke: Some(TRANSPARENT.to_string()),
            stroke_width: Some(0.0),
            stroke_opacity: None,
            fill: Some(TRANSPARENT.to_string()),
            fill_opacity: Some(0.0),
        }
    }

    pub fn for_highlight(highlighted: bool) -> Self {
        if highlighted {
            Self::highlight()
        } else {
            Self::transparent()
        }
    }

    /// Whether the stroke would leave any visible mark
    pub fn has_visible_stroke(&self) -> bool {
        let width = self.stroke_width.unwrap_or(0.0);
        let opacity = self.stroke_opacity.unwrap_or(1.0);
        let color = self.stroke.as_deref().and_then(parse_color);
        width > 0.0 && opacity > 0.0 && color.map(|[_, _, _, a]| a > 0).unwrap_or(false)
    }
}

/// Parses `#rrggbb`, `#rrggbbaa` or `transparent` into RGBA bytes
pub fn parse_color(color: &str) -> Option<[u8; 4]> {
    if color.eq_ignore_ascii_case(TRANSPARENT) {
        return Some([0, 0, 0, 0]);
    }

    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}
