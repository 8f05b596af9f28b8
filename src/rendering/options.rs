//! Declarative chart configuration handed to the rendering collaborator.
//!
//! Three map layers are stacked: a background, a choropleth colored by the
//! metric dataset, and a transparent overlay whose per-feature style comes
//! from a [`HighlightSource`] so the selected feature gets an outline.

use crate::core::config::ViewerOptions;
use crate::core::constants::HIGHLIGHT_SERIES_ID;
use crate::data::metrics::MetricDataset;
use crate::rendering::style::FeatureStyle;
use crate::traits::HighlightSource;
use crate::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Computes a feature's style during redraw
pub type ItemStyler = Arc<dyn Fn(&str) -> FeatureStyle + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    #[serde(rename = "map-shape-background")]
    Background,
    #[serde(rename = "map-shape")]
    Shape,
}

/// One map layer
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology_id_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_legend: Option<bool>,
    #[serde(flatten)]
    pub style: FeatureStyle,
    #[serde(skip)]
    item_styler: Option<ItemStyler>,
}

impl SeriesOptions {
    fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            id: None,
            title: None,
            id_key: None,
            topology_id_key: None,
            color_key: None,
            color_name: None,
            data: None,
            show_in_legend: None,
            style: FeatureStyle::default(),
            item_styler: None,
        }
    }

    pub fn background() -> Self {
        Self::new(SeriesKind::Background)
    }

    /// Metric-colored shapes joined to the topology by feature name
    pub fn choropleth(metrics: &MetricDataset) -> Self {
        Self {
            title: Some("Mock Metric".to_string()),
            id_key: Some("name".to_string()),
            topology_id_key: Some("name".to_string()),
            color_key: Some("value".to_string()),
            color_name: Some("Value".to_string()),
            data: Some(
                metrics
                    .iter()
                    .map(|row| json!({"name": row.name, "value": row.value}))
                    .collect(),
            ),
            ..Self::new(SeriesKind::Shape)
        }
    }

    /// Invisible layer over every named feature, styled per feature by `styler`.
    ///
    /// Every name gets a datum, so features without metric data can still be
    /// outlined.
    pub fn highlight_overlay(names: &[String], styler: ItemStyler) -> Self {
        Self {
            id: Some(HIGHLIGHT_SERIES_ID.to_string()),
            id_key: Some("name".to_string()),
            topology_id_key: Some("name".to_string()),
            data: Some(names.iter().map(|name| json!({ "name": name })).collect()),
            show_in_legend: Some(false),
            style: FeatureStyle::transparent(),
            item_styler: Some(styler),
            ..Self::new(SeriesKind::Shape)
        }
    }

    /// Style of one feature in this layer
    pub fn style_for(&self, name: &str) -> FeatureStyle {
        match &self.item_styler {
            Some(styler) => styler(name),
            None => self.style.clone(),
        }
    }

    pub fn has_item_styler(&self) -> bool {
        self.item_styler.is_some()
    }
}

impl std::fmt::Debug for SeriesOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesOptions")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("title", &self.title)
            .field("data_len", &self.data.as_ref().map(Vec::len))
            .field("style", &self.style)
            .field("item_styler", &self.item_styler.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomButtons {
    pub enabled: bool,
    pub visible: String,
}

/// Built-in pan/zoom interaction of the collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomInteraction {
    pub enabled: bool,
    pub axes: String,
    pub enable_panning: bool,
    pub enable_scrolling: bool,
    pub enable_double_click_to_reset: bool,
    pub buttons: ZoomButtons,
}

impl Default for ZoomInteraction {
    fn default() -> Self {
        Self {
            enabled: true,
            axes: "xy".to_string(),
            enable_panning: true,
            enable_scrolling: true,
            enable_double_click_to_reset: true,
            buttons: ZoomButtons {
                enabled: true,
                visible: "always".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationOptions {
    pub enabled: bool,
    /// Milliseconds
    pub duration: u64,
}

/// Full declarative configuration of the world map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: TitleOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<Value>,
    pub series: Vec<SeriesOptions>,
    pub gradient_legend: LegendOptions,
    pub zoom: ZoomInteraction,
    pub animation: AnimationOptions,
}

impl ChartOptions {
    pub fn build(
        options: &ViewerOptions,
        names: &[String],
        metrics: &MetricDataset,
        highlight: Arc<dyn HighlightSource + Send + Sync>,
    ) -> Self {
        let styler: ItemStyler = Arc::new(move |name: &str| highlight.highlight_style(name));

        Self {
            title: TitleOptions {
                text: options.title.clone(),
            },
            topology: None,
            series: vec![
                SeriesOptions::background(),
                SeriesOptions::choropleth(metrics),
                SeriesOptions::highlight_overlay(names, styler),
            ],
            gradient_legend: LegendOptions { enabled: false },
            zoom: ZoomInteraction::default(),
            animation: AnimationOptions {
                enabled: true,
                duration: options.animation_duration_ms,
            },
        }
    }

    /// Embeds the feature collection the layers are joined against
    pub fn with_topology(mut self, topology: Value) -> Self {
        self.topology = Some(topology);
        self
    }

    pub fn series(&self, id: &str) -> Option<&SeriesOptions> {
        self.series.iter().find(|s| s.id.as_deref() == Some(id))
    }

    pub fn highlight_series(&self) -> Option<&SeriesOptions> {
        self.series(HIGHLIGHT_SERIES_ID)
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::MetricDatum;

    struct Fixed(&'static str);

    impl HighlightSource for Fixed {
        fn is_highlighted(&self, name: &str) -> bool {
            name == self.0
        }
    }

    fn build() -> ChartOptions {
        let names = vec!["Chile".to_string(), "Peru".to_string()];
        let metrics = MetricDataset::new(vec![MetricDatum {
            name: "Peru".into(),
            value: 34.4,
        }]);
        ChartOptions::build(&ViewerOptions::default(), &names, &metrics, Arc::new(Fixed("Peru")))
    }

    #[test]
    fn test_layer_stack() {
        let options = build();
        assert_eq!(options.series.len(), 3);
        assert_eq!(options.series[0].kind, SeriesKind::Background);
        assert_eq!(options.series[1].data.as_ref().map(Vec::len), Some(1));

        let overlay = options.highlight_series().unwrap();
        assert!(overlay.has_item_styler());
        assert_eq!(overlay.data.as_ref().map(Vec::len), Some(2));
        assert_eq!(overlay.show_in_legend, Some(false));
    }

    #[test]
    fn test_overlay_styles_follow_highlight_source() {
        let options = build();
        let overlay = options.highlight_series().unwrap();
        assert_eq!(overlay.style_for("Peru"), FeatureStyle::highlight());
        assert_eq!(overlay.style_for("Chile"), FeatureStyle::transparent());
        assert_eq!(options.series[1].style_for("Peru"), FeatureStyle::default());
    }

    #[test]
    fn test_json_shape() {
        let json = build().to_json().unwrap();
        assert_eq!(json["title"]["text"], "World Map");
        assert_eq!(json["series"][0]["type"], "map-shape-background");
        assert_eq!(json["series"][1]["type"], "map-shape");
        assert_eq!(json["series"][1]["colorKey"], "value");
        assert_eq!(json["series"][1]["topologyIdKey"], "name");
        assert_eq!(json["series"][2]["id"], "countryHighlight");
        assert_eq!(json["series"][2]["fill"], "transparent");
        assert_eq!(json["series"][2]["showInLegend"], false);
        assert_eq!(json["gradientLegend"]["enabled"], false);
        assert_eq!(json["zoom"]["axes"], "xy");
        assert_eq!(json["zoom"]["enableDoubleClickToReset"], true);
        assert_eq!(json["zoom"]["buttons"]["visible"], "always");
        assert_eq!(json["animation"]["duration"], 1000);
        assert!(json.get("topology").is_none());
    }

    #[test]
    fn test_with_topology() {
        let options = build().with_topology(json!({"type": "FeatureCollection", "features": []}));
        assert_eq!(options.to_json().unwrap()["topology"]["type"], "FeatureCollection");
    }
}
