use crate::{
    core::{
        geo::{LatLng, RatioPoint},
        viewport::ViewportWindow,
    },
    data::{geojson::GeoJsonFeature, metrics::MetricDataset},
    rendering::style::{parse_color, FeatureStyle},
    traits::HighlightSource,
};
use egui::{Color32, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};

/// Colors used by [`MapPanel`]
#[derive(Debug, Clone)]
pub struct MapPanelStyle {
    /// Ocean
    pub background_color: Color32,
    /// Features without a metric value
    pub no_data_color: Color32,
    /// Lowest metric value
    pub low_color: Color32,
    /// Highest metric value
    pub high_color: Color32,
    pub border_stroke: Stroke,
}

impl Default for MapPanelStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(170, 211, 223),
            no_data_color: Color32::from_rgb(220, 220, 220),
            low_color: Color32::from_rgb(255, 237, 160),
            high_color: Color32::from_rgb(240, 59, 32),
            border_stroke: Stroke::new(0.5, Color32::from_gray(90)),
        }
    }
}

impl MapPanelStyle {
    /// Color for a metric value already rescaled to `[0, 1]`
    pub fn metric_color(&self, normalized: Option<f64>) -> Color32 {
        match normalized {
            Some(t) if t.is_finite() => lerp_color(self.low_color, self.high_color, t.clamp(0.0, 1.0) as f32),
            _ => self.no_data_color,
        }
    }
}

/// What happened in the panel this frame
pub struct MapPanelResponse {
    pub response: Response,
    /// Feature under the pointer when the panel was clicked
    pub clicked: Option<String>,
}

/// Immediate-mode choropleth of a feature collection.
///
/// Paints the part of the world inside `window`, colors features from the
/// metric dataset and outlines whatever the [`HighlightSource`] reports as
/// highlighted.
///
/// ```rust,ignore
/// let window = bridge.current_window();
/// let panel = MapPanel::new(bundled::features(), bundled::metrics(), window, &*controller);
/// if let Some(name) = panel.show(ui).clicked {
///     controller.dispatch_select(name);
/// }
/// ```
pub struct MapPanel<'a> {
    features: &'a [GeoJsonFeature],
    metrics: &'a MetricDataset,
    window: ViewportWindow,
    highlight: &'a dyn HighlightSource,
    style: MapPanelStyle,
    size: Option<Vec2>,
}

impl<'a> MapPanel<'a> {
    pub fn new(
        features: &'a [GeoJsonFeature],
        metrics: &'a MetricDataset,
        window: ViewportWindow,
        highlight: &'a dyn HighlightSource,
    ) -> Self {
        Self {
            features,
            metrics,
            window,
            highlight,
            style: MapPanelStyle::default(),
            size: None,
        }
    }

    pub fn style(mut self, style: MapPanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the panel size (otherwise uses available space)
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn show(self, ui: &mut Ui) -> MapPanelResponse {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (response, painter) = ui.allocate_painter(desired_size, Sense::click());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, self.style.background_color);

        let mut outlines = Vec::new();
        for feature in self.features {
            let name = feature.name();
            let Some(geometry) = feature.geometry.as_ref() else {
                continue;
            };

            let fill = self
                .style
                .metric_color(name.and_then(|n| self.metrics.normalized(n)));
            let highlight = name
                .map(|n| self.highlight.highlight_style(n))
                .filter(FeatureStyle::has_visible_stroke);

            for ring in geometry.exterior_rings() {
                if !ring_overlaps(ring, &self.window) {
                    continue;
                }
                let points: Vec<Pos2> = ring
                    .iter()
                    .map(|[lng, lat]| project(LatLng::new(*lat, *lng), &self.window, rect))
                    .collect();
                if points.len() < 3 {
                    continue;
                }

                if let Some(mesh) = fill_mesh(&points, fill) {
                    painter.add(Shape::mesh(mesh));
                }
                if let Some(style) = &highlight {
                    outlines.push(Shape::closed_line(points.clone(), highlight_stroke(style)));
                }
                painter.add(Shape::closed_line(points, self.style.border_stroke));
            }
        }
        // outlines go on top of every fill
        painter.extend(outlines);

        let clicked = if response.clicked() {
            response
                .interact_pointer_pos()
                .map(|pos| unproject(pos, &self.window, rect))
                .and_then(|point| feature_at(self.features, &point))
                .map(str::to_string)
        } else {
            None
        };

        MapPanelResponse { response, clicked }
    }
}

impl Widget for MapPanel<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

/// Screen position of a geographic point for a panel showing `window` in `rect`.
///
/// North is up, so the y ratio is flipped.
pub fn project(point: LatLng, window: &ViewportWindow, rect: Rect) -> Pos2 {
    let ratio = point.to_ratio();
    let fx = window.ratio_x.fraction_of(ratio.x) as f32;
    let fy = window.ratio_y.fraction_of(ratio.y) as f32;
    Pos2::new(rect.min.x + fx * rect.width(), rect.max.y - fy * rect.height())
}

/// Inverse of [`project`]
pub fn unproject(pos: Pos2, window: &ViewportWindow, rect: Rect) -> LatLng {
    let fx = ((pos.x - rect.min.x) / rect.width().max(1.0)) as f64;
    let fy = ((rect.max.y - pos.y) / rect.height().max(1.0)) as f64;
    LatLng::from_ratio(RatioPoint::new(
        window.ratio_x.start + fx * window.ratio_x.width(),
        window.ratio_y.start + fy * window.ratio_y.width(),
    ))
}

/// Named feature whose outline covers `point`.
///
/// Where outlines overlap, the feature with the nearest label point wins.
pub fn feature_at<'f>(features: &'f [GeoJsonFeature], point: &LatLng) -> Option<&'f str> {
    let distance = |feature: &GeoJsonFeature| {
        feature
            .label_point()
            .map(|label| (label.lat - point.lat).powi(2) + (label.lng - point.lng).powi(2))
            .unwrap_or(f64::INFINITY)
    };

    features
        .iter()
        .filter(|feature| feature.name().is_some() && feature.contains_point(point))
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
        .and_then(GeoJsonFeature::name)
}

fn ring_overlaps(ring: &[[f64; 2]], window: &ViewportWindow) -> bool {
    let mut min = RatioPoint::new(f64::INFINITY, f64::INFINITY);
    let mut max = RatioPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for [lng, lat] in ring {
        let ratio = LatLng::new(*lat, *lng).to_ratio();
        min = RatioPoint::new(min.x.min(ratio.x), min.y.min(ratio.y));
        max = RatioPoint::new(max.x.max(ratio.x), max.y.max(ratio.y));
    }
    max.x >= window.ratio_x.start
        && min.x <= window.ratio_x.end
        && max.y >= window.ratio_y.start
        && min.y <= window.ratio_y.end
}

/// Triangulated fill for a ring of any shape, concave included.
///
/// Returns `None` when the ring cannot be triangulated.
fn fill_mesh(points: &[Pos2], fill: Color32) -> Option<Mesh> {
    // earcut expects an open ring
    let open = match points {
        [first, .., last] if first == last => &points[..points.len() - 1],
        _ => points,
    };
    if open.len() < 3 {
        return None;
    }

    let coords: Vec<f64> = open
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();
    let indices = match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) if !indices.is_empty() => indices,
        Ok(_) => return None,
        Err(_) => {
            log::debug!("could not triangulate ring of {} points", open.len());
            return None;
        }
    };

    let mut mesh = Mesh::default();
    for point in open {
        mesh.colored_vertex(*point, fill);
    }
    for triangle in indices.chunks_exact(3) {
        mesh.add_triangle(triangle[0] as u32, triangle[1] as u32, triangle[2] as u32);
    }
    Some(mesh)
}

fn highlight_stroke(style: &FeatureStyle) -> Stroke {
    let [r, g, b, a] = style
        .stroke
        .as_deref()
        .and_then(parse_color)
        .unwrap_or([0, 0, 0, 0]);
    let opacity = style.stroke_opacity.unwrap_or(1.0).clamp(0.0, 1.0);
    let alpha = (a as f64 * opacity).round() as u8;
    Stroke::new(
        style.stroke_width.unwrap_or(1.0) as f32,
        Color32::from_rgba_unmultiplied(r, g, b, alpha),
    )
}

fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::{world_window, AxisRange};
    use crate::data::bundled;

    fn panel_rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(360.0, 180.0))
    }

    #[test]
    fn test_project_world() {
        let rect = panel_rect();
        let window = world_window();
        assert_eq!(project(LatLng::new(0.0, 0.0), &window, rect), Pos2::new(190.0, 110.0));
        assert_eq!(project(LatLng::new(90.0, -180.0), &window, rect), Pos2::new(10.0, 20.0));
        assert_eq!(project(LatLng::new(-90.0, 180.0), &window, rect), Pos2::new(370.0, 200.0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let rect = panel_rect();
        let window = ViewportWindow::new(AxisRange::new(0.41, 0.59), AxisRange::new(0.21, 0.39));
        let point = LatLng::new(-40.0, 5.0);
        let back = unproject(project(point, &window, rect), &window, rect);
        assert!((back.lat - point.lat).abs() < 1e-3);
        assert!((back.lng - point.lng).abs() < 1e-3);
    }

    #[test]
    fn test_ring_culling() {
        let window = ViewportWindow::new(AxisRange::new(0.0, 0.1), AxisRange::new(0.0, 0.1));
        let near_origin = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        assert!(!ring_overlaps(&near_origin, &window));
        assert!(ring_overlaps(&near_origin, &world_window()));
    }

    fn mesh_area(mesh: &Mesh) -> f32 {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].pos);
                ((b - a).x * (c - a).y - (b - a).y * (c - a).x).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn test_concave_ring_fill() {
        // U shape, closed, area 3*3 - 1*2 = 7
        let ring: Vec<Pos2> = [
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
            (0.0, 0.0),
        ]
        .into_iter()
        .map(|(x, y)| Pos2::new(x, y))
        .collect();

        let mesh = fill_mesh(&ring, Color32::RED).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 6 * 3);
        assert!((mesh_area(&mesh) - 7.0).abs() < 1e-4);
        assert!(mesh.vertices.iter().all(|v| v.color == Color32::RED));
    }

    #[test]
    fn test_degenerate_ring_has_no_fill() {
        let line = [Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0), Pos2::new(0.0, 0.0)];
        assert!(fill_mesh(&line, Color32::RED).is_none());
    }

    #[test]
    fn test_metric_color_ramp() {
        let style = MapPanelStyle::default();
        assert_eq!(style.metric_color(Some(0.0)), style.low_color);
        assert_eq!(style.metric_color(Some(1.0)), style.high_color);
        assert_eq!(style.metric_color(Some(2.0)), style.high_color);
        assert_eq!(style.metric_color(None), style.no_data_color);
        assert_eq!(style.metric_color(Some(f64::NAN)), style.no_data_color);
    }

    #[test]
    fn test_highlight_stroke() {
        let stroke = highlight_stroke(&FeatureStyle::highlight());
        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.color, Color32::from_rgb(0, 0x66, 0xff));
    }

    #[test]
    fn test_feature_at_label_points() {
        let features = bundled::features();
        for feature in features {
            let (Some(name), Some(label)) = (feature.name(), feature.label_point()) else {
                continue;
            };
            assert_eq!(feature_at(features, &label), Some(name));
        }
        assert_eq!(feature_at(features, &LatLng::new(-50.0, -140.0)), None);
    }
}
