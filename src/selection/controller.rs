//! Selection handling: records which feature is selected, zooms the map onto
//! it through the [`RenderBridge`], and answers highlight queries during
//! redraws.

use crate::core::config::{ViewerOptions, ZoomConfig};
use crate::core::viewport::{compute_window, world_window, ViewportWindow};
use crate::data::index::GeoIndex;
use crate::data::metrics::MetricDataset;
use crate::prelude::{Arc, Mutex};
use crate::rendering::bridge::{lock, ChartState};
use crate::rendering::options::ChartOptions;
use crate::runtime::{spawn, AsyncHandle};
use crate::selection::state::SelectionState;
use crate::traits::{HighlightSource, RenderBridge};
use crate::{Result, WorldViewError};
use std::sync::atomic::{AtomicU64, Ordering};

/// How a selection request ended
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Empty name: the selection was cleared and the viewport left alone
    Cleared,
    /// Selected, but no center is known so the viewport was left alone
    Unknown,
    /// Selected, but no collaborator is mounted
    Unavailable,
    /// The collaborator accepted the zoom
    Zoomed(ViewportWindow),
    /// Accepted, but a newer request was issued while this one was in flight
    Superseded(ViewportWindow),
    /// The collaborator refused the state; the selection still stands
    Failed(String),
}

impl SelectOutcome {
    /// Window that was sent to the collaborator, if any
    pub fn window(&self) -> Option<ViewportWindow> {
        match self {
            Self::Zoomed(window) | Self::Superseded(window) => Some(*window),
            _ => None,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self, Self::Zoomed(_))
    }
}

/// How a reset request ended
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    Reset,
    Unavailable,
    Superseded,
    Failed(String),
}

/// Owns the selection and drives the rendering collaborator.
///
/// Shared behind an [`Arc`]: every method takes `&self`, the selection lock is
/// never held across an await, and overlapping requests are told apart by a
/// sequence number so a stale completion never overwrites the bookkeeping of
/// a newer one.
pub struct SelectionController {
    index: Arc<GeoIndex>,
    zoom: ZoomConfig,
    options: ViewerOptions,
    state: Mutex<SelectionState>,
    bridge: Mutex<Option<Arc<dyn RenderBridge>>>,
    sequence: AtomicU64,
    applied: Mutex<Option<ViewportWindow>>,
}

impl SelectionController {
    pub fn new(index: Arc<GeoIndex>, zoom: ZoomConfig, options: ViewerOptions) -> Self {
        Self {
            index,
            zoom,
            options,
            state: Mutex::new(SelectionState::new()),
            bridge: Mutex::new(None),
            sequence: AtomicU64::new(0),
            applied: Mutex::new(None),
        }
    }

    /// Attaches the collaborator; later requests go to it
    pub fn mount(&self, bridge: Arc<dyn RenderBridge>) {
        log::debug!("rendering collaborator mounted");
        *lock(&self.bridge) = Some(bridge);
    }

    pub fn unmount(&self) {
        log::debug!("rendering collaborator unmounted");
        *lock(&self.bridge) = None;
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.bridge).is_some()
    }

    /// Selects `name` and zooms onto its center.
    ///
    /// An empty name clears the selection. A name without a known center is
    /// still selected, but the viewport does not move.
    pub async fn select(&self, name: &str) -> SelectOutcome {
        if name.is_empty() {
            lock(&self.state).clear();
            log::debug!("selection cleared");
            return SelectOutcome::Cleared;
        }

        lock(&self.state).select(name);

        let Some(center) = self.index.center(name) else {
            log::warn!("{}", WorldViewError::UnknownSelection(name.to_string()));
            return SelectOutcome::Unknown;
        };

        let window = compute_window(center, &self.zoom);
        log::debug!(
            "zooming to {:?}: x {:.3}..{:.3}, y {:.3}..{:.3}",
            name,
            window.ratio_x.start,
            window.ratio_x.end,
            window.ratio_y.start,
            window.ratio_y.end
        );

        match self.push_window(window).await {
            Ok(true) => {
                log::info!("zoomed to {:?}", name);
                SelectOutcome::Zoomed(window)
            }
            Ok(false) => {
                log::debug!("zoom to {:?} was superseded", name);
                SelectOutcome::Superseded(window)
            }
            Err(WorldViewError::CollaboratorUnavailable) => {
                log::warn!("cannot zoom to {:?}: collaborator not mounted", name);
                SelectOutcome::Unavailable
            }
            Err(e) => {
                log::error!("failed to zoom to {:?}: {}", name, e);
                SelectOutcome::Failed(failure_reason(e))
            }
        }
    }

    /// Selects the configured shortcut feature
    pub async fn select_shortcut(&self) -> SelectOutcome {
        let name = self.options.shortcut.clone();
        self.select(&name).await
    }

    /// Zooms back out to the whole world. The selection is kept.
    pub async fn reset(&self) -> ResetOutcome {
        match self.push_window(world_window()).await {
            Ok(true) => {
                log::info!("zoom reset to world");
                ResetOutcome::Reset
            }
            Ok(false) => ResetOutcome::Superseded,
            Err(WorldViewError::CollaboratorUnavailable) => {
                log::warn!("cannot reset zoom: collaborator not mounted");
                ResetOutcome::Unavailable
            }
            Err(e) => {
                log::error!("failed to reset zoom: {}", e);
                ResetOutcome::Failed(failure_reason(e))
            }
        }
    }

    /// Runs [`select`](Self::select) on the async runtime without waiting
    pub fn dispatch_select(self: &Arc<Self>, name: impl Into<String>) -> Box<dyn AsyncHandle> {
        let controller = Arc::clone(self);
        let name = name.into();
        spawn(async move {
            controller.select(&name).await;
        })
    }

    /// Runs [`reset`](Self::reset) on the async runtime without waiting
    pub fn dispatch_reset(self: &Arc<Self>) -> Box<dyn AsyncHandle> {
        let controller = Arc::clone(self);
        spawn(async move {
            controller.reset().await;
        })
    }

    /// Sends `window` to the collaborator.
    ///
    /// Returns `Ok(false)` when a newer request was issued before this one
    /// resolved.
    async fn push_window(&self, window: ViewportWindow) -> Result<bool> {
        let bridge = lock(&self.bridge)
            .clone()
            .ok_or(WorldViewError::CollaboratorUnavailable)?;

        // an empty version counts as unreported
        let version = match bridge.get_state() {
            Some(state) if !state.version.is_empty() => state.version,
            _ => {
                log::debug!(
                    "collaborator reported no version, using {}",
                    self.options.fallback_version
                );
                self.options.fallback_version.clone()
            }
        };

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        bridge.set_state(ChartState::with_zoom(version, window)).await?;

        if self.sequence.load(Ordering::SeqCst) != sequence {
            return Ok(false);
        }
        *lock(&self.applied) = Some(window);
        Ok(true)
    }

    /// Selected feature name, if any
    pub fn selected(&self) -> Option<String> {
        lock(&self.state).selected().map(str::to_string)
    }

    /// Selectable names in dictionary order
    pub fn names(&self) -> &[String] {
        self.index.names()
    }

    pub fn index(&self) -> &GeoIndex {
        &self.index
    }

    pub fn zoom_config(&self) -> &ZoomConfig {
        &self.zoom
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Last window the collaborator accepted that was not superseded
    pub fn applied_window(&self) -> Option<ViewportWindow> {
        *lock(&self.applied)
    }

    /// Chart configuration whose highlight layer follows this controller
    pub fn chart_options(self: &Arc<Self>, metrics: &MetricDataset) -> ChartOptions {
        let highlight: Arc<dyn HighlightSource + Send + Sync> = self.clone();
        ChartOptions::build(&self.options, self.index.names(), metrics, highlight)
    }
}

impl HighlightSource for SelectionController {
    fn is_highlighted(&self, name: &str) -> bool {
        lock(&self.state).is_highlighted(name)
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("features", &self.index.len())
            .field("zoom", &self.zoom)
            .field("selected", &self.selected())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

fn failure_reason(error: WorldViewError) -> String {
    match error {
        WorldViewError::StateRejected(reason) => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::FALLBACK_STATE_VERSION;
    use crate::rendering::bridge::MemoryBridge;
    use crate::rendering::style::FeatureStyle;
    use serde_json::json;

    fn controller() -> SelectionController {
        let index = GeoIndex::from_value(&json!([
            {"properties": {"name": "Null Island", "label_x": 0.0, "label_y": 0.0}},
            {"properties": {"name": "Chile", "label_x": -71.0, "label_y": -37.0}},
            {"properties": {"name": "Atlantis"}},
        ]));
        SelectionController::new(
            Arc::new(index),
            ZoomConfig::centered(0.15, 0.1),
            ViewerOptions::default(),
        )
    }

    fn mounted(bridge: MemoryBridge) -> (SelectionController, Arc<MemoryBridge>) {
        let controller = controller();
        let bridge = Arc::new(bridge);
        controller.mount(bridge.clone());
        (controller, bridge)
    }

    #[tokio::test]
    async fn test_select_zooms_and_highlights() {
        let (controller, bridge) = mounted(MemoryBridge::with_version("3.1"));

        let outcome = controller.select("Null Island").await;
        let window = outcome.window().unwrap();
        assert!(outcome.is_zoomed());
        assert!((window.ratio_x.start - 0.41).abs() < 1e-9);
        assert!((window.ratio_y.end - 0.59).abs() < 1e-9);

        let call = bridge.last_call().unwrap();
        assert_eq!(call.version, "3.1");
        assert_eq!(call.zoom, Some(window));
        assert_eq!(controller.applied_window(), Some(window));

        assert!(controller.is_highlighted("Null Island"));
        assert!(!controller.is_highlighted("Chile"));
        assert_eq!(controller.highlight_style("Null Island"), FeatureStyle::highlight());
        assert_eq!(controller.highlight_style("Chile"), FeatureStyle::transparent());
    }

    #[tokio::test]
    async fn test_repeated_select_is_stable() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        let first = controller.select("Chile").await;
        let second = controller.select("Chile").await;
        assert_eq!(first, second);
        assert_eq!(bridge.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_name_selected_without_zoom() {
        let (controller, bridge) = mounted(MemoryBridge::new());

        assert_eq!(controller.select("Atlantis").await, SelectOutcome::Unknown);
        assert_eq!(controller.select("El Dorado").await, SelectOutcome::Unknown);
        assert_eq!(controller.selected().as_deref(), Some("El Dorado"));
        assert!(controller.is_highlighted("El Dorado"));
        assert_eq!(bridge.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_name_clears() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        controller.select("Chile").await;

        assert_eq!(controller.select("").await, SelectOutcome::Cleared);
        assert_eq!(controller.selected(), None);
        assert!(!controller.is_highlighted("Chile"));
        assert!(!controller.is_highlighted(""));
        assert_eq!(bridge.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_keeps_selection() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        controller.select("Chile").await;

        assert_eq!(controller.reset().await, ResetOutcome::Reset);
        assert_eq!(bridge.current_zoom(), Some(world_window()));
        assert_eq!(controller.selected().as_deref(), Some("Chile"));
        assert_eq!(controller.applied_window(), Some(world_window()));
    }

    #[tokio::test]
    async fn test_reset_without_selection_still_sets_state() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        assert_eq!(controller.reset().await, ResetOutcome::Reset);
        assert_eq!(bridge.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_version() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        controller.select("Chile").await;
        assert_eq!(bridge.calls()[0].version, FALLBACK_STATE_VERSION);
    }

    #[tokio::test]
    async fn test_empty_reported_version_falls_back() {
        let (controller, bridge) = mounted(MemoryBridge::with_version(""));
        assert!(controller.select("Chile").await.is_zoomed());
        assert_eq!(bridge.last_call().unwrap().version, FALLBACK_STATE_VERSION);

        assert_eq!(controller.reset().await, ResetOutcome::Reset);
        assert_eq!(bridge.last_call().unwrap().version, FALLBACK_STATE_VERSION);
    }

    #[tokio::test]
    async fn test_rejected_state_keeps_selection() {
        let (controller, bridge) = mounted(MemoryBridge::new());
        bridge.reject_with("busy");

        assert_eq!(
            controller.select("Chile").await,
            SelectOutcome::Failed("busy".to_string())
        );
        assert_eq!(controller.selected().as_deref(), Some("Chile"));
        assert_eq!(controller.applied_window(), None);
        assert_eq!(controller.reset().await, ResetOutcome::Failed("busy".to_string()));
        assert_eq!(bridge.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unmounted_records_selection() {
        let controller = controller();
        assert!(!controller.is_mounted());

        assert_eq!(controller.select("Chile").await, SelectOutcome::Unavailable);
        assert_eq!(controller.selected().as_deref(), Some("Chile"));
        assert_eq!(controller.reset().await, ResetOutcome::Unavailable);

        let bridge = Arc::new(MemoryBridge::new());
        controller.mount(bridge.clone());
        assert!(controller.is_mounted());
        controller.unmount();
        assert_eq!(controller.select("Chile").await, SelectOutcome::Unavailable);
        assert_eq!(bridge.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shortcut_uses_configured_name() {
        let controller = SelectionController::new(
            Arc::new(GeoIndex::default()),
            ZoomConfig::default(),
            ViewerOptions {
                shortcut: "Chile".to_string(),
                ..ViewerOptions::default()
            },
        );
        assert_eq!(controller.select_shortcut().await, SelectOutcome::Unknown);
        assert_eq!(controller.selected().as_deref(), Some("Chile"));
    }

    #[test]
    fn test_chart_options_follow_selection() {
        let controller = Arc::new(controller());
        let options = controller.chart_options(&MetricDataset::default());
        let overlay = options.highlight_series().unwrap();
        assert_eq!(overlay.data.as_ref().map(Vec::len), Some(3));

        assert_eq!(overlay.style_for("Chile"), FeatureStyle::transparent());
        lock(&controller.state).select("Chile");
        assert_eq!(overlay.style_for("Chile"), FeatureStyle::highlight());
    }
}
