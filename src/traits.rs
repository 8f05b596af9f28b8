//! Seams between the selection logic and whatever draws the map.

use crate::rendering::bridge::ChartState;
use crate::rendering::style::FeatureStyle;
use crate::Result;
use async_trait::async_trait;

/// The map-drawing component.
///
/// The component owns pixel rendering and exposes a version-tagged state
/// object. Reading the state is synchronous and may be impossible before the
/// component has rendered once; writing it is asynchronous because the
/// component may need to update internal rendering state first.
#[async_trait]
pub trait RenderBridge: Send + Sync {
    /// Current state, or `None` when the component cannot report one yet
    fn get_state(&self) -> Option<ChartState>;

    /// Replace the viewport state; resolves once the component accepted it
    async fn set_state(&self, state: ChartState) -> Result<()>;
}

/// Answers per-feature styling questions during a redraw.
///
/// Called once per feature per frame, so implementations must stay cheap and
/// free of side effects.
pub trait HighlightSource {
    fn is_highlighted(&self, name: &str) -> bool;

    fn highlight_style(&self, name: &str) -> FeatureStyle {
        FeatureStyle::for_highlight(self.is_highlighted(name))
    }
}
