//! Viewer builder for fluent API configuration
//!
//! [`ViewerBuilder`] assembles a [`SelectionController`] from a feature index,
//! a zoom profile, presentation options and optionally an already-available
//! rendering collaborator.

use crate::{
    core::config::{ViewerOptions, ZoomConfig, ZoomProfile},
    data::{bundled, index::GeoIndex},
    prelude::Arc,
    selection::controller::SelectionController,
    traits::RenderBridge,
    Result,
};

/// Builder for creating and configuring [`SelectionController`] instances
pub struct ViewerBuilder {
    /// Feature index; the bundled world is used when unset
    index: Option<Arc<GeoIndex>>,
    zoom: ZoomProfile,
    options: ViewerOptions,
    bridge: Option<Arc<dyn RenderBridge>>,
}

impl ViewerBuilder {
    /// Create a new builder with the country zoom profile and default options
    pub fn new() -> Self {
        Self {
            index: None,
            zoom: ZoomProfile::default(),
            options: ViewerOptions::default(),
            bridge: None,
        }
    }

    /// Use a specific feature index instead of the bundled world
    pub fn with_index(mut self, index: GeoIndex) -> Self {
        self.index = Some(Arc::new(index));
        self
    }

    /// Share an index with other controllers
    pub fn with_shared_index(mut self, index: Arc<GeoIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the zoom framing preset
    pub fn with_zoom_profile(mut self, profile: ZoomProfile) -> Self {
        self.zoom = profile;
        self
    }

    /// Set custom zoom framing
    pub fn with_zoom_config(mut self, config: ZoomConfig) -> Self {
        self.zoom = ZoomProfile::Custom(config);
        self
    }

    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Set the feature selected by the shortcut control
    pub fn with_shortcut(mut self, name: impl Into<String>) -> Self {
        self.options.shortcut = name.into();
        self
    }

    /// Mount a rendering collaborator right away
    pub fn with_bridge(mut self, bridge: Arc<dyn RenderBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Build the controller, validating the zoom configuration
    pub fn build(self) -> Result<SelectionController> {
        let zoom = self.zoom.resolve();
        zoom.validate()?;

        let index = self
            .index
            .unwrap_or_else(|| Arc::new(bundled::index().clone()));
        if index.is_empty() {
            log::warn!("building a viewer with no selectable features");
        }

        let controller = SelectionController::new(index, zoom, self.options);
        if let Some(bridge) = self.bridge {
            controller.mount(bridge);
        }

        log::debug!("built {:?}", controller);
        Ok(controller)
    }

    /// Build the controller ready to be shared across tasks
    pub fn build_shared(self) -> Result<Arc<SelectionController>> {
        self.build().map(Arc::new)
    }
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for common viewer configurations
impl ViewerBuilder {
    /// Country framing over the bundled world
    pub fn world() -> Self {
        Self::new().with_zoom_profile(ZoomProfile::Country)
    }

    /// Wider framing that keeps neighbouring countries in view
    pub fn regional() -> Self {
        Self::new().with_zoom_profile(ZoomProfile::Regional)
    }

    /// Roughly continent-sized framing
    pub fn continental() -> Self {
        Self::new().with_zoom_profile(ZoomProfile::Continental)
    }
}
