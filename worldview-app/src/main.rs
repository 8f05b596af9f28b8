use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use worldview::{
    data::{bundled, geojson::GeoJsonFeature, metrics::MetricDataset},
    ui::{ControlAction, EguiBridge, MapPanel, ViewerControls},
    SelectionController, ViewerBuilder,
};

/// Standalone world map viewer application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let controller = ViewerBuilder::world()
        .build_shared()
        .context("failed to configure the viewer")?;

    let bridge = Arc::new(EguiBridge::new(
        env!("CARGO_PKG_VERSION"),
        Duration::from_millis(controller.options().animation_duration_ms),
    ));
    controller.mount(bridge.clone());

    match controller.chart_options(bundled::metrics()).to_json() {
        Ok(options) => log::debug!("chart options: {}", options),
        Err(e) => log::warn!("could not serialize chart options: {}", e),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(controller.options().title.as_str()),
        ..Default::default()
    };

    eframe::run_native(
        "worldview-app",
        options,
        Box::new(move |cc| Box::new(WorldViewApp::new(cc, controller, bridge))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))?;

    Ok(())
}

/// The main application struct
struct WorldViewApp {
    controller: Arc<SelectionController>,
    bridge: Arc<EguiBridge>,
    features: &'static [GeoJsonFeature],
    metrics: &'static MetricDataset,
}

impl WorldViewApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        controller: Arc<SelectionController>,
        bridge: Arc<EguiBridge>,
    ) -> Self {
        bridge.attach_context(cc.egui_ctx.clone());

        Self {
            controller,
            bridge,
            features: bundled::features(),
            metrics: bundled::metrics(),
        }
    }

    // requests run in the background so a slow collaborator never stalls a frame
    fn handle(&self, action: ControlAction) {
        match action {
            ControlAction::Select(name) => {
                self.controller.dispatch_select(name);
            }
            ControlAction::Shortcut => {
                let name = self.controller.options().shortcut.clone();
                self.controller.dispatch_select(name);
            }
            ControlAction::Reset => {
                self.controller.dispatch_reset();
            }
        }
    }
}

impl eframe::App for WorldViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(action) = ViewerControls::new(&self.controller).show(ui) {
                self.handle(action);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.controller.options().title.as_str());
            });

            let window = self.bridge.current_window();
            let panel = MapPanel::new(self.features, self.metrics, window, &*self.controller);
            let response = panel.show(ui);
            self.bridge.mark_rendered();

            if let Some(name) = response.clicked {
                self.controller.dispatch_select(name);
            }
        });

        if self.bridge.is_animating() {
            ctx.request_repaint();
        }
    }
}
