//! [`RenderBridge`] backed by an egui map panel.
//!
//! The bridge holds the viewport state the panel paints from. Accepted zoom
//! windows are animated towards over the configured duration, and the egui
//! context is asked to repaint so the animation runs without user input.

use crate::core::viewport::ViewportWindow;
use crate::prelude::Mutex;
use crate::rendering::bridge::{lock, ChartState};
use crate::traits::RenderBridge;
use crate::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Transition {
    from: ViewportWindow,
    started: Instant,
}

#[derive(Debug)]
struct PanelState {
    rendered: bool,
    chart: ChartState,
    transition: Option<Transition>,
}

pub struct EguiBridge {
    duration: Duration,
    state: Mutex<PanelState>,
    ctx: Mutex<Option<egui::Context>>,
}

impl EguiBridge {
    pub fn new(version: impl Into<String>, duration: Duration) -> Self {
        Self {
            duration,
            state: Mutex::new(PanelState {
                rendered: false,
                chart: ChartState::new(version),
                transition: None,
            }),
            ctx: Mutex::new(None),
        }
    }

    /// Context to wake when the viewport changes
    pub fn attach_context(&self, ctx: egui::Context) {
        *lock(&self.ctx) = Some(ctx);
    }

    /// Called by the panel once it has painted; state is readable from then on
    pub fn mark_rendered(&self) {
        let mut state = lock(&self.state);
        if !state.rendered {
            log::debug!("map panel rendered, version {}", state.chart.version);
            state.rendered = true;
        }
    }

    pub fn is_rendered(&self) -> bool {
        lock(&self.state).rendered
    }

    /// Window to paint right now
    pub fn current_window(&self) -> ViewportWindow {
        self.window_at(Instant::now())
    }

    /// Window to paint at `now`, part way through any running transition
    pub fn window_at(&self, now: Instant) -> ViewportWindow {
        let state = lock(&self.state);
        let target = state.chart.zoom.unwrap_or_default();
        match &state.transition {
            Some(transition) => transition.from.lerp(&target, ease_in_out(self.progress(transition, now))),
            None => target,
        }
    }

    pub fn is_animating(&self) -> bool {
        let state = lock(&self.state);
        state
            .transition
            .as_ref()
            .map(|transition| self.progress(transition, Instant::now()) < 1.0)
            .unwrap_or(false)
    }

    fn progress(&self, transition: &Transition, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(transition.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn request_repaint(&self) {
        if let Some(ctx) = lock(&self.ctx).as_ref() {
            ctx.request_repaint();
        }
    }
}

impl std::fmt::Debug for EguiBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiBridge")
            .field("duration", &self.duration)
            .field("state", &*lock(&self.state))
            .finish()
    }
}

#[async_trait]
impl RenderBridge for EguiBridge {
    fn get_state(&self) -> Option<ChartState> {
        let state = lock(&self.state);
        state.rendered.then(|| state.chart.clone())
    }

    async fn set_state(&self, chart: ChartState) -> Result<()> {
        let now = Instant::now();
        let from = self.window_at(now);
        {
            let mut state = lock(&self.state);
            if chart.zoom.is_some() {
                state.transition = Some(Transition { from, started: now });
            }
            state.chart = chart;
        }
        self.request_repaint();
        Ok(())
    }
}

// smooth start and end
fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
