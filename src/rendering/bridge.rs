use crate::core::viewport::ViewportWindow;
use crate::prelude::Mutex;
use crate::traits::RenderBridge;
use crate::{Result, WorldViewError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::PoisonError;

/// Version-tagged viewport state exchanged with the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ViewportWindow>,
}

impl ChartState {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            zoom: None,
        }
    }

    pub fn with_zoom(version: impl Into<String>, zoom: ViewportWindow) -> Self {
        Self {
            version: version.into(),
            zoom: Some(zoom),
        }
    }
}

/// In-memory collaborator that records every state-set it receives.
///
/// Useful headless and in tests. It reports no state until it accepts one
/// (unless built with a version) and can be told to reject writes.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    state: Mutex<Option<ChartState>>,
    calls: Mutex<Vec<ChartState>>,
    rejection: Mutex<Option<String>>,
}

impl MemoryBridge {
    /// A bridge that reports no state until it accepts one
    pub fn new() -> Self {
        Self::default()
    }

    /// A bridge that reports `version` from the start
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(Some(ChartState::new(version))),
            ..Self::default()
        }
    }

    /// Makes every following state-set fail with `reason`
    pub fn reject_with(&self, reason: impl Into<String>) {
        *lock(&self.rejection) = Some(reason.into());
    }

    /// Accepts state-sets again
    pub fn accept(&self) {
        *lock(&self.rejection) = None;
    }

    /// Every state-set received so far, rejected ones included
    pub fn calls(&self) -> Vec<ChartState> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn last_call(&self) -> Option<ChartState> {
        lock(&self.calls).last().cloned()
    }

    /// Zoom of the last accepted state
    pub fn current_zoom(&self) -> Option<ViewportWindow> {
        lock(&self.state).as_ref().and_then(|state| state.zoom)
    }
}

#[async_trait]
impl RenderBridge for MemoryBridge {
    fn get_state(&self) -> Option<ChartState> {
        lock(&self.state).clone()
    }

    async fn set_state(&self, state: ChartState) -> Result<()> {
        lock(&self.calls).push(state.clone());

        if let Some(reason) = lock(&self.rejection).clone() {
            return Err(WorldViewError::StateRejected(reason));
        }

        log::debug!("memory bridge accepted state version {}", state.version);
        *lock(&self.state) = Some(state);
        Ok(())
    }
}

/// Locks a mutex, recovering the data if a panicking holder poisoned it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::world_window;

    #[tokio::test]
    async fn test_records_and_stores_state() {
        let bridge = MemoryBridge::new();
        assert!(bridge.get_state().is_none());

        bridge
            .set_state(ChartState::with_zoom("1.0", world_window()))
            .await
            .unwrap();

        assert_eq!(bridge.call_count(), 1);
        assert_eq!(bridge.current_zoom(), Some(world_window()));
        assert_eq!(bridge.get_state().unwrap().version, "1.0");
    }

    #[tokio::test]
    async fn test_rejection_keeps_previous_state() {
        let bridge = MemoryBridge::with_version("2.0");
        bridge.reject_with("not ready");

        let result = bridge.set_state(ChartState::with_zoom("2.0", world_window())).await;
        assert!(matches!(result, Err(WorldViewError::StateRejected(ref r)) if r == "not ready"));
        assert_eq!(bridge.call_count(), 1);
        assert_eq!(bridge.current_zoom(), None);

        bridge.accept();
        assert!(bridge.set_state(ChartState::new("2.0")).await.is_ok());
    }

    #[test]
    fn test_chart_state_wire_shape() {
        let json = serde_json::to_value(ChartState::new("12.3.1")).unwrap();
        assert_eq!(json, serde_json::json!({"version": "12.3.1"}));

        let parsed: ChartState = serde_json::from_value(serde_json::json!({
            "version": "9",
            "zoom": {"ratioX": {"start": 0.1, "end": 0.2}, "ratioY": {"start": 0.3, "end": 0.4}}
        }))
        .unwrap();
        assert_eq!(parsed.zoom.unwrap().ratio_y.end, 0.4);
    }
}
