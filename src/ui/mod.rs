//! egui front end: the map panel, the viewer controls and the bridge that
//! connects them to a [`SelectionController`](crate::SelectionController).

pub mod bridge;
pub mod controls;
pub mod widget;

pub use bridge::EguiBridge;
pub use controls::{ControlAction, ViewerControls};
pub use widget::{MapPanel, MapPanelResponse, MapPanelStyle};
