//! The selected feature and the controller that turns selections into
//! viewport changes.

pub mod controller;
pub mod state;

pub use controller::{ResetOutcome, SelectOutcome, SelectionController};
pub use state::SelectionState;
