//! What the map looks like: per-feature styles, the declarative chart
//! configuration and the bridge to the component that draws it.

pub mod bridge;
pub mod options;
pub mod style;

pub use bridge::{ChartState, MemoryBridge};
pub use options::{ChartOptions, SeriesOptions};
pub use style::FeatureStyle;
