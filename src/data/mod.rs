pub mod bundled;
pub mod collate;
pub mod geojson;
pub mod index;
pub mod metrics;
