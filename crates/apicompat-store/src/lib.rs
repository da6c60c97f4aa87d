//! File boundaries of an ApiCompat run: surface files, baseline and remap
//! files, run configuration, and the report output.

pub mod baseline;
pub mod config;
pub mod errors;
pub mod remap;
pub mod sink;
pub mod surface;

pub use baseline::load_baseline;
pub use config::RunConfig;
pub use remap::load_remap_file;
pub use sink::{open_report_sink, OpenedSink, SinkTarget};
pub use surface::{load_surface, load_surfaces};
