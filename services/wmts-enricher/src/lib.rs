//! WMTS access-log enricher.
//!
//! Reads JSON-lines records produced by an upstream log parser, locates the
//! WMTS tile each one requested and writes the tile coordinates back into
//! the record.

pub mod backend;
pub mod config_loader;
pub mod pipeline;

pub use backend::{build_reprojector, BackendError, ReprojectorKind};
pub use config_loader::{load_config, parse_config};
pub use pipeline::{Pipeline, PipelineStats, DEFAULT_BATCH_SIZE};
