//! rehabrisk-runtime — Runs the fusion pipeline end to end and persists the
//! decision table.

pub mod config;
pub mod output;
pub mod pipeline;

pub use config::RuntimeConfig;
pub use pipeline::{fuse_and_decide, run_fusion_pipeline, run_fusion_pipeline_with_policy};
