//! `copycheck-engine` — Structured content reconciliation engine.
//!
//! Pure engine crate: receives reference lines and page text, returns
//! classified results. No network or IO dependencies.

pub mod align;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod report;
pub mod summary;

pub use config::{EngineConfig, Mode, ReportConfig};
pub use engine::run;
pub use error::EngineError;
pub use model::{
    ClassificationResult, LineStatus, TaggedLine, ValidationInput, ValidationResult,
};
