// src/config/mod.rs

//! Configuration for the analysis engine.
//!
//! Responsibilities:
//! - Define the in-memory options an analyzer runs with (`analyzer.rs`).
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate labels and durations (`validate.rs`, `duration.rs`).

pub mod analyzer;
pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use analyzer::AnalyzerConfig;
pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, EngineSection, OptionsSection, RawConfigFile};
