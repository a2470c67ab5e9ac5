// src/exec/mod.rs

//! Process execution layer.
//!
//! This module drives the external analysis engine through
//! `tokio::process::Command`.
//!
//! - [`launcher`] builds the argument list, starts the engine hidden and
//!   owns the process handle until exit.
//! - [`stream`] writes standard input and drains standard output/error.
//! - [`codec`] resolves encoding labels and transcodes single lines.
//! - [`runner`] ties the three together for one invocation, including the
//!   timeout and cancellation race.

pub mod codec;
pub mod launcher;
pub mod runner;
pub mod stream;

pub use launcher::{EngineArgs, StreamCodecs, SubprocessHandle, launch};
pub use runner::run_analysis;
