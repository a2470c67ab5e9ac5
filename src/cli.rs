// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `mystem-bridge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mystem-bridge",
    version,
    about = "Run a morphological analysis engine on files or text.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Mystem.toml` in the current directory is used when it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the analysis engine executable (overrides `[engine].path`).
    #[arg(long, value_name = "PATH")]
    pub engine: Option<PathBuf>,

    /// Encoding of the engine's input and output, e.g. utf-8, cp1251,
    /// koi8-r, cp866.
    #[arg(short = 'e', long, value_name = "NAME")]
    pub encoding: Option<String>,

    /// Print every word on its own line.
    #[arg(short = 'n', long)]
    pub one_word_per_line: bool,

    /// Print grammatical information.
    #[arg(short = 'i', long)]
    pub grammar_info: bool,

    /// Apply contextual disambiguation.
    #[arg(short = 'd', long)]
    pub disambiguate: bool,

    /// Kill the engine if it runs longer than this (e.g. "30s", "500ms").
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MYSTEM_BRIDGE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the configuration and print the engine command line without
    /// running it.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Let the engine write its analysis of INPUT into OUTPUT.
    FileToFile { input: PathBuf, output: PathBuf },

    /// Analyse INPUT and print the engine output.
    File { input: PathBuf },

    /// Analyse TEXT (or standard input when omitted) and print the engine
    /// output. Requires an encoding.
    Text { text: Option<String> },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
