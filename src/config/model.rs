// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::config::analyzer::AnalyzerConfig;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [engine]
/// path = "/opt/mystem/mystem"
/// encoding = "utf-8"
/// timeout = "30s"
///
/// [options]
/// one_word_per_line = true
/// grammar_info = true
/// disambiguate = false
/// ```
///
/// Only `[engine].path` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub engine: EngineSection,

    #[serde(default)]
    pub options: OptionsSection,
}

/// `[engine]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineSection {
    /// Path to the analysis engine executable.
    #[serde(default)]
    pub path: String,

    /// Codec label passed to the engine with `-e` and used for its streams.
    #[serde(default)]
    pub encoding: Option<String>,

    /// Duration string (e.g. `"30s"`) bounding each invocation.
    #[serde(default)]
    pub timeout: Option<String>,
}

/// `[options]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OptionsSection {
    #[serde(default)]
    pub one_word_per_line: bool,

    #[serde(default)]
    pub grammar_info: bool,

    #[serde(default)]
    pub disambiguate: bool,
}

/// Validated configuration file.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so the encoding label
/// is known to resolve and the timeout is already parsed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub engine_path: PathBuf,
    pub encoding: Option<String>,
    pub timeout: Option<Duration>,
    pub options: OptionsSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        engine_path: PathBuf,
        encoding: Option<String>,
        timeout: Option<Duration>,
        options: OptionsSection,
    ) -> Self {
        Self {
            engine_path,
            encoding,
            timeout,
            options,
        }
    }

    /// Turn the file into the options an [`crate::Analyzer`] runs with.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            engine_path: self.engine_path.clone(),
            text_encoding: self.encoding.clone(),
            one_word_per_line: self.options.one_word_per_line,
            emit_grammar_info: self.options.grammar_info,
            disambiguate: self.options.disambiguate,
            timeout: self.timeout,
        }
    }
}
