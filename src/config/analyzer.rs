// src/config/analyzer.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options controlling one analysis engine.
///
/// Constructed once and owned by an [`crate::Analyzer`] for its lifetime.
/// `engine_path` is not checked here: a missing executable only surfaces
/// when a launch is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub engine_path: PathBuf,
    /// Codec label for the engine's streams (`-e`). `None` keeps the engine
    /// default.
    pub text_encoding: Option<String>,
    /// `-n`: print every word on its own line.
    pub one_word_per_line: bool,
    /// `-i`: print grammatical information.
    pub emit_grammar_info: bool,
    /// `-d`: contextual disambiguation.
    pub disambiguate: bool,
    /// Upper bound for one invocation. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl AnalyzerConfig {
    pub fn new(engine_path: impl Into<PathBuf>) -> Self {
        Self {
            engine_path: engine_path.into(),
            text_encoding: None,
            one_word_per_line: false,
            emit_grammar_info: false,
            disambiguate: false,
            timeout: None,
        }
    }

    pub fn with_text_encoding(mut self, label: impl Into<String>) -> Self {
        self.text_encoding = Some(label.into());
        self
    }

    pub fn with_one_word_per_line(mut self, val: bool) -> Self {
        self.one_word_per_line = val;
        self
    }

    pub fn with_grammar_info(mut self, val: bool) -> Self {
        self.emit_grammar_info = val;
        self
    }

    pub fn with_disambiguation(mut self, val: bool) -> Self {
        self.disambiguate = val;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    /// The configured encoding label, treating an empty label as unset.
    pub fn encoding_label(&self) -> Option<&str> {
        self.text_encoding
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
