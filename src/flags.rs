// src/flags.rs

//! Command-line flags understood by the analysis engine.

use std::fmt;

use crate::config::AnalyzerConfig;

pub const ONE_WORD_PER_LINE: &str = "-n";
pub const GRAMMAR_INFO: &str = "-i";
pub const DISAMBIGUATE: &str = "-d";
pub const ENCODING: &str = "-e";

/// Ordered engine flags derived from an [`AnalyzerConfig`].
///
/// Renders as the tokens joined by single spaces; empty when every option
/// is at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagString {
    tokens: Vec<String>,
}

impl FlagString {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for FlagString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Build the engine flags for `config`.
///
/// When no option differs from the engine default nothing is emitted at all.
/// Otherwise the order is fixed: `-n`, `-i`, `-d`, then `-e <encoding>`.
pub fn build_flags(config: &AnalyzerConfig) -> FlagString {
    let encoding = config.encoding_label();

    let any_set = config.one_word_per_line
        || config.emit_grammar_info
        || config.disambiguate
        || encoding.is_some();
    if !any_set {
        return FlagString::default();
    }

    let mut tokens = Vec::with_capacity(5);
    if config.one_word_per_line {
        tokens.push(ONE_WORD_PER_LINE.to_string());
    }
    if config.emit_grammar_info {
        tokens.push(GRAMMAR_INFO.to_string());
    }
    if config.disambiguate {
        tokens.push(DISAMBIGUATE.to_string());
    }
    if let Some(label) = encoding {
        tokens.push(ENCODING.to_string());
        tokens.push(label.to_string());
    }

    FlagString { tokens }
}
