// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::config::duration::parse_timeout;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AnalyzerError, Result};
use crate::exec::codec::resolve_codec;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AnalyzerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let engine_path = validate_engine_path(&raw)?;
        let encoding = validate_encoding(&raw)?;
        let timeout = validate_timeout(&raw)?;
        Ok(ConfigFile::new_unchecked(
            engine_path,
            encoding,
            timeout,
            raw.options,
        ))
    }
}

fn validate_engine_path(cfg: &RawConfigFile) -> Result<PathBuf> {
    let path = cfg.engine.path.trim();
    if path.is_empty() {
        return Err(AnalyzerError::ConfigError(
            "[engine].path must name the analysis engine executable".to_string(),
        ));
    }
    Ok(PathBuf::from(path))
}

fn validate_encoding(cfg: &RawConfigFile) -> Result<Option<String>> {
    let Some(label) = cfg.engine.encoding.as_deref().map(str::trim) else {
        return Ok(None);
    };
    if label.is_empty() {
        return Ok(None);
    }

    resolve_codec(label).map_err(|_| {
        AnalyzerError::ConfigError(format!(
            "[engine].encoding '{}' is not a known encoding label",
            label
        ))
    })?;

    Ok(Some(label.to_string()))
}

fn validate_timeout(cfg: &RawConfigFile) -> Result<Option<Duration>> {
    let Some(raw) = cfg.engine.timeout.as_deref() else {
        return Ok(None);
    };

    parse_timeout(raw)
        .map(Some)
        .map_err(|e| AnalyzerError::ConfigError(format!("[engine].timeout: {e}")))
}
