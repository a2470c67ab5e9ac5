// src/errors.rs

//! Crate-wide error type and the launch-failure reporting policy.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("failed to launch analysis engine '{}': {source}", .engine.display())]
    Launch {
        engine: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("text analysis requires a configured text encoding")]
    MissingEncoding,

    #[error("engine stream error ({stream}): {source}")]
    Stream {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis engine did not finish within {0:?}")]
    Timeout(Duration),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl AnalyzerError {
    /// True when the engine executable could not be found or started.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, AnalyzerError::Launch { .. })
    }

    pub(crate) fn stream(stream: &'static str, source: std::io::Error) -> Self {
        AnalyzerError::Stream { stream, source }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Log-and-continue policy for engine launch failures.
///
/// Launch failures are reported as a diagnostic and turned into `Ok(None)`;
/// every other error is passed through unchanged.
pub trait ReportLaunchFailure<T> {
    fn report_launch_failure(self) -> Result<Option<T>>;
}

impl<T> ReportLaunchFailure<T> for Result<T> {
    fn report_launch_failure(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(AnalyzerError::Launch { engine, source }) => {
                error!(
                    engine = %engine.display(),
                    error = %source,
                    "analysis engine not found or could not be started; nothing was written"
                );
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch_error() -> AnalyzerError {
        AnalyzerError::Launch {
            engine: PathBuf::from("/nowhere/mystem"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    #[test]
    fn launch_failure_is_reported_and_swallowed() {
        let res: Result<u8> = Err(launch_error());
        assert!(matches!(res.report_launch_failure(), Ok(None)));
    }

    #[test]
    fn other_failures_still_propagate() {
        let res: Result<u8> = Err(AnalyzerError::MissingEncoding);
        assert!(matches!(
            res.report_launch_failure(),
            Err(AnalyzerError::MissingEncoding)
        ));

        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.report_launch_failure().unwrap(), Some(7));
    }

    #[test]
    fn launch_message_names_the_engine() {
        let err = launch_error();
        assert!(err.is_launch_failure());
        assert!(err.to_string().contains("/nowhere/mystem"));
    }
}
