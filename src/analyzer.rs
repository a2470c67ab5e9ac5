// src/analyzer.rs

use std::path::{Path, PathBuf};

use tokio::sync::oneshot;

use crate::config::AnalyzerConfig;
use crate::errors::Result;
use crate::exec::run_analysis;
use crate::flags::{FlagString, build_flags};
use crate::types::{AnalysisOutput, AnalysisRequest, ResultLines};

/// Front end for a morphological analysis engine running as a subprocess.
///
/// Every call starts a fresh engine process and waits for it to exit; no
/// process or stream is shared between calls.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The flags every invocation passes to the engine.
    pub fn flags(&self) -> FlagString {
        build_flags(&self.config)
    }

    /// Run one analysis. A launch failure is returned as
    /// [`crate::AnalyzerError::Launch`] for every request kind; use
    /// [`crate::errors::ReportLaunchFailure`] to log it and carry on instead.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutput> {
        run_analysis(&self.config, request, None).await
    }

    /// Like [`Analyzer::analyze`], but sending on the paired sender kills the
    /// engine and yields [`crate::AnalyzerError::Cancelled`].
    pub async fn analyze_with_cancel(
        &self,
        request: AnalysisRequest,
        cancel: oneshot::Receiver<()>,
    ) -> Result<AnalysisOutput> {
        run_analysis(&self.config, request, Some(cancel)).await
    }

    /// Let the engine read `input` and write its analysis to `output`.
    pub async fn analyze_file_to_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let request = AnalysisRequest::FileToFile {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
        };
        match self.analyze(request).await? {
            AnalysisOutput::Written { destination } => Ok(destination),
            AnalysisOutput::Lines(_) => Ok(output.as_ref().to_path_buf()),
        }
    }

    /// Analyse `input` and return the engine's output lines (read as
    /// windows-1251).
    pub async fn analyze_file(&self, input: impl AsRef<Path>) -> Result<ResultLines> {
        let request = AnalysisRequest::FileToLines {
            input: input.as_ref().to_path_buf(),
        };
        Ok(self.analyze(request).await?.into_lines().unwrap_or_default())
    }

    /// Analyse `text` through the engine's standard streams using the
    /// configured text encoding.
    pub async fn analyze_text(&self, text: impl Into<String>) -> Result<ResultLines> {
        let request = AnalysisRequest::TextToLines { text: text.into() };
        Ok(self.analyze(request).await?.into_lines().unwrap_or_default())
    }
}
