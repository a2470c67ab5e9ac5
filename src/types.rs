use std::fmt;
use std::path::PathBuf;

/// Which of the engine's standard streams are piped to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirection {
    /// The engine reads and writes files itself.
    None,
    /// Capture standard output.
    OutputOnly,
    /// Feed standard input and capture standard output.
    InputOutput,
}

impl Redirection {
    pub fn pipes_stdin(self) -> bool {
        matches!(self, Redirection::InputOutput)
    }

    pub fn pipes_stdout(self) -> bool {
        !matches!(self, Redirection::None)
    }
}

/// One analysis invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// The engine reads `input` and writes its analysis to `output`.
    FileToFile { input: PathBuf, output: PathBuf },
    /// The engine reads `input`; its standard output is captured.
    FileToLines { input: PathBuf },
    /// `text` is sent to the engine's standard input; its standard output
    /// is captured.
    TextToLines { text: String },
}

impl AnalysisRequest {
    pub fn redirection(&self) -> Redirection {
        match self {
            AnalysisRequest::FileToFile { .. } => Redirection::None,
            AnalysisRequest::FileToLines { .. } => Redirection::OutputOnly,
            AnalysisRequest::TextToLines { .. } => Redirection::InputOutput,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            AnalysisRequest::FileToFile { .. } => "file-to-file",
            AnalysisRequest::FileToLines { .. } => "file-to-lines",
            AnalysisRequest::TextToLines { .. } => "text-to-lines",
        }
    }
}

/// What a finished invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutput {
    /// The engine wrote its analysis to `destination`.
    Written { destination: PathBuf },
    /// Captured standard output.
    Lines(ResultLines),
}

impl AnalysisOutput {
    pub fn into_lines(self) -> Option<ResultLines> {
        match self {
            AnalysisOutput::Lines(lines) => Some(lines),
            AnalysisOutput::Written { .. } => None,
        }
    }
}

/// Lines of engine output, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultLines(Vec<String>);

impl ResultLines {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub(crate) fn push(&mut self, line: String) {
        self.0.push(line);
    }
}

impl From<Vec<String>> for ResultLines {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl IntoIterator for ResultLines {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultLines {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ResultLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
