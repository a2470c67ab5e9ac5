// src/exec/launcher.rs

//! Starting the engine process and owning its lifetime.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use encoding_rs::Encoding;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::errors::{AnalyzerError, Result};
use crate::exec::stream::spawn_stderr_logger;
use crate::flags::FlagString;
use crate::types::{AnalysisRequest, Redirection};

/// Arguments for one engine invocation: flags, then the input path, then the
/// output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineArgs {
    flags: FlagString,
    paths: Vec<PathBuf>,
}

impl EngineArgs {
    pub fn for_request(flags: FlagString, request: &AnalysisRequest) -> Self {
        let paths = match request {
            AnalysisRequest::FileToFile { input, output } => vec![input.clone(), output.clone()],
            AnalysisRequest::FileToLines { input } => vec![input.clone()],
            AnalysisRequest::TextToLines { .. } => Vec::new(),
        };
        Self { flags, paths }
    }

    pub fn flags(&self) -> &FlagString {
        &self.flags
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Discrete argv entries handed to the OS.
    pub fn to_os_args(&self) -> Vec<OsString> {
        self.flags
            .tokens()
            .iter()
            .map(OsString::from)
            .chain(self.paths.iter().map(|p| p.as_os_str().to_owned()))
            .collect()
    }
}

/// Renders `<flags> "<input>" "<output>"`.
///
/// Paths are only wrapped in double quotes, not escaped, so a path that
/// itself contains `"` renders ambiguously.
impl fmt::Display for EngineArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(self.paths.len() + 1);
        if !self.flags.is_empty() {
            parts.push(self.flags.to_string());
        }
        for path in &self.paths {
            parts.push(format!("\"{}\"", path.display()));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Keep the engine from opening a console window.
pub trait CommandExt {
    fn hide_window(&mut self) -> &mut Self;
}

impl CommandExt for Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        // CREATE_NO_WINDOW
        self.creation_flags(0x0800_0000);
        self
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

/// Codecs applied to the redirected streams. `None` for a stream the
/// bridge does not transcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCodecs {
    pub input: Option<&'static Encoding>,
    pub output: Option<&'static Encoding>,
}

/// One running engine process.
///
/// Lives for exactly one invocation; dropping it kills a still-running
/// engine.
#[derive(Debug)]
pub struct SubprocessHandle {
    child: Child,
    engine: PathBuf,
    args: EngineArgs,
    redirection: Redirection,
    codecs: StreamCodecs,
}

/// Start the engine with the requested redirections.
pub fn launch(
    engine: &Path,
    args: &EngineArgs,
    redirection: Redirection,
    codecs: StreamCodecs,
) -> Result<SubprocessHandle> {
    let mut cmd = Command::new(engine);
    cmd.args(args.to_os_args())
        .stdin(if redirection.pipes_stdin() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(if redirection.pipes_stdout() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .hide_window();

    let mut child = cmd.spawn().map_err(|source| AnalyzerError::Launch {
        engine: engine.to_path_buf(),
        source,
    })?;

    debug!(
        engine = %engine.display(),
        pid = child.id(),
        ?redirection,
        "engine process started"
    );

    // Always consume stderr so the engine never blocks on a full pipe.
    if let Some(stderr) = child.stderr.take() {
        let _ = spawn_stderr_logger(stderr, engine.display().to_string());
    }

    Ok(SubprocessHandle {
        child,
        engine: engine.to_path_buf(),
        args: args.clone(),
        redirection,
        codecs,
    })
}

impl SubprocessHandle {
    pub fn args(&self) -> &EngineArgs {
        &self.args
    }

    pub fn redirection(&self) -> Redirection {
        self.redirection
    }

    pub fn codecs(&self) -> StreamCodecs {
        self.codecs
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Wait for the engine to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        self.child.wait().await.map_err(AnalyzerError::from)
    }

    /// Log the exit status and drop every OS handle to the process.
    pub fn release(self, status: ExitStatus) {
        let code = status.code().unwrap_or(-1);
        let input_encoding = self.codecs.input.map(Encoding::name);
        let output_encoding = self.codecs.output.map(Encoding::name);
        if status.success() {
            info!(
                engine = %self.engine.display(),
                args = %self.args,
                redirection = ?self.redirection,
                ?input_encoding,
                ?output_encoding,
                exit_code = code,
                "analysis engine exited"
            );
        } else {
            warn!(
                engine = %self.engine.display(),
                args = %self.args,
                redirection = ?self.redirection,
                ?input_encoding,
                ?output_encoding,
                exit_code = code,
                "analysis engine exited with failure status"
            );
        }
    }

    /// Kill the engine and reap it.
    pub async fn terminate(mut self) {
        info!(engine = %self.engine.display(), "killing analysis engine");
        if let Err(e) = self.child.kill().await {
            warn!(
                engine = %self.engine.display(),
                error = %e,
                "failed to kill analysis engine"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::flags::build_flags;

    fn flags() -> FlagString {
        build_flags(&AnalyzerConfig::new("mystem").with_grammar_info(true))
    }

    #[test]
    fn file_to_file_args_quote_both_paths() {
        let request = AnalysisRequest::FileToFile {
            input: PathBuf::from("in.txt"),
            output: PathBuf::from("out dir/out.txt"),
        };
        let args = EngineArgs::for_request(flags(), &request);
        assert_eq!(args.to_string(), r#"-i "in.txt" "out dir/out.txt""#);
        assert_eq!(
            args.to_os_args(),
            vec![
                OsString::from("-i"),
                OsString::from("in.txt"),
                OsString::from("out dir/out.txt")
            ]
        );
    }

    #[test]
    fn text_mode_passes_flags_only() {
        let request = AnalysisRequest::TextToLines {
            text: "привет".to_string(),
        };
        let args = EngineArgs::for_request(flags(), &request);
        assert!(args.paths().is_empty());
        assert_eq!(args.to_string(), "-i");
    }

    #[test]
    fn no_flags_renders_paths_only() {
        let request = AnalysisRequest::FileToLines {
            input: PathBuf::from("a.txt"),
        };
        let args = EngineArgs::for_request(FlagString::default(), &request);
        assert_eq!(args.to_string(), r#""a.txt""#);
    }

    #[tokio::test]
    async fn missing_engine_is_a_launch_failure() {
        let args = EngineArgs::for_request(
            FlagString::default(),
            &AnalysisRequest::FileToLines {
                input: PathBuf::from("a.txt"),
            },
        );
        let err = launch(
            Path::new("/definitely/not/here/mystem"),
            &args,
            Redirection::OutputOnly,
            StreamCodecs::default(),
        )
        .unwrap_err();
        assert!(err.is_launch_failure());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn handle_remembers_how_it_was_started() {
        let args = EngineArgs::for_request(
            flags(),
            &AnalysisRequest::FileToLines {
                input: PathBuf::from("a.txt"),
            },
        );
        let codecs = StreamCodecs {
            input: None,
            output: Some(encoding_rs::WINDOWS_1251),
        };

        let mut handle = launch(Path::new("true"), &args, Redirection::OutputOnly, codecs).unwrap();

        assert_eq!(handle.args(), &args);
        assert_eq!(handle.redirection(), Redirection::OutputOnly);
        assert_eq!(handle.codecs(), codecs);

        let status = handle.wait().await.unwrap();
        assert!(status.success());
        handle.release(status);
    }
}
