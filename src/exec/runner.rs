// src/exec/runner.rs

//! One complete engine invocation: launch, stream duties, exit, release.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::{ChildStdin, ChildStdout};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::errors::{AnalyzerError, Result};
use crate::exec::codec::{encode_line, file_capture_codec, resolve_codec};
use crate::exec::launcher::{EngineArgs, StreamCodecs, SubprocessHandle, launch};
use crate::exec::stream::{drain_lines, write_input};
use crate::flags::build_flags;
use crate::types::{AnalysisOutput, AnalysisRequest, ResultLines};

/// Stream duties for one invocation, prepared before the engine starts.
struct StreamPlan {
    input: Option<Vec<u8>>,
    codecs: StreamCodecs,
}

enum Interaction {
    Finished(Result<(Option<ResultLines>, ExitStatus)>),
    TimedOut(Duration),
    Cancelled,
}

/// Run the engine once for `request`.
///
/// Codec problems are reported before anything is launched. If
/// `config.timeout` elapses or `cancel` fires, the engine is killed.
pub async fn run_analysis(
    config: &AnalyzerConfig,
    request: AnalysisRequest,
    cancel: Option<oneshot::Receiver<()>>,
) -> Result<AnalysisOutput> {
    let plan = plan_streams(config, &request)?;
    let args = EngineArgs::for_request(build_flags(config), &request);

    info!(
        engine = %config.engine_path.display(),
        mode = request.mode_name(),
        args = %args,
        "starting analysis engine"
    );

    let mut handle = launch(
        config.engine_path(),
        &args,
        request.redirection(),
        plan.codecs,
    )?;
    let stdin = handle.take_stdin();
    let stdout = handle.take_stdout();

    let outcome = {
        let work = interact(&mut handle, stdin, stdout, plan);
        tokio::pin!(work);

        tokio::select! {
            res = &mut work => Interaction::Finished(res),
            limit = deadline(config.timeout) => Interaction::TimedOut(limit),
            _ = cancelled(cancel) => Interaction::Cancelled,
        }
    };

    match outcome {
        Interaction::Finished(Ok((lines, status))) => {
            handle.release(status);
            Ok(match (lines, request) {
                (Some(lines), _) => AnalysisOutput::Lines(lines),
                (None, AnalysisRequest::FileToFile { output, .. }) => AnalysisOutput::Written {
                    destination: output,
                },
                (None, _) => AnalysisOutput::Lines(ResultLines::default()),
            })
        }
        Interaction::Finished(Err(err)) => {
            handle.terminate().await;
            Err(err)
        }
        Interaction::TimedOut(limit) => {
            warn!(
                engine = %config.engine_path.display(),
                timeout = ?limit,
                "analysis engine timed out"
            );
            handle.terminate().await;
            Err(AnalyzerError::Timeout(limit))
        }
        Interaction::Cancelled => {
            handle.terminate().await;
            Err(AnalyzerError::Cancelled)
        }
    }
}

fn plan_streams(config: &AnalyzerConfig, request: &AnalysisRequest) -> Result<StreamPlan> {
    Ok(match request {
        AnalysisRequest::FileToFile { .. } => StreamPlan {
            input: None,
            codecs: StreamCodecs::default(),
        },
        AnalysisRequest::FileToLines { .. } => StreamPlan {
            input: None,
            codecs: StreamCodecs {
                input: None,
                output: Some(file_capture_codec()),
            },
        },
        AnalysisRequest::TextToLines { text } => {
            let label = config
                .encoding_label()
                .ok_or(AnalyzerError::MissingEncoding)?;
            let codec = resolve_codec(label)?;
            StreamPlan {
                input: Some(encode_line(text, codec)),
                codecs: StreamCodecs {
                    input: Some(codec),
                    output: Some(codec),
                },
            }
        }
    })
}

/// Input is written and closed before any output is read.
async fn interact(
    handle: &mut SubprocessHandle,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
    plan: StreamPlan,
) -> Result<(Option<ResultLines>, ExitStatus)> {
    if let (Some(stdin), Some(bytes)) = (stdin, plan.input) {
        write_input(stdin, &bytes).await?;
    }

    let lines = match (stdout, plan.codecs.output) {
        (Some(stdout), Some(codec)) => Some(drain_lines(stdout, codec).await?),
        _ => None,
    };

    let status = handle.wait().await?;
    debug!(?status, "engine exit observed");
    Ok((lines, status))
}

async fn deadline(timeout: Option<Duration>) -> Duration {
    match timeout {
        Some(limit) => {
            tokio::time::sleep(limit).await;
            limit
        }
        None => std::future::pending().await,
    }
}

/// Resolves only on an explicit cancellation; a dropped sender never does.
async fn cancelled(cancel: Option<oneshot::Receiver<()>>) {
    match cancel {
        Some(rx) => {
            if rx.await.is_err() {
                debug!("cancel channel closed without explicit cancellation");
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_mode_without_encoding_is_rejected_up_front() {
        let cfg = AnalyzerConfig::new("mystem");
        let request = AnalysisRequest::TextToLines {
            text: "привет".to_string(),
        };
        assert!(matches!(
            plan_streams(&cfg, &request),
            Err(AnalyzerError::MissingEncoding)
        ));
    }

    #[test]
    fn file_capture_uses_fixed_codec() {
        let cfg = AnalyzerConfig::new("mystem").with_text_encoding("utf-8");
        let request = AnalysisRequest::FileToLines {
            input: "in.txt".into(),
        };
        let plan = plan_streams(&cfg, &request).unwrap();
        assert_eq!(plan.codecs.output, Some(file_capture_codec()));
        assert_eq!(plan.codecs.input, None);
        assert!(plan.input.is_none());
    }

    #[tokio::test]
    async fn unknown_encoding_is_reported_before_launch() {
        let cfg = AnalyzerConfig::new("/definitely/not/here/mystem").with_text_encoding("nope-42");
        let request = AnalysisRequest::TextToLines {
            text: "мир".to_string(),
        };
        let err = run_analysis(&cfg, request, None).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::UnknownEncoding(ref l) if l == "nope-42"));
    }
}
