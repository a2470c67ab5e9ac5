// tests/timeout_cancel.rs
#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tokio::sync::oneshot;

use mystem_bridge::{AnalysisRequest, Analyzer, AnalyzerConfig, AnalyzerError};
use mystem_bridge_test_utils::stub_engine::{echo_engine, sleeping_engine};
use mystem_bridge_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn hung_engine_is_killed_after_the_timeout() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let engine = sleeping_engine(dir.path())?;

    let limit = Duration::from_millis(300);
    let analyzer = Analyzer::new(
        AnalyzerConfig::new(engine)
            .with_text_encoding("utf-8")
            .with_timeout(limit),
    );

    let started = Instant::now();
    let err = with_timeout(analyzer.analyze_text("привет")).await.unwrap_err();

    assert!(matches!(err, AnalyzerError::Timeout(d) if d == limit), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_the_engine() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let engine = sleeping_engine(dir.path())?;
    let analyzer = Analyzer::new(AnalyzerConfig::new(engine));

    let (cancel_tx, cancel_rx) = oneshot::channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = cancel_tx.send(());
    });

    let request = AnalysisRequest::FileToLines {
        input: "in.txt".into(),
    };
    let err = with_timeout(analyzer.analyze_with_cancel(request, cancel_rx))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Cancelled), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn dropped_cancel_sender_lets_the_analysis_finish() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let engine = echo_engine(dir.path(), "> ")?;
    let analyzer = Analyzer::new(AnalyzerConfig::new(engine).with_text_encoding("utf-8"));

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    drop(cancel_tx);

    let request = AnalysisRequest::TextToLines {
        text: "мир".to_string(),
    };
    let output = with_timeout(analyzer.analyze_with_cancel(request, cancel_rx)).await?;

    let lines = output.into_lines().expect("text analysis captures lines");
    assert_eq!(lines.as_slice(), ["> мир"]);
    Ok(())
}

#[tokio::test]
async fn generous_timeout_does_not_interfere() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let engine = echo_engine(dir.path(), "")?;
    let analyzer = Analyzer::new(
        AnalyzerConfig::new(engine)
            .with_text_encoding("cp866")
            .with_timeout(Duration::from_secs(30)),
    );

    let lines = with_timeout(analyzer.analyze_text("тест")).await?;
    assert_eq!(lines.as_slice(), ["тест"]);
    Ok(())
}
