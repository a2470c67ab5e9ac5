// src/lib.rs

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod flags;
pub mod logging;
pub mod types;

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

pub use crate::analyzer::Analyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::errors::{AnalyzerError, ReportLaunchFailure};
pub use crate::types::{AnalysisOutput, AnalysisRequest, Redirection, ResultLines};

use crate::cli::{CliArgs, Commands};
use crate::config::duration::parse_timeout;
use crate::config::{default_config_path, load_and_validate};
use crate::exec::EngineArgs;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config file loading and CLI overrides
/// - request construction (reading stdin for `text` without an argument)
/// - one engine invocation, printing captured lines to stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let analyzer = Analyzer::new(config);
    let request = build_request(&args.command).await?;

    if args.dry_run {
        print_dry_run(&analyzer, &request);
        return Ok(());
    }

    if matches!(request, AnalysisRequest::FileToFile { .. }) {
        // A missing engine is reported, not fatal, for file output.
        let written = analyzer.analyze(request).await.report_launch_failure()?;
        if let Some(AnalysisOutput::Written { destination }) = written {
            info!(destination = %destination.display(), "analysis written");
        }
        return Ok(());
    }

    let lines = analyzer
        .analyze(request)
        .await?
        .into_lines()
        .unwrap_or_default();

    let mut out = std::io::stdout().lock();
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    Ok(())
}

/// Merge the config file (explicit, or `Mystem.toml` if present) with CLI
/// overrides.
pub fn resolve_config(args: &CliArgs) -> Result<AnalyzerConfig> {
    let file_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(default_config_path()).filter(|p| p.is_file()),
    };

    let mut config = match (&file_path, &args.engine) {
        (Some(path), _) => {
            debug!(config = %path.display(), "loading config file");
            load_and_validate(path)?.analyzer_config()
        }
        (None, Some(engine)) => AnalyzerConfig::new(engine),
        (None, None) => {
            return Err(AnalyzerError::ConfigError(
                "no analysis engine configured; pass --engine or set [engine].path in Mystem.toml"
                    .to_string(),
            )
            .into());
        }
    };

    if let Some(engine) = &args.engine {
        config.engine_path = engine.clone();
    }
    if let Some(label) = &args.encoding {
        config.text_encoding = Some(label.clone());
    }
    if let Some(raw) = &args.timeout {
        let timeout = parse_timeout(raw)
            .map_err(|e| AnalyzerError::ConfigError(format!("--timeout: {e}")))?;
        config.timeout = Some(timeout);
    }
    config.one_word_per_line |= args.one_word_per_line;
    config.emit_grammar_info |= args.grammar_info;
    config.disambiguate |= args.disambiguate;

    Ok(config)
}

async fn build_request(command: &Commands) -> Result<AnalysisRequest> {
    Ok(match command {
        Commands::FileToFile { input, output } => AnalysisRequest::FileToFile {
            input: input.clone(),
            output: output.clone(),
        },
        Commands::File { input } => AnalysisRequest::FileToLines {
            input: input.clone(),
        },
        Commands::Text { text: Some(text) } => AnalysisRequest::TextToLines { text: text.clone() },
        Commands::Text { text: None } => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            let text = text.trim_end_matches(['\r', '\n']).to_string();
            AnalysisRequest::TextToLines { text }
        }
    })
}

/// Print what would be run, without starting the engine.
fn print_dry_run(analyzer: &Analyzer, request: &AnalysisRequest) {
    let config = analyzer.config();
    let args = EngineArgs::for_request(analyzer.flags(), request);

    println!("mystem-bridge dry-run");
    println!("  engine: {}", config.engine_path.display());
    println!("  mode: {}", request.mode_name());
    println!("  redirection: {:?}", request.redirection());
    println!("  flags: {}", analyzer.flags());
    println!("  arguments: {args}");
    if let Some(label) = config.encoding_label() {
        println!("  encoding: {label}");
    }
    match config.timeout {
        Some(limit) => println!("  timeout: {limit:?}"),
        None => println!("  timeout: none"),
    }

    debug!("dry-run complete (no execution)");
}
