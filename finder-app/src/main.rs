use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use finder_common::FinderError;
use finder_common::observability::{LogConfig, LogFormat, init_logging};
use finder_config::{FinderConfig, FinderConfigLoader, LoggingSettings};
use finder_llm::{BackendStatus, connect_backend};
use finder_pipeline::QuestionPipeline;
use report::{HealthReport, SearchResponse, SelfTestReport};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

mod cli;
mod report;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = load_config(&cli.config)?;

    let log_path = init_logging(log_config(&cfg.logging))?;
    tracing::info!(config = %cli.config.display(), log = %log_path.display(), "questfinder.start");

    let client = connect_backend(&cfg.llm).await;

    let healthy = match cli.command {
        Command::Search { query } => {
            let pipeline = QuestionPipeline::new(&client, &cfg.pipeline);
            let response = SearchResponse::from_result(pipeline.generate(&query).await);
            if let SearchResponse::Failure { error, status, .. } = &response {
                tracing::error!(status, %error, "questfinder.search.failed");
            }
            print_json(&response)?;
            response.is_success()
        }
        Command::Health { live } => {
            let self_test = if live {
                Some(SelfTestReport::from_result(client.self_test().await))
            } else {
                None
            };
            let report = HealthReport {
                status: BackendStatus::report(&cfg.llm, &client),
                self_test,
            };
            print_json(&report)?;
            report.is_healthy()
        }
    };

    Ok(if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// File (if present) overlaid by `QUESTFINDER_*` variables; env wins.
fn load_config(path: &Path) -> finder_common::Result<FinderConfig> {
    FinderConfigLoader::new()
        .with_optional_file(path)
        .load()
        .map_err(|e| FinderError::Config(format!("{}: {e}", path.display())))
}

fn log_config(settings: &LoggingSettings) -> LogConfig {
    LogConfig {
        log_dir: settings.dir.clone(),
        emit_stderr: settings.stderr,
        format: LogFormat::from_name(&settings.format),
        default_filter: settings.filter.clone(),
        ..LogConfig::default()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
