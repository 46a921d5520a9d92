//! Shared observability helpers for binaries and integration tests.
//!
//! [`init_logging`] installs one global `tracing` subscriber that writes to a
//! daily rolling file and, optionally, mirrors events to `stderr`. Call it
//! once near process start; later calls are no-ops that hand back the log
//! file path resolved by the first call.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable consulted when no explicit log directory is given.
pub const LOG_DIR_ENV: &str = "QUESTFINDER_LOG_DIR";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse a user supplied format name; anything but `json` means text.
    pub fn from_name(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for the file name and default directory).
    pub app_name: &'static str,
    /// Explicit directory for log output. If `None`, [`LOG_DIR_ENV`] is
    /// consulted, then the platform data directory.
    pub log_dir: Option<PathBuf>,
    /// Duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Filter applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "questfinder",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the log file path for the current day.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let file_prefix = format!("{}.log", config.app_name);
    let today = Local::now().format("%Y-%m-%d").to_string();
    let full_path = dir.join(format!("{file_prefix}.{today}"));

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, &file_prefix));
    let _ = LOG_GUARD.set(guard);

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    layers.push(match config.format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    });
    if config.emit_stderr {
        layers.push(match config.format {
            LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        });
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    match std::env::var(LOG_DIR_ENV) {
        Ok(env_dir) if !env_dir.trim().is_empty() => expand_home(Path::new(env_dir.trim())),
        _ => dirs::data_local_dir()
            .map(|base| base.join(app_name))
            .unwrap_or_else(|| PathBuf::from(".").join(app_name)),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
