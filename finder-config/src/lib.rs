//! Loader for question finder configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are added, environment last:
//!
//! 1. YAML/TOML/JSON files or inline YAML snippets
//! 2. `QUESTFINDER_`-prefixed environment variables, nested with `__`
//!    (`QUESTFINDER_LLM__MAX_OUTPUT_TOKENS=1200`)
//!
//! String values may reference other variables as `${VAR}`; expansion runs
//! after merging and is bounded so self-referencing variables terminate.
//! Every section has defaults, so an empty source set is a valid config.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Environment prefix for overrides.
pub const ENV_PREFIX: &str = "QUESTFINDER";
/// Conventional credential variable consulted when `llm.api_key` is unset.
pub const API_KEY_FALLBACK_ENV: &str = "GOOGLE_API_KEY";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL_CANDIDATES: [&str; 3] = ["gemini-pro", "gemini-1.0-pro", "gemini-1.5-flash"];
pub const DEFAULT_ARTIFACT_PATH: &str = "related_questions.json";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    pub llm: LlmSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

/// Backend settings for the text-generation capability.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    /// Credential for the backend. Blank or unresolved values count as absent.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Static candidate list, used as-is when discovery is off or fails.
    pub default_models: Vec<String>,
    pub discover_models: bool,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            default_models: DEFAULT_MODEL_CANDIDATES.iter().map(|m| m.to_string()).collect(),
            discover_models: true,
            temperature: 0.0,
            max_output_tokens: 800,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Where each successful batch is dumped for debugging; `null` disables it.
    pub artifact_path: Option<PathBuf>,
    pub max_query_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            artifact_path: Some(PathBuf::from(DEFAULT_ARTIFACT_PATH)),
            max_query_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `text` or `json`.
    pub format: String,
    pub stderr: bool,
    /// Default filter directive when `RUST_LOG` is unset.
    pub filter: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            stderr: false,
            filter: "info".to_string(),
            dir: None,
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) if s.contains('$') => {
            let mut cur = std::mem::take(s);
            for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                let expanded = shellexpand::env(&cur)
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| cur.clone());
                if expanded == cur {
                    break;
                }
                cur = expanded;
            }
            *s = cur;
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn usable_secret(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.contains("${"))
}

/// Builder hiding the `config` crate wiring (files + env overrides).
pub struct FinderConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FinderConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FinderConfigLoader {
    /// Start from defaults plus `QUESTFINDER_` environment overrides.
    ///
    /// ```
    /// use finder_config::FinderConfigLoader;
    ///
    /// let config = FinderConfigLoader::new()
    ///     .with_yaml_str("pipeline:\n  max_query_chars: 120")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.pipeline.max_query_chars, 120);
    /// assert_eq!(config.llm.max_output_tokens, 800);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when it does not exist.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests, embedded defaults).
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and deserialize.
    ///
    /// ```
    /// use finder_config::FinderConfigLoader;
    ///
    /// temp_env::with_var("FINDER_DOC_KEY", Some("doc-secret"), || {
    ///     let config = FinderConfigLoader::new()
    ///         .with_yaml_str("llm:\n  api_key: \"${FINDER_DOC_KEY}\"")
    ///         .load()
    ///         .expect("valid configuration");
    ///     assert_eq!(config.llm.api_key.as_deref(), Some("doc-secret"));
    /// });
    /// ```
    pub fn load(self) -> Result<FinderConfig, ConfigError> {
        // Environment goes last so it overrides every file source.
        let builder = self.builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("llm.default_models"),
        );

        let mut v: Value = builder.build()?.try_deserialize()?;
        expand_env_in_value(&mut v);

        let mut typed: FinderConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        typed.llm.api_key = usable_secret(typed.llm.api_key.take())
            .or_else(|| usable_secret(std::env::var(API_KEY_FALLBACK_ENV).ok()));

        Ok(typed)
    }
}
