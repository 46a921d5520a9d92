#![allow(dead_code)]

use async_trait::async_trait;
use finder_common::observability::{LogConfig, init_logging};
use finder_config::PipelineSettings;
use finder_llm::candidates::ModelCandidates;
use finder_llm::completion::{Backend, CompletionClient};
use finder_llm::traits::{GenerationSettings, LlmError, ModelInfo, TextGenerator};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

static INIT_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        init_logging(LogConfig {
            app_name: "questfinder-tests",
            log_dir: Some(std::env::temp_dir().join("questfinder-tests")),
            emit_stderr: true,
            default_filter: "debug".to_string(),
            ..LogConfig::default()
        })
        .unwrap_or_default()
    });
}

/// Backend replaying canned replies in order, one per call, recording prompts.
#[derive(Default)]
pub struct Replay {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl Replay {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: LlmError) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Err(error)])),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for Replay {
    async fn generate_text(
        &self,
        _model: &str,
        prompt: &str,
        _settings: GenerationSettings,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::EmptyResponse("replay exhausted".into())))
    }

    async fn list_available_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        Ok(vec![ModelInfo {
            name: "models/replay".into(),
            supported: true,
        }])
    }

    fn backend_name(&self) -> &str {
        "replay"
    }
}

/// Single-candidate client over `backend`.
pub fn client_for(backend: Arc<Replay>) -> CompletionClient {
    CompletionClient::new(
        Backend::Available {
            generator: backend,
            candidates: ModelCandidates::from_static(["replay"]),
        },
        GenerationSettings::default(),
    )
}

pub fn settings_with_artifact(path: Option<PathBuf>) -> PipelineSettings {
    PipelineSettings {
        artifact_path: path,
        ..PipelineSettings::default()
    }
}

/// A plausible stage-2 reply: fenced, relative links, trailing comma.
pub fn messy_batch(company: &str) -> String {
    let rows: Vec<String> = (1..=5)
        .map(|i| {
            format!(
                r#"  {{"url": "/problems/problem-{i}/", "platform": "LeetCode", "topic": "Problem {i}", "difficulty_level": "Medium", "company": "{company}", "category": "Graphs"}},"#
            )
        })
        .collect();
    format!("```json\n[\n{}\n]\n```", rows.join("\n"))
}
