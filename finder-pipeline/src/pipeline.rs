use crate::artifact::write_batch;
use crate::company::{extract_company, is_placeholder, title_case};
use crate::error::PipelineError;
use crate::prompts::{generation_prompt, intent_prompt};
use crate::record::{GenerationOutcome, QuestionRecord};
use crate::sanitize::{extract_object, sanitize};
use finder_config::PipelineSettings;
use finder_llm::completion::{Completion, CompletionClient};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Instrument;
use uuid::Uuid;

/// Number of problems requested per query.
pub const TARGET_BATCH_SIZE: usize = 5;

/// What stage 1 learned about the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub company: String,
    pub summary: String,
}

impl Intent {
    /// Read a stage-1 reply, falling back to heuristics per missing key.
    pub fn from_reply(reply: &str, query: &str) -> Self {
        let parsed = extract_object(reply);
        let text_of = |key: &str| {
            parsed
                .as_ref()
                .and_then(|map| map.get(key))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let company = text_of("company")
            .filter(|c| !is_placeholder(c))
            .map(|c| title_case(&c))
            .unwrap_or_else(|| extract_company(query));
        let summary = text_of("summary").unwrap_or_else(|| query.to_string());

        if parsed.is_none() {
            tracing::warn!(%company, "pipeline.intent.unparseable_reply");
        }
        Self { company, summary }
    }
}

/// Two-stage question recommendation run over a completion client.
///
/// Stateless between runs; the optional artifact file is the only side effect.
pub struct QuestionPipeline<'a> {
    client: &'a CompletionClient,
    artifact_path: Option<PathBuf>,
    max_query_chars: usize,
}

impl<'a> QuestionPipeline<'a> {
    pub fn new(client: &'a CompletionClient, settings: &PipelineSettings) -> Self {
        Self {
            client,
            artifact_path: settings.artifact_path.clone(),
            max_query_chars: settings.max_query_chars,
        }
    }

    /// Turn a free-text query into a summary and up to five records.
    pub async fn generate(&self, query: &str) -> Result<GenerationOutcome, PipelineError> {
        let generation_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline.generate", %generation_id);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: &str) -> Result<GenerationOutcome, PipelineError> {
        let query = self.validate(query)?;
        tracing::info!(query_chars = query.chars().count(), "pipeline.start");

        let reply = self.complete(&intent_prompt(query)).await?;
        let intent = Intent::from_reply(&reply, query);
        tracing::info!(company = %intent.company, "pipeline.intent.resolved");

        let reply = self
            .complete(&generation_prompt(
                &intent.summary,
                &intent.company,
                TARGET_BATCH_SIZE,
            ))
            .await?;
        let candidates = sanitize(&reply)?;
        let records = build_records(candidates, &intent.company)?;
        tracing::info!(count = records.len(), "pipeline.records.ready");

        if let Some(path) = &self.artifact_path {
            match write_batch(path, &records).await {
                Ok(()) => tracing::debug!(path = %path.display(), "pipeline.artifact.written"),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "pipeline.artifact.write_failed"),
            }
        }

        Ok(GenerationOutcome {
            summary: intent.summary,
            records,
        })
    }

    fn validate<'q>(&self, query: &'q str) -> Result<&'q str, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::InvalidQuery("query is required".to_string()));
        }
        let chars = query.chars().count();
        if chars > self.max_query_chars {
            return Err(PipelineError::InvalidQuery(format!(
                "query is {chars} characters, the limit is {}",
                self.max_query_chars
            )));
        }
        Ok(query)
    }

    async fn complete(&self, prompt: &str) -> Result<String, PipelineError> {
        match self.client.complete(prompt).await? {
            Completion::Text(text) => Ok(text),
            Completion::Unavailable => {
                tracing::warn!("pipeline.backend_unavailable");
                Err(PipelineError::BackendUnavailable)
            }
        }
    }
}

/// Shape raw candidates into records that all carry `batch_company`.
///
/// Non-object entries are skipped and anything past the target size dropped.
pub fn build_records(
    candidates: Vec<Value>,
    batch_company: &str,
) -> Result<Vec<QuestionRecord>, PipelineError> {
    if candidates.len() > TARGET_BATCH_SIZE {
        tracing::warn!(
            received = candidates.len(),
            kept = TARGET_BATCH_SIZE,
            "pipeline.records.truncated"
        );
    }

    let mut records: Vec<QuestionRecord> = Vec::with_capacity(TARGET_BATCH_SIZE);
    for (index, candidate) in candidates.into_iter().enumerate() {
        if records.len() == TARGET_BATCH_SIZE {
            break;
        }
        let Value::Object(obj) = candidate else {
            tracing::warn!(index, "pipeline.records.skipped_non_object");
            continue;
        };
        let (record, missing) = QuestionRecord::from_model_object(&obj, batch_company);
        if !missing.is_empty() {
            tracing::warn!(index, ?missing, "pipeline.records.missing_fields");
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(PipelineError::EmptyGenerationResult);
    }
    Ok(records)
}
