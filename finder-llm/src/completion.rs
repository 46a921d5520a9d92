//! Completion client that walks the model candidates in priority order.

use crate::candidates::ModelCandidates;
use crate::traits::{GenerationSettings, TextGenerator};
use std::sync::Arc;

const SELF_TEST_PROMPT: &str = "Reply with the single word: OK";

/// Result of one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Text(String),
    /// The backend was never configured; callers should degrade, not fail hard.
    Unavailable,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The credential was rejected. Trying other models would fail the same way.
    #[error("Your API key is invalid. Please check your key and try again. ({0})")]
    Auth(String),

    #[error(
        "All {attempted} candidate models failed. This can happen if the API key is invalid or expired, \
         or if there are network issues. Last error: {last_error}"
    )]
    AllModelsExhausted { attempted: usize, last_error: String },
}

/// Backend state resolved once at process start.
pub enum Backend {
    Available {
        generator: Arc<dyn TextGenerator>,
        candidates: ModelCandidates,
    },
    Unavailable {
        reason: String,
    },
}

/// Fallback-aware completion client.
///
/// Candidates are tried strictly one after another; the first success wins.
pub struct CompletionClient {
    backend: Backend,
    settings: GenerationSettings,
}

impl CompletionClient {
    pub fn new(backend: Backend, settings: GenerationSettings) -> Self {
        Self { backend, settings }
    }

    /// A client that answers every call with [`Completion::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(
            Backend::Unavailable {
                reason: reason.into(),
            },
            GenerationSettings::default(),
        )
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Available { .. })
    }

    /// Why the backend is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            Backend::Unavailable { reason } => Some(reason),
            Backend::Available { .. } => None,
        }
    }

    /// Model candidates in try order; empty when unavailable.
    pub fn candidates(&self) -> &[String] {
        match &self.backend {
            Backend::Available { candidates, .. } => candidates.as_slice(),
            Backend::Unavailable { .. } => &[],
        }
    }

    /// Complete `prompt` with the first candidate that succeeds.
    pub async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError> {
        let (generator, candidates) = match &self.backend {
            Backend::Available {
                generator,
                candidates,
            } => (generator, candidates),
            Backend::Unavailable { reason } => {
                tracing::debug!(%reason, "completion.unavailable");
                return Ok(Completion::Unavailable);
            }
        };

        let mut last_error = String::from("no candidate models configured");
        let mut attempted = 0usize;

        for model in candidates.iter() {
            attempted += 1;
            match generator.generate_text(model, prompt, self.settings).await {
                Ok(text) => {
                    tracing::info!(model, attempt = attempted, "completion.ok");
                    return Ok(Completion::Text(text));
                }
                Err(e) if e.is_credential_failure() => {
                    tracing::error!(model, error = %e, "completion.auth_failed");
                    return Err(CompletionError::Auth(e.to_string()));
                }
                Err(e) => {
                    tracing::warn!(model, error = %e, "completion.candidate_failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(CompletionError::AllModelsExhausted {
            attempted,
            last_error,
        })
    }

    /// Live round trip through the fallback chain.
    pub async fn self_test(&self) -> Result<Completion, CompletionError> {
        self.complete(SELF_TEST_PROMPT).await
    }
}
