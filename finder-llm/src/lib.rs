//! Text-generation backend integration for the question finder.
//!
//! This crate exposes the [`traits::TextGenerator`] capability, a Gemini REST
//! implementation, model-candidate discovery, and the
//! [`completion::CompletionClient`] that walks candidates in priority order.
//! [`connect_backend`] resolves everything once from [`LlmSettings`]; when no
//! credential is configured it still returns a client, one that answers every
//! call with [`completion::Completion::Unavailable`].
//!
//! # Examples
//! ```no_run
//! use finder_config::LlmSettings;
//! use finder_llm::{completion::Completion, connect_backend};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = connect_backend(&LlmSettings::default()).await;
//! match client.complete("Say hello").await {
//!     Ok(Completion::Text(text)) => println!("{text}"),
//!     Ok(Completion::Unavailable) => println!("backend not configured"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
pub mod candidates;
pub mod completion;
pub mod gemini;
pub mod status;
pub mod traits;

use candidates::ModelCandidates;
use completion::{Backend, CompletionClient};
use finder_config::LlmSettings;
use gemini::GeminiClient;
use std::sync::Arc;
use std::time::Duration;
use traits::{GenerationSettings, TextGenerator};

pub use status::BackendStatus;

/// Resolve the backend once at process start.
pub async fn connect_backend(settings: &LlmSettings) -> CompletionClient {
    let generation = GenerationSettings {
        temperature: settings.temperature,
        max_output_tokens: settings.max_output_tokens,
    };

    let Some(api_key) = settings.api_key.clone() else {
        tracing::warn!("llm.backend.unavailable: no API key configured");
        return CompletionClient::unavailable("API key not configured");
    };

    let client = match GeminiClient::new(
        api_key,
        Duration::from_secs(settings.request_timeout_secs.max(1)),
    ) {
        Ok(client) => client.with_base_url(settings.base_url.as_str()),
        Err(e) => {
            tracing::warn!(error = %e, "llm.backend.unavailable");
            return CompletionClient::unavailable(e.to_string());
        }
    };
    let generator: Arc<dyn TextGenerator> = Arc::new(client);

    let candidates = if settings.discover_models {
        ModelCandidates::discover(generator.as_ref(), &settings.default_models).await
    } else {
        ModelCandidates::from_static(&settings.default_models)
    };
    tracing::info!(
        backend = generator.backend_name(),
        candidates = ?candidates.as_slice(),
        "llm.backend.ready"
    );

    CompletionClient::new(
        Backend::Available {
            generator,
            candidates,
        },
        generation,
    )
}
