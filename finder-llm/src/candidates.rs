//! Ordered list of backend models tried by the completion client.

use crate::traits::TextGenerator;

/// Priority-ordered, duplicate-free model identifiers.
///
/// Read-only once built; rebuilding only costs a discovery call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCandidates(Vec<String>);

impl ModelCandidates {
    /// Build from a static list, dropping blanks and duplicates but keeping order.
    ///
    /// ```
    /// use finder_llm::candidates::ModelCandidates;
    ///
    /// let c = ModelCandidates::from_static(["gemini-pro", " ", "models/gemini-pro", "gemini-1.5-flash"]);
    /// assert_eq!(c.as_slice(), ["gemini-pro", "gemini-1.5-flash"]);
    /// ```
    pub fn from_static<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for model in models {
            let name = normalize_model_name(model.as_ref());
            if !name.is_empty() && !out.iter().any(|m| m == name) {
                out.push(name.to_string());
            }
        }
        Self(out)
    }

    /// Ask the backend which models can generate text.
    ///
    /// Best-effort: any discovery error, or a listing with no usable model,
    /// falls back to `defaults`.
    pub async fn discover(generator: &dyn TextGenerator, defaults: &[String]) -> Self {
        match generator.list_available_models().await {
            Ok(models) => {
                let discovered =
                    Self::from_static(models.iter().filter(|m| m.supported).map(|m| &m.name));
                if discovered.is_empty() {
                    tracing::info!(
                        backend = generator.backend_name(),
                        "candidates.discovery.empty_using_defaults"
                    );
                    Self::from_static(defaults)
                } else {
                    tracing::info!(
                        backend = generator.backend_name(),
                        count = discovered.len(),
                        "candidates.discovery.ok"
                    );
                    discovered
                }
            }
            Err(e) => {
                tracing::warn!(
                    backend = generator.backend_name(),
                    error = %e,
                    "candidates.discovery.failed_using_defaults"
                );
                Self::from_static(defaults)
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_model_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix("models/").unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{GenerationSettings, LlmError, ModelInfo};
    use async_trait::async_trait;

    struct Listing(Result<Vec<ModelInfo>, u16>);

    #[async_trait]
    impl TextGenerator for Listing {
        async fn generate_text(
            &self,
            _model: &str,
            _prompt: &str,
            _settings: GenerationSettings,
        ) -> Result<String, LlmError> {
            unreachable!("discovery never generates")
        }

        async fn list_available_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
            self.0.clone().map_err(|status| LlmError::Api {
                status,
                message: "listing failed".into(),
            })
        }

        fn backend_name(&self) -> &str {
            "listing"
        }
    }

    fn info(name: &str, supported: bool) -> ModelInfo {
        ModelInfo {
            name: name.into(),
            supported,
        }
    }

    fn defaults() -> Vec<String> {
        vec!["gemini-pro".into(), "gemini-1.5-flash".into()]
    }

    #[tokio::test]
    async fn discovery_keeps_supported_models_in_order() {
        let backend = Listing(Ok(vec![
            info("models/gemini-1.5-pro", true),
            info("models/embedding-001", false),
            info("models/gemini-1.5-flash", true),
        ]));
        let got = ModelCandidates::discover(&backend, &defaults()).await;
        assert_eq!(got.as_slice(), ["gemini-1.5-pro", "gemini-1.5-flash"]);
    }

    #[tokio::test]
    async fn discovery_error_falls_back_to_defaults() {
        let backend = Listing(Err(503));
        let got = ModelCandidates::discover(&backend, &defaults()).await;
        assert_eq!(got.as_slice(), defaults().as_slice());
    }

    #[tokio::test]
    async fn listing_without_usable_models_falls_back_to_defaults() {
        let backend = Listing(Ok(vec![info("models/embedding-001", false)]));
        let got = ModelCandidates::discover(&backend, &defaults()).await;
        assert_eq!(got.len(), 2);
    }
}
