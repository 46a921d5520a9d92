//! Health report for the configured backend.

use crate::completion::CompletionClient;
use finder_common::mask_secret;
use finder_config::LlmSettings;
use serde::Serialize;

/// Snapshot of backend configuration and availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub ai_available: bool,
    pub api_key_present: bool,
    /// Masked credential; never the raw key.
    pub api_key_masked: Option<String>,
    pub model_candidates: Vec<String>,
    pub message: String,
}

impl BackendStatus {
    pub fn report(settings: &LlmSettings, client: &CompletionClient) -> Self {
        let api_key = settings.api_key.as_deref().filter(|k| !k.trim().is_empty());
        let ai_available = client.is_available();

        let message = match (api_key.is_some(), ai_available) {
            (false, _) => "API key not found in configuration or GOOGLE_API_KEY.".to_string(),
            (true, false) => format!(
                "AI client failed to initialize: {}",
                client.unavailable_reason().unwrap_or("unknown reason")
            ),
            (true, true) => "AI configured and available.".to_string(),
        };

        Self {
            ai_available,
            api_key_present: api_key.is_some(),
            api_key_masked: api_key.map(mask_secret),
            model_candidates: client.candidates().to_vec(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_reported_without_candidates() {
        let settings = LlmSettings::default();
        let client = CompletionClient::unavailable("no api key");
        let status = BackendStatus::report(&settings, &client);

        assert!(!status.ai_available);
        assert!(!status.api_key_present);
        assert_eq!(status.api_key_masked, None);
        assert!(status.model_candidates.is_empty());
        assert!(status.message.contains("not found"));
    }

    #[test]
    fn present_key_is_masked() {
        let settings = LlmSettings {
            api_key: Some("AIzaSyTHISISASECRET9876".into()),
            ..LlmSettings::default()
        };
        let client = CompletionClient::unavailable("client build failed");
        let status = BackendStatus::report(&settings, &client);

        assert!(status.api_key_present);
        assert_eq!(status.api_key_masked.as_deref(), Some("AIza...9876 (len=23)"));
        assert!(status.message.contains("client build failed"));
    }
}
