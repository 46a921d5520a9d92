use async_trait::async_trait;

/// Text the vendor embeds in error payloads when the credential is rejected.
pub const API_KEY_INVALID_SIGNATURE: &str = "API_KEY_INVALID";

/// Sampling settings applied to every generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_output_tokens: 800,
        }
    }
}

/// A model advertised by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub name: String,
    /// Whether the model can serve text generation.
    pub supported: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum LlmError {
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Content blocked: {0}")]
    Blocked(String),

    #[error("Empty response from model {0}")]
    EmptyResponse(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// True when retrying with another model cannot help because the
    /// credential itself was rejected.
    ///
    /// Classified by variant; other variants are checked for the vendor's
    /// own error signature in case it arrived through a generic path.
    pub fn is_credential_failure(&self) -> bool {
        match self {
            LlmError::InvalidApiKey(_) => true,
            other => other.to_string().contains(API_KEY_INVALID_SIGNATURE),
        }
    }
}

/// Opaque text-completion capability of a backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` with the named model.
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String, LlmError>;

    /// List models the backend exposes. Only used to refresh candidates.
    async fn list_available_models(&self) -> Result<Vec<ModelInfo>, LlmError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_variant_is_a_credential_failure() {
        assert!(LlmError::InvalidApiKey("bad".into()).is_credential_failure());
    }

    #[test]
    fn vendor_signature_in_generic_error_is_detected() {
        let err = LlmError::Api {
            status: 400,
            message: "reason: API_KEY_INVALID".into(),
        };
        assert!(err.is_credential_failure());
    }

    #[test]
    fn transient_errors_are_not_credential_failures() {
        assert!(!LlmError::RateLimit("slow down".into()).is_credential_failure());
        let err = LlmError::Api {
            status: 404,
            message: "models/gemini-pro is not found".into(),
        };
        assert!(!err.is_credential_failure());
    }
}
