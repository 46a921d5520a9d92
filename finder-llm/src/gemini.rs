use crate::traits::{GenerationSettings, LlmError, ModelInfo, TextGenerator, API_KEY_INVALID_SIGNATURE};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the credential; keeps it out of URLs and therefore out of error text.
const API_KEY_HEADER: &str = "x-goog-api-key";
const MODEL_LIST_PAGE_SIZE: &str = "1000";
const MAX_MODEL_LIST_PAGES: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    supported_generation_methods: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    reason: Option<String>,
}

/// Google Gemini REST client.
///
/// Model-agnostic: the model is chosen per call so one client can walk a
/// whole candidate list. Requires a valid API key and internet access.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client using the provided API key and per-request timeout.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(LlmError::Config("Gemini API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at another endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn model_path(model: &str) -> &str {
        model.strip_prefix("models/").unwrap_or(model)
    }

    async fn error_from_response(resp: reqwest::Response) -> LlmError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<GeminiErrorEnvelope>(&body).ok();

        let key_rejected = body.contains(API_KEY_INVALID_SIGNATURE)
            || parsed.as_ref().is_some_and(|env| {
                env.error
                    .details
                    .iter()
                    .any(|d| d.reason.as_deref() == Some(API_KEY_INVALID_SIGNATURE))
            });
        let message = parsed
            .map(|env| env.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| snip(&body));

        if key_rejected || status.as_u16() == 401 {
            return LlmError::InvalidApiKey(format!("{message} [{API_KEY_INVALID_SIGNATURE}]"));
        }
        match status.as_u16() {
            429 => LlmError::RateLimit(message),
            code => LlmError::Api {
                status: code,
                message,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String, LlmError> {
        let model = Self::model_path(model);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: settings.temperature,
                max_output_tokens: settings.max_output_tokens,
            },
        };

        tracing::debug!(%url, model, prompt_chars = prompt.len(), "gemini.generate.start");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let gemini_response: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| {
                LlmError::Decode(format!("Failed to parse Gemini response: {}", e.without_url()))
            })?;

        if let Some(reason) = gemini_response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LlmError::Blocked(format!("prompt blocked: {reason}")));
        }

        let candidate = gemini_response
            .candidates
            .first()
            .ok_or_else(|| LlmError::EmptyResponse(model.to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(LlmError::Blocked(
                "Content blocked by Gemini safety filters".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .map(|p| p.text.as_str())
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse(model.to_string()));
        }

        tracing::debug!(
            model,
            chars = text.len(),
            finish_reason = ?candidate.finish_reason,
            "gemini.generate.done"
        );
        Ok(text)
    }

    async fn list_available_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_MODEL_LIST_PAGES {
            let mut query = vec![("pageSize", MODEL_LIST_PAGE_SIZE)];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let resp = self
                .client
                .get(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .query(&query)
                .send()
                .await
                .map_err(network_error)?;
            if !resp.status().is_success() {
                return Err(Self::error_from_response(resp).await);
            }

            let page: GeminiModelList = resp
                .json()
                .await
                .map_err(|e| {
                    LlmError::Decode(format!("Failed to parse model list: {}", e.without_url()))
                })?;

            models.extend(page.models.into_iter().map(|m| ModelInfo {
                supported: m.supported_generation_methods.as_ref().map_or(true, |methods| {
                    methods
                        .iter()
                        .any(|method| method == "generateContent" || method == "generate_content")
                }),
                name: m.name,
            }));

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!(count = models.len(), "gemini.list_models.done");
        Ok(models)
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}

/// Transport failure with the request URL stripped.
fn network_error(e: reqwest::Error) -> LlmError {
    LlmError::Network(e.without_url())
}

fn snip(body: &str) -> String {
    let mut snip: String = body.chars().take(500).collect();
    if snip.len() < body.len() {
        snip.push_str("...");
    }
    snip
}
