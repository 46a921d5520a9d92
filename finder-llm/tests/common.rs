#![allow(dead_code)]

use std::sync::OnceLock;

use finder_common::observability::{LogConfig, LogFormat};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let format = std::env::var("QUESTFINDER_LOG_FORMAT")
            .map(|raw| LogFormat::from_name(&raw))
            .unwrap_or(LogFormat::Text);
        let config = LogConfig {
            app_name: "questfinder-tests",
            log_dir: Some(std::env::temp_dir().join("questfinder-tests")),
            emit_stderr: true,
            format,
            default_filter: "debug".to_string(),
        };

        finder_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Gemini-shaped success body carrying `text`.
pub fn gemini_text_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "totalTokenCount": 42 }
    })
}

/// Gemini-shaped error body for a rejected credential.
pub fn gemini_bad_key_body() -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{
                "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                "reason": "API_KEY_INVALID",
                "domain": "googleapis.com"
            }]
        }
    })
}
