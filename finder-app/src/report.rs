//! JSON documents printed on stdout.

use finder_llm::BackendStatus;
use finder_llm::completion::{Completion, CompletionError};
use finder_pipeline::{GenerationOutcome, PipelineError, QuestionRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Success {
        success: bool,
        summary: String,
        questions: Vec<QuestionRecord>,
    },
    Failure {
        success: bool,
        error: String,
        status: u16,
    },
}

impl SearchResponse {
    pub fn from_result(result: Result<GenerationOutcome, PipelineError>) -> Self {
        match result {
            Ok(outcome) => SearchResponse::Success {
                success: true,
                summary: outcome.summary,
                questions: outcome.records,
            },
            Err(e) => SearchResponse::Failure {
                success: false,
                error: e.to_string(),
                status: e.status_code(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchResponse::Success { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct SelfTestReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelfTestReport {
    pub fn from_result(result: Result<Completion, CompletionError>) -> Self {
        let (response, error) = match result {
            Ok(Completion::Text(text)) => (Some(text.trim().to_string()), None),
            Ok(Completion::Unavailable) => (
                None,
                Some(PipelineError::BackendUnavailable.to_string()),
            ),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            success: response.is_some(),
            response,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    #[serde(flatten)]
    pub status: BackendStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_test: Option<SelfTestReport>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.ai_available && self.self_test.as_ref().map_or(true, |t| t.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_carries_status_code() {
        let response = SearchResponse::from_result(Err(PipelineError::BackendUnavailable));
        let v = serde_json::to_value(&response).unwrap();

        assert!(!response.is_success());
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["status"], json!(503));
        assert!(v["error"].as_str().unwrap().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn success_lists_questions() {
        let outcome = GenerationOutcome {
            summary: "Graphs".into(),
            records: vec![QuestionRecord {
                url: "https://leetcode.com/problems/x/".into(),
                platform: "LeetCode".into(),
                topic: "X".into(),
                difficulty_level: "Hard".into(),
                company: "Google".into(),
                category: "Graphs".into(),
            }],
        };
        let v = serde_json::to_value(SearchResponse::from_result(Ok(outcome))).unwrap();

        assert_eq!(v["success"], json!(true));
        assert_eq!(v["summary"], json!("Graphs"));
        assert_eq!(v["questions"][0]["company"], json!("Google"));
    }

    #[test]
    fn self_test_outcomes() {
        let ok = SelfTestReport::from_result(Ok(Completion::Text(" OK\n".into())));
        assert!(ok.success);
        assert_eq!(ok.response.as_deref(), Some("OK"));

        let down = SelfTestReport::from_result(Ok(Completion::Unavailable));
        assert!(!down.success);

        let failed = SelfTestReport::from_result(Err(CompletionError::Auth("bad".into())));
        assert!(failed.error.unwrap().contains("invalid"));
    }
}
