use crate::company::{is_placeholder, title_case};
use crate::normalize::normalize_url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stand-in for any descriptive field the model left out.
pub const PLACEHOLDER: &str = "Unknown";

pub const RECORD_FIELDS: [&str; 6] = [
    "url",
    "platform",
    "topic",
    "difficulty_level",
    "company",
    "category",
];

/// One recommended practice problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Always absolute (`http://` or `https://`).
    pub url: String,
    pub platform: String,
    pub topic: String,
    pub difficulty_level: String,
    pub company: String,
    pub category: String,
}

/// Successful result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub summary: String,
    pub records: Vec<QuestionRecord>,
}

impl QuestionRecord {
    /// Build a record from one model-produced object.
    ///
    /// Missing fields are filled in; their names are returned so the caller
    /// can report them. The company is always `batch_company`; a different
    /// company named by the model is logged and discarded.
    pub fn from_model_object(
        obj: &Map<String, Value>,
        batch_company: &str,
    ) -> (Self, Vec<&'static str>) {
        let missing: Vec<&'static str> = RECORD_FIELDS
            .iter()
            .copied()
            .filter(|key| field_text(obj, key).is_none())
            .collect();

        let platform = field_text(obj, "platform");
        let topic = field_text(obj, "topic");
        let url = normalize_url(
            field_text(obj, "url").as_deref().unwrap_or_default(),
            platform.as_deref().unwrap_or_default(),
            topic.as_deref().unwrap_or_default(),
        );
        if let Some(supplied) = field_text(obj, "company")
            .filter(|c| !is_placeholder(c))
            .filter(|c| !title_case(c).eq_ignore_ascii_case(batch_company))
        {
            tracing::warn!(%supplied, company = batch_company, "record.company_replaced");
        }

        let record = Self {
            url,
            platform: platform.unwrap_or_else(placeholder),
            topic: topic.unwrap_or_else(placeholder),
            difficulty_level: field_text(obj, "difficulty_level").unwrap_or_else(placeholder),
            company: batch_company.to_string(),
            category: field_text(obj, "category").unwrap_or_else(placeholder),
        };
        (record, missing)
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// Non-blank text for `key`; numbers and booleans are stringified.
fn field_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
