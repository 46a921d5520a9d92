use crate::sanitize::SanitizeError;
use finder_llm::completion::CompletionError;

/// Everything a pipeline run can fail with.
///
/// Each variant maps onto an HTTP-style status via [`PipelineError::status_code`]
/// so any outer surface can report failures uniformly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("AI is unavailable in this environment. Configure GOOGLE_API_KEY and try again.")]
    BackendUnavailable,

    #[error("Your API key is invalid. Please check your key and try again. ({0})")]
    Auth(String),

    #[error(
        "All {attempted} candidate models failed. This can happen if the API key is invalid or expired, \
         or if there are network issues. Last error: {last_error}"
    )]
    AllModelsExhausted { attempted: usize, last_error: String },

    #[error("Failed to extract questions: no JSON found in the model response")]
    NoJsonFound,

    #[error("Failed to extract questions: {0}")]
    JsonParse(String),

    #[error("The model returned no usable question records")]
    EmptyGenerationResult,
}

impl PipelineError {
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::InvalidQuery(_) => 400,
            PipelineError::BackendUnavailable => 503,
            PipelineError::Auth(_) | PipelineError::AllModelsExhausted { .. } => 502,
            PipelineError::NoJsonFound
            | PipelineError::JsonParse(_)
            | PipelineError::EmptyGenerationResult => 500,
        }
    }
}

impl From<CompletionError> for PipelineError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Auth(msg) => PipelineError::Auth(msg),
            CompletionError::AllModelsExhausted {
                attempted,
                last_error,
            } => PipelineError::AllModelsExhausted {
                attempted,
                last_error,
            },
        }
    }
}

impl From<SanitizeError> for PipelineError {
    fn from(e: SanitizeError) -> Self {
        match e {
            SanitizeError::NoJsonFound => PipelineError::NoJsonFound,
            SanitizeError::JsonParse(msg) => PipelineError::JsonParse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_failure_class() {
        assert_eq!(PipelineError::InvalidQuery("blank".into()).status_code(), 400);
        assert_eq!(PipelineError::BackendUnavailable.status_code(), 503);
        assert_eq!(PipelineError::Auth("x".into()).status_code(), 502);
        assert_eq!(PipelineError::EmptyGenerationResult.status_code(), 500);
    }

    #[test]
    fn completion_failures_keep_their_detail() {
        let e: PipelineError = CompletionError::AllModelsExhausted {
            attempted: 3,
            last_error: "404 model not found".into(),
        }
        .into();
        assert_eq!(e.status_code(), 502);
        assert!(e.to_string().contains("404 model not found"));
    }
}
