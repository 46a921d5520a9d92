//! Two-stage interview question recommender.
//!
//! [`pipeline::QuestionPipeline`] sends a query through a
//! [`finder_llm::completion::CompletionClient`] twice: once to pin down the
//! target company and a summary, once to produce a batch of practice
//! problems. The reply is dug out of whatever wrapping the model added
//! ([`sanitize`]), each record's link is made absolute ([`normalize`]) and every
//! record carries the company resolved in the first stage.
pub mod artifact;
pub mod company;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod sanitize;

pub use error::PipelineError;
pub use pipeline::{QuestionPipeline, TARGET_BATCH_SIZE};
pub use record::{GenerationOutcome, QuestionRecord};
