// Evaluation Pipeline
// Redact → parse resume ∥ analyze JD → gap/ATS score → recommendations.
// All LLM calls go through llm_client::TextGenerator; no direct HTTP here.

use thiserror::Error;

use crate::llm_client::LlmError;

pub mod evaluator;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod stage;

pub use evaluator::EvaluationPipeline;
pub use report::EvaluationReport;
pub use stage::StageId;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: stage::StageId,
        #[source]
        source: LlmError,
    },

    #[error("Stage '{stage}' is missing the output of '{dependency}'")]
    MissingDependency {
        stage: stage::StageId,
        dependency: stage::StageId,
    },

    #[error("Invalid stage plan: {0}")]
    InvalidPlan(String),

    #[error("Stage task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}
