//! Stage contract: one analysis step of the evaluation pipeline.
//!
//! A stage declares which redacted document it reads and which upstream stages it depends on.
//! Its context is exactly the verbatim outputs of those dependencies, in declared order.

use serde::{Deserialize, Serialize};

use crate::llm_client::GenerationRequest;
use crate::pipeline::prompts::*;
use crate::pipeline::PipelineError;
use crate::redaction::RedactedText;

/// Separator between upstream outputs in a stage's context.
const CONTEXT_DIVIDER: &str = "\n\n----------\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Parse,
    Analyze,
    Gap,
    Recommend,
}

impl StageId {
    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Parse => "parse",
            StageId::Analyze => "analyze",
            StageId::Gap => "gap",
            StageId::Recommend => "recommend",
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which caller-supplied document a stage embeds in its instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageInput {
    Resume,
    JobDescription,
    /// Works only from upstream outputs.
    Upstream,
}

#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct StageSpec {
    pub id: StageId,
    pub agent: AgentProfile,
    pub input: StageInput,
    pub instructions: &'static str,
    pub expected_output: &'static str,
    pub depends_on: &'static [StageId],
}

/// Output of one stage. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageResult {
    pub stage: StageId,
    pub output: String,
}

/// The four evaluation stages. Parse and Analyze are independent; Gap waits on both;
/// Recommend waits on all three.
pub const EVALUATION_STAGES: [StageSpec; 4] = [
    StageSpec {
        id: StageId::Parse,
        agent: AgentProfile {
            role: PARSER_ROLE,
            goal: PARSER_GOAL,
            backstory: PARSER_BACKSTORY,
        },
        input: StageInput::Resume,
        instructions: PARSE_INSTRUCTIONS,
        expected_output: PARSE_EXPECTED_OUTPUT,
        depends_on: &[],
    },
    StageSpec {
        id: StageId::Analyze,
        agent: AgentProfile {
            role: ANALYZER_ROLE,
            goal: ANALYZER_GOAL,
            backstory: ANALYZER_BACKSTORY,
        },
        input: StageInput::JobDescription,
        instructions: ANALYZE_INSTRUCTIONS,
        expected_output: ANALYZE_EXPECTED_OUTPUT,
        depends_on: &[],
    },
    StageSpec {
        id: StageId::Gap,
        agent: AgentProfile {
            role: DETECTOR_ROLE,
            goal: DETECTOR_GOAL,
            backstory: DETECTOR_BACKSTORY,
        },
        input: StageInput::Upstream,
        instructions: GAP_INSTRUCTIONS,
        expected_output: GAP_EXPECTED_OUTPUT,
        depends_on: &[StageId::Parse, StageId::Analyze],
    },
    StageSpec {
        id: StageId::Recommend,
        agent: AgentProfile {
            role: RECOMMENDER_ROLE,
            goal: RECOMMENDER_GOAL,
            backstory: RECOMMENDER_BACKSTORY,
        },
        input: StageInput::Upstream,
        instructions: RECOMMEND_INSTRUCTIONS,
        expected_output: RECOMMEND_EXPECTED_OUTPUT,
        depends_on: &[StageId::Parse, StageId::Analyze, StageId::Gap],
    },
];

impl StageSpec {
    /// True once every declared dependency has a result.
    pub fn is_ready(&self, completed: &[StageResult]) -> bool {
        self.depends_on
            .iter()
            .all(|dep| completed.iter().any(|r| r.stage == *dep))
    }

    /// Builds the generation request for this stage from the redacted inputs and the
    /// results produced so far. Only declared dependencies are read.
    pub fn request(
        &self,
        resume: &RedactedText,
        job_description: &RedactedText,
        completed: &[StageResult],
    ) -> Result<GenerationRequest, PipelineError> {
        let instructions = match self.input {
            StageInput::Resume => self.instructions.replace("{resume}", resume.as_str()),
            StageInput::JobDescription => self
                .instructions
                .replace("{job_description}", job_description.as_str()),
            StageInput::Upstream => self.instructions.to_string(),
        };

        let mut upstream = Vec::with_capacity(self.depends_on.len());
        for dep in self.depends_on {
            let result = completed
                .iter()
                .find(|r| r.stage == *dep)
                .ok_or(PipelineError::MissingDependency {
                    stage: self.id,
                    dependency: *dep,
                })?;
            upstream.push(result.output.as_str());
        }

        Ok(GenerationRequest {
            role: self.agent.role.to_string(),
            goal: self.agent.goal.to_string(),
            backstory: self.agent.backstory.to_string(),
            instructions,
            context: upstream.join(CONTEXT_DIVIDER),
            expected_output: self.expected_output.to_string(),
        })
    }
}

/// Checks that every dependency names a stage declared earlier in the plan and that
/// stage ids are unique, so the plan can always run to completion.
pub fn validate_plan(stages: &[StageSpec]) -> Result<(), PipelineError> {
    for (index, spec) in stages.iter().enumerate() {
        let earlier = &stages[..index];
        if earlier.iter().any(|s| s.id == spec.id) {
            return Err(PipelineError::InvalidPlan(format!(
                "stage '{}' declared twice",
                spec.id
            )));
        }
        for dep in spec.depends_on {
            if !earlier.iter().any(|s| s.id == *dep) {
                return Err(PipelineError::InvalidPlan(format!(
                    "stage '{}' depends on '{}', which is not declared before it",
                    spec.id, dep
                )));
            }
        }
    }
    Ok(())
}
