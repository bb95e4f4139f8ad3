//! Evaluation Pipeline: runs the stage plan against a resume and a job description.
//!
//! Flow: mask inputs → run stages in dependency waves (independent stages concurrently) →
//!       strip code fences from the final output → extract score/skills → record the run.
//!
//! Any stage failure aborts the whole evaluation: no report, no conversation entry.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::conversation::ConversationLog;
use crate::llm_client::TextGenerator;
use crate::models::conversation::EntryKind;
use crate::pipeline::report::EvaluationReport;
use crate::pipeline::stage::{validate_plan, StageResult, StageSpec, EVALUATION_STAGES};
use crate::pipeline::PipelineError;
use crate::redaction::{mask_pair, RedactedText};
use crate::sanitize::strip_code_fences;

/// Characters of the job description kept in the conversation-log question.
const JD_EXCERPT_CHARS: usize = 100;

#[derive(Clone)]
pub struct EvaluationPipeline {
    generator: Arc<dyn TextGenerator>,
    log: ConversationLog,
    stages: &'static [StageSpec],
}

impl EvaluationPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, log: ConversationLog) -> Self {
        Self {
            generator,
            log,
            stages: &EVALUATION_STAGES,
        }
    }

    /// Evaluates a resume against a job description.
    ///
    /// Empty inputs are forwarded as-is; rejecting them is the caller's job.
    pub async fn evaluate(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<EvaluationReport, PipelineError> {
        let (resume, jd) = mask_pair(resume_text, job_description);
        debug!(
            "Redacted inputs: resume {} -> {} chars, job description {} -> {} chars",
            resume_text.len(),
            resume.as_str().len(),
            job_description.len(),
            jd.as_str().len()
        );
        if resume.is_empty() || jd.is_empty() {
            warn!("Evaluating with an empty resume or job description; report will be degenerate");
        }

        let results = self.run_stages(&resume, &jd).await?;

        let final_output = results.last().map(|r| r.output.as_str()).unwrap_or_default();
        let report = EvaluationReport::from_stages(strip_code_fences(final_output), results);

        self.log
            .record(
                EntryKind::Evaluation,
                evaluation_question(&jd),
                report.report.clone(),
            )
            .await;

        info!(
            "Evaluation complete: ats_score={:?}, missing_skills={}",
            report.ats_score,
            report.missing_skills.len()
        );

        Ok(report)
    }

    /// Runs the plan in waves. Every stage whose dependencies are satisfied runs in the
    /// current wave; results are kept in plan order regardless of completion order.
    async fn run_stages(
        &self,
        resume: &RedactedText,
        jd: &RedactedText,
    ) -> Result<Vec<StageResult>, PipelineError> {
        validate_plan(self.stages)?;

        let mut completed: Vec<StageResult> = Vec::with_capacity(self.stages.len());
        let mut pending: Vec<&StageSpec> = self.stages.iter().collect();

        while !pending.is_empty() {
            let (ready, blocked): (Vec<&StageSpec>, Vec<&StageSpec>) =
                pending.into_iter().partition(|s| s.is_ready(&completed));

            if ready.is_empty() {
                return Err(PipelineError::InvalidPlan(
                    "no stage can run with the outputs produced so far".to_string(),
                ));
            }

            // Dropping the set on an early return aborts the rest of the wave.
            let mut wave = JoinSet::new();
            for spec in &ready {
                let request = spec.request(resume, jd, &completed)?;
                let generator = Arc::clone(&self.generator);
                let stage = spec.id;
                info!("Stage '{stage}' started ({})", spec.agent.role);
                wave.spawn(async move { (stage, generator.generate(&request).await) });
            }

            let mut outputs = Vec::with_capacity(ready.len());
            while let Some(joined) = wave.join_next().await {
                let (stage, result) = joined?;
                let output = result.map_err(|source| {
                    error!("Stage '{stage}' failed: {source}");
                    PipelineError::Stage { stage, source }
                })?;
                info!("Stage '{stage}' finished ({} chars)", output.len());
                outputs.push(StageResult { stage, output });
            }

            for spec in &ready {
                if let Some(pos) = outputs.iter().position(|r| r.stage == spec.id) {
                    completed.push(outputs.swap_remove(pos));
                }
            }

            pending = blocked;
        }

        Ok(completed)
    }
}

/// Question text stored for an evaluation run: a short excerpt of the redacted JD.
fn evaluation_question(jd: &RedactedText) -> String {
    let excerpt: String = jd.as_str().chars().take(JD_EXCERPT_CHARS).collect();
    format!("Resume evaluation for job: {excerpt}...")
}
