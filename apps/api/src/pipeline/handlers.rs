//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, is_extraction_error};
use crate::pipeline::EvaluationReport;
use crate::sanitize::decode_entities;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// POST /api/v1/evaluations
///
/// Runs the full evaluation pipeline over pasted resume text and a job description.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationReport>, AppError> {
    run_evaluation(&state, &request.resume_text, &request.job_description).await
}

/// POST /api/v1/evaluations/upload
///
/// Multipart form: `resume` (PDF file) and `job_description` (text).
/// Unreadable PDFs are rejected with 422 carrying the extractor's message.
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationReport>, AppError> {
    let mut resume_pdf: Option<Bytes> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                resume_pdf = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?);
            }
            "job_description" => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let pdf = resume_pdf
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let resume_text = tokio::task::spawn_blocking(move || extract_text(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?;

    if is_extraction_error(&resume_text) {
        return Err(AppError::UnprocessableEntity(resume_text));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No extractable text found in resume PDF".to_string(),
        ));
    }
    info!("PDF processed, text length: {}", resume_text.len());

    run_evaluation(&state, &resume_text, &job_description).await
}

async fn run_evaluation(
    state: &AppState,
    resume_text: &str,
    job_description: &str,
) -> Result<Json<EvaluationReport>, AppError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Both resume and job description are required".to_string(),
        ));
    }

    info!(
        "Starting resume evaluation: resume {} chars, job description {} chars",
        resume_text.len(),
        job_description.len()
    );

    let mut report = state.pipeline.evaluate(resume_text, job_description).await?;
    report.report = decode_entities(&report.report);

    Ok(Json(report))
}
