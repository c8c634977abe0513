//! Axum route handlers for the tailoring API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::cover_letter::Addressee;
use crate::enhancer::pipeline::{
    cover_letter_stage, keyword_stage, resume_stage, tailor, StageOutput, TailorInput,
};
use crate::enhancer::CoverLetterRequest;
use crate::errors::AppError;
use crate::extract::{extract_text, DocumentKind, ExtractionError, RawDocument};
use crate::models::artifact::{Artifact, ArtifactKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub backend: &'static str,
    pub report: StageOutput,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceResumeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterBody {
    pub resume_text: String,
    pub job_description: String,
    pub company_name: Option<String>,
    pub position_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArtifactResponse {
    pub backend: &'static str,
    pub artifact: Artifact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractedDocument {
    pub kind: DocumentKind,
    pub chars: usize,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub run_id: Uuid,
    pub backend: &'static str,
    pub document: ExtractedDocument,
    pub keywords: StageOutput,
    pub enhanced_resume: Artifact,
    pub cover_letter: Artifact,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub kind: ArtifactKind,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Multipart upload: `resume` (file), `job_description`, optional `company_name`
/// and `position_title`. Extracts the résumé text, then runs all three stages.
/// An unreadable résumé stops the request; stage failures come back degraded.
pub async fn handle_tailor(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TailorResponse>, AppError> {
    let mut resume: Option<RawDocument> = None;
    let mut job_description = String::new();
    let mut company_name: Option<String> = None;
    let mut position_title: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let kind = DocumentKind::detect(field.content_type(), field.file_name())?;
                let bytes = field.bytes().await?;
                resume = Some(RawDocument::new(kind, bytes));
            }
            "job_description" => job_description = field.text().await?,
            "company_name" => company_name = Some(field.text().await?),
            "position_title" => position_title = Some(field.text().await?),
            _ => {}
        }
    }

    let document =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    require_text("job_description", &job_description)?;

    let kind = document.kind;
    let resume_text = extract_off_thread(kind, move || extract_text(&document)).await?;

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract any text from the resume file".to_string(),
        ));
    }

    let run_id = Uuid::new_v4();
    info!(
        "Run {run_id}: extracted {} chars from {:?} resume",
        resume_text.len(),
        kind
    );

    let output = tailor(
        state.enhancer.as_ref(),
        &TailorInput {
            resume_text: &resume_text,
            job_description: &job_description,
            addressee: Addressee::new(company_name.as_deref(), position_title.as_deref()),
        },
    )
    .await;

    Ok(Json(TailorResponse {
        run_id,
        backend: state.enhancer.backend(),
        document: ExtractedDocument {
            kind,
            chars: resume_text.chars().count(),
        },
        keywords: output.keywords,
        enhanced_resume: artifact(ArtifactKind::EnhancedResume, &output.enhanced_resume),
        cover_letter: artifact(ArtifactKind::CoverLetter, &output.cover_letter),
    }))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    require_text("job_description", &request.job_description)?;

    let report = keyword_stage(state.enhancer.as_ref(), &request.job_description).await;

    Ok(Json(KeywordsResponse {
        backend: state.enhancer.backend(),
        report,
    }))
}

/// POST /api/v1/resumes/enhance
pub async fn handle_enhance_resume(
    State(state): State<AppState>,
    Json(request): Json<EnhanceResumeRequest>,
) -> Result<Json<ArtifactResponse>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    require_text("job_description", &request.job_description)?;

    let stage = resume_stage(
        state.enhancer.as_ref(),
        &request.resume_text,
        &request.job_description,
    )
    .await;

    Ok(Json(artifact_response(
        state.enhancer.backend(),
        ArtifactKind::EnhancedResume,
        stage,
    )))
}

/// POST /api/v1/cover-letters
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterBody>,
) -> Result<Json<ArtifactResponse>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    require_text("job_description", &request.job_description)?;

    let stage = cover_letter_stage(
        state.enhancer.as_ref(),
        &CoverLetterRequest {
            resume_text: &request.resume_text,
            job_description: &request.job_description,
            addressee: Addressee::new(
                request.company_name.as_deref(),
                request.position_title.as_deref(),
            ),
        },
    )
    .await;

    Ok(Json(artifact_response(
        state.enhancer.backend(),
        ArtifactKind::CoverLetter,
        stage,
    )))
}

/// POST /api/v1/export
///
/// Returns the content as a `text/plain` download named
/// `<kind>_<YYYYMMDD_HHMMSS>.txt`.
pub async fn handle_export(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_text("content", &request.content)?;

    let file_name = request.kind.file_name_now();
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        request.content,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Runs a parser on the blocking pool. Parsers that panic on malformed input
/// surface as a 422 for that document kind, not a 500.
async fn extract_off_thread<F>(kind: DocumentKind, job: F) -> Result<String, AppError>
where
    F: FnOnce() -> Result<String, ExtractionError> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(extracted) => Ok(extracted?),
        Err(e) if e.is_panic() => {
            warn!("{kind:?} extractor panicked on upload");
            Err(ExtractionError::unparseable(kind).into())
        }
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "extraction task failed: {e}"
        ))),
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn artifact(kind: ArtifactKind, stage: &StageOutput) -> Artifact {
    Artifact {
        kind,
        file_name: kind.file_name_now(),
        content: stage.content.clone(),
        degraded: stage.degraded,
    }
}

fn artifact_response(
    backend: &'static str,
    kind: ArtifactKind,
    stage: StageOutput,
) -> ArtifactResponse {
    ArtifactResponse {
        backend,
        artifact: artifact(kind, &stage),
        error: stage.error,
    }
}
