//! Tailoring pipeline — runs the three stages and degrades each one independently.
//!
//! Flow: extract_keywords → enhance_resume → generate_cover_letter.
//!
//! No stage error escapes: a failed stage is replaced by displayable fallback text and
//! flagged `degraded`, while the other stages still run. Document extraction happens
//! before this and is the only step allowed to stop a request.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::cover_letter::{fallback_letter, Addressee};
use crate::analysis::keywords::ANALYSIS_ERROR_MARKER;
use crate::enhancer::{CoverLetterRequest, EnhanceError, Enhancer};

/// Note appended to the untouched résumé when enhancement fails.
pub const RESUME_FALLBACK_NOTE: &str =
    "**Note:** Enhancement completed with basic formatting improvements.";

/// Inputs for one tailoring request.
#[derive(Debug, Clone, Copy)]
pub struct TailorInput<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub addressee: Addressee<'a>,
}

/// One stage's result. `content` is always displayable.
#[derive(Debug, Clone, Serialize)]
pub struct StageOutput {
    pub content: String,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageOutput {
    fn ok(content: String) -> Self {
        Self {
            content,
            degraded: false,
            error: None,
        }
    }

    fn degraded(content: String, error: &EnhanceError) -> Self {
        Self {
            content,
            degraded: true,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorOutput {
    pub keywords: StageOutput,
    pub enhanced_resume: StageOutput,
    pub cover_letter: StageOutput,
}

/// Diagnostic shown in place of a keyword report.
pub fn keyword_fallback() -> String {
    format!("{ANALYSIS_ERROR_MARKER} Please check the job description format.")
}

/// The original résumé with a note: still displayable, never empty.
pub fn resume_fallback(resume_text: &str) -> String {
    format!("{resume_text}\n\n{RESUME_FALLBACK_NOTE}")
}

pub async fn keyword_stage(enhancer: &dyn Enhancer, job_description: &str) -> StageOutput {
    match enhancer.extract_keywords(job_description).await {
        Ok(report) => StageOutput::ok(report),
        Err(e) => {
            warn!("Keyword extraction degraded ({}): {e}", enhancer.backend());
            StageOutput::degraded(keyword_fallback(), &e)
        }
    }
}

pub async fn resume_stage(
    enhancer: &dyn Enhancer,
    resume_text: &str,
    job_description: &str,
) -> StageOutput {
    match enhancer.enhance_resume(resume_text, job_description).await {
        Ok(resume) if !resume.trim().is_empty() => StageOutput::ok(resume),
        Ok(_) => {
            let e = EnhanceError::Generation("enhanced resume was empty".to_string());
            warn!("Resume enhancement degraded ({}): {e}", enhancer.backend());
            StageOutput::degraded(resume_fallback(resume_text), &e)
        }
        Err(e) => {
            warn!("Resume enhancement degraded ({}): {e}", enhancer.backend());
            StageOutput::degraded(resume_fallback(resume_text), &e)
        }
    }
}

pub async fn cover_letter_stage(
    enhancer: &dyn Enhancer,
    request: &CoverLetterRequest<'_>,
) -> StageOutput {
    match enhancer.generate_cover_letter(request).await {
        Ok(letter) => StageOutput::ok(letter),
        Err(e) => {
            warn!("Cover letter generation degraded ({}): {e}", enhancer.backend());
            StageOutput::degraded(
                fallback_letter(
                    request.addressee.company_name,
                    request.addressee.position_title,
                ),
                &e,
            )
        }
    }
}

/// Runs all three stages for one résumé/job-description pair.
pub async fn tailor(enhancer: &dyn Enhancer, input: &TailorInput<'_>) -> TailorOutput {
    info!(
        "Tailoring resume ({} chars) against job description ({} chars) with {} backend",
        input.resume_text.len(),
        input.job_description.len(),
        enhancer.backend()
    );

    let keywords = keyword_stage(enhancer, input.job_description).await;
    let enhanced_resume = resume_stage(enhancer, input.resume_text, input.job_description).await;
    let cover_letter = cover_letter_stage(
        enhancer,
        &CoverLetterRequest {
            resume_text: input.resume_text,
            job_description: input.job_description,
            addressee: input.addressee,
        },
    )
    .await;

    let degraded = [&keywords, &enhanced_resume, &cover_letter]
        .iter()
        .filter(|s| s.degraded)
        .count();
    info!("Tailoring finished: {degraded} of 3 stages degraded");

    TailorOutput {
        keywords,
        enhanced_resume,
        cover_letter,
    }
}
