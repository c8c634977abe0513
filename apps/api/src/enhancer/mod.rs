//! Enhancer — the capability shared by the local-heuristic and hosted-model pipelines.
//!
//! `AppState` holds an `Arc<dyn Enhancer>` chosen at startup (`ENHANCER_MODE`).
//! Handlers and the tailoring pipeline only ever see the trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::cover_letter::Addressee;
use crate::llm_client::LlmError;

pub mod handlers;
pub mod llm;
pub mod local;
pub mod pipeline;
pub mod prompts;

pub use llm::LlmEnhancer;
pub use local::LocalEnhancer;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Keyword analysis failed: {0}")]
    Analysis(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("External service error: {0}")]
    ExternalService(#[from] LlmError),
}

/// Everything the cover letter stage needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct CoverLetterRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub addressee: Addressee<'a>,
}

/// The three tailoring tasks. Implement this to add a backend without touching
/// handlers or the pipeline.
#[async_trait]
pub trait Enhancer: Send + Sync {
    /// Short backend label ("local" | "llm"), surfaced in responses and logs.
    fn backend(&self) -> &'static str;

    /// Keyword report for a job description, as display text.
    async fn extract_keywords(&self, job_description: &str) -> Result<String, EnhanceError>;

    /// Résumé rewritten toward the job description.
    async fn enhance_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, EnhanceError>;

    async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest<'_>,
    ) -> Result<String, EnhanceError>;
}
