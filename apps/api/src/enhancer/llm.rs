//! LlmEnhancer — delegates each task to the hosted model via `LlmClient`.
//!
//! One call per task, fixed sampling per call site. The model's output is passed
//! through as-is; there is no structural guarantee on its shape.

use async_trait::async_trait;
use tracing::info;

use crate::enhancer::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, KEYWORDS_PROMPT_TEMPLATE,
    KEYWORDS_SYSTEM, RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM,
};
use crate::enhancer::{CoverLetterRequest, EnhanceError, Enhancer};
use crate::llm_client::prompts::{HONESTY_INSTRUCTION, PLAIN_TEXT_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient, LlmError};

/// Keyword extraction: low temperature, short answer.
pub const KEYWORDS_CALL: CallOptions = CallOptions {
    max_tokens: 1000,
    temperature: 0.3,
};

/// Résumé rewrite: medium temperature, room for a full résumé.
pub const RESUME_CALL: CallOptions = CallOptions {
    max_tokens: 2000,
    temperature: 0.5,
};

/// Cover letter: more latitude in wording.
pub const COVER_LETTER_CALL: CallOptions = CallOptions {
    max_tokens: 1500,
    temperature: 0.7,
};

pub struct LlmEnhancer {
    llm: LlmClient,
}

impl LlmEnhancer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn ask(
        &self,
        prompt: &str,
        system: &str,
        options: CallOptions,
    ) -> Result<String, LlmError> {
        let system = format!("{system} {PLAIN_TEXT_SYSTEM}");
        self.llm.call_text(prompt, &system, options).await
    }
}

#[async_trait]
impl Enhancer for LlmEnhancer {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn extract_keywords(&self, job_description: &str) -> Result<String, EnhanceError> {
        let prompt = KEYWORDS_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        let report = self
            .ask(&prompt, KEYWORDS_SYSTEM, KEYWORDS_CALL)
            .await
            .map_err(|e| match e {
                LlmError::EmptyContent => {
                    EnhanceError::Analysis("model returned no keyword analysis".to_string())
                }
                other => EnhanceError::ExternalService(other),
            })?;
        info!("Keyword analysis received ({} chars)", report.len());
        Ok(report)
    }

    async fn enhance_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, EnhanceError> {
        let prompt = RESUME_PROMPT_TEMPLATE
            .replace("{honesty_instruction}", HONESTY_INSTRUCTION)
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);
        let resume = self
            .ask(&prompt, RESUME_SYSTEM, RESUME_CALL)
            .await
            .map_err(|e| generation_error(e, "resume"))?;
        info!("Enhanced resume received ({} chars)", resume.len());
        Ok(resume)
    }

    async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest<'_>,
    ) -> Result<String, EnhanceError> {
        let prompt = COVER_LETTER_PROMPT_TEMPLATE
            .replace("{honesty_instruction}", HONESTY_INSTRUCTION)
            .replace("{position}", request.addressee.position())
            .replace("{company}", request.addressee.company())
            .replace("{resume_text}", request.resume_text)
            .replace("{job_description}", request.job_description);
        let letter = self
            .ask(&prompt, COVER_LETTER_SYSTEM, COVER_LETTER_CALL)
            .await
            .map_err(|e| generation_error(e, "cover letter"))?;
        info!("Cover letter received ({} chars)", letter.len());
        Ok(letter)
    }
}

fn generation_error(error: LlmError, what: &str) -> EnhanceError {
    match error {
        LlmError::EmptyContent => EnhanceError::Generation(format!("model returned an empty {what}")),
        other => EnhanceError::ExternalService(other),
    }
}
