//! LocalEnhancer — lexical statistics only, no network.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::analysis::cover_letter::{CoverLetterGenerator, LETTER_KEYWORDS};
use crate::analysis::keywords::KeywordAnalyzer;
use crate::analysis::lexicon::{Lexicon, LexiconError};
use crate::analysis::matcher::match_keywords;
use crate::analysis::rewriter::ResumeRewriter;
use crate::enhancer::{CoverLetterRequest, EnhanceError, Enhancer};

/// Runs the whole local pipeline. The verb RNG is the only mutable state and only
/// influences which action verb replaces a weak opener.
pub struct LocalEnhancer {
    analyzer: KeywordAnalyzer,
    rewriter: ResumeRewriter,
    letters: CoverLetterGenerator,
    rng: Mutex<StdRng>,
}

impl LocalEnhancer {
    /// `seed` pins the action-verb choice; `None` seeds from the OS.
    pub fn new(lexicon: &Lexicon, seed: Option<u64>) -> Result<Self, LexiconError> {
        lexicon.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            analyzer: KeywordAnalyzer::new(lexicon)?,
            rewriter: ResumeRewriter::new(lexicon)?,
            letters: CoverLetterGenerator::new(&lexicon.highlight_verbs),
            rng: Mutex::new(rng),
        })
    }

    fn rewrite(&self, resume_text: &str, job_description: &str) -> Result<String, EnhanceError> {
        let matches = match_keywords(self.analyzer.tokenizer(), resume_text, job_description);
        debug!(
            "Rewriting resume with {} missing keywords",
            matches.missing_keywords.len()
        );

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EnhanceError::Generation("action verb source is poisoned".to_string()))?;
        Ok(self
            .rewriter
            .rewrite(resume_text, &matches.missing_keywords, &mut *rng))
    }

    fn compose_letter(&self, request: &CoverLetterRequest<'_>) -> String {
        let matches = match_keywords(
            self.analyzer.tokenizer(),
            request.resume_text,
            request.job_description,
        );
        let keywords: Vec<String> = matches
            .job_keywords
            .into_iter()
            .take(LETTER_KEYWORDS)
            .collect();
        let highlights = self.letters.highlights(request.resume_text);
        debug!(
            "Composing cover letter with {} keywords and {} highlights",
            keywords.len(),
            highlights.len()
        );
        self.letters
            .compose(&keywords, &highlights, &request.addressee)
    }
}

#[async_trait]
impl Enhancer for LocalEnhancer {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn extract_keywords(&self, job_description: &str) -> Result<String, EnhanceError> {
        Ok(self.analyzer.analyze(job_description).render())
    }

    async fn enhance_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, EnhanceError> {
        self.rewrite(resume_text, job_description)
    }

    async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest<'_>,
    ) -> Result<String, EnhanceError> {
        Ok(self.compose_letter(request))
    }
}
