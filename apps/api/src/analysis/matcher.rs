//! Keyword Matcher — job-description keywords the résumé does not mention yet.

use serde::Serialize;

use crate::analysis::keywords::FrequencyTable;
use crate::analysis::tokenizer::Tokenizer;

/// Job keywords considered when diffing against the résumé.
pub const RANKED_JOB_KEYWORDS: usize = 50;
pub const MAX_MISSING_KEYWORDS: usize = 20;
pub const MAX_JOB_KEYWORDS: usize = 30;
pub const MAX_RESUME_KEYWORDS: usize = 30;

/// Outcome of matching one résumé against one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult {
    /// Ranked job keywords absent from the résumé, most frequent first.
    pub missing_keywords: Vec<String>,
    /// Ranked job keywords.
    pub job_keywords: Vec<String>,
    /// Résumé vocabulary sample, sorted.
    pub resume_keywords: Vec<String>,
}

/// Diffs the ranked job-description vocabulary against the résumé token set.
/// Deterministic: the same inputs always give the same lists in the same order.
pub fn match_keywords(tokenizer: &Tokenizer, resume_text: &str, job_description: &str) -> MatchResult {
    let resume_set = tokenizer.token_set(resume_text);
    let ranked = FrequencyTable::from_tokens(tokenizer.tokens(job_description))
        .keywords(RANKED_JOB_KEYWORDS);

    let missing_keywords = ranked
        .iter()
        .filter(|kw| !resume_set.contains(kw.to_lowercase().as_str()))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect();

    let mut resume_keywords: Vec<String> = resume_set.into_iter().collect();
    resume_keywords.sort();
    resume_keywords.truncate(MAX_RESUME_KEYWORDS);

    let mut job_keywords = ranked;
    job_keywords.truncate(MAX_JOB_KEYWORDS);

    MatchResult {
        missing_keywords,
        job_keywords,
        resume_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::STOPWORDS;

    const RESUME: &str = "Jane Doe\n\n\
        Experience\n\
        • Built Python services on AWS\n\
        • Worked on backend systems\n\n\
        Skills\n\
        Python, SQL, Linux";

    const JD: &str = "We need a backend engineer. Kubernetes and Docker required. \
        Kubernetes operators, Kubernetes networking, Docker builds. Python and AWS a plus. \
        Terraform experience preferred.";

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(STOPWORDS)
    }

    #[test]
    fn test_missing_keywords_ranked_by_frequency() {
        let result = match_keywords(&tokenizer(), RESUME, JD);
        assert_eq!(result.missing_keywords[0], "kubernetes");
        assert_eq!(result.missing_keywords[1], "docker");
        assert!(!result.missing_keywords.contains(&"python".to_string()));
        assert!(!result.missing_keywords.contains(&"backend".to_string()));
    }

    #[test]
    fn test_missing_is_subset_of_job_and_disjoint_from_resume() {
        let t = tokenizer();
        let result = match_keywords(&t, RESUME, JD);
        let resume_set = t.token_set(RESUME);
        let job_set = t.token_set(JD);
        for kw in &result.missing_keywords {
            assert!(job_set.contains(kw), "{kw} not a job keyword");
            assert!(!resume_set.contains(kw), "{kw} already in resume");
        }
    }

    #[test]
    fn test_caps_are_applied() {
        let jd = (0..80)
            .map(|i| format!("term{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let resume = (0..80)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let result = match_keywords(&tokenizer(), &resume, &jd);
        assert_eq!(result.missing_keywords.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(result.job_keywords.len(), MAX_JOB_KEYWORDS);
        assert_eq!(result.resume_keywords.len(), MAX_RESUME_KEYWORDS);
        assert_eq!(result.missing_keywords[0], "term00");
    }

    #[test]
    fn test_identical_documents_have_nothing_missing() {
        let result = match_keywords(&tokenizer(), JD, JD);
        assert!(result.missing_keywords.is_empty());
        assert!(!result.job_keywords.is_empty());
    }

    #[test]
    fn test_matching_is_deterministic() {
        let t = tokenizer();
        let first = match_keywords(&t, RESUME, JD);
        for _ in 0..5 {
            assert_eq!(match_keywords(&t, RESUME, JD), first);
        }
    }

    #[test]
    fn test_empty_job_description_yields_empty_result() {
        let result = match_keywords(&tokenizer(), RESUME, "");
        assert!(result.missing_keywords.is_empty());
        assert!(result.job_keywords.is_empty());
    }
}
