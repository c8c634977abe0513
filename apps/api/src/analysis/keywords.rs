//! Keyword Analyzer — frequency ranking plus regex skill detection over a job description.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::{Lexicon, LexiconError};
use crate::analysis::tokenizer::Tokenizer;

/// Keywords kept in the report structure.
pub const TOP_KEYWORDS: usize = 20;
/// Keywords shown in the rendered report.
pub const RENDERED_KEYWORDS: usize = 15;
/// Skill/requirement matches shown in the rendered report.
pub const RENDERED_SKILLS: usize = 20;
/// Frequency rows shown in the rendered report.
pub const RENDERED_FREQUENCIES: usize = 15;

/// Leading marker of a degraded keyword report. Anything starting with this is a
/// diagnostic, not a list of keywords.
pub const ANALYSIS_ERROR_MARKER: &str = "Error extracting keywords.";

// ────────────────────────────────────────────────────────────────────────────
// FrequencyTable
// ────────────────────────────────────────────────────────────────────────────

/// Token counts ordered by descending count; equal counts keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for token in tokens {
            match index.get(&token) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(token.clone(), entries.len());
                    entries.push((token, 1));
                }
            }
        }

        // stable sort keeps first-occurrence order among ties
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The `n` highest-ranked tokens.
    pub fn keywords(&self, n: usize) -> Vec<String> {
        self.top(n).iter().map(|(w, _)| w.clone()).collect()
    }

    pub fn count(&self, token: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(w, _)| w == token)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordReport
// ────────────────────────────────────────────────────────────────────────────

/// Analysis of one job description. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub top_keywords: Vec<String>,
    /// Set semantics; a BTreeSet so the rendered order is stable across runs.
    pub skills_and_tech: BTreeSet<String>,
    pub frequency: FrequencyTable,
}

impl KeywordReport {
    /// Renders the fixed three-section text report.
    pub fn render(&self) -> String {
        let top = self
            .top_keywords
            .iter()
            .take(RENDERED_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let skills = if self.skills_and_tech.is_empty() {
            "No specific technical terms identified".to_string()
        } else {
            self.skills_and_tech
                .iter()
                .take(RENDERED_SKILLS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let frequencies = self
            .frequency
            .top(RENDERED_FREQUENCIES)
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "**KEY KEYWORDS & SKILLS ANALYSIS**\n\n\
             **Top Keywords:**\n{top}\n\n\
             **Technical Skills & Requirements:**\n{skills}\n\n\
             **Word Frequency (Top {RENDERED_FREQUENCIES}):**\n{frequencies}"
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Compiled analyzer: tokenizer plus skill pattern families. Build once, share freely.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    tokenizer: Tokenizer,
    skill_patterns: Vec<Regex>,
}

impl KeywordAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let skill_patterns = lexicon
            .skill_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| LexiconError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tokenizer: Tokenizer::new(&lexicon.stopwords),
            skill_patterns,
        })
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Ranks the job description's keywords and collects skill-pattern matches.
    pub fn analyze(&self, job_description: &str) -> KeywordReport {
        let frequency = FrequencyTable::from_tokens(self.tokenizer.tokens(job_description));
        let top_keywords = frequency.keywords(TOP_KEYWORDS);
        let skills_and_tech = self.skills_and_tech(job_description);

        KeywordReport {
            top_keywords,
            skills_and_tech,
            frequency,
        }
    }

    /// Runs every pattern family over the lowercased (not normalized) text.
    pub fn skills_and_tech(&self, job_description: &str) -> BTreeSet<String> {
        let lowered = job_description.to_lowercase();
        self.skill_patterns
            .iter()
            .flat_map(|re| re.find_iter(&lowered).map(|m| m.as_str().to_string()))
            .collect()
    }
}
