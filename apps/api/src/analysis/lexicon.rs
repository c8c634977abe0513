//! Lexicon — the versioned word tables the local pipeline runs on.
//!
//! The built-in tables are version 1. A replacement can be loaded from a JSON file
//! (`LEXICON_PATH`) with the same shape as [`Lexicon`]; the pipeline code never
//! hard-codes any of these lists.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version tag of the built-in tables.
pub const LEXICON_VERSION: u32 = 1;

/// English stopwords (NLTK list, apostrophe-free forms only: the tokenizer strips
/// punctuation before filtering, so contractions never survive as-is).
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now", "d",
    "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn",
    "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn",
    "weren", "won", "wouldn",
];

/// Strong action verbs substituted for weak bullet openers.
pub const ACTION_VERBS: &[&str] = &[
    "Developed",
    "Implemented",
    "Led",
    "Managed",
    "Created",
    "Designed",
    "Optimized",
    "Improved",
    "Achieved",
    "Delivered",
    "Collaborated",
    "Streamlined",
    "Enhanced",
    "Established",
    "Executed",
    "Coordinated",
];

/// Weak bullet openers, checked in this order.
pub const WEAK_PHRASES: &[&str] = &["worked on", "helped with", "assisted", "participated"];

/// Verbs that mark a résumé bullet as a cover-letter highlight.
pub const HIGHLIGHT_VERBS: &[&str] =
    &["developed", "led", "managed", "created", "implemented", "improved"];

/// Skill/technology, qualification, and credential pattern families.
/// Run over the lowercased job description.
pub const SKILL_PATTERNS: &[&str] = &[
    r"\b\w*(?:programming|development|software|system|database|web|mobile|cloud|data|analytics|machine learning|ai|python|java|javascript|react|angular|sql|aws|azure|docker|kubernetes)\w*\b",
    r"\b(?:experience|years|required|preferred|must|should|knowledge|skills|proficiency|expertise|familiar|understanding)\b",
    r"\b\w*(?:degree|bachelor|master|phd|certification|certified)\w*\b",
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid skill pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Lexicon table '{0}' must not be empty")]
    EmptyTable(&'static str),
}

/// Word tables consumed by the analyzer, rewriter, and cover letter generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub version: u32,
    pub stopwords: Vec<String>,
    pub action_verbs: Vec<String>,
    pub weak_phrases: Vec<String>,
    pub highlight_verbs: Vec<String>,
    pub skill_patterns: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            version: LEXICON_VERSION,
            stopwords: owned(STOPWORDS),
            action_verbs: owned(ACTION_VERBS),
            weak_phrases: owned(WEAK_PHRASES),
            highlight_verbs: owned(HIGHLIGHT_VERBS),
            skill_patterns: owned(SKILL_PATTERNS),
        }
    }
}

impl Lexicon {
    /// Loads a lexicon from a JSON file and validates it.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = serde_json::from_str(raw)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// The rewriter must always have a verb to draw and the analyzer at least one
    /// pattern family. Stopwords and weak phrases may legitimately be empty.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.action_verbs.is_empty() {
            return Err(LexiconError::EmptyTable("action_verbs"));
        }
        if self.highlight_verbs.is_empty() {
            return Err(LexiconError::EmptyTable("highlight_verbs"));
        }
        if self.skill_patterns.is_empty() {
            return Err(LexiconError::EmptyTable("skill_patterns"));
        }
        Ok(())
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
