//! Resume Rewriter — heuristic keyword insertion and action-verb upgrades.
//!
//! Works block by block (blocks are separated by a blank line):
//! - bulleted blocks: each bullet line gets at most one keyword splice at an anchor
//!   word, and its first weak opener is swapped for an action verb;
//! - skills-like blocks: an `Additional:` line lists missing keywords;
//! - everything else passes through untouched.
//!
//! This is keyword insertion, not meaning-preserving rewriting.

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::{NoExpand, Regex};

use crate::analysis::is_bullet_line;
use crate::analysis::lexicon::{Lexicon, LexiconError};

/// Only the first N missing keywords are spliced into bullets.
const SPLICE_CANDIDATES: usize = 2;
/// Skills blocks draw from the first N missing keywords...
const SKILLS_POOL: usize = 10;
/// ...and list at most this many.
const SKILLS_APPENDED: usize = 5;
/// Keywords shorter than this are never inserted.
const MIN_INSERT_CHARS: usize = 4;
/// Cap on the "integrated" count reported in the footer.
const REPORTED_KEYWORDS: usize = 10;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Anchor words a missing keyword can be spliced next to, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// "experience" → "{kw} experience"
    Experience,
    /// "using" → "using {kw} and"
    Using,
    /// "with" → "with {kw} and", only when the line has exactly one "with"
    With,
}

/// Block classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Bulleted,
    SkillsLike,
    Plain,
}

pub fn classify_block(block: &str) -> BlockKind {
    if block.lines().any(is_bullet_line) {
        BlockKind::Bulleted
    } else {
        let lowered = block.to_lowercase();
        if lowered.contains("skill") || lowered.contains("technical") {
            BlockKind::SkillsLike
        } else {
            BlockKind::Plain
        }
    }
}

/// Footer appended to every rewritten résumé.
pub fn optimization_footer(integrated: usize) -> String {
    format!(
        "**ATS OPTIMIZATION APPLIED:**\n\
         - Integrated {integrated} key terms from job description\n\
         - Enhanced action verbs for impact\n\
         - Improved keyword density for ATS scanning\n\
         - Maintained professional formatting and readability"
    )
}

pub struct ResumeRewriter {
    action_verbs: Vec<String>,
    /// (lowercase phrase, case-insensitive matcher)
    weak_phrases: Vec<(String, Regex)>,
    experience: Regex,
    using: Regex,
    with: Regex,
}

impl ResumeRewriter {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let weak_phrases = lexicon
            .weak_phrases
            .iter()
            .map(|p| {
                let lowered = p.to_lowercase();
                case_insensitive(&lowered).map(|re| (lowered, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            action_verbs: lexicon.action_verbs.clone(),
            weak_phrases,
            experience: case_insensitive("experience")?,
            using: case_insensitive("using")?,
            with: case_insensitive("with")?,
        })
    }

    /// Rewrites the résumé against the ranked missing keywords. The only
    /// nondeterminism is the action verb drawn from `rng`.
    pub fn rewrite<R: Rng + ?Sized>(
        &self,
        resume_text: &str,
        missing_keywords: &[String],
        rng: &mut R,
    ) -> String {
        let blocks: Vec<String> = split_blocks(resume_text)
            .into_iter()
            .map(|block| match classify_block(&block) {
                BlockKind::Bulleted => self.rewrite_bulleted(&block, missing_keywords, rng),
                BlockKind::SkillsLike => append_skills(&block, missing_keywords),
                BlockKind::Plain => block,
            })
            .collect();

        let integrated = missing_keywords.len().min(REPORTED_KEYWORDS);
        format!(
            "{}{BLOCK_SEPARATOR}{}",
            blocks.join(BLOCK_SEPARATOR),
            optimization_footer(integrated)
        )
    }

    fn rewrite_bulleted<R: Rng + ?Sized>(
        &self,
        block: &str,
        missing_keywords: &[String],
        rng: &mut R,
    ) -> String {
        block
            .split('\n')
            .map(|line| {
                if !is_bullet_line(line) {
                    return line.to_string();
                }
                let spliced = self.splice_keyword(line, missing_keywords);
                self.strengthen_opener(&spliced, rng)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Splices at most one missing keyword into the line. Candidates are the first
    /// two missing keywords that are long enough and not already in the line; the
    /// first candidate that finds an anchor wins.
    pub fn splice_keyword(&self, line: &str, missing_keywords: &[String]) -> String {
        let lowered = line.to_lowercase();

        let candidates = missing_keywords
            .iter()
            .take(SPLICE_CANDIDATES)
            .filter(|kw| kw.chars().count() >= MIN_INSERT_CHARS)
            .filter(|kw| !lowered.contains(&kw.to_lowercase()));

        for keyword in candidates {
            if let Some(spliced) = self.splice_at_anchor(line, &lowered, keyword) {
                return spliced;
            }
        }
        line.to_string()
    }

    fn splice_at_anchor(&self, line: &str, lowered: &str, keyword: &str) -> Option<String> {
        let anchor = if lowered.contains("experience") {
            Anchor::Experience
        } else if lowered.contains("using") {
            Anchor::Using
        } else if lowered.matches("with").count() == 1 {
            Anchor::With
        } else {
            return None;
        };

        let re = match anchor {
            Anchor::Experience => &self.experience,
            Anchor::Using => &self.using,
            Anchor::With => &self.with,
        };
        let m = re.find(line)?;
        let matched = m.as_str();

        let replacement = match anchor {
            Anchor::Experience => format!("{keyword} {matched}"),
            Anchor::Using | Anchor::With => format!("{matched} {keyword} and"),
        };

        Some(format!(
            "{}{}{}",
            &line[..m.start()],
            replacement,
            &line[m.end()..]
        ))
    }

    /// Replaces the first weak opener found (list order) with a random action verb.
    pub fn strengthen_opener<R: Rng + ?Sized>(&self, line: &str, rng: &mut R) -> String {
        let lowered = line.to_lowercase();
        let Some((_, re)) = self
            .weak_phrases
            .iter()
            .find(|(phrase, _)| lowered.contains(phrase.as_str()))
        else {
            return line.to_string();
        };

        match self.action_verbs.choose(rng) {
            Some(verb) => re.replacen(line, 1, NoExpand(verb)).into_owned(),
            None => line.to_string(),
        }
    }

    pub fn action_verbs(&self) -> &[String] {
        &self.action_verbs
    }
}

/// Splits on blank lines. A line holding only whitespace counts as blank, CRLF
/// line endings come back as `\n`, and runs of blank lines collapse.
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

fn append_skills(block: &str, missing_keywords: &[String]) -> String {
    let additions: Vec<&str> = missing_keywords
        .iter()
        .take(SKILLS_POOL)
        .filter(|kw| kw.chars().count() >= MIN_INSERT_CHARS)
        .take(SKILLS_APPENDED)
        .map(String::as_str)
        .collect();

    if additions.is_empty() {
        block.to_string()
    } else {
        format!("{block}\nAdditional: {}", additions.join(", "))
    }
}

fn case_insensitive(literal: &str) -> Result<Regex, LexiconError> {
    let pattern = format!("(?i){}", regex::escape(literal));
    Regex::new(&pattern).map_err(|source| LexiconError::Pattern { pattern, source })
}
