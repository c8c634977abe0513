//! Cover Letter Generator — fixed template filled with job keywords and résumé highlights.

use crate::analysis::{is_bullet_line, BULLET};

pub const DEFAULT_COMPANY: &str = "your organization";
pub const DEFAULT_POSITION: &str = "this position";

/// Job keywords the letter draws from.
pub const LETTER_KEYWORDS: usize = 10;
const MAX_HIGHLIGHTS: usize = 5;
/// Highlights must be longer than this (after trimming).
const MIN_HIGHLIGHT_CHARS: usize = 20;

/// Who the letter is addressed to. Blank strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Addressee<'a> {
    pub company_name: Option<&'a str>,
    pub position_title: Option<&'a str>,
}

impl<'a> Addressee<'a> {
    pub fn new(company_name: Option<&'a str>, position_title: Option<&'a str>) -> Self {
        Self {
            company_name: present(company_name),
            position_title: present(position_title),
        }
    }

    pub fn company(&self) -> &'a str {
        self.company_name.unwrap_or(DEFAULT_COMPANY)
    }

    pub fn position(&self) -> &'a str {
        self.position_title.unwrap_or(DEFAULT_POSITION)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct CoverLetterGenerator {
    highlight_verbs: Vec<String>,
}

impl CoverLetterGenerator {
    pub fn new<I, S>(highlight_verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            highlight_verbs: highlight_verbs
                .into_iter()
                .map(|v| v.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Bullet lines (in source order) that mention a strong verb, markers stripped.
    pub fn highlights(&self, resume_text: &str) -> Vec<String> {
        resume_text
            .lines()
            .map(str::trim)
            .filter(|line| is_bullet_line(line) && line.chars().count() > MIN_HIGHLIGHT_CHARS)
            .map(strip_marker)
            .filter(|line| {
                let lowered = line.to_lowercase();
                self.highlight_verbs
                    .iter()
                    .any(|verb| lowered.contains(verb.as_str()))
            })
            .take(MAX_HIGHLIGHTS)
            .collect()
    }

    /// Fills the letter template. Only presence/absence defaults, no other logic.
    pub fn compose(
        &self,
        job_keywords: &[String],
        highlights: &[String],
        addressee: &Addressee<'_>,
    ) -> String {
        let company = addressee.company();
        let position = addressee.position();
        let first = |n: usize| {
            job_keywords
                .iter()
                .take(n)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let primary = job_keywords
            .first()
            .map(String::as_str)
            .unwrap_or("relevant areas");
        let secondary = job_keywords
            .get(1)
            .map(String::as_str)
            .unwrap_or("team collaboration");

        let highlight_lines: String = highlights
            .iter()
            .map(|h| format!("{BULLET} {h}\n"))
            .collect();

        format!(
            "Dear Hiring Manager,\n\n\
             I am writing to express my strong interest in the {position} role at {company}. \
             After reviewing the job description, I am confident that my background and \
             experience make me an ideal candidate for this opportunity.\n\n\
             **Why I'm the Perfect Fit:**\n\n\
             My experience aligns perfectly with your requirements, particularly in {top3}. \
             Here are some key achievements that demonstrate my qualifications:\n\n\
             {highlight_lines}\n\
             **Relevant Skills & Experience:**\n\
             Based on your job description, I have direct experience with {top5}. \
             My background in these areas, combined with my proven track record of success, \
             positions me well to contribute immediately to your team.\n\n\
             **Value I Bring:**\n\
             I am particularly excited about the opportunity to contribute to {company}'s \
             mission and growth. My experience in {primary} and {secondary} will enable me \
             to make a meaningful impact from day one.\n\n\
             I would welcome the opportunity to discuss how my background and enthusiasm can \
             contribute to your team's success. Thank you for considering my application, and \
             I look forward to hearing from you.\n\n\
             Best regards,\n\
             [Your Name]\n\n\
             ---\n\
             **ATS Keywords Included:** {top8}",
            top3 = first(3),
            top5 = first(5),
            top8 = first(8),
        )
    }
}

/// Short generic letter used when generation fails. Uses nothing but the addressee.
pub fn fallback_letter(company_name: Option<&str>, position_title: Option<&str>) -> String {
    let position = present(position_title).unwrap_or("position");
    let company = present(company_name).unwrap_or("your company");
    format!(
        "Dear Hiring Manager,\n\n\
         I am writing to express my interest in the {position} at {company}.\n\n\
         My background and experience make me a strong candidate for this role. I have \
         relevant experience and skills that align with your requirements.\n\n\
         I would welcome the opportunity to discuss my qualifications further.\n\n\
         Best regards,\n\
         [Your Name]"
    )
}

fn strip_marker(line: &str) -> String {
    line.trim_start_matches(|c: char| c == BULLET || c == '-' || c.is_whitespace())
        .trim_end()
        .to_string()
}
