// Local keyword pipeline: tokenize → filter → frequency-rank → skill patterns →
// missing-keyword diff → template-based rewriting.
// Everything here is synchronous and a pure function of its inputs, except the
// action-verb choice in the rewriter, which takes an injected RNG.

pub mod cover_letter;
pub mod keywords;
pub mod lexicon;
pub mod matcher;
pub mod rewriter;
pub mod tokenizer;

/// Bullet marker recognised in résumé text, alongside a leading `-`.
pub const BULLET: char = '•';

/// True when the line is a list item: it carries a `•` anywhere or starts with `-`.
pub fn is_bullet_line(line: &str) -> bool {
    line.contains(BULLET) || line.trim_start().starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_line_detection() {
        assert!(is_bullet_line("• Built APIs"));
        assert!(is_bullet_line("   - Built APIs"));
        assert!(is_bullet_line("Led team • 2019"));
        assert!(!is_bullet_line("Full-stack engineer"));
        assert!(!is_bullet_line("Experience"));
    }
}
