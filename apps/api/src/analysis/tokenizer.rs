//! Tokenizer/Normalizer — lowercases, strips punctuation, and filters stopwords.

use std::collections::HashSet;

/// Tokens must be longer than this many characters to count as keywords.
const MIN_TOKEN_CHARS: usize = 2;

/// Lowercases, replaces every non-alphanumeric, non-whitespace character with a
/// space, then collapses runs of whitespace to a single space.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Raw token stream: normalized text split on whitespace, duplicates and order kept.
pub fn raw_tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Applies the stopword and minimum-length filters.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Filtered token stream in source order, duplicates kept (input to frequency counting).
    pub fn tokens(&self, text: &str) -> Vec<String> {
        raw_tokens(text)
            .into_iter()
            .filter(|t| self.is_keyword(t))
            .collect()
    }

    /// Filtered token set. Fresh per call.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokens(text).into_iter().collect()
    }

    pub fn is_keyword(&self, token: &str) -> bool {
        token.chars().count() > MIN_TOKEN_CHARS && !self.stopwords.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::STOPWORDS;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(STOPWORDS)
    }

    #[test]
    fn test_normalize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(
            normalize("  Rust/C++,   Go!\n\tSQL-heavy  "),
            "rust c go sql heavy"
        );
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize("Résumé: Zürich"), "résumé zürich");
    }

    #[test]
    fn test_raw_tokens_preserve_duplicates_and_order() {
        assert_eq!(raw_tokens("a b a"), vec!["a", "b", "a"]);
        assert!(raw_tokens("   ").is_empty());
    }

    #[test]
    fn test_tokens_drop_stopwords_and_short_words() {
        let tokens = tokenizer().tokens("We are looking for an AI and ML engineer with Go");
        assert_eq!(tokens, vec!["looking", "engineer"]);
    }

    #[test]
    fn test_token_set_is_case_and_punctuation_insensitive() {
        let set = tokenizer().token_set("Python, PYTHON; python!");
        assert_eq!(set.len(), 1);
        assert!(set.contains("python"));
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        // "été" is three chars but six bytes
        assert!(tokenizer().is_keyword("été"));
        assert!(!tokenizer().is_keyword("ai"));
    }
}
