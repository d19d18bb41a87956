//! Capitalization and punctuation predicates for description text.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static RE_STARTS_LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Ll}").unwrap());

static RE_STARTS_UPPER_OR_NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{Lu}|\P{L})").unwrap());

/// How the first character of a description is judged.
///
/// The two policies disagree on caseless letters and on empty text, so they
/// are kept apart rather than merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capitalization {
    /// Rejects only text starting with a lowercase letter.
    NotLowercase,
    /// Requires an uppercase letter or a non-letter first.
    UppercaseOrNonLetter,
}

impl Capitalization {
    pub fn accepts(self, text: &str) -> bool {
        match self {
            Capitalization::NotLowercase => !RE_STARTS_LOWERCASE.is_match(text),
            Capitalization::UppercaseOrNonLetter => RE_STARTS_UPPER_OR_NON_LETTER.is_match(text),
        }
    }
}

pub fn ends_with_full_stop(text: &str) -> bool {
    text.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_agree_on_common_text() {
        for policy in [Capitalization::NotLowercase, Capitalization::UppercaseOrNonLetter] {
            assert!(policy.accepts("Fetches the user."));
            assert!(policy.accepts("{@inheritdoc}"));
            assert!(policy.accepts("3 items"));
            assert!(!policy.accepts("fetches the user."));
        }
    }

    #[test]
    fn policies_differ_on_caseless_letters_and_empty_text() {
        assert!(Capitalization::NotLowercase.accepts("日本語"));
        assert!(!Capitalization::UppercaseOrNonLetter.accepts("日本語"));
        assert!(Capitalization::NotLowercase.accepts(""));
        assert!(!Capitalization::UppercaseOrNonLetter.accepts(""));
    }

    #[test]
    fn full_stop() {
        assert!(ends_with_full_stop("Done."));
        assert!(!ends_with_full_stop("Done"));
        assert!(!ends_with_full_stop(""));
    }
}
