//! Classification of lookup tokens.
//!
//! A single URL path segment addresses a movie either by numeric id or by
//! slug. The token is classified before any storage round-trip, so a token
//! that can never match a record is rejected without touching the database.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Longest token accepted as a slug lookup.
///
/// Generated slugs are capped well below this; the headroom covers suffixed
/// and imported slugs.
pub const MAX_TOKEN_LEN: usize = 100;

static SLUG_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// How a lookup token resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieIdentifier {
    /// Numeric primary key lookup.
    Id(i64),
    /// Slug lookup.
    Slug(String),
    /// Token that can never match a record.
    Invalid,
}

impl MovieIdentifier {
    /// Classify a raw path token.
    ///
    /// All-digit tokens are id lookups and never slugs; zero and values out
    /// of `i64` range are invalid because no record can carry them. Anything
    /// else is a slug lookup when it is lowercase alphanumeric groups joined
    /// by single hyphens and no longer than [`MAX_TOKEN_LEN`].
    pub fn classify(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return match token.parse::<i64>() {
                Ok(id) if id > 0 => MovieIdentifier::Id(id),
                _ => MovieIdentifier::Invalid,
            };
        }

        if token.len() <= MAX_TOKEN_LEN && SLUG_TOKEN.is_match(token) {
            return MovieIdentifier::Slug(token.to_string());
        }

        MovieIdentifier::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_token_is_an_id() {
        assert_eq!(MovieIdentifier::classify("123"), MovieIdentifier::Id(123));
        assert_eq!(MovieIdentifier::classify("1"), MovieIdentifier::Id(1));
    }

    #[test]
    fn test_leading_zeros_parse_as_integer() {
        assert_eq!(MovieIdentifier::classify("007"), MovieIdentifier::Id(7));
    }

    #[test]
    fn test_zero_is_invalid() {
        assert_eq!(MovieIdentifier::classify("0"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("000"), MovieIdentifier::Invalid);
    }

    #[test]
    fn test_out_of_range_number_is_invalid() {
        // larger than i64::MAX, still all digits
        assert_eq!(
            MovieIdentifier::classify("99999999999999999999"),
            MovieIdentifier::Invalid
        );
    }

    #[test]
    fn test_well_formed_slug() {
        assert_eq!(
            MovieIdentifier::classify("the-dark-knight"),
            MovieIdentifier::Slug("the-dark-knight".to_string())
        );
        assert_eq!(
            MovieIdentifier::classify("blade-runner-2049"),
            MovieIdentifier::Slug("blade-runner-2049".to_string())
        );
    }

    #[test]
    fn test_digit_leading_slug_segment() {
        // mixed groups may start with digits, only pure digit tokens are ids
        assert_eq!(
            MovieIdentifier::classify("12-angry-men"),
            MovieIdentifier::Slug("12-angry-men".to_string())
        );
        assert_eq!(
            MovieIdentifier::classify("12a"),
            MovieIdentifier::Slug("12a".to_string())
        );
    }

    #[test]
    fn test_malformed_tokens_are_invalid() {
        assert_eq!(MovieIdentifier::classify("-bad-"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("-leading"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("trailing-"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("double--hyphen"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify(""), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("has space"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("Uppercase"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("under_score"), MovieIdentifier::Invalid);
        assert_eq!(MovieIdentifier::classify("-5"), MovieIdentifier::Invalid);
    }

    #[test]
    fn test_overlong_token_is_invalid() {
        let long_slug = "a-".repeat(60) + "z";
        assert!(long_slug.len() > MAX_TOKEN_LEN);
        assert_eq!(MovieIdentifier::classify(&long_slug), MovieIdentifier::Invalid);
    }

    #[test]
    fn test_token_at_length_cap_is_accepted() {
        let token = "a".repeat(MAX_TOKEN_LEN);
        assert_eq!(
            MovieIdentifier::classify(&token),
            MovieIdentifier::Slug(token.clone())
        );
    }
}
