//! Short slug generation for list identifiers.
//!
//! Slugs double as access tokens: anyone holding one can read and edit the
//! list, so they are drawn from a cryptographically strong random source and
//! never from a guessable sequence.

use rand::Rng;

/// Alphabet for slugs: lowercase alphanumeric, 36 symbols.
const SLUG_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a slug in characters.
pub const SLUG_LENGTH: usize = 5;

/// Generates a random 5-character slug.
///
/// No uniqueness check happens here. The slug space is 36^5 (~60M); the rare
/// collision is caught by the store's primary-key insert and surfaces as a
/// storage fault rather than being retried.
pub fn allocate() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LENGTH)
        .map(|_| SLUG_CHARS[rng.random_range(0..SLUG_CHARS.len())] as char)
        .collect()
}

/// Returns true if `s` has the shape of a slug.
///
/// Used by the API layer to reject malformed ids before touching the store.
pub fn is_valid(s: &str) -> bool {
    s.len() == SLUG_LENGTH
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allocate_length_and_alphabet() {
        for _ in 0..10_000 {
            let slug = allocate();
            assert_eq!(slug.len(), SLUG_LENGTH);
            assert!(slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_allocate_varies() {
        let slugs: HashSet<String> = (0..1000).map(|_| allocate()).collect();
        // 1000 draws from a 60M space should essentially never repeat.
        assert!(slugs.len() > 990);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("abc12"));
        assert!(is_valid("00000"));
        assert!(is_valid("zzzzz"));

        assert!(!is_valid(""));
        assert!(!is_valid("abcd"));
        assert!(!is_valid("abcdef"));
        assert!(!is_valid("ABC12"));
        assert!(!is_valid("ab c1"));
        assert!(!is_valid("ab-12"));
    }

    #[test]
    fn test_allocated_slugs_are_valid() {
        for _ in 0..100 {
            assert!(is_valid(&allocate()));
        }
    }
}
