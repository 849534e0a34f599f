use rand::Rng;

/// Length of every generated bearer token.
pub const TOKEN_LENGTH: usize = 16;

/// Lowercase letters plus ASCII punctuation. No whitespace and no uppercase,
/// so a token survives credential normalization unchanged.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Generate a fresh random bearer token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Canonical form of a presented credential.
///
/// Accepts either the raw token or `Bearer <token>` (scheme matched
/// case-insensitively), trims surrounding whitespace and lower-cases the rest.
///
/// A bare `Bearer` scheme with nothing after it normalizes to the empty string.
pub fn normalize_credential(raw: &str) -> String {
    let raw = raw.trim();
    let token = match raw.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest,
        None if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    token.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_fixed_length_and_alphabet() {
        let token = generate_token();
        assert_eq!(token.chars().count(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn generated_token_is_already_normalized() {
        for _ in 0..64 {
            let token = generate_token();
            assert_eq!(normalize_credential(&token), token);
        }
    }

    #[test]
    fn normalize_strips_scheme_and_case() {
        assert_eq!(normalize_credential("  abc!def  "), "abc!def");
        assert_eq!(normalize_credential("Bearer abc!def"), "abc!def");
        assert_eq!(normalize_credential("bearer   ABC"), "abc");
        assert_eq!(normalize_credential("BEARER x"), "x");
        assert_eq!(normalize_credential("Bearer\tabc"), "abc");
    }

    #[test]
    fn bare_scheme_is_empty() {
        assert_eq!(normalize_credential("Bearer "), "");
        assert_eq!(normalize_credential("  bearer"), "");
        assert_eq!(normalize_credential("BEARER   "), "");
    }

    #[test]
    fn normalize_leaves_short_values_alone() {
        assert_eq!(normalize_credential("Bear"), "bear");
        assert_eq!(normalize_credential(""), "");
    }
}
