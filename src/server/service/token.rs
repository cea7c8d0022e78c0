//! Random archive tokens.
//!
//! Tokens name archives in download URLs and on disk, so they are restricted to ASCII
//! alphanumerics.

use rand::Rng;

/// Length of a generated archive token.
pub const TOKEN_LENGTH: usize = 24;

/// Generates a random 24-character alphanumeric token.
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Whether `token` has the shape of a generated token.
///
/// Checked before a token from a URL or button is turned into a file path.
pub fn is_valid_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_valid_tokens() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(is_valid_token(&token));
    }

    #[test]
    fn generates_distinct_tokens() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("short"));
        assert!(!is_valid_token("../../../../etc/passwd000"));
        assert!(!is_valid_token(&"a".repeat(TOKEN_LENGTH + 1)));
    }
}
