//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Registration token codes are 64 hex characters (32 random bytes)
static TOKEN_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").unwrap());

/// Check whether a string is a well-formed registration token code.
///
/// The check is purely syntactic; it says nothing about whether the code was
/// ever issued. Callers run this before touching the token store.
pub fn is_valid_token_code(code: &str) -> bool {
    TOKEN_CODE_REGEX.is_match(code)
}

/// Check if an image content type is one we accept for user photos
pub fn is_supported_photo_content_type(content_type: &str) -> bool {
    matches!(content_type, "image/jpeg" | "image/png" | "image/gif")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_64_hex_chars_either_case() {
        assert!(is_valid_token_code(&"a".repeat(64)));
        assert!(is_valid_token_code(&"F".repeat(64)));
        assert!(is_valid_token_code(
            "0123456789abcdef0123456789ABCDEF0123456789abcdef0123456789abcdef"
        ));
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(!is_valid_token_code(""));
        assert!(!is_valid_token_code("not-hex"));
        assert!(!is_valid_token_code(&"a".repeat(63)));
        assert!(!is_valid_token_code(&"a".repeat(65)));
        assert!(!is_valid_token_code(&"g".repeat(64)));
    }

    #[test]
    fn photo_content_types() {
        assert!(is_supported_photo_content_type("image/png"));
        assert!(is_supported_photo_content_type("image/jpeg"));
        assert!(is_supported_photo_content_type("image/gif"));
        assert!(!is_supported_photo_content_type("image/webp"));
        assert!(!is_supported_photo_content_type("text/html"));
    }
}
