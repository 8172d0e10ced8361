use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    static ref PASSWORD_CHARSET_RE: Regex = Regex::new(r"^[a-zA-Z0-9]{6,}$").unwrap();
    static ref NICKNAME_RE: Regex = Regex::new(r"^[a-zA-Z가-힣0-9]{1,10}$").unwrap();
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::EmailFormat)
    }
}

/// Alphanumeric only, at least 6 characters, at least one letter and one
/// digit. The letter/digit requirements are checked explicitly rather than
/// via lookaheads, which the regex crate does not support.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if PASSWORD_CHARSET_RE.is_match(password) && has_letter && has_digit {
        Ok(())
    } else {
        Err(ApiError::PasswordFormat)
    }
}

/// 1-10 characters: ASCII letters, digits, or Korean syllable blocks.
pub fn validate_nickname(nickname: &str) -> Result<(), ApiError> {
    if NICKNAME_RE.is_match(nickname) {
        Ok(())
    } else {
        Err(ApiError::NicknameFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        for email in [
            "a@b.com",
            "user.name+tag@example.co.kr",
            "UPPER_case%ok@sub.domain-x.org",
        ] {
            assert!(validate_email(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "plain",
            "no-at.example.com",
            "two@@example.com",
            "user@domain",
            "user@domain.c",
            "user@domain.",
            "spaced user@example.com",
        ] {
            assert!(matches!(validate_email(email), Err(ApiError::EmailFormat)), "{email}");
        }
    }

    #[test]
    fn password_needs_letter_and_digit() {
        assert!(validate_password("abc123").is_ok());
        assert!(validate_password("a1b2c3d4e5").is_ok());
        assert!(matches!(
            validate_password("abcdef"),
            Err(ApiError::PasswordFormat)
        ));
        assert!(matches!(
            validate_password("123456"),
            Err(ApiError::PasswordFormat)
        ));
    }

    #[test]
    fn password_needs_six_alphanumeric_chars() {
        assert!(matches!(
            validate_password("a1b2c"),
            Err(ApiError::PasswordFormat)
        ));
        assert!(matches!(
            validate_password("abc12!"),
            Err(ApiError::PasswordFormat)
        ));
        assert!(matches!(
            validate_password("abc 123"),
            Err(ApiError::PasswordFormat)
        ));
        assert!(matches!(validate_password(""), Err(ApiError::PasswordFormat)));
    }

    #[test]
    fn nickname_allows_ascii_korean_and_digits() {
        assert!(validate_nickname("nick1").is_ok());
        assert!(validate_nickname("한글닉네임").is_ok());
        assert!(validate_nickname("mix한글9").is_ok());
        assert!(validate_nickname("a").is_ok());
        assert!(validate_nickname("0123456789").is_ok());
    }

    #[test]
    fn nickname_enforces_length_and_charset() {
        assert!(matches!(validate_nickname(""), Err(ApiError::NicknameFormat)));
        assert!(matches!(
            validate_nickname("elevenchars"),
            Err(ApiError::NicknameFormat)
        ));
        assert!(matches!(
            validate_nickname("bad nick"),
            Err(ApiError::NicknameFormat)
        ));
        assert!(matches!(
            validate_nickname("emoji😀"),
            Err(ApiError::NicknameFormat)
        ));
        // Jamo are outside the syllable block
        assert!(matches!(
            validate_nickname("ㄱㄴㄷ"),
            Err(ApiError::NicknameFormat)
        ));
    }
}
