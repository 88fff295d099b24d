//! Account credentials.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Registration checks for email and password

mod password;

pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, check_password_policy, hash_password, verify_password,
};

/// Trims and lowercases an email address, rejecting obviously malformed ones.
///
/// Requires exactly one `@` with a non-empty local part and a dotted domain.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    let dotted = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2;
    if local.is_empty()
        || domain.contains('@')
        || !dotted
        || domain.starts_with('.')
        || domain.ends_with('.')
        || normalized.contains(char::is_whitespace)
    {
        return None;
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Ana.Perez@Example.COM "),
            Some("ana.perez@example.com".to_string())
        );
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign.com")]
    #[case("@example.com")]
    #[case("ana@localhost")]
    #[case("ana@@example.com")]
    #[case("ana@.example.com")]
    #[case("ana@example.com.")]
    #[case("ana perez@example.com")]
    fn test_normalize_email_rejects(#[case] email: &str) {
        assert_eq!(normalize_email(email), None);
    }
}
