//! # Email Syntax
//!
//! Practical (RFC-ish) email syntax checking.
//!
//! The limits mirror common practice rather than the full grammar:
//! the whole address is capped at 256 bytes, the local part at 64 and the
//! domain at 255, with a `local@domain.tld` shape and a 2-63 character
//! alphabetic TLD. The caps are explicit length checks because the `regex`
//! crate deliberately has no lookahead.

use regex::Regex;
use std::sync::LazyLock;

/// Shape check, applied after the length caps. `(?i)` makes the whole
/// pattern case-insensitive; the class excludes `@`, so the address can
/// contain exactly one.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,63}$").expect("email pattern compiles")
});

/// Checks whether `email` is a syntactically plausible address.
///
/// ## Example
/// ```rust
/// use folio_core::email::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(is_valid_email("John.Doe+tag@Example.COM"));
/// assert!(!is_valid_email("missing-at-sign.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 256 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if domain.len() > 255 {
        return false;
    }
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("user+tag@sub.example.co"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_valid_email("John.DOE@EXAMPLE.Com"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@example.c")); // TLD too short
        assert!(!is_valid_email("a b@example.com")); // space in local part
    }

    #[test]
    fn test_length_caps() {
        // local part at 64 is fine, 65 is not
        let local_64 = format!("{}@example.com", "a".repeat(64));
        let local_65 = format!("{}@example.com", "a".repeat(65));
        assert!(is_valid_email(&local_64));
        assert!(!is_valid_email(&local_65));

        // whole address above 256 bytes is rejected before the regex runs
        let oversized = format!("a@{}.com", "b".repeat(300));
        assert!(!is_valid_email(&oversized));
    }
}
