//! Email validation functions

/// Validates email format
///
/// When the `rfc-email` feature is enabled, uses RFC 5322 parsing.
/// Otherwise, applies the browser-style pattern used by form libraries:
/// - no leading dot and no consecutive dots in the local part
/// - local part ends with an alphanumeric, `_`, `+` or `-`
/// - dotted domain with an alphabetic TLD of two or more letters
#[cfg(feature = "rfc-email")]
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email)
}

#[cfg(not(feature = "rfc-email"))]
pub fn is_valid_email(email: &str) -> bool {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
    });

    if email.starts_with('.') {
        return false;
    }

    let local = email.split('@').next().unwrap_or_default();
    if local.contains("..") {
        return false;
    }

    EMAIL_REGEX.is_match(email)
}
