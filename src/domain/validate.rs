//! Field-level input normalization shared by events and bookings.

use crate::error::DevEventError;

/// Trims `value` and fails if nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String, DevEventError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DevEventError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims `value`, mapping blank input to `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Fails if `value` is longer than `max` characters.
pub(crate) fn max_chars(field: &str, value: &str, max: usize) -> Result<(), DevEventError> {
    if value.chars().count() > max {
        return Err(DevEventError::Validation(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(())
}

/// Normalizes an email address and checks its shape.
///
/// Accepts `local@domain.tld` where the local part and every domain label
/// are runs of word characters optionally joined by single `.` or `-`, and
/// the top-level label is at least two ASCII letters.
pub(crate) fn email(value: &str) -> Result<String, DevEventError> {
    let normalized = required("user email", value)?.to_lowercase();
    let invalid = || DevEventError::Validation("please provide a valid email address".to_string());

    let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
    if !is_dotted_word(local) || !is_dotted_word(domain) {
        return Err(invalid());
    }
    let (_, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    Ok(normalized)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Word runs separated by single `.` or `-`, no leading or trailing separator.
fn is_dotted_word(s: &str) -> bool {
    !s.is_empty()
        && s.split(['.', '-'])
            .all(|part| !part.is_empty() && part.chars().all(is_word_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(required("title", "  RustConf ").ok().as_deref(), Some("RustConf"));
        assert!(required("title", "   ").is_err());
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" x ")).as_deref(), Some("x"));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn max_chars_counts_chars_not_bytes() {
        assert!(max_chars("note", "ééé", 3).is_ok());
        assert!(max_chars("note", "éééé", 3).is_err());
    }

    #[test]
    fn accepts_common_addresses() {
        assert_eq!(
            email(" Jane.Doe@Example.com ").ok().as_deref(),
            Some("jane.doe@example.com")
        );
        assert!(email("a-b_c@mail.co.uk").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "@example.com", "a@", "a@example", "a@@b.com", "a..b@c.com", "a@b.c", "a@b.c0m"] {
            assert!(email(bad).is_err(), "{bad} should be rejected");
        }
    }
}
