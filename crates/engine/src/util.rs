//! Internal helpers for model validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID supplied by a caller (usually a path parameter) and return a
/// labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Validate a required text field against its length bounds, returning the
/// trimmed value.
pub(crate) fn required_text(
    value: &str,
    label: &str,
    min: usize,
    max: usize,
) -> ResultEngine<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Minimal email shape check: the strict format validation belongs to the
/// client; the engine only rejects values that cannot possibly be addresses.
pub(crate) fn required_email(value: &str) -> ResultEngine<String> {
    let trimmed = required_text(value, "email", 5, 60)?;
    let mut parts = trimmed.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(EngineError::InvalidInput("invalid email".to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_bounds() {
        assert_eq!(required_text("  abc ", "name", 2, 5).unwrap(), "abc");
        assert!(required_text("a", "name", 2, 5).is_err());
        assert!(required_text("abcdef", "name", 2, 5).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(required_email("a@b.com").is_ok());
        assert!(required_email("nope").is_err());
        assert!(required_email("a@@b.com").is_err());
        assert!(required_email("@b.com").is_err());
    }

    #[test]
    fn uuid_parse_labels_error() {
        assert!(parse_uuid("123", "credit").is_err());
        assert!(parse_uuid("7b1c7a39-5cde-4c44-9462-0f4fb811a3b6", "credit").is_ok());
    }
}
