//! Request validation applied before the service layer.
//!
//! Mirrors the declarative checks the HTTP DTOs carry: names are non-empty
//! after trimming and bounded in length, kind tags come from the fixed set.
//! Failures map to a 400 reply with the offending field named.

use crate::domain::WordKind;

/// Upper bound on meaning and category-name fields.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validation failure with a caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for ValidationError {}

/// Non-empty after trim, at most MAX_NAME_LENGTH characters.
pub fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError(format!("{} cannot be empty", field)));
  }
  if value.chars().count() > MAX_NAME_LENGTH {
    return Err(ValidationError(format!(
      "{} must be at most {} characters",
      field, MAX_NAME_LENGTH
    )));
  }
  Ok(())
}

/// Parse kind tags; the list must be non-empty and every entry one of the
/// four known tags (case-insensitive).
pub fn parse_kinds(values: &[String]) -> Result<Vec<WordKind>, ValidationError> {
  if values.is_empty() {
    return Err(ValidationError("Word kind cannot be empty".to_string()));
  }

  values
    .iter()
    .map(|value| {
      WordKind::from_str(value).ok_or_else(|| {
        ValidationError(
          "Word kind must be one of the following: noun, verb, adj, adv".to_string(),
        )
      })
    })
    .collect()
}

/// Shared add/update word payload checks; returns the parsed kinds.
pub fn validate_word_payload(
  eng_meaning: &str,
  vn_meaning: &str,
  word_kind: &[String],
) -> Result<Vec<WordKind>, ValidationError> {
  require_name("English word", eng_meaning)?;
  require_name("Vietnamese word", vn_meaning)?;
  parse_kinds(word_kind)
}
