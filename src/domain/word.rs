use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grammatical tag attached to a word. Variant order matches the
/// alphabetical order of the stored names so derived `Ord` sorts the same
/// way the persisted sequence does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
  Adj,
  Adv,
  Noun,
  Verb,
}

impl WordKind {
  /// Case-insensitive parse; `None` for anything outside the four tags.
  pub fn from_str(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "adj" => Some(Self::Adj),
      "adv" => Some(Self::Adv),
      "noun" => Some(Self::Noun),
      "verb" => Some(Self::Verb),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Adj => "adj",
      Self::Adv => "adv",
      Self::Noun => "noun",
      Self::Verb => "verb",
    }
  }
}

/// Sort and deduplicate a kind list into its persisted form.
pub fn normalize_kinds(mut kinds: Vec<WordKind>) -> Vec<WordKind> {
  kinds.sort();
  kinds.dedup();
  kinds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  /// Unique, stored canonicalized (first letter uppercase, rest lowercase)
  pub eng_meaning: String,
  pub vn_meaning: String,
  /// Always sorted and deduplicated before persistence
  pub word_kind: Vec<WordKind>,
  pub category_id: Option<i64>,
  /// Free-form key-value map carried in the schema, not settable via the API
  pub metadata: Option<serde_json::Value>,
  pub last_update: DateTime<Utc>,
}

/// A word joined with its category name for listings.
#[derive(Debug, Clone)]
pub struct WordRecord {
  pub word: Word,
  pub category: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_word_kind_from_str() {
    assert_eq!(WordKind::from_str("noun"), Some(WordKind::Noun));
    assert_eq!(WordKind::from_str("verb"), Some(WordKind::Verb));
    assert_eq!(WordKind::from_str("adj"), Some(WordKind::Adj));
    assert_eq!(WordKind::from_str("adv"), Some(WordKind::Adv));
  }

  #[test]
  fn test_word_kind_from_str_case_insensitive() {
    assert_eq!(WordKind::from_str("NOUN"), Some(WordKind::Noun));
    assert_eq!(WordKind::from_str("Verb"), Some(WordKind::Verb));
  }

  #[test]
  fn test_word_kind_from_str_invalid() {
    assert_eq!(WordKind::from_str("adjective"), None);
    assert_eq!(WordKind::from_str(""), None);
  }

  #[test]
  fn test_word_kind_as_str_roundtrip() {
    for kind in [WordKind::Adj, WordKind::Adv, WordKind::Noun, WordKind::Verb] {
      assert_eq!(WordKind::from_str(kind.as_str()), Some(kind));
    }
  }

  #[test]
  fn test_normalize_kinds_sorts() {
    let kinds = vec![WordKind::Verb, WordKind::Noun, WordKind::Adj];
    assert_eq!(
      normalize_kinds(kinds),
      vec![WordKind::Adj, WordKind::Noun, WordKind::Verb]
    );
  }

  #[test]
  fn test_normalize_kinds_dedups() {
    let kinds = vec![WordKind::Noun, WordKind::Noun, WordKind::Verb, WordKind::Noun];
    assert_eq!(normalize_kinds(kinds), vec![WordKind::Noun, WordKind::Verb]);
  }

  #[test]
  fn test_word_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&WordKind::Noun).unwrap(), "\"noun\"");
  }
}
