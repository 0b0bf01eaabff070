use serde::{Deserialize, Serialize};

/// A generated practice question. Built fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
  /// Question text; fill-in-the-blank variants contain exactly one `___`
  pub sentence: String,
  /// Four candidates for multiple-choice variants, or the scrambled
  /// characters for word completion
  pub answer_options: Vec<String>,
  /// Option letter for multiple-choice variants, the full lowercased word
  /// for completion
  pub right_answer: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

/// Proficiency tier used to parameterize generated-question wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  VeryHard,
}

impl Difficulty {
  /// Parse a query value, normalizing capitalization. Absent or
  /// unrecognized input falls back to `Hard`.
  pub fn from_param(value: Option<&str>) -> Self {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
      Some("easy") => Self::Easy,
      Some("medium") => Self::Medium,
      Some("hard") => Self::Hard,
      Some("veryhard") => Self::VeryHard,
      _ => Self::Hard,
    }
  }

  /// Proficiency label embedded in generation prompts.
  pub fn level_label(&self) -> &'static str {
    match self {
      Self::Easy => "IELTS 3.0 score",
      Self::Medium => "IELTS 5.0 score",
      Self::Hard => "IELTS 7.0 score",
      Self::VeryHard => "IELTS 9.0 score",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_difficulty_from_param_known_levels() {
    assert_eq!(Difficulty::from_param(Some("easy")), Difficulty::Easy);
    assert_eq!(Difficulty::from_param(Some("medium")), Difficulty::Medium);
    assert_eq!(Difficulty::from_param(Some("hard")), Difficulty::Hard);
    assert_eq!(Difficulty::from_param(Some("veryhard")), Difficulty::VeryHard);
  }

  #[test]
  fn test_difficulty_from_param_normalizes_case() {
    assert_eq!(Difficulty::from_param(Some("Easy")), Difficulty::Easy);
    assert_eq!(Difficulty::from_param(Some("VERYHARD")), Difficulty::VeryHard);
    assert_eq!(Difficulty::from_param(Some("  medium ")), Difficulty::Medium);
  }

  #[test]
  fn test_difficulty_from_param_defaults_to_hard() {
    assert_eq!(Difficulty::from_param(None), Difficulty::Hard);
    assert_eq!(Difficulty::from_param(Some("")), Difficulty::Hard);
    assert_eq!(Difficulty::from_param(Some("impossible")), Difficulty::Hard);
  }

  #[test]
  fn test_level_labels() {
    assert_eq!(Difficulty::Easy.level_label(), "IELTS 3.0 score");
    assert_eq!(Difficulty::VeryHard.level_label(), "IELTS 9.0 score");
  }

  #[test]
  fn test_question_answer_serializes_camel_case() {
    let qa = QuestionAnswer {
      sentence: "The dog likes to ___.".to_string(),
      answer_options: vec!["run".to_string()],
      right_answer: "a".to_string(),
      explanation: None,
    };
    let json = serde_json::to_value(&qa).unwrap();
    assert!(json.get("answerOptions").is_some());
    assert!(json.get("rightAnswer").is_some());
    assert!(json.get("explanation").is_none());
  }
}
