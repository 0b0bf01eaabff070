//! Quiz generation: offline question builders plus the model-backed
//! fill-in-the-blank pipeline (prompt -> completion -> strict parse).
//!
//! Builders take the random source as a parameter so tests can assert
//! exact outcomes with a seeded generator.

pub mod model;
pub mod parser;
pub mod prompt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{QuestionAnswer, Word, capitalize_first};

/// Option letters in presentation order.
pub const OPTION_LETTERS: [&str; 4] = ["a", "b", "c", "d"];

/// Words sampled for the matching variants.
pub const MATCHING_SAMPLE_SIZE: usize = 4;

#[derive(Debug)]
pub enum QuizError {
  /// The store holds no words at all
  NoWords,
  /// Fewer than four words available for a matching question
  NotEnoughWords,
  Model(model::ModelError),
  Malformed(parser::ParseError),
}

impl std::fmt::Display for QuizError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NoWords => write!(f, "No words available for learning mode."),
      Self::NotEnoughWords => write!(f, "Not enough words available for learning mode."),
      Self::Model(err) => write!(f, "Failed to get question and answer from model: {}", err),
      Self::Malformed(err) => {
        write!(f, "Failed to generate a valid question and answer from the model: {}", err)
      }
    }
  }
}

impl std::error::Error for QuizError {}

/// Which side of the pair is shown in the question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
  /// One English word, four Vietnamese options
  EngToVn,
  /// One Vietnamese word, four English options
  VnToEng,
}

/// Build a matching question from exactly four sampled words. The target
/// index is drawn from `rng`; the right answer is its option letter.
pub fn matching_question(
  words: &[Word],
  direction: MatchDirection,
  rng: &mut impl Rng,
) -> Result<QuestionAnswer, QuizError> {
  if words.len() < MATCHING_SAMPLE_SIZE {
    return Err(QuizError::NotEnoughWords);
  }
  let words = &words[..MATCHING_SAMPLE_SIZE];
  let target = rng.random_range(0..MATCHING_SAMPLE_SIZE);

  let (sentence, answer_options) = match direction {
    MatchDirection::EngToVn => (
      format!(
        "Find the word with the same meaning as: '{}'",
        words[target].eng_meaning
      ),
      words
        .iter()
        .map(|w| capitalize_first(&w.vn_meaning))
        .collect(),
    ),
    MatchDirection::VnToEng => (
      format!(
        "Tìm từ có cùng nghĩa: '{}'",
        capitalize_first(&words[target].vn_meaning)
      ),
      words
        .iter()
        .map(|w| capitalize_first(&w.eng_meaning))
        .collect(),
    ),
  };

  Ok(QuestionAnswer {
    sentence,
    answer_options,
    right_answer: OPTION_LETTERS[target].to_string(),
    explanation: None,
  })
}

/// Scramble the word's lowercased English meaning; the Vietnamese meaning
/// serves as the hint.
pub fn completion_question(word: &Word, rng: &mut impl Rng) -> QuestionAnswer {
  let answer = word.eng_meaning.to_lowercase();
  let mut characters: Vec<String> = answer.chars().map(|c| c.to_string()).collect();
  characters.shuffle(rng);

  QuestionAnswer {
    sentence: word.vn_meaning.clone(),
    answer_options: characters,
    right_answer: answer,
    explanation: None,
  }
}
