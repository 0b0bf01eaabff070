//! Prompt builders for the fill-in-the-blank variants.

use crate::domain::{Difficulty, Word};

/// The reply format both fill-in-the-blank prompts demand.
const REPLY_FORMAT: &str = "Follow the format below strictly:\n\
  Sentence: <sentence here>\n\
  a: <option 1>\n\
  b: <option 2>\n\
  c: <option 3>\n\
  d: <option 4>\n\
  RightAnswer: <correct option> (ex: a, b, c, or d)\n\
  Explanation: <short explanation in Vietnamese>";

/// Blank-filling on the word's meaning: the correct option is the word
/// itself, distractors are free.
pub fn fill_blank_meaning(word: &Word, difficulty: Difficulty) -> String {
  format!(
    "Generate a sentence with a blank (\"___\" present for blank) and 4 random answer options, \
     where the true answer to fill in the blank is \"{}\". \
     The sentence should be suitable for {} level.\n{}",
    word.eng_meaning.to_lowercase(),
    difficulty.level_label(),
    REPLY_FORMAT,
  )
}

/// Blank-filling on grammatical form: the four options are the noun, verb,
/// adjective and adverb forms related to the word.
pub fn fill_blank_word_kind(word: &Word, difficulty: Difficulty) -> String {
  format!(
    "Generate a sentence with a blank (\"___\" present for blank) using the word \"{}\". \
     The 4 answer options must be the noun, verb, adjective and adverb forms related to \"{}\"; \
     when such a form does not exist, use an unrelated but grammatically valid distractor. \
     Exactly one option fits the blank. \
     The sentence should be suitable for {} level.\n{}",
    word.eng_meaning.to_lowercase(),
    word.eng_meaning.to_lowercase(),
    difficulty.level_label(),
    REPLY_FORMAT,
  )
}
