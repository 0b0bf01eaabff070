//! Strict line-oriented parser for generated fill-in-the-blank replies.
//!
//! The expected reply is a handful of `Prefix: value` lines plus `a:`..`d:`
//! option lines. Each line is classified independently, so reordering is
//! tolerated; anything unrecognized is ignored. Incomplete replies are
//! rejected outright: there is no retry and no guessing.

/// Maximum number of answer options captured from a reply.
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
  pub sentence: String,
  pub answer_options: Vec<String>,
  pub right_answer: String,
  pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
  MissingSentence,
  MissingOptions,
  MissingRightAnswer,
}

impl std::fmt::Display for ParseError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingSentence => write!(f, "reply contains no Sentence line"),
      Self::MissingOptions => write!(f, "reply contains no answer options"),
      Self::MissingRightAnswer => write!(f, "reply contains no RightAnswer line"),
    }
  }
}

impl std::error::Error for ParseError {}

pub fn parse_reply(content: &str) -> Result<ParsedReply, ParseError> {
  let mut reply = ParsedReply::default();

  for line in content.lines() {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix("Sentence:") {
      reply.sentence = rest.trim().to_string();
    } else if let Some(rest) = line.strip_prefix("RightAnswer:") {
      reply.right_answer = rest.trim().to_string();
    } else if let Some(rest) = line.strip_prefix("Explanation:") {
      let text = rest.trim();
      if !text.is_empty() {
        reply.explanation = Some(text.to_string());
      }
    } else if let Some(option) = option_line(line) {
      if reply.answer_options.len() < MAX_OPTIONS {
        reply.answer_options.push(option.to_string());
      }
    }
  }

  if reply.sentence.is_empty() {
    return Err(ParseError::MissingSentence);
  }
  if reply.answer_options.is_empty() {
    return Err(ParseError::MissingOptions);
  }
  if reply.right_answer.is_empty() {
    return Err(ParseError::MissingRightAnswer);
  }

  Ok(reply)
}

/// Matches `a:` through `d:` lines; returns the option text after the colon.
fn option_line(line: &str) -> Option<&str> {
  let mut chars = line.chars();
  let letter = chars.next()?;
  if !('a'..='d').contains(&letter) {
    return None;
  }
  if chars.next() != Some(':') {
    return None;
  }
  Some(chars.as_str().trim())
}
