//! Learning-mode endpoints. Each one is a single stateless
//! request/response; the fill-in-the-blank variants make one outbound call
//! to the text-generation service.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::{AppState, StatusReply, internal_error};
use crate::db::{self, try_lock};
use crate::domain::{Difficulty, QuestionAnswer, Word};
use crate::quiz::{self, MatchDirection, QuizError, parser, prompt};

#[derive(Debug, Deserialize)]
pub struct LearningQuery {
  pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReply {
  pub status_code: u16,
  pub question_answer: QuestionAnswer,
}

impl IntoResponse for QuestionReply {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}

impl QuestionReply {
  fn ok(question_answer: QuestionAnswer) -> Self {
    Self {
      status_code: 200,
      question_answer,
    }
  }
}

/// Log the failure and answer with the fixed caller-facing message; there
/// is no retry and no fallback prompt.
fn generation_error(err: &QuizError) -> StatusReply {
  tracing::error!("Question generation failed: {}", err);
  let message = match err {
    QuizError::NoWords => "No words available for learning mode.",
    QuizError::NotEnoughWords => "Not enough words available for learning mode.",
    QuizError::Model(_) => "Failed to get question and answer from model.",
    QuizError::Malformed(_) => {
      "Failed to generate a valid question and answer from the model."
    }
  };
  StatusReply::new(500, message)
}

#[derive(Debug, Clone, Copy)]
enum FillBlankVariant {
  Meaning,
  WordKind,
}

/// Sample one word while holding the lock, then release it for the
/// duration of the model call.
fn sample_words(state: &AppState, limit: i64) -> Result<Vec<Word>, Response> {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return Err(internal_error("Database fetch failed", err).into_response()),
  };
  db::random_words(&conn, limit)
    .map_err(|err| internal_error("Database fetch failed", err).into_response())
}

async fn fill_blank(
  state: AppState,
  query: LearningQuery,
  variant: FillBlankVariant,
) -> Response {
  let difficulty = Difficulty::from_param(query.difficulty.as_deref());

  let word = match sample_words(&state, 1) {
    Ok(words) => words.into_iter().next(),
    Err(response) => return response,
  };
  let Some(word) = word else {
    return generation_error(&QuizError::NoWords).into_response();
  };

  tracing::debug!("Selected word: {}", word.eng_meaning);

  let prompt = match variant {
    FillBlankVariant::Meaning => prompt::fill_blank_meaning(&word, difficulty),
    FillBlankVariant::WordKind => prompt::fill_blank_word_kind(&word, difficulty),
  };

  let content = match state.model.complete(&prompt).await {
    Ok(content) => content,
    Err(err) => return generation_error(&QuizError::Model(err)).into_response(),
  };

  match parser::parse_reply(&content) {
    Ok(parsed) => QuestionReply::ok(QuestionAnswer {
      sentence: parsed.sentence,
      answer_options: parsed.answer_options,
      right_answer: parsed.right_answer,
      explanation: parsed.explanation,
    })
    .into_response(),
    Err(err) => generation_error(&QuizError::Malformed(err)).into_response(),
  }
}

pub async fn complete_sentence_meaning(
  State(state): State<AppState>,
  Query(query): Query<LearningQuery>,
) -> Response {
  fill_blank(state, query, FillBlankVariant::Meaning).await
}

pub async fn complete_sentence_word_kind(
  State(state): State<AppState>,
  Query(query): Query<LearningQuery>,
) -> Response {
  fill_blank(state, query, FillBlankVariant::WordKind).await
}

fn matching(state: &AppState, direction: MatchDirection) -> Response {
  let words = match sample_words(state, quiz::MATCHING_SAMPLE_SIZE as i64) {
    Ok(words) => words,
    Err(response) => return response,
  };

  match quiz::matching_question(&words, direction, &mut rand::rng()) {
    Ok(question) => QuestionReply::ok(question).into_response(),
    Err(err) => generation_error(&err).into_response(),
  }
}

pub async fn one_eng_four_vn_words(State(state): State<AppState>) -> Response {
  matching(&state, MatchDirection::EngToVn)
}

pub async fn one_vn_four_eng_words(State(state): State<AppState>) -> Response {
  matching(&state, MatchDirection::VnToEng)
}

pub async fn complete_word(State(state): State<AppState>) -> Response {
  let word = match sample_words(&state, 1) {
    Ok(words) => words.into_iter().next(),
    Err(response) => return response,
  };
  let Some(word) = word else {
    tracing::error!("Question generation failed: no words available for completion");
    return StatusReply::new(500, "No words available for completion.").into_response();
  };

  QuestionReply::ok(quiz::completion_question(&word, &mut rand::rng())).into_response()
}
