//! Word endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::{AppState, StatusReply, internal_error};
use crate::db::try_lock;
use crate::domain::{WordKind, WordRecord};
use crate::services::words::{
  self as word_service, AddWordOutcome, DeleteWordOutcome, UpdateWordInput, UpdateWordOutcome,
  WordInput,
};
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWordRequest {
  pub eng_meaning: String,
  pub vn_meaning: String,
  pub word_kind: Vec<String>,
  #[serde(default)]
  pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordRequest {
  pub eng_meaning: String,
  pub new_eng_meaning: String,
  pub vn_meaning: String,
  pub word_kind: Vec<String>,
  #[serde(default)]
  pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterWordsRequest {
  #[serde(default)]
  pub categories: Option<Vec<String>>,
  #[serde(default)]
  pub word_kind: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDto {
  pub eng_meaning: String,
  pub vn_meaning: String,
  pub word_kind: Vec<WordKind>,
  pub category: Option<String>,
}

impl From<WordRecord> for WordDto {
  fn from(record: WordRecord) -> Self {
    Self {
      eng_meaning: record.word.eng_meaning,
      vn_meaning: record.word.vn_meaning,
      word_kind: record.word.word_kind,
      category: record.category,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsReply {
  pub status_code: u16,
  pub words: Vec<WordDto>,
}

impl IntoResponse for WordsReply {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReply {
  pub status_code: u16,
  pub word: WordDto,
}

impl IntoResponse for WordReply {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}

pub async fn add_word(
  State(state): State<AppState>,
  Json(request): Json<AddWordRequest>,
) -> Response {
  let word_kind = match validation::validate_word_payload(
    &request.eng_meaning,
    &request.vn_meaning,
    &request.word_kind,
  ) {
    Ok(kinds) => kinds,
    Err(err) => return StatusReply::new(400, err.to_string()).into_response(),
  };

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database save failed", err).into_response(),
  };

  match word_service::add_word(
    &conn,
    WordInput {
      eng_meaning: request.eng_meaning,
      vn_meaning: request.vn_meaning,
      word_kind,
      category: request.category,
    },
  ) {
    Ok(AddWordOutcome::Created(_)) => StatusReply::new(201, "Word added successfully!"),
    Ok(AddWordOutcome::Duplicate(eng)) => {
      StatusReply::new(409, format!("Word \"{}\" already exists.", eng))
    }
    Err(err) => internal_error("Database save failed", err),
  }
  .into_response()
}

pub async fn update_word(
  State(state): State<AppState>,
  Json(request): Json<UpdateWordRequest>,
) -> Response {
  let word_kind = match validation::validate_word_payload(
    &request.eng_meaning,
    &request.vn_meaning,
    &request.word_kind,
  ) {
    Ok(kinds) => kinds,
    Err(err) => return StatusReply::new(400, err.to_string()).into_response(),
  };
  if let Err(err) = validation::require_name("New English word", &request.new_eng_meaning) {
    return StatusReply::new(400, err.to_string()).into_response();
  }

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database update failed", err).into_response(),
  };

  match word_service::update_word(
    &conn,
    UpdateWordInput {
      eng_meaning: request.eng_meaning,
      new_eng_meaning: request.new_eng_meaning,
      vn_meaning: request.vn_meaning,
      word_kind,
      category: request.category,
    },
  ) {
    Ok(UpdateWordOutcome::Updated { from, to }) => StatusReply::new(
      200,
      format!("Updated word \"{} --> {}\" successfully.", from, to),
    ),
    Ok(UpdateWordOutcome::NotFound(eng)) => {
      StatusReply::new(404, format!("Word \"{}\" does not exist.", eng))
    }
    Ok(UpdateWordOutcome::Conflict(eng)) => {
      StatusReply::new(409, format!("Word \"{}\" already exists.", eng))
    }
    Err(err) => internal_error("Database update failed", err),
  }
  .into_response()
}

pub async fn all_words(State(state): State<AppState>) -> Response {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database fetch failed", err).into_response(),
  };

  match word_service::get_all_words(&conn) {
    Ok(records) => WordsReply {
      status_code: 200,
      words: records.into_iter().map(WordDto::from).collect(),
    }
    .into_response(),
    Err(err) => internal_error("Database fetch failed", err).into_response(),
  }
}

pub async fn get_word(State(state): State<AppState>, Path(eng_meaning): Path<String>) -> Response {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database fetch failed", err).into_response(),
  };

  match word_service::get_word(&conn, &eng_meaning) {
    Ok(Some(record)) => WordReply {
      status_code: 200,
      word: record.into(),
    }
    .into_response(),
    Ok(None) => StatusReply::bare(404).into_response(),
    Err(err) => internal_error("Database fetch failed", err).into_response(),
  }
}

pub async fn fuzzy_find_words(
  State(state): State<AppState>,
  Path(search_term): Path<String>,
) -> Response {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database search failed", err).into_response(),
  };

  match word_service::fuzzy_find_words(&conn, &search_term) {
    Ok(records) => WordsReply {
      status_code: 200,
      words: records.into_iter().map(WordDto::from).collect(),
    }
    .into_response(),
    Err(err) => internal_error("Database search failed", err).into_response(),
  }
}

pub async fn filter_words(
  State(state): State<AppState>,
  Json(request): Json<FilterWordsRequest>,
) -> Response {
  let kinds = match request.word_kind {
    Some(values) => match validation::parse_kinds(&values) {
      Ok(kinds) => Some(kinds),
      Err(err) => return StatusReply::new(400, err.to_string()).into_response(),
    },
    None => None,
  };

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database search failed", err).into_response(),
  };

  match word_service::filter_words(&conn, request.categories, kinds) {
    Ok(records) => WordsReply {
      status_code: 200,
      words: records.into_iter().map(WordDto::from).collect(),
    }
    .into_response(),
    Err(err) => internal_error("Database search failed", err).into_response(),
  }
}

pub async fn delete_word(
  State(state): State<AppState>,
  Path(eng_meaning): Path<String>,
) -> Response {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database delete failed", err).into_response(),
  };

  match word_service::delete_word(&conn, &eng_meaning) {
    Ok(DeleteWordOutcome::Deleted(eng)) => StatusReply::new(
      200,
      format!("Word with English meaning \"{}\" deleted successfully.", eng),
    ),
    Ok(DeleteWordOutcome::NotFound(eng)) => {
      StatusReply::new(404, format!("Word \"{}\" does not exist.", eng))
    }
    Err(err) => internal_error("Database delete failed", err),
  }
  .into_response()
}
