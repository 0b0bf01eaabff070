pub mod categories;
pub mod learning;
pub mod words;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::DbPool;
use crate::quiz::model::ModelClient;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  pub pool: DbPool,
  pub model: ModelClient,
}

/// Response envelope for operations that only report an outcome. The body
/// statusCode is the domain signal; the HTTP status mirrors it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReply {
  pub status_code: u16,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl StatusReply {
  pub fn new(status_code: u16, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: Some(message.into()),
    }
  }

  /// Status-only reply (the get-word 404 carries no message payload).
  pub fn bare(status_code: u16) -> Self {
    Self {
      status_code,
      message: None,
    }
  }
}

impl IntoResponse for StatusReply {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}

/// Log the underlying failure and answer with the caller-facing message.
pub(crate) fn internal_error(message: &str, err: impl std::fmt::Display) -> StatusReply {
  tracing::error!("{}: {}", message, err);
  StatusReply::new(500, message)
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/add-word", post(words::add_word))
    .route("/update-word", put(words::update_word))
    .route("/all-words", get(words::all_words))
    .route("/get-word/{engMeaning}", get(words::get_word))
    .route("/fuzzy-find-words/{searchTerm}", get(words::fuzzy_find_words))
    .route("/filter-words", post(words::filter_words))
    .route("/delete-word/{engMeaning}", delete(words::delete_word))
    .route("/add-category", post(categories::add_category))
    .route("/update-category", put(categories::update_category))
    .route("/delete-category", post(categories::delete_category))
    .route("/all-categories", get(categories::all_categories))
    .route(
      "/learning-mode/complete-sentence-meaning",
      get(learning::complete_sentence_meaning),
    )
    .route(
      "/learning-mode/complete-sentence-word-kind",
      get(learning::complete_sentence_word_kind),
    )
    .route("/learning-mode/1Eng-4Vn-words", get(learning::one_eng_four_vn_words))
    .route("/learning-mode/1Vn-4Eng-words", get(learning::one_vn_four_eng_words))
    .route("/learning-mode/complete-word", get(learning::complete_word))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
