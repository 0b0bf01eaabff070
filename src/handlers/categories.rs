//! Category endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::{AppState, StatusReply, internal_error};
use crate::db::try_lock;
use crate::services::categories::{
  self as category_service, AddCategoryOutcome, DeleteCategoryOutcome, UpdateCategoryOutcome,
};
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
  pub category_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
  pub old_category_name: String,
  pub new_category_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesReply {
  pub status_code: u16,
  pub categories: Vec<String>,
}

impl IntoResponse for CategoriesReply {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(self)).into_response()
  }
}

pub async fn add_category(
  State(state): State<AppState>,
  Json(request): Json<CategoryRequest>,
) -> Response {
  if let Err(err) = validation::require_name("Category name", &request.category_name) {
    return StatusReply::new(400, err.to_string()).into_response();
  }

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database save failed", err).into_response(),
  };

  match category_service::add_category(&conn, &request.category_name) {
    Ok(AddCategoryOutcome::Created(name)) => StatusReply::new(
      201,
      format!("Category \"{}\" created successfully.", name),
    ),
    Ok(AddCategoryOutcome::AlreadyExists(name)) => {
      StatusReply::new(200, format!("Category \"{}\" already exists.", name))
    }
    Err(err) => internal_error("Database save failed", err),
  }
  .into_response()
}

pub async fn update_category(
  State(state): State<AppState>,
  Json(request): Json<UpdateCategoryRequest>,
) -> Response {
  if let Err(err) = validation::require_name("Old category name", &request.old_category_name) {
    return StatusReply::new(400, err.to_string()).into_response();
  }
  if let Err(err) = validation::require_name("New category name", &request.new_category_name) {
    return StatusReply::new(400, err.to_string()).into_response();
  }

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database update failed", err).into_response(),
  };

  match category_service::update_category(
    &conn,
    &request.old_category_name,
    &request.new_category_name,
  ) {
    Ok(UpdateCategoryOutcome::Updated { from, to }) => StatusReply::new(
      200,
      format!("Updated category \"{}\" --> \"{}\".", from, to),
    ),
    Ok(UpdateCategoryOutcome::NotFound(name)) => {
      StatusReply::new(404, format!("Category \"{}\" does not exist.", name))
    }
    Ok(UpdateCategoryOutcome::Conflict(name)) => {
      StatusReply::new(409, format!("Category name \"{}\" already exists.", name))
    }
    Err(err) => internal_error("Database update failed", err),
  }
  .into_response()
}

pub async fn delete_category(
  State(state): State<AppState>,
  Json(request): Json<CategoryRequest>,
) -> Response {
  if let Err(err) = validation::require_name("Category name", &request.category_name) {
    return StatusReply::new(400, err.to_string()).into_response();
  }

  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database delete failed", err).into_response(),
  };

  match category_service::delete_category(&conn, &request.category_name) {
    Ok(DeleteCategoryOutcome::Deleted(name)) => {
      StatusReply::new(200, format!("Category \"{}\" deleted successfully.", name))
    }
    Ok(DeleteCategoryOutcome::NotFound(name)) => {
      StatusReply::new(404, format!("Category \"{}\" does not exist.", name))
    }
    Err(err) => internal_error("Database delete failed", err),
  }
  .into_response()
}

pub async fn all_categories(State(state): State<AppState>) -> Response {
  let conn = match try_lock(&state.pool) {
    Ok(conn) => conn,
    Err(err) => return internal_error("Database fetch failed", err).into_response(),
  };

  match category_service::all_categories(&conn) {
    Ok(categories) => CategoriesReply {
      status_code: 200,
      categories,
    }
    .into_response(),
    Err(err) => internal_error("Database fetch failed", err).into_response(),
  }
}
