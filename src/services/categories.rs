//! Category business rules.

use rusqlite::Connection;

use crate::db;
use crate::domain::canonical;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCategoryOutcome {
  Created(String),
  /// Idempotent re-add, not an error
  AlreadyExists(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCategoryOutcome {
  Updated { from: String, to: String },
  NotFound(String),
  /// The new name is already held by a different category
  Conflict(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteCategoryOutcome {
  Deleted(String),
  NotFound(String),
}

pub fn add_category(conn: &Connection, name: &str) -> rusqlite::Result<AddCategoryOutcome> {
  let name = canonical(name);

  if db::get_category_by_name(conn, &name)?.is_some() {
    tracing::info!("Category {:?} already exists", name);
    return Ok(AddCategoryOutcome::AlreadyExists(name));
  }

  match db::insert_category(conn, &name) {
    Ok(_) => {
      tracing::info!("Category {:?} created", name);
      Ok(AddCategoryOutcome::Created(name))
    }
    Err(err) if db::is_unique_violation(&err) => Ok(AddCategoryOutcome::AlreadyExists(name)),
    Err(err) => Err(err),
  }
}

pub fn update_category(
  conn: &Connection,
  old_name: &str,
  new_name: &str,
) -> rusqlite::Result<UpdateCategoryOutcome> {
  let from = canonical(old_name);
  let to = canonical(new_name);

  let Some(existing) = db::get_category_by_name(conn, &from)? else {
    tracing::warn!("Category {:?} does not exist", from);
    return Ok(UpdateCategoryOutcome::NotFound(from));
  };

  if let Some(holder) = db::get_category_by_name(conn, &to)? {
    if holder.id != existing.id {
      tracing::warn!("Category name {:?} already exists", to);
      return Ok(UpdateCategoryOutcome::Conflict(to));
    }
  }

  db::rename_category(conn, existing.id, &to)?;

  tracing::info!("Updated category {:?} --> {:?}", from, to);
  Ok(UpdateCategoryOutcome::Updated { from, to })
}

pub fn delete_category(conn: &Connection, name: &str) -> rusqlite::Result<DeleteCategoryOutcome> {
  let name = canonical(name);

  let Some(existing) = db::get_category_by_name(conn, &name)? else {
    tracing::warn!("Category {:?} does not exist", name);
    return Ok(DeleteCategoryOutcome::NotFound(name));
  };

  db::delete_category(conn, existing.id)?;

  tracing::info!("Category {:?} deleted", name);
  Ok(DeleteCategoryOutcome::Deleted(name))
}

pub fn all_categories(conn: &Connection) -> rusqlite::Result<Vec<String>> {
  db::list_category_names(conn)
}
