//! Word business rules: canonicalization, duplicate policy, category
//! resolution. Storage errors stay in the `Err` channel; every domain
//! outcome (not-found, conflict) is an ordinary return value.

use rusqlite::Connection;

use crate::config;
use crate::db;
use crate::domain::{WordKind, WordRecord, canonical, normalize_kinds};

/// Validated add/update payload.
#[derive(Debug, Clone)]
pub struct WordInput {
  pub eng_meaning: String,
  pub vn_meaning: String,
  pub word_kind: Vec<WordKind>,
  pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateWordInput {
  pub eng_meaning: String,
  pub new_eng_meaning: String,
  pub vn_meaning: String,
  pub word_kind: Vec<WordKind>,
  pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWordOutcome {
  /// New word persisted; carries the canonical meaning
  Created(String),
  /// A word with this canonical meaning already exists; nothing mutated
  Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateWordOutcome {
  Updated { from: String, to: String },
  NotFound(String),
  /// The new meaning is already held by a different word
  Conflict(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteWordOutcome {
  Deleted(String),
  NotFound(String),
}

/// Resolve an optional category name to its id. Unresolvable names clear
/// the reference rather than failing the word operation.
fn resolve_category(conn: &Connection, name: Option<&str>) -> rusqlite::Result<Option<i64>> {
  let Some(name) = name else {
    return Ok(None);
  };
  let canonical_name = canonical(name);
  if canonical_name.is_empty() {
    return Ok(None);
  }

  match db::get_category_by_name(conn, &canonical_name)? {
    Some(category) => Ok(Some(category.id)),
    None => {
      tracing::warn!(
        "Category {:?} does not exist, storing word without a category",
        canonical_name
      );
      Ok(None)
    }
  }
}

pub fn add_word(conn: &Connection, input: WordInput) -> rusqlite::Result<AddWordOutcome> {
  let eng_meaning = canonical(&input.eng_meaning);
  let word_kind = normalize_kinds(input.word_kind);

  if db::get_word_by_eng_meaning(conn, &eng_meaning)?.is_some() {
    tracing::info!("Word {:?} already exists", eng_meaning);
    return Ok(AddWordOutcome::Duplicate(eng_meaning));
  }

  let category_id = resolve_category(conn, input.category.as_deref())?;

  match db::insert_word(conn, &eng_meaning, &input.vn_meaning, &word_kind, category_id) {
    Ok(_) => {
      tracing::info!("Added new word {:?}", eng_meaning);
      Ok(AddWordOutcome::Created(eng_meaning))
    }
    // Two concurrent adds for the same meaning: the engine rejects the
    // second insert, which is still a duplicate, not an internal error.
    Err(err) if db::is_unique_violation(&err) => Ok(AddWordOutcome::Duplicate(eng_meaning)),
    Err(err) => Err(err),
  }
}

pub fn update_word(conn: &Connection, input: UpdateWordInput) -> rusqlite::Result<UpdateWordOutcome> {
  let from = canonical(&input.eng_meaning);
  let to = canonical(&input.new_eng_meaning);
  let word_kind = normalize_kinds(input.word_kind);

  let Some(existing) = db::get_word_by_eng_meaning(conn, &from)? else {
    tracing::warn!("Word {:?} does not exist", from);
    return Ok(UpdateWordOutcome::NotFound(from));
  };

  // An identity rename finds the word itself here, which is allowed.
  if let Some(holder) = db::get_word_by_eng_meaning(conn, &to)? {
    if holder.id != existing.id {
      tracing::warn!("Word {:?} already exists", to);
      return Ok(UpdateWordOutcome::Conflict(to));
    }
  }

  let category_id = resolve_category(conn, input.category.as_deref())?;
  db::update_word(conn, existing.id, &to, &input.vn_meaning, &word_kind, category_id)?;

  tracing::info!("Updated word {:?} --> {:?}", from, to);
  Ok(UpdateWordOutcome::Updated { from, to })
}

pub fn get_all_words(conn: &Connection) -> rusqlite::Result<Vec<WordRecord>> {
  let records = db::list_words(conn, config::WORD_LIST_CAP)?;
  if records.is_empty() {
    tracing::warn!("No words found in the database");
  }
  Ok(records)
}

pub fn get_word(conn: &Connection, eng_meaning: &str) -> rusqlite::Result<Option<WordRecord>> {
  db::get_word_record(conn, &canonical(eng_meaning))
}

/// Search term is matched as typed; similarity scoring is case-insensitive
/// on its own.
pub fn fuzzy_find_words(conn: &Connection, term: &str) -> rusqlite::Result<Vec<WordRecord>> {
  let records = db::fuzzy_find_words(conn, term, config::WORD_LIST_CAP)?;
  tracing::info!("Found {} words matching {:?}", records.len(), term);
  Ok(records)
}

pub fn filter_words(
  conn: &Connection,
  categories: Option<Vec<String>>,
  kinds: Option<Vec<WordKind>>,
) -> rusqlite::Result<Vec<WordRecord>> {
  let categories =
    categories.map(|names| names.iter().map(|n| canonical(n)).collect::<Vec<_>>());
  db::filter_words(
    conn,
    categories.as_deref(),
    kinds.as_deref(),
    config::WORD_LIST_CAP,
  )
}

pub fn delete_word(conn: &Connection, eng_meaning: &str) -> rusqlite::Result<DeleteWordOutcome> {
  let eng_meaning = canonical(eng_meaning);

  if db::delete_word_by_eng_meaning(conn, &eng_meaning)? == 0 {
    tracing::warn!("Word {:?} does not exist", eng_meaning);
    return Ok(DeleteWordOutcome::NotFound(eng_meaning));
  }

  tracing::info!("Deleted word {:?}", eng_meaning);
  Ok(DeleteWordOutcome::Deleted(eng_meaning))
}
