//! Category row operations

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::domain::Category;

pub fn insert_category(conn: &Connection, category_name: &str) -> Result<i64> {
  conn.execute(
    "INSERT INTO categories (category_name, last_update) VALUES (?1, ?2)",
    params![category_name, Utc::now().to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_category_by_name(conn: &Connection, category_name: &str) -> Result<Option<Category>> {
  let mut stmt = conn.prepare(
    "SELECT id, category_name, last_update FROM categories WHERE category_name = ?1",
  )?;

  let mut rows = stmt.query(params![category_name])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_category(row)?))
  } else {
    Ok(None)
  }
}

pub fn list_category_names(conn: &Connection) -> Result<Vec<String>> {
  let mut stmt = conn.prepare("SELECT category_name FROM categories ORDER BY id ASC")?;

  let names = stmt
    .query_map([], |row| row.get(0))?
    .collect::<Result<Vec<_>>>()?;
  Ok(names)
}

pub fn rename_category(conn: &Connection, id: i64, category_name: &str) -> Result<()> {
  conn.execute(
    "UPDATE categories SET category_name = ?1, last_update = ?2 WHERE id = ?3",
    params![category_name, Utc::now().to_rfc3339(), id],
  )?;
  Ok(())
}

/// Remove a category; referencing words keep their rows with category_id
/// nulled by the foreign-key policy.
pub fn delete_category(conn: &Connection, id: i64) -> Result<usize> {
  conn.execute("DELETE FROM categories WHERE id = ?1", params![id])
}

fn row_to_category(row: &rusqlite::Row) -> Result<Category> {
  let last_update: String = row.get(2)?;

  Ok(Category {
    id: row.get(0)?,
    category_name: row.get(1)?,
    last_update: DateTime::parse_from_rfc3339(&last_update)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}
