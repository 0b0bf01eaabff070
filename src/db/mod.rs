pub mod categories;
pub mod schema;
pub mod similarity;
pub mod words;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export all public items from submodules
pub use categories::*;
pub use schema::run_migrations;
pub use similarity::SIMILARITY_THRESHOLD;
pub use words::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  let conn = Connection::open(path)?;
  prepare_connection(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Connection-level setup shared by file and in-memory databases: the
/// foreign-key pragma (words.category_id is ON DELETE SET NULL), the
/// trigram similarity function, and the schema.
pub fn prepare_connection(conn: &Connection) -> Result<()> {
  conn.execute_batch("PRAGMA foreign_keys = ON;")?;
  similarity::register(conn)?;
  schema::run_migrations(conn)?;
  Ok(())
}

/// True when the error is the storage engine rejecting a duplicate natural
/// key. Callers map this to a conflict outcome instead of an internal error,
/// which also resolves insert races on the unique eng_meaning column.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_init_db_creates_parent_dirs_and_schema() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/vocab.db");

    let pool = init_db(&path).unwrap();
    assert!(path.exists());

    let conn = pool.lock().unwrap();
    let count: i64 = conn
      .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
      .unwrap();
    assert_eq!(count, 0);
  }

  #[test]
  fn test_unique_violation_detection() {
    let conn = Connection::open_in_memory().unwrap();
    prepare_connection(&conn).unwrap();

    conn
      .execute(
        "INSERT INTO categories (category_name, last_update) VALUES ('Animals', '2026-01-01T00:00:00Z')",
        [],
      )
      .unwrap();
    let err = conn
      .execute(
        "INSERT INTO categories (category_name, last_update) VALUES ('Animals', '2026-01-01T00:00:00Z')",
        [],
      )
      .unwrap_err();

    assert!(is_unique_violation(&err));
  }
}
