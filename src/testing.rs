//! Test utilities for database setup.
//!
//! Reuses the authoritative connection preparation (pragmas, similarity
//! function, schema) so tests never duplicate the schema.

use rusqlite::Connection;

/// In-memory database with the full production setup applied.
pub fn test_conn() -> Connection {
  let conn = Connection::open_in_memory().expect("open in-memory database");
  crate::db::prepare_connection(&conn).expect("prepare test database");
  conn
}
