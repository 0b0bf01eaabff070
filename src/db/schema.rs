use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS categories (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      category_name TEXT NOT NULL UNIQUE,
      last_update TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      eng_meaning TEXT NOT NULL UNIQUE,
      vn_meaning TEXT NOT NULL,
      -- sorted, deduplicated, comma-joined kind tags (e.g. 'adj,noun')
      word_kind TEXT NOT NULL,
      category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
      metadata TEXT,
      last_update TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_words_category_id ON words(category_id);
    "#,
  )?;

  Ok(())
}
