//! Word row operations

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::domain::{Word, WordKind, WordRecord};

use super::similarity::SIMILARITY_THRESHOLD;

const WORD_COLUMNS: &str =
  "w.id, w.eng_meaning, w.vn_meaning, w.word_kind, w.category_id, w.metadata, w.last_update";

fn kinds_to_column(kinds: &[WordKind]) -> String {
  kinds
    .iter()
    .map(|k| k.as_str())
    .collect::<Vec<_>>()
    .join(",")
}

fn kinds_from_column(column: &str) -> Vec<WordKind> {
  column.split(',').filter_map(WordKind::from_str).collect()
}

pub fn insert_word(
  conn: &Connection,
  eng_meaning: &str,
  vn_meaning: &str,
  word_kind: &[WordKind],
  category_id: Option<i64>,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO words (eng_meaning, vn_meaning, word_kind, category_id, last_update)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
    params![
      eng_meaning,
      vn_meaning,
      kinds_to_column(word_kind),
      category_id,
      Utc::now().to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_word_by_eng_meaning(conn: &Connection, eng_meaning: &str) -> Result<Option<Word>> {
  let query = format!("SELECT {} FROM words w WHERE w.eng_meaning = ?1", WORD_COLUMNS);
  let mut stmt = conn.prepare(&query)?;

  let mut rows = stmt.query(params![eng_meaning])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_word(row)?))
  } else {
    Ok(None)
  }
}

/// Exact lookup joined with the category name.
pub fn get_word_record(conn: &Connection, eng_meaning: &str) -> Result<Option<WordRecord>> {
  let query = format!(
    r#"
    SELECT {}, c.category_name
    FROM words w LEFT JOIN categories c ON c.id = w.category_id
    WHERE w.eng_meaning = ?1
    "#,
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;

  let mut rows = stmt.query(params![eng_meaning])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_record(row)?))
  } else {
    Ok(None)
  }
}

/// First `limit` words with category names dereferenced.
pub fn list_words(conn: &Connection, limit: i64) -> Result<Vec<WordRecord>> {
  let query = format!(
    r#"
    SELECT {}, c.category_name
    FROM words w LEFT JOIN categories c ON c.id = w.category_id
    ORDER BY w.id ASC
    LIMIT ?1
    "#,
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;

  let records = stmt
    .query_map(params![limit], row_to_record)?
    .collect::<Result<Vec<_>>>()?;
  Ok(records)
}

/// Trigram-ranked fuzzy search over both meanings. A row is included when
/// either field's similarity to the term exceeds the threshold; ordering is
/// by the greater of the two similarities, descending.
pub fn fuzzy_find_words(conn: &Connection, term: &str, limit: i64) -> Result<Vec<WordRecord>> {
  let query = format!(
    r#"
    SELECT {}, c.category_name
    FROM words w LEFT JOIN categories c ON c.id = w.category_id
    WHERE similarity(w.eng_meaning, ?1) > ?2 OR similarity(w.vn_meaning, ?1) > ?2
    ORDER BY MAX(similarity(w.eng_meaning, ?1), similarity(w.vn_meaning, ?1)) DESC
    LIMIT ?3
    "#,
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;

  let records = stmt
    .query_map(params![term, SIMILARITY_THRESHOLD, limit], row_to_record)?
    .collect::<Result<Vec<_>>>()?;
  Ok(records)
}

/// Filter by category names and/or kind tags; both restrictions AND together
/// when present. Kind tags are trusted enum values; category names are
/// escaped inline.
pub fn filter_words(
  conn: &Connection,
  categories: Option<&[String]>,
  kinds: Option<&[WordKind]>,
  limit: i64,
) -> Result<Vec<WordRecord>> {
  let mut conditions: Vec<String> = Vec::new();

  if let Some(names) = categories {
    if !names.is_empty() {
      let list = names
        .iter()
        .map(|n| format!("'{}'", n.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",");
      conditions.push(format!("c.category_name IN ({})", list));
    }
  }

  if let Some(kinds) = kinds {
    if !kinds.is_empty() {
      let matches = kinds
        .iter()
        .map(|k| format!("instr(',' || w.word_kind || ',', ',{},') > 0", k.as_str()))
        .collect::<Vec<_>>()
        .join(" OR ");
      conditions.push(format!("({})", matches));
    }
  }

  let where_clause = if conditions.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conditions.join(" AND "))
  };

  let query = format!(
    r#"
    SELECT {}, c.category_name
    FROM words w LEFT JOIN categories c ON c.id = w.category_id
    {}
    ORDER BY w.id ASC
    LIMIT ?1
    "#,
    WORD_COLUMNS, where_clause
  );
  let mut stmt = conn.prepare(&query)?;

  let records = stmt
    .query_map(params![limit], row_to_record)?
    .collect::<Result<Vec<_>>>()?;
  Ok(records)
}

pub fn update_word(
  conn: &Connection,
  id: i64,
  eng_meaning: &str,
  vn_meaning: &str,
  word_kind: &[WordKind],
  category_id: Option<i64>,
) -> Result<()> {
  conn.execute(
    r#"
    UPDATE words
    SET eng_meaning = ?1, vn_meaning = ?2, word_kind = ?3, category_id = ?4, last_update = ?5
    WHERE id = ?6
    "#,
    params![
      eng_meaning,
      vn_meaning,
      kinds_to_column(word_kind),
      category_id,
      Utc::now().to_rfc3339(),
      id,
    ],
  )?;
  Ok(())
}

/// Delete by exact canonical meaning; returns the number of rows removed.
pub fn delete_word_by_eng_meaning(conn: &Connection, eng_meaning: &str) -> Result<usize> {
  conn.execute("DELETE FROM words WHERE eng_meaning = ?1", params![eng_meaning])
}

/// Uniform random sample of up to `limit` words, delegated to the engine.
pub fn random_words(conn: &Connection, limit: i64) -> Result<Vec<Word>> {
  let query = format!(
    "SELECT {} FROM words w ORDER BY RANDOM() LIMIT ?1",
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;

  let words = stmt
    .query_map(params![limit], row_to_word)?
    .collect::<Result<Vec<_>>>()?;
  Ok(words)
}

/// Convert a database row to a Word struct
pub(crate) fn row_to_word(row: &rusqlite::Row) -> Result<Word> {
  let kinds: String = row.get(3)?;
  let metadata: Option<String> = row.get(5)?;
  let last_update: String = row.get(6)?;

  Ok(Word {
    id: row.get(0)?,
    eng_meaning: row.get(1)?,
    vn_meaning: row.get(2)?,
    word_kind: kinds_from_column(&kinds),
    category_id: row.get(4)?,
    metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
    last_update: DateTime::parse_from_rfc3339(&last_update)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

fn row_to_record(row: &rusqlite::Row) -> Result<WordRecord> {
  Ok(WordRecord {
    word: row_to_word(row)?,
    category: row.get(7)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{categories, prepare_connection};

  fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    prepare_connection(&conn).unwrap();
    conn
  }

  #[test]
  fn test_insert_and_get_word() {
    let conn = test_conn();
    insert_word(&conn, "Run", "chạy", &[WordKind::Noun, WordKind::Verb], None).unwrap();

    let word = get_word_by_eng_meaning(&conn, "Run").unwrap().unwrap();
    assert_eq!(word.eng_meaning, "Run");
    assert_eq!(word.vn_meaning, "chạy");
    assert_eq!(word.word_kind, vec![WordKind::Noun, WordKind::Verb]);
    assert!(word.category_id.is_none());
    assert!(word.metadata.is_none());
  }

  #[test]
  fn test_get_word_absent() {
    let conn = test_conn();
    assert!(get_word_by_eng_meaning(&conn, "Ghost").unwrap().is_none());
  }

  #[test]
  fn test_duplicate_eng_meaning_rejected() {
    let conn = test_conn();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], None).unwrap();

    let err = insert_word(&conn, "Run", "chạy bộ", &[WordKind::Verb], None).unwrap_err();
    assert!(crate::db::is_unique_violation(&err));
  }

  #[test]
  fn test_list_words_joins_category_name() {
    let conn = test_conn();
    let category_id = categories::insert_category(&conn, "Sports").unwrap();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], Some(category_id)).unwrap();
    insert_word(&conn, "Table", "bàn", &[WordKind::Noun], None).unwrap();

    let records = list_words(&conn, 100).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category.as_deref(), Some("Sports"));
    assert_eq!(records[1].category, None);
  }

  #[test]
  fn test_list_words_honors_limit() {
    let conn = test_conn();
    for i in 0..5 {
      insert_word(&conn, &format!("Word{}", i), "nghĩa", &[WordKind::Noun], None).unwrap();
    }

    assert_eq!(list_words(&conn, 3).unwrap().len(), 3);
  }

  #[test]
  fn test_fuzzy_find_matches_either_field() {
    let conn = test_conn();
    insert_word(&conn, "Running", "chạy bộ", &[WordKind::Verb], None).unwrap();
    insert_word(&conn, "Table", "bàn ăn", &[WordKind::Noun], None).unwrap();

    let by_eng = fuzzy_find_words(&conn, "running", 100).unwrap();
    assert_eq!(by_eng.len(), 1);
    assert_eq!(by_eng[0].word.eng_meaning, "Running");

    let by_vn = fuzzy_find_words(&conn, "chạy bộ", 100).unwrap();
    assert_eq!(by_vn.len(), 1);
    assert_eq!(by_vn[0].word.eng_meaning, "Running");
  }

  #[test]
  fn test_fuzzy_find_excludes_below_threshold() {
    let conn = test_conn();
    insert_word(&conn, "Table", "bàn", &[WordKind::Noun], None).unwrap();

    let records = fuzzy_find_words(&conn, "zzzzzz", 100).unwrap();
    assert!(records.is_empty());
  }

  #[test]
  fn test_fuzzy_find_orders_by_best_similarity() {
    let conn = test_conn();
    insert_word(&conn, "Runner", "người chạy", &[WordKind::Noun], None).unwrap();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], None).unwrap();

    let records = fuzzy_find_words(&conn, "run", 100).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].word.eng_meaning, "Run");
  }

  #[test]
  fn test_filter_by_category() {
    let conn = test_conn();
    let sports = categories::insert_category(&conn, "Sports").unwrap();
    let food = categories::insert_category(&conn, "Food").unwrap();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], Some(sports)).unwrap();
    insert_word(&conn, "Rice", "cơm", &[WordKind::Noun], Some(food)).unwrap();
    insert_word(&conn, "Table", "bàn", &[WordKind::Noun], None).unwrap();

    let records =
      filter_words(&conn, Some(&["Sports".to_string()]), None, 100).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word.eng_meaning, "Run");
  }

  #[test]
  fn test_filter_by_kind_intersects() {
    let conn = test_conn();
    insert_word(&conn, "Run", "chạy", &[WordKind::Noun, WordKind::Verb], None).unwrap();
    insert_word(&conn, "Quick", "nhanh", &[WordKind::Adj], None).unwrap();

    let records = filter_words(&conn, None, Some(&[WordKind::Verb]), 100).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word.eng_meaning, "Run");
  }

  #[test]
  fn test_filter_kind_does_not_match_substring() {
    // 'adj' must not match a row whose kinds are only 'adv'
    let conn = test_conn();
    insert_word(&conn, "Quickly", "nhanh chóng", &[WordKind::Adv], None).unwrap();

    let records = filter_words(&conn, None, Some(&[WordKind::Adj]), 100).unwrap();
    assert!(records.is_empty());
  }

  #[test]
  fn test_filter_combines_with_and() {
    let conn = test_conn();
    let sports = categories::insert_category(&conn, "Sports").unwrap();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], Some(sports)).unwrap();
    insert_word(&conn, "Ball", "quả bóng", &[WordKind::Noun], Some(sports)).unwrap();

    let records = filter_words(
      &conn,
      Some(&["Sports".to_string()]),
      Some(&[WordKind::Verb]),
      100,
    )
    .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word.eng_meaning, "Run");
  }

  #[test]
  fn test_filter_escapes_quotes_in_category_names() {
    let conn = test_conn();
    let records = filter_words(&conn, Some(&["O'brien".to_string()]), None, 100).unwrap();
    assert!(records.is_empty());
  }

  #[test]
  fn test_update_word_rewrites_fields() {
    let conn = test_conn();
    let id = insert_word(&conn, "Run", "chạy", &[WordKind::Verb], None).unwrap();

    update_word(&conn, id, "Sprint", "chạy nước rút", &[WordKind::Noun, WordKind::Verb], None)
      .unwrap();

    assert!(get_word_by_eng_meaning(&conn, "Run").unwrap().is_none());
    let word = get_word_by_eng_meaning(&conn, "Sprint").unwrap().unwrap();
    assert_eq!(word.vn_meaning, "chạy nước rút");
    assert_eq!(word.word_kind, vec![WordKind::Noun, WordKind::Verb]);
  }

  #[test]
  fn test_delete_word_reports_affected_rows() {
    let conn = test_conn();
    insert_word(&conn, "Run", "chạy", &[WordKind::Verb], None).unwrap();

    assert_eq!(delete_word_by_eng_meaning(&conn, "Run").unwrap(), 1);
    assert_eq!(delete_word_by_eng_meaning(&conn, "Run").unwrap(), 0);
  }

  #[test]
  fn test_random_words_returns_distinct_rows() {
    let conn = test_conn();
    for i in 0..4 {
      insert_word(&conn, &format!("Word{}", i), "nghĩa", &[WordKind::Noun], None).unwrap();
    }

    let words = random_words(&conn, 4).unwrap();
    assert_eq!(words.len(), 4);
    let mut names: Vec<_> = words.iter().map(|w| w.eng_meaning.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 4);
  }

  #[test]
  fn test_kind_column_roundtrip() {
    assert_eq!(kinds_to_column(&[WordKind::Adj, WordKind::Noun]), "adj,noun");
    assert_eq!(
      kinds_from_column("adj,noun"),
      vec![WordKind::Adj, WordKind::Noun]
    );
    assert_eq!(kinds_from_column(""), vec![]);
  }
}
