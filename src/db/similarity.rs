//! Trigram similarity for fuzzy word search.
//!
//! The fuzzy-search query ranks rows with a `similarity(column, term)`
//! scalar, the n-gram overlap ratio the original deployment delegated to its
//! storage engine. Registering the function here keeps the whole ranking
//! inside one SQL statement.

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Result};
use std::collections::HashSet;

/// Inclusion cutoff used by the fuzzy-search query: a row matches when
/// either meaning's similarity to the search term exceeds this.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Register `similarity(a, b)` on the connection.
pub fn register(conn: &Connection) -> Result<()> {
  conn.create_scalar_function(
    "similarity",
    2,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let a = ctx.get::<String>(0)?;
      let b = ctx.get::<String>(1)?;
      Ok(similarity(&a, &b))
    },
  )
}

/// Trigram overlap ratio in [0, 1]: shared trigrams over distinct trigrams.
pub fn similarity(a: &str, b: &str) -> f64 {
  let trigrams_a = trigrams(a);
  let trigrams_b = trigrams(b);
  if trigrams_a.is_empty() || trigrams_b.is_empty() {
    return 0.0;
  }

  let shared = trigrams_a.intersection(&trigrams_b).count();
  let total = trigrams_a.union(&trigrams_b).count();
  shared as f64 / total as f64
}

/// Word-wise trigram extraction: lowercase, split on non-alphanumerics, pad
/// each word with two leading and one trailing space, take every 3-char
/// window.
fn trigrams(input: &str) -> HashSet<(char, char, char)> {
  let mut set = HashSet::new();
  let lowered = input.to_lowercase();

  for word in lowered
    .split(|c: char| !c.is_alphanumeric())
    .filter(|w| !w.is_empty())
  {
    let mut padded: Vec<char> = Vec::with_capacity(word.chars().count() + 3);
    padded.push(' ');
    padded.push(' ');
    padded.extend(word.chars());
    padded.push(' ');

    for window in padded.windows(3) {
      set.insert((window[0], window[1], window[2]));
    }
  }

  set
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_identical_strings_score_one() {
    assert!((similarity("running", "running") - 1.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_case_insensitive() {
    assert!((similarity("RUN", "run") - 1.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_disjoint_strings_score_zero() {
    assert_eq!(similarity("run", "xyz"), 0.0);
  }

  #[test]
  fn test_empty_input_scores_zero() {
    assert_eq!(similarity("", "run"), 0.0);
    assert_eq!(similarity("run", ""), 0.0);
    assert_eq!(similarity("", ""), 0.0);
  }

  #[test]
  fn test_symmetric() {
    let ab = similarity("sunshine", "sunset");
    let ba = similarity("sunset", "sunshine");
    assert!((ab - ba).abs() < f64::EPSILON);
  }

  #[test]
  fn test_close_variants_pass_threshold() {
    assert!(similarity("run", "rung") > SIMILARITY_THRESHOLD);
    assert!(similarity("chạy", "chạy bộ") > SIMILARITY_THRESHOLD);
  }

  #[test]
  fn test_unrelated_words_fail_threshold() {
    assert!(similarity("run", "banana") <= SIMILARITY_THRESHOLD);
  }

  #[test]
  fn test_multi_word_input_shares_word_trigrams() {
    // 'run' appears as a full word on both sides
    assert!(similarity("run fast", "run") > SIMILARITY_THRESHOLD);
  }

  #[test]
  fn test_registered_function_usable_in_sql() {
    let conn = Connection::open_in_memory().unwrap();
    register(&conn).unwrap();

    let score: f64 = conn
      .query_row("SELECT similarity('run', 'run')", [], |row| row.get(0))
      .unwrap();
    assert!((score - 1.0).abs() < f64::EPSILON);
  }
}
