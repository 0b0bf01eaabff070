use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
  pub id: i64,
  /// Unique, same canonicalization rule as word English meanings
  pub category_name: String,
  pub last_update: DateTime<Utc>,
}
