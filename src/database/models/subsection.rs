use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subsection {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// POST /api/subsections body. A missing or unknown `section_id` is left for
/// the store's constraints to reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSubsection {
    pub section_id: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
}
