use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Top-level node, as stored in `sections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// POST /api/sections body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSection {
    pub title: Option<String>,
    pub content: Option<String>,
}
