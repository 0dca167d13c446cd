use serde::Serialize;
use sqlx::FromRow;

/// One row of `sections LEFT JOIN subsections LEFT JOIN items`.
///
/// Subsection and item columns are NULL when the outer join found no child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct TreeRow {
    pub section_id: i32,
    pub section_title: String,
    pub section_content: String,
    pub section_position: i32,

    pub subsection_id: Option<i32>,
    pub subsection_title: Option<String>,
    pub subsection_content: Option<String>,
    pub subsection_position: Option<i32>,

    pub item_id: Option<i32>,
    pub item_title: Option<String>,
    pub item_content: Option<String>,
    pub item_position: Option<i32>,
}
