use axum::{extract::State, Json};

use crate::api::{assemble, ApiResult, Tree};
use crate::app::AppState;

/// GET /api/data - the whole outline, nested
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<Tree>> {
    let rows = state.store.tree_rows().await?;
    let tree = assemble(rows);
    tracing::debug!("Assembled outline with {} sections", tree.sections.len());
    Ok(Json(tree))
}
