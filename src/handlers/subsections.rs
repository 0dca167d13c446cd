use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::api::{Ack, ApiResult};
use crate::app::AppState;
use crate::database::models::{NewSubsection, NodeUpdate, Subsection};

/// POST /api/subsections - append under `section_id`
pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<NewSubsection>, JsonRejection>,
) -> ApiResult<Json<Subsection>> {
    let Json(new) = body?;
    let subsection = state.store.create_subsection(new).await?;
    tracing::info!(
        id = subsection.id,
        section_id = subsection.section_id,
        position = subsection.position,
        "Created subsection"
    );
    Ok(Json(subsection))
}

/// PUT /api/subsections/:id
pub async fn put(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<NodeUpdate>, JsonRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    let Json(update) = body?;
    state.store.update_subsection(id, update).await?;
    Ok(Ack::success())
}

/// DELETE /api/subsections/:id - cascades to items
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    state.store.delete_subsection(id).await?;
    tracing::info!(id, "Deleted subsection");
    Ok(Ack::success())
}
