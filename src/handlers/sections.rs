use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::api::{Ack, ApiResult};
use crate::app::AppState;
use crate::database::models::{NewSection, NodeUpdate, Section};

/// POST /api/sections - append a section after the last one
pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<NewSection>, JsonRejection>,
) -> ApiResult<Json<Section>> {
    let Json(new) = body?;
    let section = state.store.create_section(new).await?;
    tracing::info!(id = section.id, position = section.position, "Created section");
    Ok(Json(section))
}

/// PUT /api/sections/:id - overwrite title and content
pub async fn put(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<NodeUpdate>, JsonRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    let Json(update) = body?;
    state.store.update_section(id, update).await?;
    Ok(Ack::success())
}

/// DELETE /api/sections/:id - removes its subsections and items too
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    state.store.delete_section(id).await?;
    tracing::info!(id, "Deleted section");
    Ok(Ack::success())
}
