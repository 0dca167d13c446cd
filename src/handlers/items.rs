use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::api::{Ack, ApiResult};
use crate::app::AppState;
use crate::database::models::{Item, NewItem, NodeUpdate};

pub async fn post(
    State(state): State<AppState>,
    body: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(new) = body?;
    let item = state.store.create_item(new).await?;
    tracing::info!(
        id = item.id,
        subsection_id = item.subsection_id,
        position = item.position,
        "Created item"
    );
    Ok(Json(item))
}

pub async fn put(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<NodeUpdate>, JsonRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    let Json(update) = body?;
    state.store.update_item(id, update).await?;
    Ok(Ack::success())
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Ack> {
    let Path(id) = id?;
    state.store.delete_item(id).await?;
    tracing::info!(id, "Deleted item");
    Ok(Ack::success())
}
