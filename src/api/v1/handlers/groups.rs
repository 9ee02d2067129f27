use axum::{Json, extract::State};

use crate::{
    api::v1::{dto::groups::GroupResponse, extractors::path_id::GroupId},
    error::AppError,
    services::groups,
    state::AppState,
};

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResponse>>, AppError> {
    let rows = groups::list(state.store.as_ref()).await?;
    Ok(Json(rows.into_iter().map(GroupResponse::from).collect()))
}

pub async fn get_group(
    State(state): State<AppState>,
    group_id: GroupId,
) -> Result<Json<GroupResponse>, AppError> {
    let row = groups::retrieve(state.store.as_ref(), group_id.id).await?;
    Ok(Json(row.into()))
}
