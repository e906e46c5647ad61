use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::annotations::DatasetFilter;
use super::{ApiError, ApiResponse, AppState};
use crate::models::image::ImageMetadata;

pub async fn list_metadata(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DatasetFilter>,
) -> Result<Json<ApiResponse<Vec<ImageMetadata>>>, ApiError> {
    let rows = state
        .store()
        .list_image_metadata(filter.dataset.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn get_metadata(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ImageMetadata>>, ApiError> {
    let row = state
        .store()
        .get_image_metadata(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Image metadata", id))?;
    Ok(Json(ApiResponse::success(row)))
}
