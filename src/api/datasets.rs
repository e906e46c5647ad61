use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, DatasetDto};

pub async fn list_datasets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DatasetDto>>>, ApiError> {
    let datasets = state.store().list_datasets().await?;
    let counts = state.store().annotation_counts().await?;

    let dtos = datasets
        .into_iter()
        .map(|dataset| DatasetDto {
            annotations_count: counts.get(&dataset.id).copied().unwrap_or(0),
            dataset,
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<DatasetDto>>, ApiError> {
    let dataset = state
        .store()
        .get_dataset(&slug)
        .await?
        .ok_or_else(|| ApiError::dataset_not_found(&slug))?;

    let counts = state.store().annotation_counts().await?;

    Ok(Json(ApiResponse::success(DatasetDto {
        annotations_count: counts.get(&dataset.id).copied().unwrap_or(0),
        dataset,
    })))
}
