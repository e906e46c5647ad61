use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::validation::validate_annotation;
use super::{ApiError, ApiResponse, AppState};
use crate::db::AnnotationFields;
use crate::models::annotation::{Annotation, AnnotationInput};

#[derive(Debug, Deserialize)]
pub struct DatasetFilter {
    pub dataset: Option<String>,
}

async fn resolve_fields(
    state: &AppState,
    input: AnnotationInput,
) -> Result<AnnotationFields, ApiError> {
    validate_annotation(&input)?;

    let dataset = state
        .store()
        .get_dataset(input.dataset.trim())
        .await?
        .ok_or_else(|| ApiError::validation(format!("Unknown dataset '{}'", input.dataset)))?;

    Ok(AnnotationFields {
        dataset_id: dataset.id,
        feature_name: input.feature_name,
        x: input.x,
        y: input.y,
        zoom: input.zoom,
        note: input.note,
    })
}

async fn load(state: &AppState, id: i32) -> Result<Annotation, ApiError> {
    state
        .store()
        .get_annotation(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Annotation", id))
}

pub async fn list_annotations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DatasetFilter>,
) -> Result<Json<ApiResponse<Vec<Annotation>>>, ApiError> {
    let annotations = state
        .store()
        .list_annotations(filter.dataset.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(annotations)))
}

pub async fn get_annotation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Annotation>>, ApiError> {
    Ok(Json(ApiResponse::success(load(&state, id).await?)))
}

pub async fn create_annotation(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnnotationInput>,
) -> Result<(StatusCode, Json<ApiResponse<Annotation>>), ApiError> {
    let fields = resolve_fields(&state, input).await?;
    let id = state.store().create_annotation(fields).await?;

    info!(annotation_id = id, "Annotation created");

    let annotation = load(&state, id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(annotation))))
}

pub async fn update_annotation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<AnnotationInput>,
) -> Result<Json<ApiResponse<Annotation>>, ApiError> {
    let fields = resolve_fields(&state, input).await?;

    if !state.store().update_annotation(id, fields).await? {
        return Err(ApiError::not_found("Annotation", id));
    }

    Ok(Json(ApiResponse::success(load(&state, id).await?)))
}

pub async fn delete_annotation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.store().delete_annotation(id).await? {
        return Err(ApiError::not_found("Annotation", id));
    }

    info!(annotation_id = id, "Annotation deleted");
    Ok(StatusCode::NO_CONTENT)
}
