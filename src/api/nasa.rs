use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_apod_date;
use super::{ApiError, ApiResponse, AppState};
use crate::models::image::NasaImage;

#[derive(Debug, Deserialize)]
pub struct ApodQuery {
    pub date: Option<String>,
}

pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(nasa_id): Path<String>,
) -> Result<Json<ApiResponse<NasaImage>>, ApiError> {
    let image = state
        .store()
        .get_search_result(&nasa_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Image", &nasa_id))?;
    Ok(Json(ApiResponse::success(image)))
}

pub async fn get_apod(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ApodQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let date = match query.date.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(date) => Some(validate_apod_date(date)?),
    };

    state.shared.apod.fetch(date).await.map(Json).map_err(|e| {
        metrics::counter!("upstream_failures_total", "service" => "apod").increment(1);
        ApiError::nasa_error("APOD", e.to_string())
    })
}
