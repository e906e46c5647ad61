use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{Span, info};

use super::validation::validate_limit;
use super::{ApiError, ApiResponse, AppState};
use crate::models::annotation::Annotation;
use crate::models::image::{NasaImage, PopularSearch};

const FEATURE_SEARCH_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
pub struct NasaSearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Returns the bare result array so clients can consume it directly.
pub async fn search_nasa(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NasaSearchQuery>,
) -> Result<Json<Vec<NasaImage>>, ApiError> {
    let search = &state.config().search;
    let limit = validate_limit(params.limit.unwrap_or(search.default_limit), search.max_limit)?;

    let results = state.search_service().search(&params.q, limit).await?;

    Span::current()
        .record("query", params.q.trim())
        .record("results", results.len());
    info!(limit, returned = results.len(), "NASA search served");

    Ok(Json(results))
}

pub async fn popular_searches(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PopularSearch>>>, ApiError> {
    let limit = state.config().search.popular_limit;
    let popular = state.store().popular_searches(limit).await?;
    Ok(Json(ApiResponse::success(popular)))
}

pub async fn search_features(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeatureSearchQuery>,
) -> Result<Json<ApiResponse<Vec<Annotation>>>, ApiError> {
    let term = params.q.trim();
    if term.is_empty() {
        return Ok(Json(ApiResponse::success(Vec::new())));
    }

    let annotations = state
        .store()
        .search_annotation_features(term, FEATURE_SEARCH_LIMIT)
        .await?;
    Span::current()
        .record("query", term)
        .record("results", annotations.len());

    Ok(Json(ApiResponse::success(annotations)))
}
