use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiRoot, AppState, EndpointDto};

const ENDPOINTS: [(&str, &str); 9] = [
    ("/tiles/{dataset}/{z}/{x}/{y}.{ext}", "Map tiles for a dataset"),
    ("/api/datasets/", "Available datasets"),
    ("/api/annotations/", "Feature annotations"),
    ("/api/metadata/", "Source image metadata"),
    ("/api/search/?q=", "Search annotated features"),
    ("/api/search/nasa/?q=", "Search the NASA image library"),
    ("/api/search/popular/", "Most frequent searches"),
    ("/api/nasa/apod/", "Astronomy Picture of the Day"),
    ("/api/metrics", "Prometheus metrics"),
];

const SUGGESTED_SEARCHES: [&str; 6] = [
    "jupiter great red spot",
    "saturn rings",
    "europa",
    "mars rover",
    "crab nebula",
    "andromeda galaxy",
];

pub async fn api_root(State(state): State<Arc<AppState>>) -> Json<ApiRoot> {
    Json(ApiRoot {
        message: "Orrery planetary imagery API".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(path, description)| EndpointDto { path, description })
            .collect(),
        suggested_searches: SUGGESTED_SEARCHES.to_vec(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
