use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod annotations;
mod datasets;
mod error;
mod metadata;
mod nasa;
mod observability;
mod root;
mod search;
mod tiles;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search_service(&self) -> &Arc<crate::services::SearchService> {
        &self.shared.search_service
    }

    #[must_use]
    pub fn tiles(&self) -> &Arc<crate::services::TileResolver> {
        &self.shared.tile_resolver
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/search/", get(search::search_features))
        .route("/search/nasa/", get(search::search_nasa))
        .route("/search/popular/", get(search::popular_searches))
        .route("/nasa/apod/", get(nasa::get_apod))
        .route("/nasa/image/{nasa_id}/", get(nasa::get_image))
        .route("/datasets/", get(datasets::list_datasets))
        .route("/datasets/{slug}/", get(datasets::get_dataset))
        .route("/datasets/{slug}/info/", get(datasets::get_dataset))
        .route(
            "/annotations/",
            get(annotations::list_annotations).post(annotations::create_annotation),
        )
        .route(
            "/annotations/{id}/",
            get(annotations::get_annotation)
                .put(annotations::update_annotation)
                .delete(annotations::delete_annotation),
        )
        .route("/metadata/", get(metadata::list_metadata))
        .route("/metadata/{id}/", get(metadata::get_metadata))
        .route("/metrics", get(observability::get_metrics));

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(root::api_root))
        .route("/tiles/{dataset}/{z}/{x}/{file}", get(tiles::get_tile))
        .nest("/api", api_router)
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
