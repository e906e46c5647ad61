//! Request telemetry for the tile and search surfaces, plus the Prometheus
//! scrape endpoint.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, field, info, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// The part of the API a request was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Root,
    Tiles,
    Search,
    Nasa,
    Datasets,
    Annotations,
    Metadata,
    Metrics,
    Unmatched,
}

impl Surface {
    #[must_use]
    pub fn from_route(route: Option<&str>) -> Self {
        let Some(route) = route else {
            return Self::Unmatched;
        };
        if route == "/" {
            return Self::Root;
        }
        if route.starts_with("/tiles/") {
            return Self::Tiles;
        }

        match route.strip_prefix("/api/").and_then(|rest| rest.split('/').next()) {
            Some("search") => Self::Search,
            Some("nasa") => Self::Nasa,
            Some("datasets") => Self::Datasets,
            Some("annotations") => Self::Annotations,
            Some("metadata") => Self::Metadata,
            Some("metrics") => Self::Metrics,
            _ => Self::Unmatched,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Tiles => "tiles",
            Self::Search => "search",
            Self::Nasa => "nasa",
            Self::Datasets => "datasets",
            Self::Annotations => "annotations",
            Self::Metadata => "metadata",
            Self::Metrics => "metrics",
            Self::Unmatched => "unmatched",
        }
    }
}

#[must_use]
pub const fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Dataset slug of a `/tiles/{dataset}/...` request path.
fn tile_dataset(path: &str) -> Option<&str> {
    path.strip_prefix("/tiles/")?
        .split('/')
        .next()
        .filter(|slug| !slug.is_empty())
}

/// Opens a `request` span per call. Handlers fill in `dataset`, `query` and
/// `results` through `Span::current().record`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let surface = Surface::from_route(route.as_deref());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %req.uri().path(),
        surface = surface.as_str(),
        dataset = field::Empty,
        query = field::Empty,
        results = field::Empty,
    );
    if surface == Surface::Tiles
        && let Some(slug) = tile_dataset(req.uri().path())
    {
        span.record("dataset", slug);
    }

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // Unmatched paths collapse into one label value.
        let labels = [
            ("method", method),
            ("route", route.unwrap_or_else(|| "unmatched".to_string())),
            ("surface", surface.as_str().to_string()),
            ("status_class", status_class(status).to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status >= 500 {
            warn!(status_code = status, duration_ms, "Request failed");
        } else {
            info!(status_code = status, duration_ms, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}
