use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use super::AppState;

/// Tiles under a dataset never change once generated.
const TILE_CACHE_CONTROL: &str = "public, max-age=86400";
use crate::services::{TileCoord, TileError};

/// Splits the trailing `{y}.{ext}` segment of a tile path.
fn parse_tile_file(file: &str) -> Option<(u32, &str)> {
    let (y, ext) = file.rsplit_once('.')?;
    Some((y.parse().ok()?, ext))
}

fn not_found() -> Response {
    metrics::counter!("tiles_not_found_total").increment(1);
    (StatusCode::NOT_FOUND, "Tile not found").into_response()
}

pub async fn get_tile(
    State(state): State<Arc<AppState>>,
    Path((dataset, zoom, x, file)): Path<(String, String, String, String)>,
) -> Response {
    let (Ok(zoom), Ok(x), Some((y, ext))) = (
        zoom.parse::<u32>(),
        x.parse::<u32>(),
        parse_tile_file(&file),
    )
    else {
        return not_found();
    };

    let coord = TileCoord { zoom, x, y };

    match state.tiles().read(&dataset, coord, ext).await {
        Ok(tile) => {
            let served_ext = tile
                .path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            metrics::counter!("tiles_served_total", "ext" => served_ext).increment(1);

            (
                [
                    (header::CONTENT_TYPE, tile.content_type),
                    (header::CACHE_CONTROL, TILE_CACHE_CONTROL),
                    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
                ],
                tile.bytes,
            )
                .into_response()
        }
        Err(TileError::NotFound) => {
            debug!(dataset = %dataset, zoom, x, y, ext = %ext, "Tile not found");
            not_found()
        }
        Err(TileError::Io(e)) => {
            error!(dataset = %dataset, error = %e, "Failed to read tile");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read tile").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tile_file() {
        assert_eq!(parse_tile_file("1.png"), Some((1, "png")));
        assert_eq!(parse_tile_file("12.JPEG"), Some((12, "JPEG")));
        assert_eq!(parse_tile_file("1"), None);
        assert_eq!(parse_tile_file("one.png"), None);
        assert_eq!(parse_tile_file("-1.png"), None);
    }
}
