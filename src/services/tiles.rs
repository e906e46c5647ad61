use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum TileError {
    #[error("Tile not found")]
    NotFound,

    #[error("Failed to read tile: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug)]
pub struct Tile {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Resolves `<root>/<dataset>/<z>/<x>/<y>.<ext>` on disk, trying the other
/// raster extension when the requested one is missing.
#[derive(Debug, Clone)]
pub struct TileResolver {
    root: PathBuf,
}

impl TileResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keeps only the final normal path component of `slug`.
    #[must_use]
    pub fn sanitize_slug(slug: &str) -> Option<String> {
        let unified = slug.replace('\\', "/");
        match Path::new(&unified).components().next_back()? {
            Component::Normal(leaf) => leaf.to_str().map(str::to_string),
            _ => None,
        }
    }

    #[must_use]
    pub fn alternate_extension(ext: &str) -> &'static str {
        if ext == "jpg" { "png" } else { "jpg" }
    }

    #[must_use]
    pub fn content_type_for(path: &Path) -> &'static str {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
    }

    fn tile_path(&self, slug: &str, coord: TileCoord, ext: &str) -> PathBuf {
        self.root
            .join(slug)
            .join(coord.zoom.to_string())
            .join(coord.x.to_string())
            .join(format!("{}.{ext}", coord.y))
    }

    /// Returns the path of the file that would be served, if any.
    pub async fn resolve(&self, dataset: &str, coord: TileCoord, ext: &str) -> Option<PathBuf> {
        let slug = Self::sanitize_slug(dataset)?;
        let ext = ext.to_ascii_lowercase();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }

        let requested = self.tile_path(&slug, coord, &ext);
        if is_file(&requested).await {
            return Some(requested);
        }

        let alternate = self.tile_path(&slug, coord, Self::alternate_extension(&ext));
        if is_file(&alternate).await {
            debug!(path = %alternate.display(), "Serving tile with alternate extension");
            return Some(alternate);
        }

        None
    }

    pub async fn read(&self, dataset: &str, coord: TileCoord, ext: &str) -> Result<Tile, TileError> {
        let path = self
            .resolve(dataset, coord, ext)
            .await
            .ok_or(TileError::NotFound)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(TileError::NotFound),
            Err(e) => return Err(e.into()),
        };

        Ok(Tile {
            content_type: Self::content_type_for(&path),
            path,
            bytes,
        })
    }
}
