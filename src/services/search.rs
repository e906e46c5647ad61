use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::mars_rover::{ROVERS, RoverPhoto, RoverPhotoApi};
use crate::clients::nasa_images::{CollectionItem, ImageSearchApi, ImageSearchRequest, ItemLink};
use crate::config::SearchConfig;
use crate::db::Store;
use crate::models::image::NasaImage;
use crate::services::keywords::keywords_for;

/// Items mentioning any of these in their title or description are dropped.
pub const FORBIDDEN_TERMS: [&str; 6] = [
    "crew",
    "astronaut",
    "logo",
    "poster",
    "concept",
    "illustration",
];

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

pub struct SearchService {
    store: Store,
    images: Arc<dyn ImageSearchApi>,
    rovers: Arc<dyn RoverPhotoApi>,
    config: SearchConfig,
}

impl SearchService {
    #[must_use]
    pub fn new(
        store: Store,
        images: Arc<dyn ImageSearchApi>,
        rovers: Arc<dyn RoverPhotoApi>,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            images,
            rovers,
            config,
        }
    }

    #[must_use]
    pub const fn default_limit(&self) -> usize {
        self.config.default_limit
    }

    /// Resolves `query` from the local cache or the upstream APIs.
    ///
    /// Upstream failures degrade to an empty list; store failures propagate.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<NasaImage>> {
        let normalized = normalize_query(query);
        if normalized.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        if normalized.contains("mars") {
            if self.config.track_rover_queries {
                self.store.record_search_query(&normalized).await?;
            }
            return Ok(self.search_rovers(limit).await);
        }

        self.store.record_search_query(&normalized).await?;

        let cached = self
            .store
            .get_cached_search(&normalized, limit as u64)
            .await?;
        if !cached.is_empty() {
            metrics::counter!("search_cache_hits_total").increment(1);
            debug!(query = %normalized, hits = cached.len(), "Search cache hit");
            return Ok(cached);
        }
        metrics::counter!("search_cache_misses_total").increment(1);

        let request = ImageSearchRequest {
            query: query.trim().to_string(),
            page_size: limit.saturating_mul(3),
            keywords: keywords_for(&normalized).map(str::to_string),
        };

        let items = match self.images.search(&request).await {
            Ok(items) => items,
            Err(e) => {
                warn!(query = %normalized, error = %e, "Image search request failed");
                metrics::counter!("upstream_failures_total", "service" => "images").increment(1);
                return Ok(Vec::new());
            }
        };

        let mut accepted = parse_items(&items);
        let mut inserted = 0usize;
        for image in &accepted {
            if self
                .store
                .insert_search_result_if_absent(image, &normalized)
                .await?
            {
                inserted += 1;
            }
        }

        info!(
            query = %normalized,
            fetched = items.len(),
            accepted = accepted.len(),
            inserted,
            "Fetched fresh search results"
        );

        accepted.truncate(limit);
        Ok(accepted)
    }

    async fn search_rovers(&self, limit: usize) -> Vec<NasaImage> {
        let per_rover = (limit / 3).max(1);
        let mut batches = Vec::with_capacity(ROVERS.len());

        for rover in ROVERS {
            match self.rovers.latest_photos(rover).await {
                Ok(photos) => batches.push(
                    photos
                        .iter()
                        .take(per_rover)
                        .map(|photo| rover_photo_to_image(rover, photo))
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    warn!(rover = %rover, error = %e, "Rover photo request failed");
                    metrics::counter!("upstream_failures_total", "service" => "mars_rover")
                        .increment(1);
                }
            }
        }

        let mut images = interleave(batches);
        images.truncate(limit);
        images
    }
}

/// Round-robin merge: first of each batch, then second of each, and so on.
#[must_use]
pub fn interleave<T>(batches: Vec<Vec<T>>) -> Vec<T> {
    let total = batches.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = batches.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        for iter in &mut iters {
            if let Some(item) = iter.next() {
                merged.push(item);
            }
        }
    }

    merged
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[must_use]
pub fn rover_photo_to_image(rover: &str, photo: &RoverPhoto) -> NasaImage {
    let rover_name = capitalize(rover);
    let date_created = NaiveDate::parse_from_str(&photo.earth_date, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc());

    NasaImage {
        nasa_id: format!("mars_{rover}_{}", photo.id),
        title: format!("{rover_name} - {}", photo.camera.full_name),
        description: format!(
            "Photo taken by {rover_name} rover using {} on {}",
            photo.camera.full_name, photo.earth_date
        ),
        keywords: vec![
            "mars".to_string(),
            rover.to_string(),
            photo.camera.name.clone(),
        ],
        image_url: photo.img_src.clone(),
        thumbnail_url: photo.img_src.clone(),
        center: Some("JPL".to_string()),
        date_created,
        media_type: "image".to_string(),
    }
}

#[must_use]
pub fn parse_items(items: &[CollectionItem]) -> Vec<NasaImage> {
    items.iter().filter_map(parse_item).collect()
}

/// Maps one upstream item to the public shape, or `None` when it is skipped.
#[must_use]
pub fn parse_item(item: &CollectionItem) -> Option<NasaImage> {
    let data = item.data.first()?;
    let nasa_id = data.nasa_id.as_deref().map(str::trim).unwrap_or_default();
    if nasa_id.is_empty() {
        return None;
    }

    let title = data.title.clone().unwrap_or_default();
    let description = data.description.clone().unwrap_or_default();
    if is_forbidden(&title, &description) {
        debug!(nasa_id = %nasa_id, "Skipping item with excluded subject");
        return None;
    }

    let (image_url, thumbnail_url) = pick_image_links(&item.links)?;

    Some(NasaImage {
        nasa_id: nasa_id.to_string(),
        title,
        description,
        keywords: data.keywords.clone(),
        image_url,
        thumbnail_url,
        center: data.center.clone().filter(|c| !c.is_empty()),
        date_created: data.date_created.as_deref().and_then(parse_date),
        media_type: data
            .media_type
            .clone()
            .unwrap_or_else(|| "image".to_string()),
    })
}

#[must_use]
pub fn is_forbidden(title: &str, description: &str) -> bool {
    let text = format!("{title} {description}").to_lowercase();
    FORBIDDEN_TERMS.iter().any(|term| text.contains(term))
}

#[must_use]
pub fn is_image_href(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href).to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns `(primary, thumbnail)` hrefs, or `None` when no link is an image.
#[must_use]
pub fn pick_image_links(links: &[ItemLink]) -> Option<(String, String)> {
    let image_hrefs: Vec<&str> = links
        .iter()
        .filter_map(|link| link.href.as_deref())
        .filter(|href| is_image_href(href))
        .collect();

    let primary = image_hrefs
        .iter()
        .find(|href| href.contains("large"))
        .or_else(|| image_hrefs.first())?
        .to_string();

    let thumbnail = links
        .iter()
        .find(|link| link.rel.as_deref() == Some("preview"))
        .and_then(|link| link.href.clone())
        .unwrap_or_else(|| primary.clone());

    Some((primary, thumbnail))
}

#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
