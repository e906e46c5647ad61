use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public shape of one image search hit, whether it came from the store,
/// the image library, or the rover feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NasaImage {
    pub nasa_id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub image_url: String,
    pub thumbnail_url: String,
    pub center: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub media_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub id: i32,
    pub dataset_id: i32,
    pub original_filename: String,
    pub file_size: i64,
    pub dimensions: serde_json::Value,
    pub bands: i32,
    pub nasa_api_url: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularSearch {
    pub query: String,
    pub search_count: i32,
    pub last_searched: String,
}
