use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub source_mission: String,
    pub capture_date: Option<String>,
    pub resolution_info: serde_json::Value,
    pub tile_size: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub tiles_generated: bool,
    pub processing_status: String,
    pub created_at: String,
}

/// Fields written by the ingestion side when a dataset is registered.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub source_mission: String,
    pub tile_size: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub tiles_generated: bool,
    pub processing_status: String,
}

impl NewDataset {
    #[must_use]
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            source_mission: String::new(),
            tile_size: 256,
            min_zoom: 0,
            max_zoom: 10,
            tiles_generated: false,
            processing_status: "pending".to_string(),
        }
    }
}
