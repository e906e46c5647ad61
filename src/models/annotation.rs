use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i32,
    pub dataset_id: i32,
    pub dataset_slug: String,
    pub dataset_name: String,
    pub feature_name: String,
    pub x: f64,
    pub y: f64,
    pub zoom: i32,
    pub note: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationInput {
    pub dataset: String,
    #[serde(default)]
    pub feature_name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub zoom: i32,
    #[serde(default)]
    pub note: String,
}
