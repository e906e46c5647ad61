use serde::Serialize;

use crate::models::dataset::Dataset;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DatasetDto {
    #[serde(flatten)]
    pub dataset: Dataset,
    pub annotations_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiRoot {
    pub message: String,
    pub version: &'static str,
    pub endpoints: Vec<EndpointDto>,
    pub suggested_searches: Vec<&'static str>,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct EndpointDto {
    pub path: &'static str,
    pub description: &'static str,
}
