use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Rovers queried for Mars searches, in round-robin order.
pub const ROVERS: [&str; 3] = ["curiosity", "perseverance", "opportunity"];

#[derive(Debug, Deserialize)]
struct LatestPhotosResponse {
    #[serde(default)]
    latest_photos: Vec<RoverPhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoverPhoto {
    pub id: i64,
    pub camera: RoverCamera,
    pub earth_date: String,
    pub img_src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoverCamera {
    pub name: String,
    pub full_name: String,
}

#[async_trait]
pub trait RoverPhotoApi: Send + Sync {
    async fn latest_photos(&self, rover: &str) -> Result<Vec<RoverPhoto>>;
}

/// Client for the Mars Rover Photos API hosted on api.nasa.gov.
#[derive(Clone)]
pub struct MarsRoverClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MarsRoverClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl RoverPhotoApi for MarsRoverClient {
    async fn latest_photos(&self, rover: &str) -> Result<Vec<RoverPhoto>> {
        let mut url = Url::parse(&format!(
            "{}/mars-photos/api/v1/rovers/{rover}/latest_photos",
            self.base_url
        ))?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);

        debug!(rover = %rover, "Fetching latest rover photos");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Mars rover API error: {status} - {body}"));
        }

        let response: LatestPhotosResponse = response.json().await?;

        Ok(response.latest_photos)
    }
}
