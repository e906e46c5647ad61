use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    collection: Collection,
}

#[derive(Debug, Deserialize, Default)]
struct Collection {
    #[serde(default)]
    items: Vec<CollectionItem>,
}

/// One entry of `collection.items[]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CollectionItem {
    #[serde(default)]
    pub data: Vec<ItemData>,
    #[serde(default)]
    pub links: Vec<ItemLink>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ItemData {
    pub nasa_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub date_created: Option<String>,
    pub media_type: Option<String>,
    pub center: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ItemLink {
    pub rel: Option<String>,
    pub href: Option<String>,
    pub render: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchRequest {
    pub query: String,
    pub page_size: usize,
    /// Comma-joined keyword string sent alongside the free-text query.
    pub keywords: Option<String>,
}

#[async_trait]
pub trait ImageSearchApi: Send + Sync {
    async fn search(&self, request: &ImageSearchRequest) -> Result<Vec<CollectionItem>>;
}

/// Client for the NASA Image and Video Library (`images-api.nasa.gov`).
#[derive(Clone)]
pub struct NasaImagesClient {
    client: Client,
    base_url: String,
}

impl NasaImagesClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, request: &ImageSearchRequest) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &request.query)
                .append_pair("media_type", "image")
                .append_pair("page_size", &request.page_size.to_string());

            if let Some(keywords) = &request.keywords {
                pairs.append_pair("keywords", keywords);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl ImageSearchApi for NasaImagesClient {
    async fn search(&self, request: &ImageSearchRequest) -> Result<Vec<CollectionItem>> {
        let url = self.search_url(request)?;

        debug!(url = %url, "Querying NASA image library");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("NASA images API error: {status} - {body}"));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response.collection.items)
    }
}
