use anyhow::Result;
use reqwest::Client;
use url::Url;

/// Astronomy Picture of the Day. The upstream payload is passed through as-is.
#[derive(Clone)]
pub struct ApodClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApodClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn fetch(&self, date: Option<&str>) -> Result<serde_json::Value> {
        let mut url = Url::parse(&format!("{}/planetary/apod", self.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            if let Some(date) = date {
                pairs.append_pair("date", date);
            }
        }

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("APOD API error: {status} - {body}"));
        }

        Ok(response.json().await?)
    }
}
