use std::sync::Arc;

use crate::clients::apod::ApodClient;
use crate::clients::build_http_client;
use crate::clients::mars_rover::{MarsRoverClient, RoverPhotoApi};
use crate::clients::nasa_images::{ImageSearchApi, NasaImagesClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{SearchService, TileResolver};

/// Long-lived handles shared by the HTTP server and the CLI commands.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub apod: Arc<ApodClient>,

    pub search_service: Arc<SearchService>,

    pub tile_resolver: Arc<TileResolver>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_http_client(config.nasa.request_timeout_seconds)?;

        let images: Arc<dyn ImageSearchApi> = Arc::new(NasaImagesClient::with_shared_client(
            http_client.clone(),
            &config.nasa.images_api_url,
        ));
        let rovers: Arc<dyn RoverPhotoApi> = Arc::new(MarsRoverClient::with_shared_client(
            http_client.clone(),
            &config.nasa.api_base_url,
            &config.nasa.api_key,
        ));

        Ok(Self::with_clients(config, store, images, rovers, http_client))
    }

    /// Assembles the state around already-built upstream clients.
    #[must_use]
    pub fn with_clients(
        config: Config,
        store: Store,
        images: Arc<dyn ImageSearchApi>,
        rovers: Arc<dyn RoverPhotoApi>,
        http_client: reqwest::Client,
    ) -> Self {
        let apod = Arc::new(ApodClient::with_shared_client(
            http_client,
            &config.nasa.api_base_url,
            &config.nasa.api_key,
        ));

        let search_service = Arc::new(SearchService::new(
            store.clone(),
            images,
            rovers,
            config.search.clone(),
        ));

        let tile_resolver = Arc::new(TileResolver::new(&config.general.tiles_root));

        Self {
            config: Arc::new(config),
            store,
            apod,
            search_service,
            tile_resolver,
        }
    }
}
