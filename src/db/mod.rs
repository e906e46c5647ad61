use crate::models::annotation::Annotation;
use crate::models::dataset::{Dataset, NewDataset};
use crate::models::image::{ImageMetadata, NasaImage, PopularSearch};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::annotation::AnnotationFields;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Each SQLite in-memory connection is its own database.
        if in_memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn dataset_repo(&self) -> repositories::dataset::DatasetRepository {
        repositories::dataset::DatasetRepository::new(self.conn.clone())
    }

    fn annotation_repo(&self) -> repositories::annotation::AnnotationRepository {
        repositories::annotation::AnnotationRepository::new(self.conn.clone())
    }

    fn image_metadata_repo(&self) -> repositories::image_metadata::ImageMetadataRepository {
        repositories::image_metadata::ImageMetadataRepository::new(self.conn.clone())
    }

    fn search_repo(&self) -> repositories::search::SearchRepository {
        repositories::search::SearchRepository::new(self.conn.clone())
    }

    // Datasets

    pub async fn upsert_dataset(&self, dataset: &NewDataset) -> Result<()> {
        self.dataset_repo().upsert(dataset).await
    }

    pub async fn get_dataset(&self, slug: &str) -> Result<Option<Dataset>> {
        self.dataset_repo().get_by_slug(slug).await
    }

    pub async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.dataset_repo().list_all().await
    }

    pub async fn annotation_counts(&self) -> Result<HashMap<i32, u64>> {
        self.dataset_repo().annotation_counts().await
    }

    // Annotations

    pub async fn list_annotations(&self, dataset_slug: Option<&str>) -> Result<Vec<Annotation>> {
        self.annotation_repo().list(dataset_slug).await
    }

    pub async fn get_annotation(&self, id: i32) -> Result<Option<Annotation>> {
        self.annotation_repo().get(id).await
    }

    pub async fn create_annotation(&self, fields: AnnotationFields) -> Result<i32> {
        self.annotation_repo().create(fields).await
    }

    pub async fn update_annotation(&self, id: i32, fields: AnnotationFields) -> Result<bool> {
        self.annotation_repo().update(id, fields).await
    }

    pub async fn delete_annotation(&self, id: i32) -> Result<bool> {
        self.annotation_repo().delete(id).await
    }

    pub async fn search_annotation_features(
        &self,
        term: &str,
        limit: u64,
    ) -> Result<Vec<Annotation>> {
        self.annotation_repo().search_features(term, limit).await
    }

    // Image metadata

    pub async fn add_image_metadata(
        &self,
        dataset_id: i32,
        original_filename: &str,
        file_size: i64,
        dimensions: &serde_json::Value,
        bands: i32,
        nasa_api_url: &str,
    ) -> Result<i32> {
        self.image_metadata_repo()
            .add(
                dataset_id,
                original_filename,
                file_size,
                dimensions,
                bands,
                nasa_api_url,
            )
            .await
    }

    pub async fn list_image_metadata(
        &self,
        dataset_slug: Option<&str>,
    ) -> Result<Vec<ImageMetadata>> {
        self.image_metadata_repo().list(dataset_slug).await
    }

    pub async fn get_image_metadata(&self, id: i32) -> Result<Option<ImageMetadata>> {
        self.image_metadata_repo().get(id).await
    }

    // Search cache

    pub async fn record_search_query(&self, normalized: &str) -> Result<()> {
        self.search_repo().record_query(normalized).await
    }

    pub async fn get_search_query(&self, normalized: &str) -> Result<Option<PopularSearch>> {
        self.search_repo().get_query(normalized).await
    }

    pub async fn popular_searches(&self, limit: u64) -> Result<Vec<PopularSearch>> {
        self.search_repo().popular(limit).await
    }

    pub async fn get_cached_search(&self, normalized: &str, limit: u64) -> Result<Vec<NasaImage>> {
        self.search_repo().cached_results(normalized, limit).await
    }

    pub async fn insert_search_result_if_absent(
        &self,
        image: &NasaImage,
        normalized: &str,
    ) -> Result<bool> {
        self.search_repo().insert_if_absent(image, normalized).await
    }

    pub async fn get_search_result(&self, nasa_id: &str) -> Result<Option<NasaImage>> {
        self.search_repo().get_by_nasa_id(nasa_id).await
    }

    pub async fn count_search_results(&self, nasa_id: &str) -> Result<u64> {
        self.search_repo().count_results(nasa_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn sample_image(nasa_id: &str) -> NasaImage {
        NasaImage {
            nasa_id: nasa_id.to_string(),
            title: "Saturn Rings".to_string(),
            description: "Cassini view".to_string(),
            keywords: vec!["saturn".to_string(), "cassini".to_string()],
            image_url: "https://images-assets.nasa.gov/a~large.jpg".to_string(),
            thumbnail_url: "https://images-assets.nasa.gov/a~thumb.jpg".to_string(),
            center: Some("JPL".to_string()),
            date_created: None,
            media_type: "image".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_query_increments_in_place() {
        let store = memory_store().await;

        store.record_search_query("saturn").await.unwrap();
        store.record_search_query("saturn").await.unwrap();
        store.record_search_query("saturn").await.unwrap();

        let row = store.get_search_query("saturn").await.unwrap().unwrap();
        assert_eq!(row.search_count, 3);

        let popular = store.popular_searches(10).await.unwrap();
        assert_eq!(popular.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_row() {
        let store = memory_store().await;
        let image = sample_image("PIA001");

        assert!(
            store
                .insert_search_result_if_absent(&image, "saturn")
                .await
                .unwrap()
        );

        let mut changed = image.clone();
        changed.title = "Different".to_string();
        assert!(
            !store
                .insert_search_result_if_absent(&changed, "saturn rings")
                .await
                .unwrap()
        );

        assert_eq!(store.count_search_results("PIA001").await.unwrap(), 1);
        let stored = store.get_search_result("PIA001").await.unwrap().unwrap();
        assert_eq!(stored.title, "Saturn Rings");
        assert_eq!(stored.keywords, vec!["saturn", "cassini"]);
    }

    #[tokio::test]
    async fn test_cached_results_match_substring() {
        let store = memory_store().await;
        store
            .insert_search_result_if_absent(&sample_image("A"), "saturn rings")
            .await
            .unwrap();
        store
            .insert_search_result_if_absent(&sample_image("B"), "jupiter")
            .await
            .unwrap();

        let hits = store.get_cached_search("saturn", 20).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nasa_id, "A");

        assert!(store.get_cached_search("venus", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cached_results_treat_wildcards_literally() {
        let store = memory_store().await;
        store
            .insert_search_result_if_absent(&sample_image("SAT"), "saturn")
            .await
            .unwrap();
        store
            .insert_search_result_if_absent(&sample_image("IO"), "io_volcano 100%")
            .await
            .unwrap();

        assert!(store.get_cached_search("s_turn", 20).await.unwrap().is_empty());
        assert_eq!(store.get_cached_search("%", 20).await.unwrap().len(), 1);
        assert!(store.get_cached_search("sat%", 20).await.unwrap().is_empty());

        let hits = store.get_cached_search("io_volcano", 20).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nasa_id, "IO");
        assert_eq!(store.get_cached_search("100%", 20).await.unwrap().len(), 1);
        assert!(store.get_cached_search("io\\", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_annotation_crud_and_counts() {
        let store = memory_store().await;
        store
            .upsert_dataset(&NewDataset::new("mars", "Mars Global Mosaic"))
            .await
            .unwrap();
        let dataset = store.get_dataset("mars").await.unwrap().unwrap();

        let id = store
            .create_annotation(AnnotationFields {
                dataset_id: dataset.id,
                feature_name: "Olympus Mons".to_string(),
                x: 12.5,
                y: 40.0,
                zoom: 3,
                note: String::new(),
            })
            .await
            .unwrap();

        let found = store.search_annotation_features("olympus", 50).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dataset_slug, "mars");

        assert!(store.search_annotation_features("%", 50).await.unwrap().is_empty());
        assert!(store.search_annotation_features("olymp_s", 50).await.unwrap().is_empty());

        let counts = store.annotation_counts().await.unwrap();
        assert_eq!(counts.get(&dataset.id), Some(&1));

        assert!(store.delete_annotation(id).await.unwrap());
        assert!(store.get_annotation(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_image_metadata_filtered_by_dataset() {
        let store = memory_store().await;
        store
            .upsert_dataset(&NewDataset::new("moon", "Lunar Mosaic"))
            .await
            .unwrap();
        store
            .upsert_dataset(&NewDataset::new("mars", "Mars Mosaic"))
            .await
            .unwrap();
        let moon = store.get_dataset("moon").await.unwrap().unwrap();

        let id = store
            .add_image_metadata(
                moon.id,
                "lroc_wac_global.tif",
                1_048_576,
                &serde_json::json!({"width": 27360, "height": 13680}),
                3,
                "https://images-api.nasa.gov/asset/lroc",
            )
            .await
            .unwrap();

        let row = store.get_image_metadata(id).await.unwrap().unwrap();
        assert_eq!(row.dimensions["width"], 27360);
        assert_eq!(store.list_image_metadata(Some("moon")).await.unwrap().len(), 1);
        assert!(store.list_image_metadata(Some("mars")).await.unwrap().is_empty());
        assert_eq!(store.list_image_metadata(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_dataset_updates_existing_slug() {
        let store = memory_store().await;
        store
            .upsert_dataset(&NewDataset::new("mars", "Mars"))
            .await
            .unwrap();

        let mut updated = NewDataset::new("mars", "Mars Global Mosaic");
        updated.processing_status = "completed".to_string();
        updated.tiles_generated = true;
        store.upsert_dataset(&updated).await.unwrap();

        let datasets = store.list_datasets().await.unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].title, "Mars Global Mosaic");
        assert!(datasets[0].tiles_generated);
    }
}
