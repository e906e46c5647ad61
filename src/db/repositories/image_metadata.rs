use crate::entities::{datasets, image_metadata, prelude::*};
use crate::models::image::ImageMetadata as ImageMetadataRow;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct ImageMetadataRepository {
    conn: DatabaseConnection,
}

impl ImageMetadataRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: image_metadata::Model) -> ImageMetadataRow {
        ImageMetadataRow {
            id: model.id,
            dataset_id: model.dataset_id,
            original_filename: model.original_filename,
            file_size: model.file_size,
            dimensions: serde_json::from_str(&model.dimensions)
                .unwrap_or_else(|_| serde_json::json!({})),
            bands: model.bands,
            nasa_api_url: model.nasa_api_url,
            created_at: model.created_at,
        }
    }

    pub async fn add(
        &self,
        dataset_id: i32,
        original_filename: &str,
        file_size: i64,
        dimensions: &serde_json::Value,
        bands: i32,
        nasa_api_url: &str,
    ) -> Result<i32> {
        let active_model = image_metadata::ActiveModel {
            dataset_id: Set(dataset_id),
            original_filename: Set(original_filename.to_string()),
            file_size: Set(file_size),
            dimensions: Set(dimensions.to_string()),
            bands: Set(bands),
            nasa_api_url: Set(nasa_api_url.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = ImageMetadata::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn list(&self, dataset_slug: Option<&str>) -> Result<Vec<ImageMetadataRow>> {
        let mut query = ImageMetadata::find().find_also_related(Datasets);

        if let Some(slug) = dataset_slug {
            query = query.filter(datasets::Column::Slug.eq(slug));
        }

        let rows = query
            .order_by_asc(image_metadata::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|(m, _)| Self::map_model(m)).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<ImageMetadataRow>> {
        let row = ImageMetadata::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }
}
