use crate::entities::{annotations, datasets, prelude::*};
use crate::models::dataset::{Dataset, NewDataset};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use tracing::info;

pub struct DatasetRepository {
    conn: DatabaseConnection,
}

impl DatasetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: datasets::Model) -> Dataset {
        Dataset {
            id: model.id,
            slug: model.slug,
            title: model.title,
            description: model.description,
            source_mission: model.source_mission,
            capture_date: model.capture_date,
            resolution_info: serde_json::from_str(&model.resolution_info)
                .unwrap_or_else(|_| serde_json::json!({})),
            tile_size: model.tile_size,
            min_zoom: model.min_zoom,
            max_zoom: model.max_zoom,
            tiles_generated: model.tiles_generated,
            processing_status: model.processing_status,
            created_at: model.created_at,
        }
    }

    /// Creates the dataset, or refreshes the ingestion-owned columns when the
    /// slug already exists.
    pub async fn upsert(&self, dataset: &NewDataset) -> Result<()> {
        let active_model = datasets::ActiveModel {
            slug: Set(dataset.slug.clone()),
            title: Set(dataset.title.clone()),
            description: Set(dataset.description.clone()),
            source_mission: Set(dataset.source_mission.clone()),
            capture_date: Set(None),
            resolution_info: Set("{}".to_string()),
            tile_size: Set(dataset.tile_size),
            min_zoom: Set(dataset.min_zoom),
            max_zoom: Set(dataset.max_zoom),
            tiles_generated: Set(dataset.tiles_generated),
            processing_status: Set(dataset.processing_status.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        Datasets::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(datasets::Column::Slug)
                    .update_columns([
                        datasets::Column::Title,
                        datasets::Column::Description,
                        datasets::Column::SourceMission,
                        datasets::Column::TileSize,
                        datasets::Column::MinZoom,
                        datasets::Column::MaxZoom,
                        datasets::Column::TilesGenerated,
                        datasets::Column::ProcessingStatus,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        info!(slug = %dataset.slug, "Registered dataset");
        Ok(())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Dataset>> {
        let row = Datasets::find()
            .filter(datasets::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Dataset>> {
        let rows = Datasets::find()
            .order_by_asc(datasets::Column::Slug)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn annotation_counts(&self) -> Result<HashMap<i32, u64>> {
        let results: Vec<(i32, i64)> = Annotations::find()
            .select_only()
            .column(annotations::Column::DatasetId)
            .column_as(annotations::Column::Id.count(), "count")
            .group_by(annotations::Column::DatasetId)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(results
            .into_iter()
            .map(|(id, count)| (id, u64::try_from(count).unwrap_or(0)))
            .collect())
    }
}
