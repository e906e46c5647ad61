use crate::entities::{prelude::*, search_queries, search_results};
use super::contains_literal;
use crate::models::image::{NasaImage, PopularSearch};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Repository for cached image search results and query bookkeeping.
pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_result_model(model: search_results::Model) -> NasaImage {
        NasaImage {
            nasa_id: model.nasa_id,
            title: model.title,
            description: model.description,
            keywords: serde_json::from_str(&model.keywords).unwrap_or_default(),
            image_url: model.image_url,
            thumbnail_url: model.thumbnail_url,
            center: model.center,
            date_created: model
                .date_created
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc)),
            media_type: model.media_type,
        }
    }

    fn map_query_model(model: search_queries::Model) -> PopularSearch {
        PopularSearch {
            query: model.query,
            search_count: model.search_count,
            last_searched: model.last_searched,
        }
    }

    /// Creates the query row at count 1 or bumps the existing counter in place.
    pub async fn record_query(&self, normalized: &str) -> Result<()> {
        let active_model = search_queries::ActiveModel {
            query: Set(normalized.to_string()),
            search_count: Set(1),
            last_searched: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        SearchQueries::insert(active_model)
            .on_conflict(
                OnConflict::column(search_queries::Column::Query)
                    .value(
                        search_queries::Column::SearchCount,
                        Expr::col(search_queries::Column::SearchCount).add(1),
                    )
                    .update_column(search_queries::Column::LastSearched)
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get_query(&self, normalized: &str) -> Result<Option<PopularSearch>> {
        let row = SearchQueries::find()
            .filter(search_queries::Column::Query.eq(normalized))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_query_model))
    }

    pub async fn popular(&self, limit: u64) -> Result<Vec<PopularSearch>> {
        let rows = SearchQueries::find()
            .order_by_desc(search_queries::Column::SearchCount)
            .order_by_desc(search_queries::Column::LastSearched)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_query_model).collect())
    }

    /// Stored results whose originating query contains `normalized`.
    pub async fn cached_results(&self, normalized: &str, limit: u64) -> Result<Vec<NasaImage>> {
        let rows = SearchResults::find()
            .filter(
                Expr::col((SearchResults, search_results::Column::Query))
                    .like(contains_literal(normalized)),
            )
            .order_by_asc(search_results::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_result_model).collect())
    }

    /// Returns `true` when a new row was written, `false` when `nasa_id` was
    /// already stored.
    pub async fn insert_if_absent(&self, image: &NasaImage, normalized: &str) -> Result<bool> {
        let active_model = search_results::ActiveModel {
            nasa_id: Set(image.nasa_id.clone()),
            title: Set(image.title.clone()),
            description: Set(image.description.clone()),
            image_url: Set(image.image_url.clone()),
            thumbnail_url: Set(image.thumbnail_url.clone()),
            keywords: Set(serde_json::to_string(&image.keywords)?),
            center: Set(image.center.clone()),
            date_created: Set(image.date_created.map(|d| d.to_rfc3339())),
            media_type: Set(image.media_type.clone()),
            query: Set(normalized.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = SearchResults::insert(active_model)
            .on_conflict(
                OnConflict::column(search_results::Column::NasaId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn get_by_nasa_id(&self, nasa_id: &str) -> Result<Option<NasaImage>> {
        let row = SearchResults::find()
            .filter(search_results::Column::NasaId.eq(nasa_id))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_result_model))
    }

    pub async fn count_results(&self, nasa_id: &str) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        let count = SearchResults::find()
            .filter(search_results::Column::NasaId.eq(nasa_id))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
