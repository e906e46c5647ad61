use crate::entities::{annotations, datasets, prelude::*};
use super::contains_literal;
use crate::models::annotation::Annotation;
use sea_orm::sea_query::Expr;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// Fields shared by create and update once the dataset slug is resolved.
#[derive(Debug, Clone)]
pub struct AnnotationFields {
    pub dataset_id: i32,
    pub feature_name: String,
    pub x: f64,
    pub y: f64,
    pub zoom: i32,
    pub note: String,
}

pub struct AnnotationRepository {
    conn: DatabaseConnection,
}

impl AnnotationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: annotations::Model, dataset: Option<datasets::Model>) -> Annotation {
        let (dataset_slug, dataset_name) =
            dataset.map_or_else(|| (String::new(), String::new()), |d| (d.slug, d.title));

        Annotation {
            id: model.id,
            dataset_id: model.dataset_id,
            dataset_slug,
            dataset_name,
            feature_name: model.feature_name,
            x: model.x,
            y: model.y,
            zoom: model.zoom,
            note: model.note,
            created_at: model.created_at,
        }
    }

    pub async fn list(&self, dataset_slug: Option<&str>) -> Result<Vec<Annotation>> {
        let mut query = Annotations::find().find_also_related(Datasets);

        if let Some(slug) = dataset_slug {
            query = query.filter(datasets::Column::Slug.eq(slug));
        }

        let rows = query
            .order_by_asc(annotations::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(a, d)| Self::map_model(a, d))
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Annotation>> {
        let row = Annotations::find_by_id(id)
            .find_also_related(Datasets)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(a, d)| Self::map_model(a, d)))
    }

    pub async fn create(&self, fields: AnnotationFields) -> Result<i32> {
        let active_model = annotations::ActiveModel {
            dataset_id: Set(fields.dataset_id),
            feature_name: Set(fields.feature_name),
            x: Set(fields.x),
            y: Set(fields.y),
            zoom: Set(fields.zoom),
            note: Set(fields.note),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Annotations::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    /// Returns `false` when no annotation with `id` exists.
    pub async fn update(&self, id: i32, fields: AnnotationFields) -> Result<bool> {
        let Some(existing) = Annotations::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: annotations::ActiveModel = existing.into();
        active.dataset_id = Set(fields.dataset_id);
        active.feature_name = Set(fields.feature_name);
        active.x = Set(fields.x);
        active.y = Set(fields.y);
        active.zoom = Set(fields.zoom);
        active.note = Set(fields.note);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Annotations::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Case-insensitive substring match on the feature name.
    pub async fn search_features(&self, term: &str, limit: u64) -> Result<Vec<Annotation>> {
        let rows = Annotations::find()
            .find_also_related(Datasets)
            .filter(
                Expr::col((Annotations, annotations::Column::FeatureName))
                    .like(contains_literal(term)),
            )
            .order_by_asc(annotations::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(a, d)| Self::map_model(a, d))
            .collect())
    }
}
