use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nasa_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: String,
    /// JSON array, order preserved from upstream
    #[sea_orm(column_type = "Text")]
    pub keywords: String,
    pub center: Option<String>,
    pub date_created: Option<String>,
    pub media_type: String,
    /// Normalized query that first produced this row.
    pub query: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
