use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "datasets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub source_mission: String,
    pub capture_date: Option<String>,
    /// JSON object with free-form resolution details.
    #[sea_orm(column_type = "Text")]
    pub resolution_info: String,
    pub tile_size: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub tiles_generated: bool,
    pub processing_status: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::annotations::Entity")]
    Annotations,
    #[sea_orm(has_many = "super::image_metadata::Entity")]
    ImageMetadata,
}

impl Related<super::annotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Annotations.def()
    }
}

impl Related<super::image_metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImageMetadata.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
