pub use super::annotations::Entity as Annotations;
pub use super::datasets::Entity as Datasets;
pub use super::image_metadata::Entity as ImageMetadata;
pub use super::search_queries::Entity as SearchQueries;
pub use super::search_results::Entity as SearchResults;
