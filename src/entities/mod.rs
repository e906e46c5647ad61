pub mod prelude;

pub mod annotations;
pub mod datasets;
pub mod image_metadata;
pub mod search_queries;
pub mod search_results;
