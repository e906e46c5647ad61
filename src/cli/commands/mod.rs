mod datasets;
mod metadata;
mod popular;
mod search;
mod tile;

pub use datasets::{cmd_datasets_list, cmd_datasets_register};
pub use metadata::{SourceImage, cmd_metadata_add, cmd_metadata_list};
pub use popular::cmd_popular;
pub use search::cmd_search;
pub use tile::cmd_tile;
