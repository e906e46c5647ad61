pub mod keywords;
pub use keywords::keywords_for;

pub mod search;
pub use search::SearchService;

pub mod tiles;
pub use tiles::{TileCoord, TileError, TileResolver};
