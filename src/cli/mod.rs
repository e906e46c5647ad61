//! Command-line interface for Orrery, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// Orrery - planetary imagery tile server
/// with a cached NASA image search layer
#[derive(Parser)]
#[command(name = "orrery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server until interrupted
    #[command(alias = "web")]
    Serve,

    /// Search NASA imagery through the local cache
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Resolve a tile on disk, e.g. `orrery tile mars 3 2 1.png`
    Tile {
        /// Dataset slug
        dataset: String,
        /// Zoom level
        z: u32,
        /// Tile column
        x: u32,
        /// Tile file as `<y>.<ext>`
        file: String,
    },

    /// Show the most frequent searches
    Popular,

    /// Manage datasets
    Datasets {
        #[command(subcommand)]
        command: DatasetCommands,
    },

    /// Record source imagery behind a dataset's tiles
    Metadata {
        #[command(subcommand)]
        command: MetadataCommands,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum DatasetCommands {
    /// List registered datasets
    #[command(alias = "ls")]
    List,
    /// Create or update a dataset after its tiles were generated
    Register {
        /// Unique dataset slug, also the tile directory name
        slug: String,
        /// Display title
        title: String,
        #[arg(long, default_value_t = 0)]
        min_zoom: i32,
        #[arg(long, default_value_t = 10)]
        max_zoom: i32,
        #[arg(long, default_value_t = 256)]
        tile_size: i32,
        /// Processing status, e.g. `pending` or `completed`
        #[arg(long, default_value = "pending")]
        status: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        mission: String,
    },
}

#[derive(Subcommand)]
pub enum MetadataCommands {
    /// List recorded source images
    #[command(alias = "ls")]
    List {
        /// Only show images of this dataset
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Record the source image a dataset was tiled from
    Add {
        /// Slug of a registered dataset
        dataset: String,
        /// Original file name
        filename: String,
        /// File size in bytes
        #[arg(long, default_value_t = 0)]
        size: i64,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Number of raster bands
        #[arg(long, default_value_t = 3)]
        bands: i32,
        /// NASA API URL the image was downloaded from
        #[arg(long, default_value = "")]
        url: String,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_with_limit() {
        let cli = Cli::try_parse_from(["orrery", "search", "saturn", "rings", "--limit", "5"])
            .unwrap();
        match cli.command {
            Some(Commands::Search { query, limit }) => {
                assert_eq!(query, vec!["saturn", "rings"]);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_register_defaults() {
        let cli = Cli::try_parse_from(["orrery", "datasets", "register", "mars", "Mars Mosaic"])
            .unwrap();
        match cli.command {
            Some(Commands::Datasets {
                command:
                    DatasetCommands::Register {
                        slug,
                        tile_size,
                        max_zoom,
                        status,
                        ..
                    },
            }) => {
                assert_eq!(slug, "mars");
                assert_eq!(tile_size, 256);
                assert_eq!(max_zoom, 10);
                assert_eq!(status, "pending");
            }
            _ => panic!("expected datasets register"),
        }
    }

    #[test]
    fn test_parse_metadata_add() {
        let cli = Cli::try_parse_from([
            "orrery", "metadata", "add", "moon", "lroc_wac.tif", "--width", "27360", "--height",
            "13680", "--size", "1048576",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Metadata {
                command:
                    MetadataCommands::Add {
                        dataset,
                        filename,
                        size,
                        width,
                        bands,
                        ..
                    },
            }) => {
                assert_eq!(dataset, "moon");
                assert_eq!(filename, "lroc_wac.tif");
                assert_eq!(size, 1_048_576);
                assert_eq!(width, 27_360);
                assert_eq!(bands, 3);
            }
            _ => panic!("expected metadata add"),
        }

        assert!(Cli::try_parse_from(["orrery", "metadata", "add", "moon", "a.tif"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["orrery"]).unwrap();
        assert!(cli.command.is_none());
    }
}
