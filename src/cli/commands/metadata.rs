//! Image metadata command handlers

use crate::config::Config;
use crate::db::Store;

/// Source raster details recorded alongside a dataset's tiles.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub filename: String,
    pub file_size: i64,
    pub width: u32,
    pub height: u32,
    pub bands: i32,
    pub nasa_api_url: String,
}

async fn record_source_image(
    store: &Store,
    slug: &str,
    image: &SourceImage,
) -> anyhow::Result<i32> {
    let Some(dataset) = store.get_dataset(slug).await? else {
        anyhow::bail!("Dataset '{slug}' is not registered");
    };
    if image.file_size < 0 {
        anyhow::bail!("File size cannot be negative");
    }

    let dimensions = serde_json::json!({ "width": image.width, "height": image.height });
    store
        .add_image_metadata(
            dataset.id,
            &image.filename,
            image.file_size,
            &dimensions,
            image.bands,
            &image.nasa_api_url,
        )
        .await
}

pub async fn cmd_metadata_add(config: &Config, dataset: &str, image: SourceImage) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let id = record_source_image(&store, dataset, &image).await?;

    println!("✓ Recorded {} for '{dataset}' (id {id})", image.filename);
    Ok(())
}

pub async fn cmd_metadata_list(config: &Config, dataset: Option<&str>) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let rows = store.list_image_metadata(dataset).await?;

    if rows.is_empty() {
        println!("No image metadata recorded.");
        return Ok(());
    }

    println!("Source images ({} total)", rows.len());
    println!("{:-<70}", "");

    for row in rows {
        println!("#{} {}", row.id, row.original_filename);
        println!(
            "  Size: {} bytes | Dimensions: {}x{} | Bands: {}",
            row.file_size, row.dimensions["width"], row.dimensions["height"], row.bands
        );
        if !row.nasa_api_url.is_empty() {
            println!("  Source: {}", row.nasa_api_url);
        }
    }

    Ok(())
}
