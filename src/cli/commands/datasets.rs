//! Dataset command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::dataset::NewDataset;

pub async fn cmd_datasets_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let datasets = store.list_datasets().await?;

    if datasets.is_empty() {
        println!("No datasets registered.");
        println!();
        println!("Register one with: orrery datasets register <slug> \"<title>\"");
        return Ok(());
    }

    let counts = store.annotation_counts().await?;

    println!("Datasets ({} total)", datasets.len());
    println!("{:-<70}", "");

    for dataset in datasets {
        println!("{} [{}]", dataset.title, dataset.slug);
        println!(
            "  Zoom: {}-{} | Tile size: {} | Status: {} | Annotations: {}",
            dataset.min_zoom,
            dataset.max_zoom,
            dataset.tile_size,
            dataset.processing_status,
            counts.get(&dataset.id).copied().unwrap_or(0)
        );
    }

    Ok(())
}

pub async fn cmd_datasets_register(config: &Config, dataset: NewDataset) -> anyhow::Result<()> {
    if dataset.min_zoom < 0 || dataset.max_zoom < dataset.min_zoom {
        anyhow::bail!(
            "Invalid zoom range {}-{}",
            dataset.min_zoom,
            dataset.max_zoom
        );
    }

    let store = Store::new(&config.general.database_path).await?;
    store.upsert_dataset(&dataset).await?;

    println!("✓ Registered dataset '{}' ({})", dataset.slug, dataset.title);
    Ok(())
}
