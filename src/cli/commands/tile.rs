//! Tile lookup command handler

use crate::config::Config;
use crate::services::{TileCoord, TileResolver};

pub async fn cmd_tile(config: &Config, dataset: &str, z: u32, x: u32, file: &str) -> anyhow::Result<()> {
    let Some((y, ext)) = file.rsplit_once('.') else {
        anyhow::bail!("Tile file must look like <y>.<ext>, got '{file}'");
    };
    let y: u32 = y
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid tile row '{y}'"))?;

    let resolver = TileResolver::new(&config.general.tiles_root);
    let coord = TileCoord { zoom: z, x, y };

    match resolver.resolve(dataset, coord, ext).await {
        Some(path) => {
            println!("{}", path.display());
            println!("Content-Type: {}", TileResolver::content_type_for(&path));
        }
        None => println!(
            "Tile not found under {}",
            resolver.root().display()
        ),
    }

    Ok(())
}
