//! Popular searches command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_popular(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let popular = store.popular_searches(config.search.popular_limit).await?;

    if popular.is_empty() {
        println!("No searches recorded yet.");
        return Ok(());
    }

    println!("Popular Searches");
    println!("{:-<70}", "");

    for entry in popular {
        println!(
            "{:>5}  {:<40} (last: {})",
            entry.search_count, entry.query, entry.last_searched
        );
    }

    Ok(())
}
