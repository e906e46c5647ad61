//! Search command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_search(config: Config, query: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(config.search.default_limit);
    let state = SharedState::new(config).await?;

    println!("Searching for: {query}");
    println!();

    let results = state.search_service.search(query, limit).await?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} results:", results.len());
    println!("{:-<70}", "");

    for (i, image) in results.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, image.title, image.nasa_id);
        if let Some(date) = image.date_created {
            println!("   Date: {}", date.format("%Y-%m-%d"));
        }
        if let Some(center) = &image.center {
            println!("   Center: {center}");
        }
        println!("   {}", image.image_url);
    }

    Ok(())
}
