use anyhow::Result;

use serptrace::db::score;
use serptrace::{Config, SerpStore};

pub fn execute(keywords: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let store = SerpStore::open(&config.db_path)?;

    let total = if keywords.is_empty() {
        println!("Calculating interest scores for all keywords...");
        score::compute_all(store.connection(), None)?
    } else {
        println!(
            "Calculating interest scores for {} keywords...",
            keywords.len()
        );
        let mut total = 0;
        for keyword in &keywords {
            let count = score::compute_all(store.connection(), Some(keyword))?;
            if count > 0 {
                println!("  '{}': {} scores calculated", keyword, count);
            }
            total += count;
        }
        total
    };

    println!("\nTotal interest scores calculated: {}", total);
    if total == 0 {
        println!("\nNote: Interest scores require at least 2 snapshots on different days.");
        println!("Fetch snapshots on multiple days to build historical data.");
    }

    Ok(())
}
