use anyhow::Result;

use serptrace::{Analytics, Config};

pub fn execute(query: &str) -> Result<()> {
    let config = Config::load()?;
    let analytics = Analytics::open(&config.db_path)?;
    let stats = analytics.summary_stats(query)?;

    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string())
    };

    println!("\n=== Summary for '{}' ===", query);
    println!("Total snapshots: {}", stats.total_snapshots);
    println!("Unique URLs: {}", stats.unique_urls);
    println!("Unique domains: {}", stats.unique_domains);
    println!("First snapshot: {}", date(stats.first_snapshot));
    println!("Last snapshot: {}", date(stats.last_snapshot));

    Ok(())
}
