use anyhow::Result;

use serptrace::report::markdown_table;
use serptrace::{Analytics, Config};

pub fn execute(query: &str, days: i64) -> Result<()> {
    let config = Config::load()?;
    let analytics = Analytics::open(&config.db_path)?;
    let rows = analytics.new_entrants(query, days)?;

    println!(
        "\n=== New Entrants for '{}' (last {} days) ===",
        query, days
    );
    if rows.is_empty() {
        println!("No new entrants found");
        return Ok(());
    }

    println!("\nFound {} new URLs:\n", rows.len());
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.url.clone(),
                row.domain.clone(),
                row.first_seen.to_string(),
                row.first_rank.to_string(),
                row.title.clone().unwrap_or_default(),
                row.snippet.clone().unwrap_or_default(),
            ]
        })
        .collect();

    println!(
        "{}",
        markdown_table(
            &["url", "domain", "first_seen", "first_rank", "title", "snippet"],
            &table_rows,
        )
    );

    Ok(())
}
