use anyhow::Result;

use serptrace::report::markdown_table;
use serptrace::{Analytics, Config};

pub fn execute(query: &str, days: i64) -> Result<()> {
    let config = Config::load()?;
    let analytics = Analytics::open(&config.db_path)?;
    let rows = analytics.content_changes(query, days)?;

    println!(
        "\n=== Content Changes for '{}' (last {} days) ===",
        query, days
    );
    if rows.is_empty() {
        println!("No changes found");
        return Ok(());
    }

    println!("\nFound {} changes:\n", rows.len());
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.url.clone(),
                row.domain.clone(),
                row.snapshot_date.to_string(),
                row.rank.to_string(),
                row.prev_title.clone().unwrap_or_default(),
                row.new_title.clone().unwrap_or_default(),
                row.prev_snippet.clone().unwrap_or_default(),
                row.new_snippet.clone().unwrap_or_default(),
                (row.title_changed as u8).to_string(),
                (row.snippet_changed as u8).to_string(),
            ]
        })
        .collect();

    println!(
        "{}",
        markdown_table(
            &[
                "url",
                "domain",
                "snapshot_date",
                "rank",
                "prev_title",
                "new_title",
                "prev_snippet",
                "new_snippet",
                "title_changed",
                "snippet_changed",
            ],
            &table_rows,
        )
    );

    Ok(())
}
