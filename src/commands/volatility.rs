use anyhow::Result;

use serptrace::report::markdown_table;
use serptrace::{Analytics, Config};

pub fn execute(query: &str, days: i64) -> Result<()> {
    let config = Config::load()?;
    let analytics = Analytics::open(&config.db_path)?;
    let rows = analytics.rank_volatility(query, days)?;

    println!(
        "\n=== Rank Volatility for '{}' (last {} days) ===",
        query, days
    );
    if rows.is_empty() {
        println!("No data found");
        return Ok(());
    }

    println!("\nTop {} most volatile URLs:\n", rows.len());
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.url.clone(),
                row.domain.clone(),
                row.snapshot_count.to_string(),
                format!("{:.2}", row.avg_rank),
                row.best_rank.to_string(),
                row.worst_rank.to_string(),
                format!("{:.2}", row.rank_stddev),
                row.rank_changes.to_string(),
                format!("{:.1}", row.volatility_pct),
            ]
        })
        .collect();

    println!(
        "{}",
        markdown_table(
            &[
                "url",
                "domain",
                "snapshot_count",
                "avg_rank",
                "best_rank",
                "worst_rank",
                "rank_stddev",
                "rank_changes",
                "volatility_pct",
            ],
            &table_rows,
        )
    );

    Ok(())
}
