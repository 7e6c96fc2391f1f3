use anyhow::Result;
use std::path::PathBuf;

use serptrace::report::markdown_table;
use serptrace::{chart, Analytics, Config};

pub fn execute(query: &str, days: i64, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let analytics = Analytics::open(&config.db_path)?;
    let rows = analytics.interest_scores(query, days)?;

    println!(
        "\n=== Interest Scores for '{}' (last {} days) ===",
        query, days
    );
    if rows.is_empty() {
        println!("No interest scores found");
        println!("Note: Interest scores require at least 2 snapshots on different days.");
        println!("To calculate scores for existing data, run:");
        println!("  serptrace calculate-scores --keywords \"{}\"", query);
        return Ok(());
    }

    println!("\nFound {} scores:\n", rows.len());
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.snapshot_date.to_string(),
                format!("{:.1}", row.interest_score),
                row.new_domains_count.to_string(),
                format!("{:.2}", row.avg_rank_improvement),
                format!("{:.2}", row.reshuffle_frequency),
            ]
        })
        .collect();

    println!(
        "{}",
        markdown_table(
            &[
                "snapshot_date",
                "interest_score",
                "new_domains_count",
                "avg_rank_improvement",
                "reshuffle_frequency",
            ],
            &table_rows,
        )
    );

    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("{}_trend.png", query.replace(' ', "_"))));
    chart::render_score_chart(&output, query, days, &rows)?;
    println!("\nChart saved to: {}", output.display());

    Ok(())
}
