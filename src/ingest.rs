//! Ingestion driver
//!
//! Fetches fresh SERP snapshots keyword by keyword and feeds them to the
//! store. Keywords are processed strictly sequentially with a delay between
//! API calls; a failed fetch is logged and skipped, never retried.

use anyhow::Result;
use chrono::Utc;
use std::thread;
use std::time::Duration;

use crate::db::store::SerpStore;
use crate::serp::BrightDataClient;

pub fn fetch_snapshots(
    client: &BrightDataClient,
    store: &SerpStore,
    keywords: &[String],
    num_results: usize,
    delay: Duration,
) -> Result<()> {
    eprintln!("Fetching snapshots for {} keywords...", keywords.len());

    for (idx, keyword) in keywords.iter().enumerate() {
        let progress = format!("[{}/{}]", idx + 1, keywords.len());
        if let Err(err) = fetch_one(client, store, keyword, num_results, &progress) {
            eprintln!("Error fetching '{}': {:#}", keyword, err);
        }

        // Rate limiting between calls, not after the last one
        if idx < keywords.len() - 1 {
            thread::sleep(delay);
        }
    }

    println!("\nTotal snapshots in database: {}", store.snapshot_count()?);
    Ok(())
}

fn fetch_one(
    client: &BrightDataClient,
    store: &SerpStore,
    keyword: &str,
    num_results: usize,
    progress: &str,
) -> Result<()> {
    let results = client.search(keyword, num_results)?;

    if results.is_empty() {
        // Zero results is worth noting, but not an error
        println!("{} '{}': no results found", progress, keyword);
        return Ok(());
    }

    store.insert_snapshot(keyword, &results, Utc::now())?;
    println!("{} '{}': {} results", progress, keyword, results.len());
    Ok(())
}
