use anyhow::Result;
use std::time::Duration;

use serptrace::{ingest, BrightDataClient, Config, SerpStore};

pub fn execute(keywords: Vec<String>, num_results: usize, delay: f64) -> Result<()> {
    let config = Config::load()?;

    // Missing credentials abort here, before anything is written
    let client = BrightDataClient::from_env()?;
    let store = SerpStore::open(&config.db_path)?;

    ingest::fetch_snapshots(
        &client,
        &store,
        &keywords,
        num_results,
        Duration::from_secs_f64(delay.max(0.0)),
    )
}
