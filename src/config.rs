use anyhow::Result;
use std::path::PathBuf;

/// Configuration for serptrace
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite snapshot database
    pub db_path: PathBuf,
}

impl Config {
    /// Load configuration
    ///
    /// The database lives under `data/serp.db` relative to the working
    /// directory unless `SERPTRACE_DB` overrides it. The containing
    /// directory is created on first write by `SerpStore::open`.
    pub fn load() -> Result<Self> {
        let db_path = match std::env::var("SERPTRACE_DB") {
            Ok(path) => PathBuf::from(path),
            Err(_) => std::env::current_dir()?.join("data").join("serp.db"),
        };

        Ok(Self { db_path })
    }
}
