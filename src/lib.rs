pub mod analytics;
pub mod chart;
pub mod config;
pub mod db;
pub mod ingest;
pub mod report;
pub mod serp;

// Re-export commonly used types
pub use analytics::Analytics;
pub use config::Config;
pub use db::score::ScoreBreakdown;
pub use db::store::SerpStore;
pub use serp::{BrightDataClient, SearchResult};
