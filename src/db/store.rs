//! Snapshot storage
//!
//! `SerpStore` owns the write connection and the schema. Snapshot rows are
//! append-only: a `(query, snapshot_date, url)` key is written at most once
//! and later attempts are silently ignored (first write wins).

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use url::Url;

use super::score;
use crate::serp::SearchResult;

/// Database schema, idempotent. Run by the write owner on open; readers
/// never create schema.
const SCHEMA: &str = r#"
-- Raw SERP observations, append-only
CREATE TABLE IF NOT EXISTS serp_snapshots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    snapshot_date TEXT NOT NULL,
    snapshot_timestamp TEXT NOT NULL,
    url TEXT NOT NULL,
    title TEXT,
    snippet TEXT,
    domain TEXT,
    rank INTEGER NOT NULL,
    UNIQUE(query, snapshot_date, url)
);

-- Derived interest scores, upserted per (query, date)
CREATE TABLE IF NOT EXISTS interest_scores (
    query TEXT NOT NULL,
    snapshot_date TEXT NOT NULL,
    interest_score REAL NOT NULL,
    new_domains_count INTEGER,
    avg_rank_improvement REAL,
    reshuffle_frequency REAL,
    UNIQUE(query, snapshot_date)
);

CREATE INDEX IF NOT EXISTS idx_snapshots_query_date ON serp_snapshots(query, snapshot_date);
CREATE INDEX IF NOT EXISTS idx_snapshots_url_query ON serp_snapshots(url, query);
CREATE INDEX IF NOT EXISTS idx_scores_query_date ON interest_scores(query, snapshot_date);
"#;

/// Write-side store for SERP snapshots and derived scores
pub struct SerpStore {
    conn: Connection,
}

impl SerpStore {
    /// Open or create the snapshot database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create database schema")?;

        Ok(Self { conn })
    }

    /// Create an in-memory store for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create database schema")?;
        Ok(Self { conn })
    }

    /// Insert a daily snapshot of SERP results for a query.
    ///
    /// Ranks are assigned from input order (1-based). Rows that collide with
    /// an existing `(query, date, url)` are dropped, not updated. After the
    /// insert the interest score for `(query, date)` is recomputed.
    ///
    /// Returns the number of rows newly stored.
    pub fn insert_snapshot(
        &self,
        query: &str,
        results: &[SearchResult],
        captured_at: DateTime<Utc>,
    ) -> Result<usize> {
        if results.is_empty() {
            return Ok(0);
        }

        let date = captured_at.date_naive();
        let timestamp = captured_at.to_rfc3339();

        let mut stored = 0;
        for (idx, result) in results.iter().enumerate() {
            let domain = domain_from_url(&result.url);
            stored += self
                .conn
                .execute(
                    "INSERT OR IGNORE INTO serp_snapshots
                     (query, snapshot_date, snapshot_timestamp, url, title, snippet, domain, rank)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        query,
                        date,
                        timestamp,
                        result.url,
                        result.title,
                        result.snippet,
                        domain,
                        (idx + 1) as i64,
                    ],
                )
                .with_context(|| format!("Failed to insert snapshot row for '{}'", query))?;
        }

        score::compute_score(&self.conn, query, date)?;

        Ok(stored)
    }

    /// Latest snapshot date for a query strictly before `before`
    pub fn previous_date(&self, query: &str, before: NaiveDate) -> Result<Option<NaiveDate>> {
        previous_date(&self.conn, query, before)
    }

    /// Total number of snapshot rows
    pub fn snapshot_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM serp_snapshots", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Underlying connection, for the score engine's batch mode
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Latest snapshot date for `query` strictly earlier than `before`
pub(crate) fn previous_date(
    conn: &Connection,
    query: &str,
    before: NaiveDate,
) -> Result<Option<NaiveDate>> {
    let date = conn.query_row(
        "SELECT MAX(snapshot_date) FROM serp_snapshots
         WHERE query = ?1 AND snapshot_date < ?2",
        params![query, before],
        |row| row.get::<_, Option<NaiveDate>>(0),
    )?;
    Ok(date)
}

/// Rows for a query/date with rank at or below `max_rank`, rank-ascending
pub(crate) fn top_domain_ranks(
    conn: &Connection,
    query: &str,
    date: NaiveDate,
    max_rank: i64,
) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT domain, rank FROM serp_snapshots
         WHERE query = ?1 AND snapshot_date = ?2 AND rank <= ?3
         ORDER BY rank ASC",
    )?;
    let rows = stmt
        .query_map(params![query, date, max_rank], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// All distinct (query, date) pairs, optionally filtered to one query
pub(crate) fn distinct_query_dates(
    conn: &Connection,
    query: Option<&str>,
) -> Result<Vec<(String, NaiveDate)>> {
    let mut stmt;
    let mapped = match query {
        Some(q) => {
            stmt = conn.prepare(
                "SELECT DISTINCT query, snapshot_date FROM serp_snapshots
                 WHERE query = ?1 ORDER BY query, snapshot_date",
            )?;
            stmt.query_map(params![q], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?
        }
        None => {
            stmt = conn.prepare(
                "SELECT DISTINCT query, snapshot_date FROM serp_snapshots
                 ORDER BY query, snapshot_date",
            )?;
            stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(mapped)
}

/// Derive the domain for a result URL: host with a literal leading `www.`
/// stripped. Empty or unparsable URLs yield an empty string.
pub fn domain_from_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}
