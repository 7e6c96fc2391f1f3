//! Read-only analytics over the snapshot history
//!
//! All lookback queries share the same window convention: cutoff is
//! `today - days`, inclusive. The reader opens a strictly read-only
//! connection; schema creation belongs to the write side (`SerpStore`).

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::BTreeMap;
use std::path::Path;

/// Result rows are capped to keep console output readable
const ROW_CAP: usize = 50;

/// Per-URL rank volatility within a lookback window
#[derive(Debug, Clone)]
pub struct VolatilityRow {
    pub url: String,
    pub domain: String,
    pub snapshot_count: usize,
    pub avg_rank: f64,
    pub best_rank: i64,
    pub worst_rank: i64,
    /// Population standard deviation of rank
    pub rank_stddev: f64,
    /// Day-to-day observations where the rank differed from the previous one
    pub rank_changes: usize,
    pub volatility_pct: f64,
}

/// A URL seen for the first time within the window
#[derive(Debug, Clone)]
pub struct NewEntrantRow {
    pub url: String,
    pub domain: String,
    pub first_seen: NaiveDate,
    pub first_rank: i64,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

/// A title or snippet change relative to the previous observation
#[derive(Debug, Clone)]
pub struct ContentChangeRow {
    pub url: String,
    pub domain: String,
    pub snapshot_date: NaiveDate,
    pub rank: i64,
    pub prev_title: Option<String>,
    pub new_title: Option<String>,
    pub prev_snippet: Option<String>,
    pub new_snippet: Option<String>,
    pub title_changed: bool,
    pub snippet_changed: bool,
}

/// Whole-history summary for a query
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub total_snapshots: i64,
    pub unique_urls: i64,
    pub unique_domains: i64,
    pub first_snapshot: Option<NaiveDate>,
    pub last_snapshot: Option<NaiveDate>,
}

/// One stored interest score
#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub snapshot_date: NaiveDate,
    pub interest_score: f64,
    pub new_domains_count: i64,
    pub avg_rank_improvement: f64,
    pub reshuffle_frequency: f64,
}

/// Read-only analytics over an existing snapshot database
pub struct Analytics {
    conn: Connection,
}

impl Analytics {
    /// Open the database read-only. Fails when the file does not exist;
    /// writers create it, readers never do.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!(
                "No snapshot database at {} - run `serptrace fetch` first",
                path.display()
            );
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

        Ok(Self { conn })
    }

    /// Rank volatility per URL over the window.
    ///
    /// URLs with a single in-window observation carry no signal and are
    /// excluded. Ordered most volatile first (stddev desc, then avg rank
    /// asc), capped at 50 rows.
    pub fn rank_volatility(&self, query: &str, days: i64) -> Result<Vec<VolatilityRow>> {
        let cutoff = window_cutoff(days);

        let mut stmt = self.conn.prepare(
            "SELECT url, domain, rank FROM serp_snapshots
             WHERE query = ?1 AND snapshot_date >= ?2
             ORDER BY url, snapshot_date",
        )?;
        let observations = stmt
            .query_map(params![query, cutoff], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // Group rank series per URL, preserving date order within each
        let mut series: BTreeMap<String, (String, Vec<i64>)> = BTreeMap::new();
        for (url, domain, rank) in observations {
            series.entry(url).or_insert_with(|| (domain, Vec::new())).1.push(rank);
        }

        let mut rows: Vec<VolatilityRow> = series
            .into_iter()
            .filter(|(_, (_, ranks))| ranks.len() > 1)
            .map(|(url, (domain, ranks))| {
                let count = ranks.len();
                let avg = ranks.iter().sum::<i64>() as f64 / count as f64;
                let changes = ranks.windows(2).filter(|pair| pair[0] != pair[1]).count();

                VolatilityRow {
                    url,
                    domain,
                    snapshot_count: count,
                    avg_rank: avg,
                    best_rank: *ranks.iter().min().unwrap_or(&0),
                    worst_rank: *ranks.iter().max().unwrap_or(&0),
                    rank_stddev: population_stddev(&ranks, avg),
                    rank_changes: changes,
                    volatility_pct: changes as f64 / (count - 1) as f64 * 100.0,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.rank_stddev
                .partial_cmp(&a.rank_stddev)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    a.avg_rank
                        .partial_cmp(&b.avg_rank)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        rows.truncate(ROW_CAP);

        Ok(rows)
    }

    /// URLs whose first-ever appearance falls within the window.
    ///
    /// First appearance is taken over the full history, so a URL that merely
    /// returned to the results recently does not count as new.
    pub fn new_entrants(&self, query: &str, days: i64) -> Result<Vec<NewEntrantRow>> {
        let cutoff = window_cutoff(days);

        let mut stmt = self.conn.prepare(
            "SELECT s.url, s.domain, fa.first_seen, s.rank, s.title, s.snippet
             FROM (
                 SELECT url, MIN(snapshot_date) AS first_seen
                 FROM serp_snapshots
                 WHERE query = ?1
                 GROUP BY url
             ) fa
             JOIN serp_snapshots s
               ON s.url = fa.url AND s.snapshot_date = fa.first_seen AND s.query = ?1
             WHERE fa.first_seen >= ?2
             ORDER BY fa.first_seen DESC, s.rank ASC
             LIMIT ?3",
        )?;

        let rows = stmt
            .query_map(params![query, cutoff, ROW_CAP as i64], |row| {
                Ok(NewEntrantRow {
                    url: row.get(0)?,
                    domain: row.get(1)?,
                    first_seen: row.get(2)?,
                    first_rank: row.get(3)?,
                    title: row.get(4)?,
                    snippet: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Title and snippet changes within the window.
    ///
    /// Each observation is compared to the immediately preceding in-window
    /// observation of the same URL; a row is emitted only when the previous
    /// value exists and differs.
    pub fn content_changes(&self, query: &str, days: i64) -> Result<Vec<ContentChangeRow>> {
        let cutoff = window_cutoff(days);

        let mut stmt = self.conn.prepare(
            "SELECT url, domain, snapshot_date, rank, title, snippet
             FROM serp_snapshots
             WHERE query = ?1 AND snapshot_date >= ?2
             ORDER BY url, snapshot_date",
        )?;

        type Observation = (
            String,
            String,
            NaiveDate,
            i64,
            Option<String>,
            Option<String>,
        );
        let observations = stmt
            .query_map(params![query, cutoff], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, NaiveDate>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            })?
            .collect::<Result<Vec<Observation>, _>>()?;

        let mut rows = Vec::new();
        let mut prev: Option<&Observation> = None;
        for obs in &observations {
            if let Some(previous) = prev {
                if previous.0 == obs.0 {
                    let title_changed = changed(&previous.4, &obs.4);
                    let snippet_changed = changed(&previous.5, &obs.5);

                    if title_changed || snippet_changed {
                        rows.push(ContentChangeRow {
                            url: obs.0.clone(),
                            domain: obs.1.clone(),
                            snapshot_date: obs.2,
                            rank: obs.3,
                            prev_title: previous.4.clone(),
                            new_title: obs.4.clone(),
                            prev_snippet: previous.5.clone(),
                            new_snippet: obs.5.clone(),
                            title_changed,
                            snippet_changed,
                        });
                    }
                }
            }
            prev = Some(obs);
        }

        rows.sort_by(|a, b| {
            b.snapshot_date
                .cmp(&a.snapshot_date)
                .then(a.rank.cmp(&b.rank))
        });
        rows.truncate(ROW_CAP);

        Ok(rows)
    }

    /// Summary statistics for a query over all history
    pub fn summary_stats(&self, query: &str) -> Result<SummaryStats> {
        let stats = self.conn.query_row(
            "SELECT
                 COUNT(DISTINCT snapshot_date),
                 COUNT(DISTINCT url),
                 COUNT(DISTINCT domain),
                 MIN(snapshot_date),
                 MAX(snapshot_date)
             FROM serp_snapshots
             WHERE query = ?1",
            params![query],
            |row| {
                Ok(SummaryStats {
                    total_snapshots: row.get(0)?,
                    unique_urls: row.get(1)?,
                    unique_domains: row.get(2)?,
                    first_snapshot: row.get(3)?,
                    last_snapshot: row.get(4)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Interest scores for a query within the window, date ascending
    pub fn interest_scores(&self, query: &str, days: i64) -> Result<Vec<ScoreRow>> {
        self.interest_scores_between(query, window_cutoff(days), Utc::now().date_naive())
    }

    /// Interest scores within an explicit inclusive date range, ascending
    pub fn interest_scores_between(
        &self,
        query: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScoreRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT snapshot_date, interest_score, new_domains_count,
                    avg_rank_improvement, reshuffle_frequency
             FROM interest_scores
             WHERE query = ?1 AND snapshot_date >= ?2 AND snapshot_date <= ?3
             ORDER BY snapshot_date ASC",
        )?;

        let rows = stmt
            .query_map(params![query, start, end], |row| {
                Ok(ScoreRow {
                    snapshot_date: row.get(0)?,
                    interest_score: row.get(1)?,
                    new_domains_count: row.get(2)?,
                    avg_rank_improvement: row.get(3)?,
                    reshuffle_frequency: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

fn window_cutoff(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

fn changed(prev: &Option<String>, current: &Option<String>) -> bool {
    matches!(prev, Some(p) if current.as_ref() != Some(p))
}

fn population_stddev(ranks: &[i64], mean: f64) -> f64 {
    if ranks.is_empty() {
        return 0.0;
    }
    let variance = ranks
        .iter()
        .map(|r| {
            let delta = *r as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / ranks.len() as f64;
    variance.sqrt()
}
