//! Interest score engine
//!
//! Quantifies day-over-day SERP turbulence for a query as a single 0-100
//! number by comparing the top-10 domain sets of two adjacent snapshot
//! dates. Scores live in their own table and are recomputed idempotently;
//! snapshot rows are treated as read-only input.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::collections::HashMap;

use super::store;

/// Only positions at or above this rank feed the score
pub const TOP_WINDOW: i64 = 10;

/// Sub-metrics behind one interest score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Composite 0-100 score
    pub interest_score: f64,
    /// Domains in the current top-10 that were absent the previous day
    pub new_domains_count: i64,
    /// Mean of (prev_rank - current_rank) over domains present both days
    pub avg_rank_improvement: f64,
    /// Fraction of current top-10 domains that were also present the
    /// previous day. The name is historical; this is an overlap ratio,
    /// not a churn count.
    pub reshuffle_frequency: f64,
}

/// Compute and store the interest score for `(query, date)`.
///
/// Returns `Ok(None)` without writing anything when no earlier snapshot
/// exists for the query - the first observation has no comparison baseline.
pub fn compute_score(
    conn: &Connection,
    query: &str,
    date: NaiveDate,
) -> Result<Option<ScoreBreakdown>> {
    let prev_date = match store::previous_date(conn, query, date)? {
        Some(d) => d,
        None => return Ok(None),
    };

    let current = top_domain_map(conn, query, date)?;
    let previous = top_domain_map(conn, query, prev_date)?;

    let new_domains_count = current
        .keys()
        .filter(|domain| !previous.contains_key(*domain))
        .count() as i64;

    // Pair each retained domain's current rank with its previous rank;
    // positive delta means it moved up
    let mut improvements = Vec::new();
    for (domain, rank) in &current {
        if let Some(prev_rank) = previous.get(domain) {
            improvements.push((prev_rank - rank) as f64);
        }
    }

    let avg_rank_improvement = if improvements.is_empty() {
        0.0
    } else {
        improvements.iter().sum::<f64>() / improvements.len() as f64
    };

    let reshuffle_frequency = improvements.len() as f64 / current.len().max(1) as f64;

    // Three weighted sub-scores, each clamped independently:
    //   new domains      0..10 -> 0..40
    //   rank improvement -10..+10 -> 0..30
    //   overlap ratio    0..1  -> 0..30
    let new_domains_score = ((new_domains_count * 4) as f64).min(40.0);
    let rank_improvement_score = ((avg_rank_improvement + 10.0) / 20.0 * 30.0).clamp(0.0, 30.0);
    let reshuffle_score = reshuffle_frequency * 30.0;

    let interest_score = new_domains_score + rank_improvement_score + reshuffle_score;

    conn.execute(
        "INSERT OR REPLACE INTO interest_scores
         (query, snapshot_date, interest_score, new_domains_count, avg_rank_improvement, reshuffle_frequency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            query,
            date,
            interest_score,
            new_domains_count,
            avg_rank_improvement,
            reshuffle_frequency,
        ],
    )?;

    Ok(Some(ScoreBreakdown {
        interest_score,
        new_domains_count,
        avg_rank_improvement,
        reshuffle_frequency,
    }))
}

/// Compute scores for every (query, date) pair that lacks one.
///
/// Pairs whose computation fails are skipped; the batch continues. Returns
/// the number of scores newly written.
pub fn compute_all(conn: &Connection, query: Option<&str>) -> Result<usize> {
    let pairs = store::distinct_query_dates(conn, query)?;

    let mut computed = 0;
    for (q, date) in pairs {
        match compute_missing(conn, &q, date) {
            Ok(true) => computed += 1,
            Ok(false) => {}
            Err(err) => {
                eprintln!("Warning: skipping score for '{}' on {}: {:#}", q, date, err);
            }
        }
    }

    Ok(computed)
}

/// Compute one pair unless a score row already exists
fn compute_missing(conn: &Connection, query: &str, date: NaiveDate) -> Result<bool> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM interest_scores WHERE query = ?1 AND snapshot_date = ?2",
        params![query, date],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Ok(false);
    }

    Ok(compute_score(conn, query, date)?.is_some())
}

/// Distinct top-10 domains with their rank for one query/date. Rows arrive
/// rank-ascending, so a domain holding several positions keeps its best rank.
fn top_domain_map(conn: &Connection, query: &str, date: NaiveDate) -> Result<HashMap<String, i64>> {
    let mut domains = HashMap::new();
    for (domain, rank) in store::top_domain_ranks(conn, query, date, TOP_WINDOW)? {
        domains.entry(domain).or_insert(rank);
    }
    Ok(domains)
}
