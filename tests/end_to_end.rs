//! Pipeline tests: seed daily snapshots, let the score engine run on each
//! insert, then read everything back through the analytics surface.

mod common;

use anyhow::Result;
use serptrace::db::score;
use serptrace::{Analytics, SerpStore};
use tempfile::TempDir;

const QUERY: &str = "rust web framework";

fn seeded_database(days: usize) -> Result<(TempDir, std::path::PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("serp.db");
    let store = SerpStore::open(&db_path)?;
    common::seed(&store, QUERY, days)?;
    Ok((dir, db_path))
}

#[test]
fn test_scores_follow_inserts() -> Result<()> {
    let (_dir, db_path) = seeded_database(7)?;
    let analytics = Analytics::open(&db_path)?;

    let scores = analytics.interest_scores(QUERY, 30)?;

    // The first day has no baseline; every later day is scored on insert
    assert_eq!(scores.len(), 6);
    for pair in scores.windows(2) {
        assert!(pair[0].snapshot_date < pair[1].snapshot_date);
    }
    for row in &scores {
        assert!(
            row.interest_score >= 0.0 && row.interest_score <= 100.0,
            "score {} out of bounds",
            row.interest_score
        );
        assert!(row.new_domains_count >= 0 && row.new_domains_count <= 10);
        assert!(row.reshuffle_frequency >= 0.0 && row.reshuffle_frequency <= 1.0);
    }

    // Days 3 and 4 each introduce exactly one new domain
    assert_eq!(scores[2].new_domains_count, 1);
    assert_eq!(scores[3].new_domains_count, 1);
    // Day 1 only swaps two positions, no new domains
    assert_eq!(scores[0].new_domains_count, 0);
    Ok(())
}

#[test]
fn test_backfill_matches_per_insert_scoring() -> Result<()> {
    let (_dir, db_path) = seeded_database(5)?;

    let store = SerpStore::open(&db_path)?;
    let per_insert = Analytics::open(&db_path)?.interest_scores(QUERY, 30)?;

    store
        .connection()
        .execute("DELETE FROM interest_scores", [])?;
    let computed = score::compute_all(store.connection(), Some(QUERY))?;
    assert_eq!(computed, 4);
    drop(store);

    let backfilled = Analytics::open(&db_path)?.interest_scores(QUERY, 30)?;
    assert_eq!(backfilled.len(), per_insert.len());
    for (a, b) in per_insert.iter().zip(backfilled.iter()) {
        assert_eq!(a.snapshot_date, b.snapshot_date);
        assert_eq!(a.interest_score, b.interest_score);
        assert_eq!(a.new_domains_count, b.new_domains_count);
        assert_eq!(a.avg_rank_improvement, b.avg_rank_improvement);
        assert_eq!(a.reshuffle_frequency, b.reshuffle_frequency);
    }
    Ok(())
}

#[test]
fn test_summary_and_new_entrants() -> Result<()> {
    let (_dir, db_path) = seeded_database(7)?;
    let analytics = Analytics::open(&db_path)?;

    let stats = analytics.summary_stats(QUERY)?;
    assert_eq!(stats.total_snapshots, 7);
    assert_eq!(stats.unique_urls, 12);
    assert_eq!(stats.unique_domains, 12);
    assert!(stats.first_snapshot.unwrap() < stats.last_snapshot.unwrap());

    // Entries 10 and 11 first appear on days 3 and 4 (today-3 and today-2);
    // everything else predates a 3-day window
    let entrants = analytics.new_entrants(QUERY, 3)?;
    assert_eq!(entrants.len(), 2);
    assert_eq!(entrants[0].url, "https://leptos.dev/");
    assert_eq!(entrants[1].url, "https://loco.rs/");
    assert!(entrants[0].first_seen > entrants[1].first_seen);
    Ok(())
}

#[test]
fn test_volatility_over_fixture_history() -> Result<()> {
    let (_dir, db_path) = seeded_database(7)?;
    let analytics = Analytics::open(&db_path)?;

    let rows = analytics.rank_volatility(QUERY, 30)?;
    assert!(!rows.is_empty());
    assert!(rows.len() <= 50);

    // Every row saw at least two snapshots, and the fixture moves ranks
    assert!(rows.iter().all(|r| r.snapshot_count > 1));
    assert!(rows.iter().any(|r| r.rank_changes > 0));

    // Sorted most volatile first
    for pair in rows.windows(2) {
        assert!(pair[0].rank_stddev >= pair[1].rank_stddev);
    }
    Ok(())
}

#[test]
fn test_fixture_titles_are_stable() -> Result<()> {
    // The fixture never rewrites titles or snippets, so the change detector
    // must stay quiet over its whole history
    let (_dir, db_path) = seeded_database(7)?;
    let analytics = Analytics::open(&db_path)?;

    let changes = analytics.content_changes(QUERY, 30)?;
    assert!(changes.is_empty());
    Ok(())
}

#[test]
fn test_seeding_is_deterministic() -> Result<()> {
    let dump = |db_path: &std::path::Path| -> Result<Vec<(String, String, i64)>> {
        let store = SerpStore::open(db_path)?;
        let mut stmt = store.connection().prepare(
            "SELECT snapshot_date, url, rank FROM serp_snapshots
             ORDER BY snapshot_date, rank",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    };

    let (_dir_a, db_a) = seeded_database(7)?;
    let (_dir_b, db_b) = seeded_database(7)?;
    assert_eq!(dump(&db_a)?, dump(&db_b)?);
    Ok(())
}
