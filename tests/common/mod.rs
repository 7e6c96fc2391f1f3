//! Deterministic SERP fixtures for integration tests
//!
//! One fixed catalog of results and a fixed per-day lineup schedule, so two
//! seeding runs always produce identical rows. No randomness.

use anyhow::Result;
use chrono::{Duration, Utc};

use serptrace::{SearchResult, SerpStore};

/// Result catalog: (url, title, snippet), one domain per entry. Entries 10
/// and 11 only enter the lineup on later days, exercising new-entrant paths.
pub const CATALOG: &[(&str, &str, &str)] = &[
    (
        "https://rocket.rs/",
        "Rocket - Simple, Fast, Type-Safe Web Framework for Rust",
        "Rocket is a web framework for Rust that makes it simple to write fast, secure web applications.",
    ),
    (
        "https://actix.rs/",
        "Actix Web - A powerful, pragmatic web framework",
        "Actix Web is a powerful, pragmatic, and extremely fast web framework for Rust.",
    ),
    (
        "https://github.com/tokio-rs/axum",
        "tokio-rs/axum: Ergonomic and modular web framework",
        "Ergonomic and modular web framework built with Tokio, Tower, and Hyper.",
    ),
    (
        "https://www.arewewebyet.org/",
        "Are we web yet? Yes! And it's freaking fast!",
        "Rust has mature and production ready frameworks for building web applications.",
    ),
    (
        "https://blog.logrocket.com/top-rust-web-frameworks/",
        "Top Rust web frameworks - LogRocket Blog",
        "A detailed comparison of the most popular Rust web frameworks in use today.",
    ),
    (
        "https://www.reddit.com/r/rust/comments/webframeworks/",
        "Which web framework should I pick? : r/rust",
        "Community discussion about choosing between Actix, Axum, Rocket, and Warp.",
    ),
    (
        "https://docs.rs/warp/",
        "warp - Rust documentation",
        "A super-easy, composable web server framework for warp speeds.",
    ),
    (
        "https://www.youtube.com/watch?v=rust-web",
        "Rust Web Development Full Course",
        "Learn to build full-stack web applications in Rust from scratch.",
    ),
    (
        "https://crates.io/crates/tide",
        "tide - crates.io: Rust Package Registry",
        "A minimal and pragmatic Rust web application framework built for rapid development.",
    ),
    (
        "https://www.freecodecamp.org/news/rust-web-dev/",
        "How to Build a Web App in Rust - freeCodeCamp",
        "Step-by-step tutorial covering routing, templating, and deployment in Rust.",
    ),
    (
        "https://loco.rs/",
        "Loco - The one-person framework for Rust",
        "Rails-inspired framework for building products quickly in Rust.",
    ),
    (
        "https://leptos.dev/",
        "Leptos - Full-stack web framework for Rust",
        "Build interactive web applications in Rust with fine-grained reactivity.",
    ),
];

/// Catalog indices per day, position = rank - 1. Day 3 introduces entry 10,
/// day 4 entry 11; later days reshuffle without new domains.
const SCHEDULE: &[&[usize]] = &[
    &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    &[0, 1, 5, 3, 4, 2, 6, 7, 8, 9],
    &[3, 1, 5, 0, 4, 2, 9, 7, 8, 6],
    &[3, 1, 5, 10, 0, 4, 2, 9, 7, 8],
    &[3, 11, 1, 5, 10, 0, 4, 2, 9, 7],
    &[3, 11, 5, 1, 10, 0, 4, 2, 9, 7],
    &[11, 3, 5, 1, 10, 0, 2, 4, 7, 9],
];

pub fn result(idx: usize) -> SearchResult {
    let (url, title, snippet) = CATALOG[idx];
    SearchResult::new(url, title, snippet)
}

/// The top-10 lineup for a given day index (cycles past day 6)
pub fn lineup(day: usize) -> Vec<SearchResult> {
    SCHEDULE[day % SCHEDULE.len()]
        .iter()
        .map(|&idx| result(idx))
        .collect()
}

/// Seed `days` consecutive daily snapshots for a query, ending today
pub fn seed(store: &SerpStore, query: &str, days: usize) -> Result<()> {
    let today = Utc::now().date_naive();
    for day in 0..days {
        let date = today - Duration::days((days - 1 - day) as i64);
        let captured = date.and_hms_opt(7, 0, 0).unwrap().and_utc();
        store.insert_snapshot(query, &lineup(day), captured)?;
    }
    Ok(())
}
