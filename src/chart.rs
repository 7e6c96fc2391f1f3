//! PNG trend chart rendering
//!
//! Pure side effect on top of the analytics output: draws interest score
//! over time for one query. Not part of the scoring contract.

use anyhow::{anyhow, Result};
use chrono::Duration;
use plotters::prelude::*;
use std::path::Path;

use crate::analytics::ScoreRow;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

/// Render a line chart of interest score vs date.
///
/// No-op when there are no scores to plot.
pub fn render_score_chart(path: &Path, query: &str, days: i64, scores: &[ScoreRow]) -> Result<()> {
    if scores.is_empty() {
        return Ok(());
    }

    draw(path, query, days, scores)
        .map_err(|err| anyhow!("Failed to render chart to {}: {}", path.display(), err))
}

fn draw(
    path: &Path,
    query: &str,
    days: i64,
    scores: &[ScoreRow],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let first = scores[0].snapshot_date;
    let mut last = scores[scores.len() - 1].snapshot_date;
    if last == first {
        // A single data point needs a non-degenerate axis
        last += Duration::days(1);
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Search Interest Trend: {} ({} days)", query, days),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(first..last, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Interest Score (0-100)")
        .x_label_formatter(&|date| date.format("%Y-%m-%d").to_string())
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            scores.iter().map(|s| (s.snapshot_date, s.interest_score)),
            BLUE.stroke_width(2),
        ))?
        .label(query.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart.draw_series(
        scores
            .iter()
            .map(|s| Circle::new((s.snapshot_date, s.interest_score), 4, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
