use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Track SERP snapshots and derive search interest trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch SERP snapshots for keywords
    Fetch {
        /// Keywords to track
        #[arg(long, num_args = 1.., required = true)]
        keywords: Vec<String>,

        /// Results per keyword
        #[arg(long, default_value_t = 10)]
        num_results: usize,

        /// Delay between API calls in seconds
        #[arg(long, default_value_t = 1.0)]
        delay: f64,
    },

    /// Show summary statistics for a query
    Analyze {
        /// Query keyword
        #[arg(long)]
        query: String,
    },

    /// Show rank volatility
    Volatility {
        /// Query keyword
        #[arg(long)]
        query: String,

        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: i64,
    },

    /// Show URLs appearing for the first time
    NewEntrants {
        /// Query keyword
        #[arg(long)]
        query: String,

        /// Days to analyze
        #[arg(long, default_value_t = 7)]
        days: i64,
    },

    /// Show title and snippet changes
    Changes {
        /// Query keyword
        #[arg(long)]
        query: String,

        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: i64,
    },

    /// Calculate interest scores for existing snapshots
    CalculateScores {
        /// Keywords to calculate scores for (all if omitted)
        #[arg(long, num_args = 1..)]
        keywords: Vec<String>,
    },

    /// Show interest scores and render a trend chart
    Scores {
        /// Query keyword
        #[arg(long)]
        query: String,

        /// Days to analyze
        #[arg(long, default_value_t = 90)]
        days: i64,

        /// Output PNG file path (default: {query}_trend.png)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            keywords,
            num_results,
            delay,
        } => {
            commands::fetch::execute(keywords, num_results, delay)?;
        }
        Commands::Analyze { query } => {
            commands::analyze::execute(&query)?;
        }
        Commands::Volatility { query, days } => {
            commands::volatility::execute(&query, days)?;
        }
        Commands::NewEntrants { query, days } => {
            commands::new_entrants::execute(&query, days)?;
        }
        Commands::Changes { query, days } => {
            commands::changes::execute(&query, days)?;
        }
        Commands::CalculateScores { keywords } => {
            commands::calculate_scores::execute(keywords)?;
        }
        Commands::Scores {
            query,
            days,
            output,
        } => {
            commands::scores::execute(&query, days, output)?;
        }
    }

    Ok(())
}
