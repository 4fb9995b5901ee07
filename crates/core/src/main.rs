use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::{PathFinder, SearchConfig};
use provider::TmdbClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod bench;
mod report;

#[derive(Parser)]
#[command(name = "castlink")]
#[command(about = "Shortest connection chains between movies via shared cast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Concurrent neighbor resolutions per BFS level.
    #[arg(long, global = true, default_value_t = 16)]
    max_parallel: usize,

    /// Per-person filmography cap during neighbor expansion (0 = uncapped).
    #[arg(long, global = true, default_value_t = 24)]
    search_factor: usize,

    /// Per-request timeout for TMDB calls, in seconds.
    #[arg(long, global = true, default_value_t = 5)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and print the shortest connection chain between two titles.
    Path {
        from: String,
        to: String,
    },

    /// Time repeated searches from a cold cache.
    Bench {
        #[arg(long, default_value_t = 5)]
        iterations: usize,

        from: String,
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let token = std::env::var("TMDB_BEARER_TOKEN")
        .context("TMDB_BEARER_TOKEN is not set")?;
    let timeout = Duration::from_secs(cli.timeout_secs);
    let config = SearchConfig {
        max_parallel: cli.max_parallel,
        search_factor: cli.search_factor,
    };

    match cli.command {
        Commands::Path { from, to } => {
            let client = Arc::new(TmdbClient::new(&token, timeout)?);
            let finder = PathFinder::new(client.clone()).with_config(config);

            let path = finder.find_path(&from, &to).await?;
            let (persons, filmographies, neighbors) = finder.cache().stats();
            info!(persons, filmographies, neighbors, "cache entries after search");

            report::print_path(client.as_ref(), &path).await?;
        }
        Commands::Bench {
            iterations,
            from,
            to,
        } => {
            let outcome = bench::run(&token, timeout, config, iterations, &from, &to).await?;
            println!(
                "{} iterations: avg {:.2?} per search, avg path length {:.2}",
                outcome.iterations, outcome.avg_duration, outcome.avg_len
            );
        }
    }

    Ok(())
}
