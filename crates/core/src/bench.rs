//! Cold-cache latency measurement: each iteration builds a fresh client and
//! finder so nothing is memoized across runs.

use anyhow::Result;
use engine::{PathFinder, SearchConfig};
use provider::TmdbClient;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

pub struct BenchOutcome {
    pub iterations: usize,
    pub avg_duration: Duration,
    pub avg_len: f64,
}

pub async fn run(
    token: &str,
    timeout: Duration,
    config: SearchConfig,
    iterations: usize,
    from: &str,
    to: &str,
) -> Result<BenchOutcome> {
    let iterations = iterations.max(1);
    let start = Instant::now();
    let mut total_len = 0usize;

    for i in 0..iterations {
        let client = Arc::new(TmdbClient::new(token, timeout)?);
        let finder = PathFinder::new(client).with_config(config);
        let path = finder.find_path(from, to).await?;
        info!(iteration = i + 1, len = path.len(), "bench search finished");
        total_len += path.len();
    }

    let elapsed = start.elapsed();
    Ok(BenchOutcome {
        iterations,
        avg_duration: elapsed / iterations as u32,
        avg_len: total_len as f64 / iterations as f64,
    })
}
