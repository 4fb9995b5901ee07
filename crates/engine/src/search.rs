use crate::frontier::{expand_side, SharedSearch, SideEnd, SideState};
use crate::path::splice;
use crate::resolver::AdjacencyResolver;
use cache::AdjacencyCache;
use protocol::{MovieId, Path, Provider, SearchError};
use std::sync::Arc;
use tracing::{debug, info};

/// Tuning knobs for a search run.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Upper bound on concurrent neighbor resolutions per level.
    pub max_parallel: usize,
    /// Per-person filmography cap during neighbor union; zero is uncapped.
    pub search_factor: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_parallel: 16,
            search_factor: 24,
        }
    }
}

/// Bidirectional coordinator: owns the provider and cache, drives both
/// frontier searches, arbitrates meeting candidates and validates the result.
///
/// One `PathFinder` holds one cache for its lifetime; repeated calls reuse
/// every adjacency already discovered. Dropping the future returned by a
/// search aborts all in-flight expansion work.
pub struct PathFinder {
    provider: Arc<dyn Provider>,
    cache: Arc<AdjacencyCache>,
    config: SearchConfig,
}

impl PathFinder {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self::with_cache(provider, Arc::new(AdjacencyCache::new()))
    }

    pub fn with_cache(provider: Arc<dyn Provider>, cache: Arc<AdjacencyCache>) -> Self {
        Self {
            provider,
            cache,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_max_parallel(&mut self, max_parallel: usize) {
        self.config.max_parallel = max_parallel;
    }

    pub fn set_search_factor(&mut self, search_factor: usize) {
        self.config.search_factor = search_factor;
    }

    pub fn cache(&self) -> &Arc<AdjacencyCache> {
        &self.cache
    }

    /// Resolve both titles and search for the shortest connection chain.
    pub async fn find_path(&self, src_title: &str, dest_title: &str) -> Result<Path, SearchError> {
        let src = self
            .provider
            .resolve_title(src_title)
            .await
            .map_err(SearchError::Provider)?
            .ok_or_else(|| SearchError::TitleNotFound(src_title.to_string()))?;
        let dest = self
            .provider
            .resolve_title(dest_title)
            .await
            .map_err(SearchError::Provider)?
            .ok_or_else(|| SearchError::TitleNotFound(dest_title.to_string()))?;

        info!(src = %src.id, dest = %dest.id, "resolved titles");
        self.find_path_between(src.id, dest.id).await
    }

    /// Search between two already resolved movie ids.
    pub async fn find_path_between(
        &self,
        src: MovieId,
        dest: MovieId,
    ) -> Result<Path, SearchError> {
        if src == dest {
            return Ok(vec![src]);
        }

        let resolver = Arc::new(AdjacencyResolver::new(
            self.provider.clone(),
            self.cache.clone(),
            self.config.search_factor,
        ));
        let shared = Arc::new(SharedSearch::new(self.config.max_parallel));
        let src_state = Arc::new(SideState::new(src));
        let dest_state = Arc::new(SideState::new(dest));

        // Both sides on the caller's task: cancellation is just dropping us,
        // and each side's JoinSet aborts its in-flight level on drop.
        let (src_end, dest_end) = tokio::join!(
            expand_side(
                resolver.clone(),
                shared.clone(),
                src_state.clone(),
                dest_state.clone(),
                src,
                "src",
            ),
            expand_side(
                resolver,
                shared.clone(),
                dest_state.clone(),
                src_state.clone(),
                dest,
                "dest",
            ),
        );
        let src_end = src_end?;
        let dest_end = dest_end?;

        let candidates = shared.take_candidates();
        debug!(
            ?src_end,
            ?dest_end,
            candidates = candidates.len(),
            src_visited = src_state.visited.len(),
            dest_visited = dest_state.visited.len(),
            "both sides finished"
        );

        if candidates.is_empty() {
            debug_assert!(matches!(src_end, SideEnd::Exhausted | SideEnd::Stopped));
            debug_assert!(matches!(dest_end, SideEnd::Exhausted | SideEnd::Stopped));
            return Err(SearchError::NoPath { src, dest });
        }

        let path = self
            .arbitrate(&src_state, &dest_state, candidates)
            .ok_or(SearchError::NoPath { src, dest })?;

        if path.first() != Some(&src) || path.last() != Some(&dest) {
            return Err(SearchError::InconsistentPath { src, dest });
        }

        info!(hops = path.len() - 1, "path found");
        Ok(path)
    }

    /// Pick the shortest spliced path among meeting candidates; ties go to
    /// the earliest discovered. Candidates whose halves do not both
    /// reconstruct (results of in-flight work after the stop) are skipped.
    fn arbitrate(
        &self,
        src_state: &SideState,
        dest_state: &SideState,
        candidates: Vec<MovieId>,
    ) -> Option<Path> {
        let mut best: Option<Path> = None;
        for meeting in candidates {
            let Some(src_half) = src_state.predecessors.walk(meeting) else {
                continue;
            };
            let Some(dest_half) = dest_state.predecessors.walk(meeting) else {
                continue;
            };
            let candidate = splice(src_half, dest_half);
            debug!(%meeting, len = candidate.len(), "meeting candidate");
            if best.as_ref().map_or(true, |b| candidate.len() < b.len()) {
                best = Some(candidate);
            }
        }
        best
    }
}
