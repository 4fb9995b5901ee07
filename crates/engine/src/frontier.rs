use crate::resolver::AdjacencyResolver;
use crate::state::{PredecessorMap, VisitedSet};
use parking_lot::Mutex;
use protocol::{MovieId, SearchError};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// How one side's expansion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SideEnd {
    /// This side confirmed at least one meeting candidate at a level boundary.
    Met,
    /// This side's frontier emptied without any candidate: its whole component
    /// is visited, so no path can exist.
    Exhausted,
    /// The shared stop flag was raised by the other side.
    Stopped,
}

/// State shared between the two sides and the coordinator.
pub(crate) struct SharedSearch {
    stop: AtomicBool,
    /// Meeting candidates in discovery order, deduplicated.
    candidates: Mutex<Vec<MovieId>>,
    /// Bounds concurrent neighbor resolutions across both sides.
    pub(crate) limiter: Arc<Semaphore>,
}

impl SharedSearch {
    pub(crate) fn new(max_parallel: usize) -> Self {
        Self {
            stop: AtomicBool::new(false),
            candidates: Mutex::new(Vec::new()),
            limiter: Arc::new(Semaphore::new(max_parallel.max(1))),
        }
    }

    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    fn push_candidate(&self, node: MovieId) {
        let mut candidates = self.candidates.lock();
        if !candidates.contains(&node) {
            candidates.push(node);
        }
    }

    fn has_candidates(&self) -> bool {
        !self.candidates.lock().is_empty()
    }

    pub(crate) fn take_candidates(&self) -> Vec<MovieId> {
        std::mem::take(&mut *self.candidates.lock())
    }
}

/// One side's visited set and discovery chains. A side writes only its own
/// maps and reads the opposite side's visited set, never the reverse.
pub(crate) struct SideState {
    pub(crate) visited: VisitedSet,
    pub(crate) predecessors: PredecessorMap,
}

impl SideState {
    pub(crate) fn new(root: MovieId) -> Self {
        Self {
            visited: VisitedSet::new(root),
            predecessors: PredecessorMap::new(root),
        }
    }
}

/// Level-synchronized expansion of one side. Each level fans out at most
/// `max_parallel` concurrent neighbor resolutions (semaphore-bounded) and is
/// fully joined before the next begins, so the first meeting candidate a side
/// reports is at minimal depth for that side. The stop flag is only consulted
/// at level boundaries: a level that produced candidates always drains first,
/// which is what lets arbitration pick a true minimum instead of whichever
/// candidate happened to land first.
pub(crate) async fn expand_side(
    resolver: Arc<AdjacencyResolver>,
    shared: Arc<SharedSearch>,
    mine: Arc<SideState>,
    theirs: Arc<SideState>,
    root: MovieId,
    label: &'static str,
) -> Result<SideEnd, SearchError> {
    let mut frontier = vec![root];
    let mut level = 0usize;

    loop {
        if shared.stopped() {
            return Ok(SideEnd::Stopped);
        }
        level += 1;
        debug!(side = label, level, width = frontier.len(), "expanding");

        let mut tasks: JoinSet<Result<(MovieId, Arc<FxHashSet<MovieId>>), SearchError>> =
            JoinSet::new();
        for node in frontier.drain(..) {
            let resolver = resolver.clone();
            let limiter = shared.limiter.clone();
            tasks.spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .expect("search semaphore is never closed");
                let neighbors = resolver.neighbors(node).await?;
                Ok((node, neighbors))
            });
        }

        let mut next = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (node, neighbors) = match joined {
                Ok(Ok(result)) => result,
                Ok(Err(err)) => {
                    // Dropping `tasks` aborts the rest of the level.
                    shared.request_stop();
                    return Err(err);
                }
                Err(join_err) => {
                    shared.request_stop();
                    return Err(SearchError::Provider(anyhow::Error::new(join_err)));
                }
            };

            for &neighbor in neighbors.iter() {
                // Record before the visited insert: once a node is observable
                // in this side's visited set its chain must already walk.
                mine.predecessors.record(neighbor, node);
                if mine.visited.insert(neighbor) {
                    next.push(neighbor);
                }
                if theirs.visited.contains(neighbor) {
                    shared.push_candidate(neighbor);
                }
            }
        }

        if shared.has_candidates() {
            debug!(side = label, level, "meeting candidate confirmed");
            shared.request_stop();
            return Ok(SideEnd::Met);
        }
        if next.is_empty() {
            debug!(side = label, level, visited = mine.visited.len(), "exhausted");
            shared.request_stop();
            return Ok(SideEnd::Exhausted);
        }
        frontier = next;
    }
}
