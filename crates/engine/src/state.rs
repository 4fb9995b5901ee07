use dashmap::{DashMap, DashSet};
use protocol::MovieId;

/// Per-side set of discovered nodes. Insertion is the single arbiter of
/// "first discoverer": under concurrent discovery from multiple predecessors
/// exactly one caller sees `insert` return true for a given node.
pub struct VisitedSet {
    inner: DashSet<MovieId>,
}

impl VisitedSet {
    pub fn new(root: MovieId) -> Self {
        let inner = DashSet::new();
        inner.insert(root);
        Self { inner }
    }

    /// Atomic check-and-set. Returns true iff the node was newly inserted.
    pub fn insert(&self, node: MovieId) -> bool {
        self.inner.insert(node)
    }

    pub fn contains(&self, node: MovieId) -> bool {
        self.inner.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Per-side discovery chains: each node maps to the node that first reached
/// it, with the root mapping to `None`. Only the first recording for a node
/// sticks; there is no way to overwrite an existing link.
pub struct PredecessorMap {
    inner: DashMap<MovieId, Option<MovieId>>,
}

impl PredecessorMap {
    pub fn new(root: MovieId) -> Self {
        let inner = DashMap::new();
        inner.insert(root, None);
        Self { inner }
    }

    pub fn record(&self, node: MovieId, predecessor: MovieId) {
        self.inner.entry(node).or_insert(Some(predecessor));
    }

    /// Walk from `node` back to the root: `[node, pred(node), ..., root]`.
    /// Returns `None` if `node` was never recorded on this side.
    pub fn walk(&self, node: MovieId) -> Option<Vec<MovieId>> {
        let mut chain = vec![node];
        let mut current = node;
        loop {
            let link = *self.inner.get(&current)?;
            match link {
                None => return Some(chain),
                Some(prev) => {
                    chain.push(prev);
                    current = prev;
                }
            }
        }
    }
}
