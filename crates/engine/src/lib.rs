//! Concurrent bidirectional BFS over the implicit movie-connection graph.
//!
//! Edges are discovered lazily through a [`protocol::Provider`] and memoized
//! in an [`cache::AdjacencyCache`]. Two level-synchronized frontier searches
//! run concurrently, one rooted at each endpoint, each reading the opposite
//! side's visited set to detect meeting points; the coordinator arbitrates
//! among meeting candidates and splices the winning path.

pub mod fixture;

mod frontier;
mod path;
mod resolver;
mod search;
mod state;

pub use resolver::AdjacencyResolver;
pub use search::{PathFinder, SearchConfig};
pub use state::{PredecessorMap, VisitedSet};
