use parking_lot::RwLock;
use protocol::{MovieId, PersonId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// In-memory memoization of the three edge-discovery relations:
/// movie -> credited persons, person -> filmography, movie -> neighbor movies.
///
/// Entries are whole-value `Arc`s replaced atomically under a write lock, so a
/// concurrent reader either misses or sees a complete set, never a partial
/// one. Nothing is ever evicted or expired; entries live for the process run.
/// Concurrent misses for the same key may each fetch and write back
/// redundantly; writes are value-equal, so last writer wins harmlessly.
#[derive(Default)]
pub struct AdjacencyCache {
    movie_persons: RwLock<FxHashMap<MovieId, Arc<Vec<PersonId>>>>,
    person_movies: RwLock<FxHashMap<PersonId, Arc<Vec<MovieId>>>>,
    neighbors: RwLock<FxHashMap<MovieId, Arc<FxHashSet<MovieId>>>>,
}

impl AdjacencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons_for(&self, movie: MovieId) -> Option<Arc<Vec<PersonId>>> {
        self.movie_persons.read().get(&movie).cloned()
    }

    pub fn put_persons(&self, movie: MovieId, persons: Vec<PersonId>) -> Arc<Vec<PersonId>> {
        let persons = Arc::new(persons);
        self.movie_persons.write().insert(movie, persons.clone());
        persons
    }

    pub fn movies_for(&self, person: PersonId) -> Option<Arc<Vec<MovieId>>> {
        self.person_movies.read().get(&person).cloned()
    }

    pub fn put_movies(&self, person: PersonId, movies: Vec<MovieId>) -> Arc<Vec<MovieId>> {
        let movies = Arc::new(movies);
        self.person_movies.write().insert(person, movies.clone());
        movies
    }

    pub fn neighbors_for(&self, movie: MovieId) -> Option<Arc<FxHashSet<MovieId>>> {
        self.neighbors.read().get(&movie).cloned()
    }

    pub fn put_neighbors(
        &self,
        movie: MovieId,
        neighbors: FxHashSet<MovieId>,
    ) -> Arc<FxHashSet<MovieId>> {
        let neighbors = Arc::new(neighbors);
        self.neighbors.write().insert(movie, neighbors.clone());
        neighbors
    }

    /// Entry counts per relation: (movie->persons, person->movies, neighbors).
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.movie_persons.read().len(),
            self.person_movies.read().len(),
            self.neighbors.read().len(),
        )
    }
}
