use cache::AdjacencyCache;
use protocol::{MovieId, PersonId, Provider, SearchError};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves a movie's neighbor set: every movie sharing at least one credited
/// person with it. Cache first, provider on miss, with all three relations
/// written back. No lock is held across provider I/O, so concurrent misses
/// for the same movie may fetch redundantly; the writes are value-equal.
pub struct AdjacencyResolver {
    provider: Arc<dyn Provider>,
    cache: Arc<AdjacencyCache>,
    search_factor: usize,
}

impl AdjacencyResolver {
    /// `search_factor` caps how many of a person's movies are unioned into a
    /// neighbor set (bounds fan-out through heavily credited people); zero
    /// means uncapped. The cache always stores the full fetched list.
    pub fn new(
        provider: Arc<dyn Provider>,
        cache: Arc<AdjacencyCache>,
        search_factor: usize,
    ) -> Self {
        Self {
            provider,
            cache,
            search_factor,
        }
    }

    pub async fn neighbors(&self, movie: MovieId) -> Result<Arc<FxHashSet<MovieId>>, SearchError> {
        if let Some(hit) = self.cache.neighbors_for(movie) {
            return Ok(hit);
        }

        let persons = self.persons(movie).await?;
        let mut union = FxHashSet::default();
        for &person in persons.iter() {
            let movies = self.movies(person, movie).await?;
            let cap = if self.search_factor == 0 {
                movies.len()
            } else {
                self.search_factor
            };
            for &other in movies.iter().take(cap) {
                if other != movie {
                    union.insert(other);
                }
            }
        }

        debug!(%movie, degree = union.len(), "resolved neighbors");
        Ok(self.cache.put_neighbors(movie, union))
    }

    async fn persons(&self, movie: MovieId) -> Result<Arc<Vec<PersonId>>, SearchError> {
        if let Some(hit) = self.cache.persons_for(movie) {
            return Ok(hit);
        }
        let fetched = self
            .provider
            .persons_for_movie(movie)
            .await
            .map_err(SearchError::Provider)?;
        Ok(self.cache.put_persons(movie, fetched))
    }

    /// A person's filmography, guaranteed to contain `via`: the provider's
    /// filmography pages are bounded and may omit the very movie whose cast
    /// listed the person, which would break adjacency symmetry. The movie is
    /// prepended so the `search_factor` cap cannot drop it either.
    async fn movies(&self, person: PersonId, via: MovieId) -> Result<Arc<Vec<MovieId>>, SearchError> {
        if let Some(hit) = self.cache.movies_for(person) {
            if hit.contains(&via) {
                return Ok(hit);
            }
            let mut extended = Vec::with_capacity(hit.len() + 1);
            extended.push(via);
            extended.extend(hit.iter().copied());
            return Ok(self.cache.put_movies(person, extended));
        }

        let mut fetched = self
            .provider
            .movies_for_person(person)
            .await
            .map_err(SearchError::Provider)?;
        if !fetched.contains(&via) {
            fetched.insert(0, via);
        }
        Ok(self.cache.put_movies(person, fetched))
    }
}
