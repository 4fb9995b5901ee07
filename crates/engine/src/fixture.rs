//! In-memory provider for engine tests: a hand-seeded graph with optional
//! failure injection and a counter of edge-discovery calls.

use protocol::{MovieId, MovieRef, PersonId, Provider};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct StaticProvider {
    movie_persons: FxHashMap<MovieId, Vec<PersonId>>,
    person_movies: FxHashMap<PersonId, Vec<MovieId>>,
    titles: FxHashMap<String, MovieId>,
    fail_on: FxHashSet<MovieId>,
    expansion_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `title` resolve to `movie`.
    pub fn with_title(mut self, title: &str, movie: i64) -> Self {
        self.titles.insert(title.to_string(), MovieId(movie));
        self
    }

    /// Add an undirected edge: both movies gain `person` in their cast and
    /// `person`'s filmography gains both movies.
    pub fn with_link(mut self, left: i64, right: i64, person: i64) -> Self {
        let (left, right, person) = (MovieId(left), MovieId(right), PersonId(person));
        for movie in [left, right] {
            let cast = self.movie_persons.entry(movie).or_default();
            if !cast.contains(&person) {
                cast.push(person);
            }
        }
        let films = self.person_movies.entry(person).or_default();
        for movie in [left, right] {
            if !films.contains(&movie) {
                films.push(movie);
            }
        }
        self
    }

    /// Cast lookups for `movie` fail.
    pub fn failing_on(mut self, movie: i64) -> Self {
        self.fail_on.insert(MovieId(movie));
        self
    }

    /// Number of edge-discovery provider calls made so far (title resolution
    /// and display lookups are not counted).
    pub fn expansion_calls(&self) -> usize {
        self.expansion_calls.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl Provider for StaticProvider {
    async fn resolve_title(&self, title: &str) -> anyhow::Result<Option<MovieRef>> {
        Ok(self.titles.get(title).map(|&id| MovieRef {
            id,
            title: title.to_string(),
        }))
    }

    async fn persons_for_movie(&self, movie: MovieId) -> anyhow::Result<Vec<PersonId>> {
        self.expansion_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_on.contains(&movie) {
            anyhow::bail!("injected failure for movie {movie}");
        }
        Ok(self.movie_persons.get(&movie).cloned().unwrap_or_default())
    }

    async fn movies_for_person(&self, person: PersonId) -> anyhow::Result<Vec<MovieId>> {
        self.expansion_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.person_movies.get(&person).cloned().unwrap_or_default())
    }

    async fn display_title(&self, movie: MovieId) -> anyhow::Result<MovieRef> {
        Ok(MovieRef {
            id: movie,
            title: format!("movie-{movie}"),
        })
    }

    async fn person_name(&self, person: PersonId) -> anyhow::Result<String> {
        Ok(format!("person-{person}"))
    }
}
