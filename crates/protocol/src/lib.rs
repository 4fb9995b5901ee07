use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a movie node in the connection graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct MovieId(pub i64);

/// Identifier of a credited person linking movies together.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered chain of movie ids where consecutive movies share a cast member.
pub type Path = Vec<MovieId>;

/// A resolved movie: its graph id plus the display title the provider knows it by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRef {
    pub id: MovieId,
    pub title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("could not find \"{0}\"")]
    TitleNotFound(String),

    #[error("provider request failed: {0}")]
    Provider(anyhow::Error),

    #[error("no path between {src} and {dest}")]
    NoPath { src: MovieId, dest: MovieId },

    /// Post-reconstruction validation failed. Indicates a defect in
    /// predecessor-map construction, never a normal runtime outcome.
    #[error("reconstructed path does not span {src} -> {dest}")]
    InconsistentPath { src: MovieId, dest: MovieId },
}

/// Remote source of graph edges and display metadata.
///
/// The engine treats whatever the provider returns for a node as ground truth
/// for that node at that time; bounded or paginated responses are the
/// provider's business, not the engine's.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Resolve a title to a movie, or `None` if nothing matches.
    async fn resolve_title(&self, title: &str) -> anyhow::Result<Option<MovieRef>>;

    /// Credited cast of a movie.
    async fn persons_for_movie(&self, movie: MovieId) -> anyhow::Result<Vec<PersonId>>;

    /// Filmography of a person, most relevant first.
    async fn movies_for_person(&self, person: PersonId) -> anyhow::Result<Vec<MovieId>>;

    /// Display lookup by id. Presentation only, never used by traversal.
    async fn display_title(&self, movie: MovieId) -> anyhow::Result<MovieRef>;

    /// Display name of a person. Presentation only.
    async fn person_name(&self, person: PersonId) -> anyhow::Result<String>;
}
