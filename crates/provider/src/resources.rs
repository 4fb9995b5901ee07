//! Wire shapes for the TMDB v3 endpoints the client consumes.

use protocol::{MovieId, PersonId};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MovieResource {
    pub id: MovieId,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonResource {
    pub id: PersonId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoviePage {
    pub results: Vec<MovieResource>,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Deserialize)]
pub struct CastEntry {
    pub id: PersonId,
    #[serde(default)]
    pub character: String,
}

#[derive(Debug, Deserialize)]
pub struct Credits {
    pub cast: Vec<CastEntry>,
}
