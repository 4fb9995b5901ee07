//! TMDB HTTP/JSON client implementing the engine's [`Provider`] seam.
//!
//! Filmography lookups return the provider's first page only; the engine
//! treats that bounded subset as ground truth for the node (documented
//! trade-off, not silent loss). Retry policy belongs to callers.

mod resources;

use anyhow::Context;
use protocol::{MovieId, MovieRef, PersonId, Provider};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use resources::{Credits, MoviePage, MovieResource, PersonResource};

const BASE_URL: &str = "https://api.themoviedb.org/3/";
const SEARCH_PARAMS: &str = "?include_adult=false&page=1&query=";
const DISCOVER_PARAMS: &str =
    "?include_adult=false&include_video=false&language=en-US&page=1&sort_by=popularity.desc&with_people=";

pub struct TmdbClient {
    http: reqwest::Client,
    auth_header: String,
}

impl TmdbClient {
    /// `bearer_token` is the raw TMDB API read token; every request carries a
    /// fixed `timeout`.
    pub fn new(bearer_token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            auth_header: format!("Bearer {bearer_token}"),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> anyhow::Result<T> {
        debug!(%url, "tmdb request");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding response from {url}"))
    }
}

/// TMDB's search endpoint wants lowercased, plus-separated queries.
fn search_fragment(title: &str) -> String {
    title.to_lowercase().replace(' ', "+")
}

#[async_trait::async_trait]
impl Provider for TmdbClient {
    async fn resolve_title(&self, title: &str) -> anyhow::Result<Option<MovieRef>> {
        let url = format!("{BASE_URL}search/movie{SEARCH_PARAMS}{}", search_fragment(title));
        let page: MoviePage = self.get_json(url).await?;
        Ok(page.results.into_iter().next().map(|movie| MovieRef {
            id: movie.id,
            title: movie.title,
        }))
    }

    async fn persons_for_movie(&self, movie: MovieId) -> anyhow::Result<Vec<PersonId>> {
        let url = format!("{BASE_URL}movie/{movie}/credits");
        let credits: Credits = self.get_json(url).await?;
        Ok(credits
            .cast
            .into_iter()
            .filter(|entry| !entry.character.is_empty())
            .map(|entry| entry.id)
            .collect())
    }

    async fn movies_for_person(&self, person: PersonId) -> anyhow::Result<Vec<MovieId>> {
        let url = format!("{BASE_URL}discover/movie{DISCOVER_PARAMS}{person}");
        let page: MoviePage = self.get_json(url).await?;
        Ok(page.results.into_iter().map(|movie| movie.id).collect())
    }

    async fn display_title(&self, movie: MovieId) -> anyhow::Result<MovieRef> {
        let url = format!("{BASE_URL}movie/{movie}");
        let resource: MovieResource = self.get_json(url).await?;
        Ok(MovieRef {
            id: resource.id,
            title: resource.title,
        })
    }

    async fn person_name(&self, person: PersonId) -> anyhow::Result<String> {
        let url = format!("{BASE_URL}person/{person}");
        let resource: PersonResource = self.get_json(url).await?;
        Ok(resource.name)
    }
}
