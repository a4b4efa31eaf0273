//! Async HTTP client for the Jikan REST API (the public MyAnimeList API).
//!
//! Only used by the terminal client for the top list, search, and the
//! synopsis pane. The import path never touches the network.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.jikan.moe/v4";

/// The slice of a Jikan anime object the client renders.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAnime {
  pub mal_id: i64,
  pub title:  String,
  #[serde(default)]
  pub rating:   Option<String>,
  #[serde(default)]
  pub score:    Option<f64>,
  #[serde(default)]
  pub episodes: Option<u32>,
  #[serde(default)]
  pub status:   Option<String>,
  #[serde(default)]
  pub synopsis: Option<String>,
}

#[derive(Deserialize)]
struct ListResponse {
  data: Vec<RemoteAnime>,
}

#[derive(Deserialize)]
struct ItemResponse {
  data: RemoteAnime,
}

/// Async Jikan client.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct JikanClient {
  client:   Client,
  base_url: String,
}

impl JikanClient {
  pub fn new() -> Result<Self> {
    Self::with_base_url(BASE_URL.to_owned())
  }

  pub fn with_base_url(base_url: String) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(4))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url })
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T> {
    let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
    let resp = self
      .client
      .get(&url)
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {path} response"))
  }

  /// `GET /top/anime`
  pub async fn top_anime(&self) -> Result<Vec<RemoteAnime>> {
    let resp: ListResponse = self.get_json("/top/anime", &[]).await?;
    Ok(resp.data)
  }

  /// `GET /anime?q=<query>`
  pub async fn search(&self, query: &str) -> Result<Vec<RemoteAnime>> {
    let resp: ListResponse = self.get_json("/anime", &[("q", query)]).await?;
    Ok(resp.data)
  }

  /// `GET /anime/<id>`
  pub async fn anime_by_id(&self, id: i64) -> Result<RemoteAnime> {
    let resp: ItemResponse = self.get_json(&format!("/anime/{id}"), &[]).await?;
    Ok(resp.data)
  }
}
