//! TMDB API client wrapper

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::types::{MovieSummary, ResultPage};
use crate::config::Settings;
use crate::{log_search_request, log_search_result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("TMDB API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of movie search results
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, ClientError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    page: u32,
    results: Vec<MovieSummary>,
    total_pages: u32,
    total_results: u64,
}

impl From<SearchResponse> for ResultPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            page: response.page,
            items: response.results,
            total_pages: response.total_pages,
            total_results: response.total_results,
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    access_token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            access_token: settings.access_token.clone(),
            language: settings.language.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_search_page(&self, query: &str, page: u32) -> Result<ResultPage, ClientError> {
        let page_param = page.to_string();
        let response = self
            .client
            .get(self.url("/search/movie"))
            .bearer_auth(&self.access_token)
            .query(&[
                ("query", query),
                ("include_adult", "false"),
                ("language", self.language.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_search_response(&body)
    }
}

#[async_trait]
impl MetadataClient for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<ResultPage, ClientError> {
        let started = log_search_request!(query, page);
        let result = self.fetch_search_page(query, page).await;
        log_search_result!(started, query, page, result);
        result
    }
}

fn parse_search_response(body: &str) -> Result<ResultPage, ClientError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.into())
}
