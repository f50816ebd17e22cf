//! GitHub repository-search API client.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The search API caps per_page at 100; larger requests are paged.
const MAX_PAGE_SIZE: usize = 100;

/// Client for the GitHub repository search endpoint.
///
/// The token is injected at construction. Reading it from the environment
/// is the caller's job, done once at startup, so the client itself stays
/// testable without environment mutation.
#[derive(Clone)]
pub struct GitHubClient {
    token: Option<String>,
    base_url: String,
    client: Client,
}

/// Query parameters for a repository search: repositories created within
/// the date range, sorted by stars descending.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub count: usize,
    pub language: Option<String>,
}

impl SearchQuery {
    /// The `q` parameter, e.g. `created:2024-01-01..2024-01-31 language:Rust`.
    pub fn to_query_string(&self) -> String {
        let mut q = format!("created:{}..{}", self.from, self.to);
        if let Some(language) = &self.language {
            q.push_str(&format!(" language:{language}"));
        }
        q
    }
}

/// A repository record as returned by the search API. Field names follow
/// the API's JSON so the derive maps them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub stargazers_count: u64,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub forks_count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<Repository>,
}

/// The simplified shape written by `--export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub language: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub forks: u64,
}

impl From<&Repository> for ExportRecord {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.full_name.clone(),
            description: repo.description.clone(),
            url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            language: repo.language.clone(),
            created_at: repo.created_at.clone(),
            updated_at: repo.updated_at.clone(),
            forks: repo.forks_count,
        }
    }
}

impl GitHubClient {
    /// Create a client against the public API.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client with a custom base URL (GitHub Enterprise, tests).
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            token,
            base_url: url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("rebatch-ghstars"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                Error::Api {
                    status: 0,
                    message: "token contains invalid header characters".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Search repositories created in the query's date range, most starred
    /// first. Pages through results until `count` records are collected or
    /// the API runs out.
    pub fn search_repositories(&self, query: &SearchQuery) -> Result<Vec<Repository>> {
        let url = format!("{}/search/repositories", self.base_url);
        let q = query.to_query_string();

        let mut repos: Vec<Repository> = Vec::new();
        let mut page = 1;
        while repos.len() < query.count {
            let per_page = (query.count - repos.len()).min(MAX_PAGE_SIZE);
            let response = self
                .client
                .get(&url)
                .headers(self.headers()?)
                .query(&[
                    ("q", q.as_str()),
                    ("sort", "stars"),
                    ("order", "desc"),
                    ("per_page", &per_page.to_string()),
                    ("page", &page.to_string()),
                ])
                .send()?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let message = response.text().unwrap_or_default();
                return Err(Error::Api { status, message });
            }

            let batch: SearchResponse = response.json()?;
            let received = batch.items.len();
            repos.extend(batch.items);
            if received < per_page {
                break;
            }
            page += 1;
        }

        repos.truncate(query.count);
        Ok(repos)
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Write the simplified records to `path` as pretty-printed JSON. A `.json`
/// extension is appended when missing. Returns the path actually written.
pub fn export_records(path: &Path, repos: &[Repository]) -> Result<PathBuf> {
    let path = if path.extension().is_some_and(|e| e == "json") {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_owned();
        with_ext.push(".json");
        PathBuf::from(with_ext)
    };

    let records: Vec<ExportRecord> = repos.iter().map(ExportRecord::from).collect();
    fs::write(&path, serde_json::to_string_pretty(&records)?)?;
    Ok(path)
}
