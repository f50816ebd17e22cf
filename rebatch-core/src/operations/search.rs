use crate::github::{export_records, parse_date, GitHubClient, SearchQuery};
use crate::output::SearchResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Search operation: query the repository-search API and optionally export
/// the results.
pub fn search_operation(
    token: Option<String>,
    api_url: &str,
    from: &str,
    to: &str,
    count: usize,
    language: Option<String>,
    export: Option<&Path>,
) -> Result<(SearchResult, Option<String>)> {
    let query = SearchQuery {
        from: parse_date(from)?,
        to: parse_date(to)?,
        count,
        language,
    };
    let query_string = query.to_query_string();

    let client = GitHubClient::with_base_url(token, api_url);
    let repositories = client
        .search_repositories(&query)
        .context("Failed to fetch data from GitHub API")?;

    let exported_to = match export {
        Some(path) if !repositories.is_empty() => Some(
            export_records(path, &repositories)
                .with_context(|| format!("Failed to export results to {}", path.display()))?,
        ),
        _ => None,
    };

    let result = SearchResult {
        query: query_string,
        repositories,
        exported_to,
    };
    Ok((result, None))
}
