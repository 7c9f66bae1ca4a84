// src/linkedin/search.rs
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use super::query::SearchFilters;
use super::types::{JobResult, JOB_CARDS_ENDPOINT, JOB_SEARCH_DECORATION_ID, NORMALIZED_JSON};
use crate::core::VoyagerApi;
use crate::utils::{encode_query, QUERY_ENCODE_SET};

/// Page through the job search endpoint until one of the stop conditions fires.
///
/// `limit` of `None` means as many as the server yields. Each page asks for at most
/// `max_search_count` results and starts at `offset` plus what was already collected.
pub(crate) async fn search_jobs<C>(
    client: &C,
    filters: &SearchFilters,
    limit: Option<usize>,
    offset: usize,
) -> Result<Vec<JobResult>>
where
    C: VoyagerApi + ?Sized,
{
    let mut results: Vec<JobResult> = Vec::new();
    if limit == Some(0) {
        return Ok(results);
    }

    let query = filters.to_query();
    let max_count = client.max_search_count().max(1);
    let max_repeated = client.max_repeated_requests();
    let headers = [("accept".to_string(), NORMALIZED_JSON.to_string())];

    info!("Searching jobs with query {}", query);

    loop {
        let count = match limit {
            Some(limit) => (limit - results.len()).min(max_count),
            None => max_count,
        };

        let params = [
            ("decorationId", JOB_SEARCH_DECORATION_ID.to_string()),
            ("count", count.to_string()),
            ("q", "jobSearch".to_string()),
            ("query", query.clone()),
            ("start", (offset + results.len()).to_string()),
        ];
        let path = format!(
            "{}?{}",
            JOB_CARDS_ENDPOINT,
            encode_query(&params, QUERY_ENCODE_SET)
        );

        let response = client.fetch(&path, &headers, None).await?;
        let mut data = response.json().with_context(|| {
            format!("Failed to parse job search response (status {})", response.status)
        })?;

        let included = match data.get_mut("included").map(Value::take) {
            Some(Value::Array(elements)) => elements,
            _ => Vec::new(),
        };
        let raw_count = included.len();

        let page: Vec<JobResult> = included
            .into_iter()
            .filter_map(JobResult::from_element)
            .collect();

        if page.is_empty() {
            break;
        }
        results.extend(page);

        let limit_reached = limit.is_some_and(|limit| results.len() >= limit);
        let too_many_requests = results.len() >= max_repeated.saturating_mul(count);
        if limit_reached || too_many_requests || raw_count == 0 {
            break;
        }

        debug!("results grew to {}", results.len());
    }

    if let Some(limit) = limit {
        results.truncate(limit);
    }

    info!("Job search returned {} results", results.len());
    Ok(results)
}
