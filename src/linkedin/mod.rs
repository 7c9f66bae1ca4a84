// src/linkedin/mod.rs
//! Job search and easy-apply form extraction on top of an authenticated Voyager client

pub mod easy_apply;
pub mod query;
pub mod search;
pub mod types;

pub use query::{ExperienceLevel, JobType, SearchFilters, WorkplaceType};
pub use types::{FormField, JobResult};

use anyhow::Result;

use crate::core::VoyagerApi;

/// The two LinkedIn operations, bound to one client
pub struct LinkedInEvolved<C> {
    client: C,
}

impl<C: VoyagerApi> LinkedInEvolved<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Search jobs matching `filters`, skipping the first `offset` results.
    ///
    /// `limit` of `None` collects every page the server yields (bounded by the
    /// client's repeated-requests guard).
    pub async fn search_jobs(
        &self,
        filters: &SearchFilters,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<JobResult>> {
        search::search_jobs(&self.client, filters, limit, offset).await
    }

    /// Fields of the easy-apply form of `job_id`; empty when already applied or unavailable
    pub async fn get_fields_for_easy_apply(&self, job_id: &str) -> Result<Vec<FormField>> {
        easy_apply::get_fields_for_easy_apply(&self.client, job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voyager::testing::{query_param, MockVoyager};
    use crate::core::ApiResponse;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_then_fetch_fields() {
        let client = MockVoyager::new(|path| {
            let body = if path.starts_with("/voyagerJobsDashJobCards") {
                if query_param(path, "start") != Some("1") {
                    return Ok(ApiResponse::new(200, r#"{"included": []}"#));
                }
                json!({"included": [{
                    "$type": types::JOB_POSTING_TYPE,
                    "trackingUrn": "urn:li:fsd_jobPosting:42",
                    "title": "Rust Developer"
                }]})
            } else {
                json!({"included": [{
                    "urn": "urn:li:fsu_formElement:phone",
                    "title": {"text": "Mobile phone number"},
                    "formComponent": {"singleLineTextFormComponent": {}}
                }]})
            };
            Ok(ApiResponse::new(200, body.to_string()))
        });
        let api = LinkedInEvolved::new(client);

        let filters = SearchFilters::new()
            .with_keywords("Frontend Developer")
            .with_location("Italia");
        let jobs = api.search_jobs(&filters, Some(5), 1).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job_id, "42");

        let fields = api.get_fields_for_easy_apply(&jobs[0].job_id).await.unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].title, "Mobile phone number");

        let requests = api.client().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].param("start"), Some("1"));
        assert_eq!(requests[1].param("start"), Some("2"));
        assert!(requests[2].path.contains("jobPostingUrn=urn%3Ali%3Afsd_jobPosting%3A42"));
    }
}
