//! Arbeitnow API adapter (bulk fetch, client-side filter).
//!
//! The job-board endpoint offers no server-side query parameter, so this
//! adapter pulls one unfiltered listing and matches the search term
//! against title or description before truncating to the limit.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SourceResult;
use crate::traits::{FetchOutcome, Fetcher, JobSource};
use crate::types::{JobRecord, SourceId};

const ARBEITNOW_ENDPOINT: &str = "https://www.arbeitnow.com/api/job-board-api";

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArbeitnowJob {
    title: String,
    company_name: String,
    location: Option<String>,
    description: String,
    job_types: Vec<String>,
    tags: Vec<String>,
    url: String,
    created_at: String,
}

impl ArbeitnowJob {
    fn matches(&self, term_lower: &str) -> bool {
        self.title.to_lowercase().contains(term_lower)
            || self.description.to_lowercase().contains(term_lower)
    }

    fn into_record(self, search_term: &str) -> JobRecord {
        let job_type = self.job_types.into_iter().next().unwrap_or_default();
        let category = if self.tags.is_empty() {
            search_term.to_string()
        } else {
            self.tags.join(", ")
        };

        JobRecord::new(SourceId::Arbeitnow.as_str())
            .with_title(self.title)
            .with_company(self.company_name)
            .with_location(self.location)
            .with_description(self.description)
            .with_job_type(job_type)
            .with_category(category)
            .with_url(self.url)
            .with_publication_date(self.created_at)
    }
}

/// Arbeitnow job-board adapter (API-bulk-filter).
pub struct ArbeitnowSource {
    fetcher: Arc<dyn Fetcher>,
}

impl ArbeitnowSource {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl JobSource for ArbeitnowSource {
    fn id(&self) -> SourceId {
        SourceId::Arbeitnow
    }

    async fn fetch_jobs(&self, query: &str, limit: usize) -> SourceResult<FetchOutcome> {
        if limit == 0 {
            return Ok(FetchOutcome::new());
        }

        let body = self.fetcher.get(ARBEITNOW_ENDPOINT).await?;
        let response: ArbeitnowResponse = serde_json::from_str(&body)?;
        let term_lower = query.to_lowercase();

        let mut outcome = FetchOutcome::new();
        for job in response
            .data
            .into_iter()
            .filter(|job| job.matches(&term_lower))
            .take(limit)
        {
            let record = job.into_record(query);
            debug!(
                source = %self.id(),
                title = %record.title,
                company = %record.company,
                "record normalized"
            );
            outcome.records.push(record);
        }

        info!(
            source = %self.id(),
            query = %query,
            count = outcome.records.len(),
            "fetch complete"
        );
        Ok(outcome)
    }
}
