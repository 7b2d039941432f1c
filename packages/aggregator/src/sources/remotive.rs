//! Remotive API adapters.
//!
//! Remotive exposes one endpoint with two query modes: a category filter
//! (its own taxonomy) and a free-text search. Both are single-request
//! adapters sharing the same response shape and field mapping; the
//! search mode is the fallback when a term has no dedicated category.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::traits::{FetchOutcome, Fetcher, JobSource};
use crate::types::{JobRecord, SourceId};

const REMOTIVE_ENDPOINT: &str = "https://remotive.com/api/remote-jobs";

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

/// Raw upstream job element. Every field defaults so an element with
/// omitted fields still maps to a complete record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemotiveJob {
    title: String,
    company_name: String,
    candidate_required_location: Option<String>,
    description: String,
    job_type: String,
    category: String,
    url: String,
    publication_date: String,
}

impl RemotiveJob {
    fn into_record(self, fallback_category: &str, source: SourceId) -> JobRecord {
        let category = if self.category.is_empty() {
            fallback_category.to_string()
        } else {
            self.category
        };

        JobRecord::new(source.as_str())
            .with_title(self.title)
            .with_company(self.company_name)
            .with_location(self.candidate_required_location)
            .with_description(self.description)
            .with_job_type(self.job_type)
            .with_category(category)
            .with_url(self.url)
            .with_publication_date(self.publication_date)
    }
}

fn endpoint_with(params: &[(&str, &str)]) -> SourceResult<String> {
    let mut url = Url::parse(REMOTIVE_ENDPOINT).map_err(|_| SourceError::InvalidUrl {
        url: REMOTIVE_ENDPOINT.to_string(),
    })?;
    url.query_pairs_mut().extend_pairs(params);
    Ok(url.into())
}

async fn fetch_remotive(
    fetcher: &dyn Fetcher,
    url: &str,
    query: &str,
    limit: usize,
    source: SourceId,
) -> SourceResult<FetchOutcome> {
    let body = fetcher.get(url).await?;
    let response: RemotiveResponse = serde_json::from_str(&body)?;

    let mut outcome = FetchOutcome::new();
    for job in response.jobs.into_iter().take(limit) {
        let record = job.into_record(query, source);
        debug!(
            source = %source,
            title = %record.title,
            company = %record.company,
            "record normalized"
        );
        outcome.records.push(record);
    }

    info!(
        source = %source,
        query = %query,
        count = outcome.records.len(),
        "fetch complete"
    );
    Ok(outcome)
}

/// Category-filtered Remotive listing (API-single-request).
pub struct RemotiveSource {
    fetcher: Arc<dyn Fetcher>,
}

impl RemotiveSource {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn id(&self) -> SourceId {
        SourceId::Remotive
    }

    async fn fetch_jobs(&self, query: &str, limit: usize) -> SourceResult<FetchOutcome> {
        if limit == 0 {
            return Ok(FetchOutcome::new());
        }

        let url = endpoint_with(&[("category", query), ("limit", &limit.to_string())])?;
        fetch_remotive(self.fetcher.as_ref(), &url, query, limit, self.id()).await
    }
}

/// Free-text Remotive search (API-search-request).
pub struct RemotiveSearchSource {
    fetcher: Arc<dyn Fetcher>,
}

impl RemotiveSearchSource {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl JobSource for RemotiveSearchSource {
    fn id(&self) -> SourceId {
        SourceId::RemotiveSearch
    }

    async fn fetch_jobs(&self, query: &str, limit: usize) -> SourceResult<FetchOutcome> {
        if limit == 0 {
            return Ok(FetchOutcome::new());
        }

        let url = endpoint_with(&[("search", query), ("limit", &limit.to_string())])?;
        fetch_remotive(self.fetcher.as_ref(), &url, query, limit, self.id()).await
    }
}
