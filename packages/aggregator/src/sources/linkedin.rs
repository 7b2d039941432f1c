//! LinkedIn public guest job search adapter (HTML, paginated).
//!
//! Walks the guest listing endpoint in fixed pages of 25 cards until the
//! limit is reached, 5 pages have been fetched, or a page yields no
//! cards. Each surviving card gets one best-effort detail-page fetch to
//! replace the listing snippet with the full description; a failure
//! there degrades to a placeholder string, never aborts the card.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::html;
use crate::pacer::{PaceContext, Pacer};
use crate::traits::{FetchOutcome, Fetcher, JobSource};
use crate::types::{JobRecord, SourceId};

const LISTING_ENDPOINT: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
const PAGE_SIZE: usize = 25;
const MAX_PAGES: usize = 5;

const CARD_MARKER: &str = "base-card";
const TITLE_CLASS: &str = "base-search-card__title";
const COMPANY_CLASS: &str = "base-search-card__subtitle";
const LOCATION_CLASS: &str = "job-search-card__location";
const LINK_CLASS: &str = "base-card__full-link";
const DESCRIPTION_CLASS: &str = "show-more-less-html__markup";

const MISSING_DESCRIPTION: &str = "Description not available";

/// One extracted listing card, pre-enrichment.
struct Card {
    title: String,
    company: String,
    location: Option<String>,
    url: String,
}

/// LinkedIn guest job search adapter (HTML-paginated).
pub struct LinkedinSource {
    fetcher: Arc<dyn Fetcher>,
    pacer: Arc<dyn Pacer>,
    location: String,
    fetch_details: bool,
}

impl LinkedinSource {
    pub fn new(fetcher: Arc<dyn Fetcher>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            fetcher,
            pacer,
            location: "United States".to_string(),
            fetch_details: true,
        }
    }

    /// Set the search location sent to the listing endpoint. It also
    /// serves as the fallback when a card carries no location element.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Skip the per-card detail fetch, keeping a placeholder description.
    pub fn skip_details(mut self) -> Self {
        self.fetch_details = false;
        self
    }

    fn page_url(&self, query: &str, page: usize) -> SourceResult<String> {
        let mut url = Url::parse(LISTING_ENDPOINT).map_err(|_| SourceError::InvalidUrl {
            url: LISTING_ENDPOINT.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("location", &self.location)
            .append_pair("start", &(page * PAGE_SIZE).to_string())
            .append_pair("pageNum", "0")
            // posted in the last 24 hours
            .append_pair("f_TP", "1");
        Ok(url.into())
    }

    /// Pull the required fields out of a card fragment.
    ///
    /// Title, company, and link must all be present or the card is
    /// dropped (a skip, not an error). Location is optional.
    fn parse_card(fragment: &str) -> Option<Card> {
        let title = html::element_text(fragment, "h3", TITLE_CLASS)?;
        let company = html::element_text(fragment, "h4", COMPANY_CLASS)?;
        let url = html::link_href(fragment, LINK_CLASS)?;
        let location = html::element_text(fragment, "span", LOCATION_CLASS);

        Some(Card {
            title,
            company,
            location,
            url,
        })
    }

    /// Best-effort enrichment: fetch the posting page and extract the
    /// full description text.
    async fn fetch_description(&self, job_url: &str) -> SourceResult<String> {
        let body = self.fetcher.get(job_url).await?;
        Ok(html::element_text(&body, "div", DESCRIPTION_CLASS)
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()))
    }

    async fn describe(&self, card: &Card) -> String {
        if !self.fetch_details {
            return MISSING_DESCRIPTION.to_string();
        }
        match self.fetch_description(&card.url).await {
            Ok(description) => description,
            Err(e) => {
                warn!(
                    url = %card.url,
                    title = %card.title,
                    error = %e,
                    "detail fetch failed, keeping placeholder"
                );
                format!("Could not fetch full description: {e}")
            }
        }
    }
}

#[async_trait]
impl JobSource for LinkedinSource {
    fn id(&self) -> SourceId {
        SourceId::Linkedin
    }

    async fn fetch_jobs(&self, query: &str, limit: usize) -> SourceResult<FetchOutcome> {
        if limit == 0 {
            return Ok(FetchOutcome::new());
        }

        let mut outcome = FetchOutcome::new();
        let mut page = 0;

        while outcome.records.len() < limit && page < MAX_PAGES {
            let url = self.page_url(query, page)?;
            let body = match self.fetcher.get(&url).await {
                Ok(body) => body,
                // nothing retrievable at all: a fully-failed call
                Err(e) if page == 0 => return Err(e),
                Err(e) => {
                    warn!(page = page, error = %e, "listing page failed, stopping pagination");
                    outcome.errors.push(e);
                    break;
                }
            };

            let cards = html::split_cards(&body, CARD_MARKER);
            if cards.is_empty() {
                debug!(page = page, "page yielded no cards, stopping");
                break;
            }

            for fragment in cards {
                if outcome.records.len() >= limit {
                    break;
                }

                let card = match Self::parse_card(fragment) {
                    Some(card) => card,
                    None => {
                        outcome.skipped += 1;
                        debug!(page = page, "card missing required fields, skipped");
                        continue;
                    }
                };

                let description = self.describe(&card).await;
                let record = JobRecord::new(self.id().as_str())
                    .with_title(card.title)
                    .with_company(card.company)
                    .with_location(card.location.or_else(|| Some(self.location.clone())))
                    .with_description(description)
                    .with_category(query)
                    .with_url(card.url)
                    .with_publication_date(Utc::now().format("%Y-%m-%d").to_string());

                debug!(
                    source = %self.id(),
                    title = %record.title,
                    company = %record.company,
                    "record normalized"
                );
                outcome.records.push(record);

                self.pacer.pause(PaceContext::BetweenCards).await;
            }

            page += 1;
            self.pacer.pause(PaceContext::BetweenPages).await;
        }

        info!(
            source = %self.id(),
            query = %query,
            count = outcome.records.len(),
            skipped = outcome.skipped,
            pages = page,
            "fetch complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacer::NoopPacer;
    use crate::testing::MockFetcher;

    fn card(i: usize, complete: bool) -> String {
        let company = if complete {
            format!(r#"<h4 class="base-search-card__subtitle">Company {i}</h4>"#)
        } else {
            String::new()
        };
        format!(
            r#"<div class="base-card relative">
                 <h3 class="base-search-card__title">Job {i}</h3>
                 {company}
                 <span class="job-search-card__location">City {i}</span>
                 <a class="base-card__full-link" href="https://example.com/jobs/{i}">view</a>
               </div>"#
        )
    }

    fn page_of(cards: &[String]) -> String {
        format!("<ul>{}</ul>", cards.join("\n"))
    }

    fn detail_page(text: &str) -> String {
        format!(r#"<div class="show-more-less-html__markup"><p>{text}</p></div>"#)
    }

    fn source(fetcher: Arc<MockFetcher>) -> LinkedinSource {
        LinkedinSource::new(fetcher, Arc::new(NoopPacer))
    }

    #[tokio::test]
    async fn test_two_cards_then_empty_page() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("start=0", page_of(&[card(1, true), card(2, true)]))
                .with_body("start=25", "<ul></ul>"),
        );
        let outcome = source(fetcher.clone())
            .skip_details()
            .fetch_jobs("software engineer", 25)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(fetcher.request_count(), 2);
        assert_eq!(outcome.records[0].category, "software engineer");
        assert_eq!(outcome.records[0].source, "linkedin");
    }

    #[tokio::test]
    async fn test_pagination_stops_after_five_pages() {
        // every page is full of parseable cards; limit can never be hit
        let fetcher = Arc::new(MockFetcher::new().with_body(
            "seeMoreJobPostings",
            page_of(&(0..PAGE_SIZE).map(|i| card(i, true)).collect::<Vec<_>>()),
        ));
        let outcome = source(fetcher.clone())
            .skip_details()
            .fetch_jobs("rust", usize::MAX)
            .await
            .unwrap();

        assert_eq!(fetcher.request_count(), MAX_PAGES);
        assert_eq!(outcome.records.len(), MAX_PAGES * PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_limit_respected_within_page() {
        let fetcher = Arc::new(MockFetcher::new().with_body(
            "start=0",
            page_of(&[card(1, true), card(2, true), card(3, true)]),
        ));
        let outcome = source(fetcher)
            .skip_details()
            .fetch_jobs("rust", 2)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
    }

    #[tokio::test]
    async fn test_incomplete_card_skipped_not_errored() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("start=0", page_of(&[card(1, true), card(2, false)]))
                .with_body("start=25", ""),
        );
        let outcome = source(fetcher)
            .skip_details()
            .fetch_jobs("rust", 10)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_degrades_to_placeholder() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("start=0", page_of(&[card(1, true), card(2, true)]))
                .with_body("jobs/1", detail_page("Full description one"))
                .with_error("jobs/2", || SourceError::Status {
                    status: 429,
                    url: "https://example.com/jobs/2".to_string(),
                })
                .with_body("start=25", ""),
        );
        let outcome = source(fetcher).fetch_jobs("rust", 10).await.unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].description, "Full description one");
        assert!(outcome.records[1]
            .description
            .starts_with("Could not fetch full description:"));
    }

    #[tokio::test]
    async fn test_detail_page_without_description_block() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("start=0", page_of(&[card(1, true)]))
                .with_body("jobs/1", "<html><body>nothing here</body></html>")
                .with_body("start=25", ""),
        );
        let outcome = source(fetcher).fetch_jobs("rust", 10).await.unwrap();

        assert_eq!(outcome.records[0].description, MISSING_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_full_failure() {
        let fetcher = Arc::new(MockFetcher::new().with_error("start=0", || {
            SourceError::Timeout {
                url: "listing".to_string(),
            }
        }));
        let result = source(fetcher).skip_details().fetch_jobs("rust", 10).await;
        assert!(matches!(result, Err(SourceError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_later_page_failure_keeps_partial_results() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body(
                    "start=0",
                    page_of(&(0..PAGE_SIZE).map(|i| card(i, true)).collect::<Vec<_>>()),
                )
                .with_error("start=25", || SourceError::Status {
                    status: 503,
                    url: "listing page 2".to_string(),
                }),
        );
        let outcome = source(fetcher)
            .skip_details()
            .fetch_jobs("rust", 100)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), PAGE_SIZE);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_location_falls_back_to_search_location() {
        let no_location = r#"<div class="base-card">
            <h3 class="base-search-card__title">Job</h3>
            <h4 class="base-search-card__subtitle">Co</h4>
            <a class="base-card__full-link" href="https://example.com/jobs/9">v</a>
          </div>"#;
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("start=0", format!("<ul>{no_location}</ul>"))
                .with_body("start=25", ""),
        );
        let outcome = source(fetcher)
            .skip_details()
            .fetch_jobs("rust", 10)
            .await
            .unwrap();

        assert_eq!(outcome.records[0].location, "United States");
    }

    #[tokio::test]
    async fn test_zero_limit_makes_no_request() {
        let fetcher = Arc::new(MockFetcher::new());
        let outcome = source(fetcher.clone()).fetch_jobs("rust", 0).await.unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(fetcher.request_count(), 0);
    }
}
