//! The aggregator: drive every enabled source over every category,
//! contain failures, and reduce the outputs to one ordered sequence.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::pacer::{PaceContext, Pacer};
use crate::traits::JobSource;
use crate::types::{RunRequest, RunResult, SourceId};

/// Runs the source × category matrix sequentially.
///
/// For each category (request order), each enabled source is invoked in
/// canonical order: API sources before HTML sources, to front-load fast
/// and reliable results. A fully-failed adapter call is logged as one
/// source-level failure event and contributes zero records; it never
/// affects other sources, other categories, or the final sequence.
pub struct Aggregator {
    sources: HashMap<SourceId, Arc<dyn JobSource>>,
    pacer: Arc<dyn Pacer>,
}

impl Aggregator {
    /// Create an aggregator over the given adapters.
    pub fn new(sources: Vec<Arc<dyn JobSource>>, pacer: Arc<dyn Pacer>) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.id(), source))
            .collect();
        Self { sources, pacer }
    }

    /// Execute one run and return the combined ordered sequence.
    pub async fn run(&self, request: &RunRequest) -> RunResult {
        info!(
            sources = request.sources.len(),
            categories = request.categories.len(),
            limit = request.limit_per_source,
            "aggregation run starting"
        );

        let mut records = Vec::new();
        let mut failed_sources = 0;

        for category in &request.categories {
            debug!(category = %category, "category starting");

            for id in SourceId::CANONICAL {
                if !request.sources.contains(&id) {
                    continue;
                }
                let Some(source) = self.sources.get(&id) else {
                    warn!(source = %id, "enabled source has no registered adapter");
                    continue;
                };

                debug!(source = %id, category = %category, "source starting");
                match source.fetch_jobs(category, request.limit_per_source).await {
                    Ok(outcome) => {
                        for error in &outcome.errors {
                            warn!(
                                source = %id,
                                category = %category,
                                error = %error,
                                "unit failed within source"
                            );
                        }
                        if outcome.skipped > 0 {
                            debug!(
                                source = %id,
                                category = %category,
                                skipped = outcome.skipped,
                                "units skipped within source"
                            );
                        }
                        info!(
                            source = %id,
                            category = %category,
                            count = outcome.records.len(),
                            "source succeeded"
                        );
                        records.extend(outcome.records);
                    }
                    Err(e) => {
                        warn!(
                            source = %id,
                            category = %category,
                            error = %e,
                            "source failed"
                        );
                        failed_sources += 1;
                    }
                }

                let context = if id.is_html() {
                    PaceContext::AfterHtmlSource
                } else {
                    PaceContext::AfterApiSource
                };
                self.pacer.pause(context).await;
            }
        }

        let result = RunResult {
            records,
            failed_sources,
            completed_at: Utc::now(),
        };
        info!(
            total = result.total(),
            failed_sources = result.failed_sources,
            "aggregation run complete"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceError, SourceResult};
    use crate::pacer::NoopPacer;
    use crate::traits::FetchOutcome;
    use crate::types::JobRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Adapter returning one record per call, stamped with the query.
    struct HealthySource {
        id: SourceId,
        calls: AtomicUsize,
    }

    impl HealthySource {
        fn new(id: SourceId) -> Self {
            Self {
                id,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JobSource for HealthySource {
        fn id(&self) -> SourceId {
            self.id
        }

        async fn fetch_jobs(&self, query: &str, _limit: usize) -> SourceResult<FetchOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut outcome = FetchOutcome::new();
            outcome.records.push(
                JobRecord::new(self.id.as_str())
                    .with_title(format!("{query} role"))
                    .with_company("Acme")
                    .with_category(query),
            );
            Ok(outcome)
        }
    }

    /// Adapter that always fails at the top level.
    struct BrokenSource {
        id: SourceId,
    }

    #[async_trait]
    impl JobSource for BrokenSource {
        fn id(&self) -> SourceId {
            self.id
        }

        async fn fetch_jobs(&self, _query: &str, _limit: usize) -> SourceResult<FetchOutcome> {
            Err(SourceError::Timeout {
                url: "upstream".to_string(),
            })
        }
    }

    fn request(sources: Vec<SourceId>, categories: &[&str]) -> RunRequest {
        RunRequest::new(categories.iter().map(|c| c.to_string()).collect())
            .with_sources(sources)
            .with_limit(10)
    }

    #[tokio::test]
    async fn test_failing_source_never_aborts_the_matrix() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(HealthySource::new(SourceId::Remotive)),
            Arc::new(BrokenSource {
                id: SourceId::Linkedin,
            }),
        ];
        let aggregator = Aggregator::new(sources, Arc::new(NoopPacer));
        let request = request(
            vec![SourceId::Remotive, SourceId::Linkedin],
            &["rust", "python"],
        );

        let result = aggregator.run(&request).await;

        // full contribution of the healthy source, one per category
        assert_eq!(result.total(), 2);
        assert!(result.records.iter().all(|r| r.source == "remotive"));
        // one source-level failure event per category
        assert_eq!(result.failed_sources, 2);
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_insertion_order_is_source_then_category() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(HealthySource::new(SourceId::Remotive)),
            Arc::new(HealthySource::new(SourceId::Arbeitnow)),
        ];
        let aggregator = Aggregator::new(sources, Arc::new(NoopPacer));
        // request lists sources in non-canonical order; iteration is canonical
        let request = request(
            vec![SourceId::Arbeitnow, SourceId::Remotive],
            &["rust", "go"],
        );

        let result = aggregator.run(&request).await;

        let order: Vec<(&str, &str)> = result
            .records
            .iter()
            .map(|r| (r.source.as_str(), r.category.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("remotive", "rust"),
                ("arbeitnow", "rust"),
                ("remotive", "go"),
                ("arbeitnow", "go"),
            ]
        );
    }

    #[tokio::test]
    async fn test_disabled_sources_are_not_invoked() {
        let remotive = Arc::new(HealthySource::new(SourceId::Remotive));
        let arbeitnow = Arc::new(HealthySource::new(SourceId::Arbeitnow));
        let sources: Vec<Arc<dyn JobSource>> = vec![remotive.clone(), arbeitnow.clone()];
        let aggregator = Aggregator::new(sources, Arc::new(NoopPacer));
        let request = request(vec![SourceId::Remotive], &["rust"]);

        aggregator.run(&request).await;

        assert_eq!(remotive.calls.load(Ordering::SeqCst), 1);
        assert_eq!(arbeitnow.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_idempotent_over_identical_upstreams() {
        let sources: Vec<Arc<dyn JobSource>> =
            vec![Arc::new(HealthySource::new(SourceId::Remotive))];
        let aggregator = Aggregator::new(sources, Arc::new(NoopPacer));
        let request = request(vec![SourceId::Remotive], &["rust"]);

        let first = aggregator.run(&request).await;
        let second = aggregator.run(&request).await;

        assert_eq!(first.records, second.records);
        assert_eq!(first.total(), second.total());
    }
}
