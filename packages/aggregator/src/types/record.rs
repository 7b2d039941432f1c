//! The normalized job-posting record every source produces.

use serde::{Deserialize, Serialize};

/// Location used when an upstream omits one.
pub const DEFAULT_LOCATION: &str = "Remote";

/// Placeholder for list-ish fields with no value (job type, etc.).
pub const NOT_AVAILABLE: &str = "N/A";

/// One discovered job posting in the common shape.
///
/// Every adapter maps its upstream's raw payload into this struct in one
/// place, applying the documented defaults — records are never partially
/// constructed, and they are never mutated after the adapter hands them
/// to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Posting title (may be empty if the source omits it)
    pub title: String,

    /// Hiring company
    pub company: String,

    /// Candidate location, defaulting to "Remote" when absent upstream
    pub location: String,

    /// Plain-text description; may carry a "not available" placeholder
    /// when a detail fetch partially failed
    pub description: String,

    /// Employment type, defaulting to "N/A"
    pub job_type: String,

    /// Source taxonomy category, or the search term used to retrieve it
    pub category: String,

    /// Canonical link to the original posting
    pub url: String,

    /// ISO-8601 or source-native date string; may be empty
    pub publication_date: String,

    /// Identifier of the adapter that produced this record; never empty
    pub source: String,
}

impl JobRecord {
    /// Create a record for a source with every field at its default.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            description: String::new(),
            job_type: NOT_AVAILABLE.to_string(),
            category: String::new(),
            url: String::new(),
            publication_date: String::new(),
            source: source.into(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the location, or keep the default when the upstream omitted it.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        if let Some(location) = location {
            self.location = location;
        }
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the job type unless it is empty, keeping the "N/A" default.
    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        let job_type = job_type.into();
        if !job_type.is_empty() {
            self.job_type = job_type;
        }
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the posting URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the publication date string.
    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let record = JobRecord::new("remotive");

        assert_eq!(record.source, "remotive");
        assert_eq!(record.location, DEFAULT_LOCATION);
        assert_eq!(record.job_type, NOT_AVAILABLE);
        assert!(record.title.is_empty());
        assert!(record.publication_date.is_empty());
    }

    #[test]
    fn test_builder() {
        let record = JobRecord::new("linkedin")
            .with_title("Rust Engineer")
            .with_company("Acme")
            .with_location(Some("Berlin".to_string()))
            .with_job_type("full_time")
            .with_category("software engineer")
            .with_url("https://example.com/jobs/1");

        assert_eq!(record.title, "Rust Engineer");
        assert_eq!(record.location, "Berlin");
        assert_eq!(record.job_type, "full_time");
    }

    #[test]
    fn test_absent_location_keeps_default() {
        let record = JobRecord::new("remotive").with_location(None);
        assert_eq!(record.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_empty_job_type_keeps_default() {
        let record = JobRecord::new("arbeitnow").with_job_type("");
        assert_eq!(record.job_type, NOT_AVAILABLE);
    }
}
