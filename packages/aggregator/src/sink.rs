//! File-based persistence: one text artifact per record plus one
//! consolidated JSON index per run.

use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PersistResult;
use crate::types::{JobRecord, RunResult};

const INDEX_FILENAME: &str = "jobs_metadata.json";
const MAX_COMPANY_CHARS: usize = 30;
const MAX_TITLE_CHARS: usize = 40;

/// Consolidated index document written once per run.
#[derive(Serialize)]
struct JobsIndex<'a> {
    scrape_timestamp: String,
    total_jobs: usize,
    jobs: &'a [JobRecord],
}

/// Writes run output to a directory.
///
/// Write failures are fatal: a run whose output destination is broken
/// cannot meaningfully continue, so errors propagate to the caller.
pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    /// Create a sink, creating the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> PersistResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist every record as an individual artifact, then write the
    /// consolidated index. Returns the artifact filenames in record
    /// order.
    pub fn persist(&self, result: &RunResult) -> PersistResult<Vec<String>> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();

        let mut filenames = Vec::with_capacity(result.records.len());
        for (index, record) in result.records.iter().enumerate() {
            let filename = self.write_artifact(record, index + 1, &timestamp)?;
            debug!(file = %filename, "artifact written");
            filenames.push(filename);
        }

        self.write_index(result)?;

        info!(
            dir = %self.output_dir.display(),
            artifacts = filenames.len(),
            "run persisted"
        );
        Ok(filenames)
    }

    fn write_artifact(
        &self,
        record: &JobRecord,
        index: usize,
        timestamp: &str,
    ) -> PersistResult<String> {
        let filename = format!(
            "{timestamp}_{index:03}_{company}_{title}.txt",
            company = sanitize_component(&record.company, MAX_COMPANY_CHARS),
            title = sanitize_component(&record.title, MAX_TITLE_CHARS),
        );

        fs::write(self.output_dir.join(&filename), format_artifact(record))?;
        Ok(filename)
    }

    fn write_index(&self, result: &RunResult) -> PersistResult<()> {
        let index = JobsIndex {
            scrape_timestamp: result.completed_at.to_rfc3339(),
            total_jobs: result.records.len(),
            jobs: &result.records,
        };

        let body = serde_json::to_string_pretty(&index)?;
        fs::write(self.output_dir.join(INDEX_FILENAME), body)?;
        Ok(())
    }
}

/// Make a string safe for use inside a filename: every non-alphanumeric
/// character becomes `_`, capped at `max_chars` characters.
fn sanitize_component(s: &str, max_chars: usize) -> String {
    s.chars()
        .take(max_chars)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Fixed-format artifact body: header block, delimiter, description.
fn format_artifact(record: &JobRecord) -> String {
    let delimiter = "=".repeat(80);
    format!(
        "JOB TITLE: {title}\n\
         COMPANY: {company}\n\
         LOCATION: {location}\n\
         JOB TYPE: {job_type}\n\
         CATEGORY: {category}\n\
         SOURCE: {source}\n\
         URL: {url}\n\
         PUBLICATION DATE: {publication_date}\n\
         \n\
         {delimiter}\n\
         DESCRIPTION:\n\
         {delimiter}\n\
         \n\
         {description}\n",
        title = record.title,
        company = record.company,
        location = record.location,
        job_type = record.job_type,
        category = record.category,
        source = record.source,
        url = record.url,
        publication_date = record.publication_date,
        description = record.description,
    )
}
