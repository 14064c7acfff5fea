//! A working set of attendee records tied to one headshot directory

use std::path::{Path, PathBuf};

use log::info;

use crate::csv::load_from_csv;
use crate::filter::{apply_limit, filter_by_organization};
use crate::headshot::HeadshotResolver;
use crate::options::DocumentOptions;
use crate::pdf::generate_pdf;
use crate::types::{DocumentKind, GenerationReport, Record, Result};

/// Records loaded so far, with headshots attached from `headshot_dir`.
///
/// The directory is scanned again on every load so files added between
/// loads are picked up. [`Session::clear`] starts over with the same directory.
#[derive(Debug, Clone, Default)]
pub struct Session {
    headshot_dir: PathBuf,
    records: Vec<Record>,
    missing_headshots: Vec<String>,
}

impl Session {
    pub fn new(headshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            headshot_dir: headshot_dir.into(),
            ..Default::default()
        }
    }

    pub fn headshot_dir(&self) -> &Path {
        &self.headshot_dir
    }

    /// Load a CSV, attach headshots and append the records.
    /// Returns how many records were added.
    pub async fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let records = load_from_csv(path.as_ref()).await?;
        self.add_records(records).await
    }

    /// Attach headshots to `records` and append them.
    /// Records without any name part are dropped.
    pub async fn add_records(&mut self, records: Vec<Record>) -> Result<usize> {
        let records: Vec<Record> = records.into_iter().filter(Record::has_name).collect();
        let resolver = HeadshotResolver::scan(&self.headshot_dir).await?;
        let (records, missing) = resolver.attach(records);

        let added = records.len();
        self.records.extend(records);
        self.missing_headshots.extend(missing);
        self.missing_headshots.sort();
        self.missing_headshots.dedup();

        info!(
            "Session holds {} record(s), {} without a headshot",
            self.records.len(),
            self.missing_headshots.len()
        );
        Ok(added)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Expected headshot prefixes that matched no file, sorted and unique
    pub fn missing_headshots(&self) -> &[String] {
        &self.missing_headshots
    }

    /// Records after the organization filter and limit in `options`
    pub fn prepared_records(&self, options: &DocumentOptions) -> Vec<Record> {
        let filtered = filter_by_organization(&self.records, &options.excluded_organizations);
        apply_limit(filtered, options.limit)
    }

    pub async fn generate(
        &self,
        kind: DocumentKind,
        options: &DocumentOptions,
        output_path: impl AsRef<Path>,
    ) -> Result<GenerationReport> {
        generate_pdf(kind, &self.records, options, output_path).await
    }

    /// Drop all records, keeping the headshot directory
    pub fn clear(&mut self) {
        self.records.clear();
        self.missing_headshots.clear();
    }
}
