//! Headshot lookup by file name prefix
//!
//! Images are expected to be named after the attendee, for example
//! `Mary_Jane_O_Brien.jpg`. The resolver takes one snapshot of the directory
//! and answers every query from it, so a whole batch sees the same files.
//!
//! When several files share a prefix (`John_Doe.jpg`, `John_Doe2.png`) the
//! first one in lexicographic order wins, whatever its extension.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::types::{Record, Result};

/// Replace every non-alphanumeric character with `_`, collapse runs of `_`
/// and trim them from both ends.
pub fn sanitize_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// File name prefix expected for an attendee's headshot
pub fn build_expected_prefix(first_name: &str, last_name: &str) -> String {
    [first_name, last_name]
        .into_iter()
        .map(sanitize_token)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Sorted snapshot of the regular files in a headshot directory
#[derive(Debug, Clone, Default)]
pub struct HeadshotResolver {
    dir: PathBuf,
    files: Vec<String>,
}

impl HeadshotResolver {
    /// Snapshot `dir`.
    ///
    /// A directory that is missing or can't be listed (a plain file, no
    /// permission) gives a resolver that finds nothing.
    pub async fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Headshot directory {} does not exist", dir.display());
                return Ok(Self::from_files(dir, Vec::<String>::new()));
            }
            Err(e) => {
                warn!("Can't list headshot directory {}: {}", dir.display(), e);
                return Ok(Self::from_files(dir, Vec::<String>::new()));
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let is_file = tokio::fs::metadata(entry.path())
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => debug!("Skipping non UTF-8 file name {:?}", name),
            }
        }

        debug!("Found {} files in {}", files.len(), dir.display());
        Ok(Self::from_files(dir, files))
    }

    /// Resolver over a known list of file names in `dir`
    pub fn from_files<S: Into<String>>(dir: impl Into<PathBuf>, files: impl IntoIterator<Item = S>) -> Self {
        let mut files: Vec<String> = files.into_iter().map(Into::into).collect();
        files.sort();
        files.dedup();
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// First file whose name starts with `prefix`
    pub fn resolve(&self, prefix: &str) -> Option<PathBuf> {
        if prefix.is_empty() {
            return None;
        }
        self.files
            .iter()
            .find(|name| name.starts_with(prefix))
            .map(|name| self.dir.join(name))
    }

    pub fn resolve_name(&self, first_name: &str, last_name: &str) -> Option<PathBuf> {
        self.resolve(&build_expected_prefix(first_name, last_name))
    }

    /// Attach headshots to `records`.
    ///
    /// Records that already carry an image keep it. Every record is returned;
    /// the second value lists the prefixes with no match, sorted and unique.
    /// A name with nothing left after sanitizing has no prefix to report.
    pub fn attach(&self, records: Vec<Record>) -> (Vec<Record>, Vec<String>) {
        let mut missing = Vec::new();
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.image_path.is_none() {
                    let prefix = build_expected_prefix(&record.first_name, &record.last_name);
                    match self.resolve(&prefix) {
                        Some(path) => record.image_path = Some(path),
                        None if prefix.is_empty() => {}
                        None => missing.push(prefix),
                    }
                }
                record
            })
            .collect();

        missing.sort();
        missing.dedup();
        if !missing.is_empty() {
            warn!(
                "No headshot in {} for: {}",
                self.dir.display(),
                missing.join(", ")
            );
        }
        (records, missing)
    }
}
