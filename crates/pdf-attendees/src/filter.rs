//! Record selection before layout

use crate::types::Record;

/// Organizations excluded when a caller asks for the default exclusion set
pub const DEFAULT_EXCLUDED_ORGANIZATIONS: &[&str] = &["foundation for american innovation"];

/// Records whose organization is not in `excluded`.
///
/// Matching is case-insensitive on trimmed names. An empty exclusion set
/// returns the input unchanged.
pub fn filter_by_organization<S: AsRef<str>>(records: &[Record], excluded: &[S]) -> Vec<Record> {
    if excluded.is_empty() {
        return records.to_vec();
    }

    let excluded: Vec<String> = excluded
        .iter()
        .map(|org| org.as_ref().trim().to_lowercase())
        .collect();

    records
        .iter()
        .filter(|record| !excluded.contains(&record.organization.trim().to_lowercase()))
        .cloned()
        .collect()
}

/// Keep at most `limit` records, in order
pub fn apply_limit(mut records: Vec<Record>, limit: Option<usize>) -> Vec<Record> {
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}
