use crate::types::{AttendeeError, Record, Result};
use std::collections::BTreeMap;
use std::path::Path;

const FIRST_NAME_HEADERS: &[&str] = &["first name", "first", "firstname", "first_name"];
const LAST_NAME_HEADERS: &[&str] = &["last name", "last", "lastname", "last_name"];
const ORGANIZATION_HEADERS: &[&str] = &["organization", "org", "company"];
const TITLE_HEADERS: &[&str] = &["job title", "title", "position", "jobtitle", "job_title"];

/// Column index for each core field, plus the passthrough columns
#[derive(Debug, Default)]
struct ColumnMap {
    first_name: Option<usize>,
    last_name: Option<usize>,
    organization: Option<usize>,
    title: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = ColumnMap::default();
        for (index, header) in headers.iter().enumerate() {
            let header = header.trim();
            let key = header.to_lowercase();
            let slot = if FIRST_NAME_HEADERS.contains(&key.as_str()) {
                &mut map.first_name
            } else if LAST_NAME_HEADERS.contains(&key.as_str()) {
                &mut map.last_name
            } else if ORGANIZATION_HEADERS.contains(&key.as_str()) {
                &mut map.organization
            } else if TITLE_HEADERS.contains(&key.as_str()) {
                &mut map.title
            } else {
                if !header.is_empty() {
                    map.extra.push((index, header.to_string()));
                }
                continue;
            };
            // First matching column wins
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        map
    }

    fn record(&self, row: &csv::StringRecord) -> Record {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(str::trim)
                .unwrap_or_default()
        };

        let extra: BTreeMap<String, String> = self
            .extra
            .iter()
            .filter_map(|(index, header)| {
                let value = row.get(*index)?.trim();
                (!value.is_empty()).then(|| (header.clone(), value.to_string()))
            })
            .collect();

        Record {
            extra,
            ..Record::new(
                cell(self.first_name),
                cell(self.last_name),
                cell(self.organization),
                cell(self.title),
            )
        }
    }
}

/// Parse attendee records from CSV text.
///
/// Headers are matched case-insensitively; a leading byte order mark is
/// ignored. Rows without a first or last name are skipped.
pub fn parse_csv(contents: &str) -> Result<Vec<Record>> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?);
    if columns.first_name.is_none() && columns.last_name.is_none() {
        return Err(AttendeeError::Config(
            "CSV has no first or last name column".to_string(),
        ));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record = columns.record(&row);
        if record.has_name() {
            records.push(record);
        }
    }
    Ok(records)
}

pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let records = tokio::task::spawn_blocking(move || parse_csv(&contents)).await??;

    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_header_aliases_and_extras() {
        let csv = "First,LAST NAME,Company,Position,Table\n Ada , Lovelace ,Engines,Countess, 7 \n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records.len(), 1);

        let ada = &records[0];
        assert_eq!(ada.full_name(), "Ada Lovelace");
        assert_eq!(ada.organization, "Engines");
        assert_eq!(ada.title, "Countess");
        assert_eq!(ada.extra.get("Table").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_bom_and_nameless_rows() {
        let csv = "\u{feff}First Name,Last Name,Organization,Job Title\nAda,Lovelace,,\n,,Orphan Org,\nGrace,,Navy,\n";
        let records = parse_csv(csv).expect("parse");
        let names: Vec<String> = records.iter().map(Record::full_name).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Grace"]);
    }

    #[test]
    fn test_missing_name_columns_rejected() {
        let result = parse_csv("Organization,Title\nEngines,Countess\n");
        assert!(matches!(result, Err(AttendeeError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_from_csv() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "First Name,Last Name,Organization,Job Title").expect("write");
        writeln!(file, "Grace,Hopper,US Navy,Rear Admiral").expect("write");
        writeln!(file, "Alan,Turing,\"Bletchley Park, Hut 8\",Cryptanalyst").expect("write");

        let records = load_from_csv(file.path()).await.expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].organization, "Bletchley Park, Hut 8");
    }
}
