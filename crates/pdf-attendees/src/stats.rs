use crate::options::DocumentOptions;
use crate::types::*;

/// Predict the shape of a document without rendering it
pub fn calculate_statistics(
    kind: DocumentKind,
    record_count: usize,
    options: &DocumentOptions,
) -> Result<GenerationStatistics> {
    if record_count == 0 {
        return Err(AttendeeError::NoRecords);
    }

    // Templates put one record on each page
    let items_per_page = options
        .geometry_for(kind)
        .map(|geometry| geometry.items_per_page.max(1))
        .unwrap_or(1);

    let chunks = record_count.div_ceil(items_per_page);
    let items_on_last_page = record_count - (chunks - 1) * items_per_page;

    // Combined and guide documents print a front and a back per sheet
    let pages_per_chunk = match kind {
        DocumentKind::Combined | DocumentKind::Guides => 2,
        _ => 1,
    };

    Ok(GenerationStatistics {
        records: record_count,
        items_per_page,
        chunks,
        output_pages: chunks * pages_per_chunk,
        items_on_last_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_statistics() {
        let options = DocumentOptions::default();

        let fronts = calculate_statistics(DocumentKind::Fronts, 7, &options).expect("stats");
        assert_eq!(fronts.chunks, 3);
        assert_eq!(fronts.output_pages, 3);
        assert_eq!(fronts.items_on_last_page, 1);

        let combined = calculate_statistics(DocumentKind::Combined, 7, &options).expect("stats");
        assert_eq!(combined.output_pages, 6);
    }

    #[test]
    fn test_full_last_page() {
        let options = DocumentOptions::default();
        let stats = calculate_statistics(DocumentKind::Facebook, 10, &options).expect("stats");
        assert_eq!(stats.items_per_page, 5);
        assert_eq!(stats.output_pages, 2);
        assert_eq!(stats.items_on_last_page, 5);
    }

    #[test]
    fn test_template_is_one_per_page() {
        let options = DocumentOptions::default();
        let stats = calculate_statistics(DocumentKind::Template, 4, &options).expect("stats");
        assert_eq!(stats.output_pages, 4);
    }

    #[test]
    fn test_no_records() {
        let result = calculate_statistics(DocumentKind::Backs, 0, &DocumentOptions::default());
        assert!(matches!(result, Err(AttendeeError::NoRecords)));
    }
}
