use lopdf::Document;
use pdf_attendees::render::{DrawOp, ImageCatalog, PageCanvas, back_page, render_facebook, render_fronts};
use pdf_attendees::*;
use std::path::Path;

/// Write a small PNG headshot for each name and return records with images attached
async fn records_with_headshots(dir: &Path, names: &[(&str, &str)]) -> Vec<Record> {
    for (first, last) in names {
        let path = dir.join(format!("{}.png", build_expected_prefix(first, last)));
        image::RgbImage::from_pixel(24, 32, image::Rgb([120, 80, 40]))
            .save(&path)
            .expect("save headshot");
    }

    let records = names
        .iter()
        .map(|(first, last)| Record::new(*first, *last, "Analytical Engines", "Engineer"))
        .collect();
    let resolver = HeadshotResolver::scan(dir).await.expect("scan");
    let (records, missing) = resolver.attach(records);
    assert!(missing.is_empty());
    records
}

fn guests(count: usize) -> Vec<(String, String)> {
    (1..=count)
        .map(|i| ("Guest".to_string(), format!("Number{i}")))
        .collect()
}

fn as_pairs(names: &[(String, String)]) -> Vec<(&str, &str)> {
    names
        .iter()
        .map(|(first, last)| (first.as_str(), last.as_str()))
        .collect()
}

/// Translation applied when each card's isolated block starts
fn card_origins(page: &PageCanvas) -> Vec<(f32, f32)> {
    page.ops()
        .windows(2)
        .filter_map(|pair| match pair {
            [DrawOp::SaveState, DrawOp::Transform([a, b, c, d, x, y])]
                if (*a, *b, *c, *d) == (1.0, 0.0, 0.0, 1.0) =>
            {
                Some((*x, *y))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_fronts_paginate_three_per_page() {
    let records: Vec<Record> = guests(7)
        .into_iter()
        .map(|(first, last)| Record::new(first, last, "", ""))
        .collect();
    let pages = render_fronts(&records, &PageGeometry::flashcards());

    let per_page: Vec<usize> = pages
        .iter()
        .map(|page| page.texts().filter(|t| t.starts_with("Guest")).count())
        .collect();
    assert_eq!(per_page, vec![3, 3, 1]);
}

#[tokio::test]
async fn test_combined_document_has_front_and_back_per_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let names = guests(7);
    let records = records_with_headshots(dir.path(), &as_pairs(&names)).await;

    let options = DocumentOptions::default();
    let stats = calculate_statistics(DocumentKind::Combined, records.len(), &options).expect("stats");
    assert_eq!(stats.output_pages, 6);

    let output = dir.path().join("combined.pdf");
    let report = generate_pdf(DocumentKind::Combined, &records, &options, &output)
        .await
        .expect("generate");
    assert_eq!(report.page_count, 6);
    assert_eq!(report.record_count, 7);
    assert!(report.missing_headshots.is_empty());
    assert!(report.skipped_images.is_empty());

    let bytes = tokio::fs::read(&output).await.expect("read output");
    let doc = Document::load_mem(&bytes).expect("reload");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 6);

    // Second page is the back of the first sheet
    let back_id = pages.get(&2).copied().expect("page 2");
    let content = doc.get_page_content(back_id).expect("content");
    let content = String::from_utf8_lossy(&content);
    assert_eq!(content.matches(" Do").count(), 3);
}

#[tokio::test]
async fn test_long_edge_backs_land_behind_their_fronts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records =
        records_with_headshots(dir.path(), &[("Ada", "A"), ("Bob", "B"), ("Cy", "C")]).await;
    let geometry = PageGeometry::flashcards();
    let slots = pdf_attendees::layout::positions(3, &geometry);

    let mut images = ImageCatalog::new();
    let back = back_page(&records, &geometry, DuplexMode::LongEdge, &mut images);
    let origins = card_origins(&back);

    // A, B, C are drawn in order onto P3, P2, P1
    let expected: Vec<(f32, f32)> = slots.iter().rev().map(|rect| (rect.x, rect.y)).collect();
    assert_eq!(origins, expected);

    let rotations = back
        .ops()
        .iter()
        .filter(|op| **op == DrawOp::Transform([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]))
        .count();
    assert_eq!(rotations, 3);
}

#[tokio::test]
async fn test_short_edge_partial_sheet_stays_behind_front() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = records_with_headshots(dir.path(), &[("Ada", "A")]).await;
    let geometry = PageGeometry::flashcards();
    let front_slot = pdf_attendees::layout::positions(1, &geometry)[0];

    let mut images = ImageCatalog::new();
    let back = back_page(&records, &geometry, DuplexMode::ShortEdge, &mut images);
    let origins = card_origins(&back);

    // A lone top card prints at the bottom of the back page
    assert_eq!(origins.len(), 1);
    assert!((origins[0].0 - front_slot.x).abs() < 0.001);
    assert!((origins[0].1 - (geometry.page_height_pt - front_slot.top())).abs() < 0.001);
}

#[tokio::test]
async fn test_facebook_page_separators() {
    let dir = tempfile::tempdir().expect("tempdir");
    let names = guests(5);
    let records = records_with_headshots(dir.path(), &as_pairs(&names)).await;

    let mut images = ImageCatalog::new();
    let pages = render_facebook(&records, &PageGeometry::facebook(), &mut images);
    assert_eq!(pages.len(), 1);

    let lines = pages[0]
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Line { .. }))
        .count();
    assert_eq!(lines, 4);
    assert_eq!(images.images().len(), 5);
}

#[tokio::test]
async fn test_missing_headshots_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut records = records_with_headshots(dir.path(), &[("Ada", "Lovelace")]).await;
    records.push(Record::new("Grace", "Hopper", "Navy", ""));

    let document =
        generate_pdf_bytes(DocumentKind::Guides, &records, &DocumentOptions::default()).expect("generate");
    assert_eq!(document.page_count, 2);
    assert_eq!(document.record_count, 1);
    assert_eq!(document.missing_headshots, vec!["Grace Hopper".to_string()]);

    let tents = generate_pdf_bytes(DocumentKind::TableTents, &records, &DocumentOptions::default())
        .expect("generate");
    assert_eq!(tents.record_count, 2);
    assert!(tents.missing_headshots.is_empty());
}

#[tokio::test]
async fn test_unreadable_headshot_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("Ada_Lovelace.jpg");
    tokio::fs::write(&broken, b"not a jpeg").await.expect("write");

    let records = vec![Record::new("Ada", "Lovelace", "", "").with_image(&broken)];
    let document =
        generate_pdf_bytes(DocumentKind::Backs, &records, &DocumentOptions::default()).expect("generate");
    assert_eq!(document.page_count, 1);
    assert_eq!(document.skipped_images, vec![broken]);
}

#[test]
fn test_excluded_organizations_and_limit() {
    let records = vec![
        Record::new("Ada", "Lovelace", "Engines", ""),
        Record::new("Grace", "Hopper", "Foundation for American Innovation", ""),
        Record::new("Alan", "Turing", "Bletchley", ""),
        Record::new("Edsger", "Dijkstra", "Eindhoven", ""),
    ];
    let options = DocumentOptions {
        excluded_organizations: DEFAULT_EXCLUDED_ORGANIZATIONS
            .iter()
            .map(|org| org.to_string())
            .collect(),
        limit: Some(2),
        ..Default::default()
    };

    let document = generate_pdf_bytes(DocumentKind::TableTents, &records, &options).expect("generate");
    assert_eq!(document.record_count, 2);
    assert_eq!(document.page_count, 1);
}

#[test]
fn test_document_title_in_info() {
    let records = vec![Record::new("Ada", "Lovelace", "", "")];
    let options = DocumentOptions {
        title: Some("Spring Summit Tents".to_string()),
        ..Default::default()
    };
    let document = generate_pdf_bytes(DocumentKind::TableTents, &records, &options).expect("generate");
    let text = String::from_utf8_lossy(&document.bytes);
    assert!(text.contains("Spring Summit Tents"));
}
