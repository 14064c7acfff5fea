use lopdf::{Dictionary, Document, Object, Stream};
use pdf_attendees::text::{FontSpec, TextAlign};
use pdf_attendees::*;
use std::path::Path;

/// Where the background's MediaBox is stored
#[derive(Clone, Copy)]
enum BoxOn {
    Page,
    /// On the `Pages` node as an indirect array, inherited by the page
    PagesNode,
}

/// Write a one-page PDF with the given MediaBox to `path`
fn write_background_pdf(path: &Path, width: i64, height: i64, box_on: BoxOn) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        b"0.5 G 10 10 100 50 re S".to_vec(),
    ));
    let media_box = Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ]);

    let mut page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]);
    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(1)),
    ]);
    match box_on {
        BoxOn::Page => page.set("MediaBox", media_box),
        BoxOn::PagesNode => {
            let box_id = doc.add_object(media_box);
            pages.set("MediaBox", Object::Reference(box_id));
        }
    }

    let page_id = doc.add_object(page);
    pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save background");
}

fn media_box(doc: &Document, page_id: lopdf::ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .and_then(|page| page.get(b"MediaBox"))
        .and_then(|obj| obj.as_array())
        .expect("media box")
        .iter()
        .map(|value| match value {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("unexpected MediaBox entry {other:?}"),
        })
        .collect()
}

fn attendees() -> Vec<Record> {
    vec![
        Record::new("Ada", "Lovelace", "Analytical Engines", "Countess").with_extra("Table", "4"),
        Record::new("Grace", "Hopper", "US Navy", "Rear Admiral").with_extra("Table", "9"),
        Record::new("Alan", "Turing", "Bletchley Park", "").with_extra("Table", "2"),
    ]
}

#[test]
fn test_image_template_one_page_per_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("badge.png");
    image::RgbImage::from_pixel(288, 216, image::Rgb([230, 240, 255]))
        .save(&background)
        .expect("save");

    let options = DocumentOptions {
        template: Some(TemplateOptions::new(&background)),
        ..Default::default()
    };
    let document = generate_pdf_bytes(DocumentKind::Template, &attendees(), &options).expect("generate");
    assert_eq!(document.page_count, 3);

    let doc = Document::load_mem(&document.bytes).expect("reload");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 3);
    for page_id in pages.values() {
        assert_eq!(media_box(&doc, *page_id), vec![0.0, 0.0, 288.0, 216.0]);
        let content = doc.get_page_content(*page_id).expect("content");
        assert!(String::from_utf8_lossy(&content).contains("/Tpl Do"));
    }
}

#[test]
fn test_pdf_template_with_custom_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("certificate.pdf");
    write_background_pdf(&background, 792, 612, BoxOn::Page);

    let fields = vec![
        TemplateField::new(FieldSource::FullName, 0.5, 0.6, FontSpec::bold(36.0)),
        TemplateField::new(FieldSource::Organization, 0.5, 0.45, FontSpec::regular(18.0))
            .with_max_width(400.0),
        TemplateField::new(FieldSource::Extra("Table".to_string()), 0.9, 0.1, FontSpec::regular(12.0))
            .with_align(TextAlign::Right),
    ];
    let options = DocumentOptions {
        template: Some(TemplateOptions {
            background: background.clone(),
            fields,
        }),
        limit: Some(2),
        ..Default::default()
    };

    let document = generate_pdf_bytes(DocumentKind::Template, &attendees(), &options).expect("generate");
    assert_eq!(document.page_count, 2);
    assert_eq!(document.record_count, 2);

    let doc = Document::load_mem(&document.bytes).expect("reload");
    for page_id in doc.get_pages().values() {
        assert_eq!(media_box(&doc, *page_id), vec![0.0, 0.0, 792.0, 612.0]);
    }

    // The background is imported once as a form shared by every page
    let forms = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|subtype| subtype.as_name())
                .is_ok_and(|name| name == b"Form")
        })
        .count();
    assert_eq!(forms, 1);
}

#[test]
fn test_pdf_template_size_inherited_from_page_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("a4.pdf");
    write_background_pdf(&background, 595, 842, BoxOn::PagesNode);

    let options = DocumentOptions {
        template: Some(TemplateOptions::new(&background)),
        ..Default::default()
    };
    let document = generate_pdf_bytes(DocumentKind::Template, &attendees(), &options).expect("generate");
    assert_eq!(document.page_count, 3);

    let doc = Document::load_mem(&document.bytes).expect("reload");
    for page_id in doc.get_pages().values() {
        assert_eq!(media_box(&doc, *page_id), vec![0.0, 0.0, 595.0, 842.0]);
    }
}

#[test]
fn test_unsupported_template_fails_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("badge.docx");
    std::fs::write(&background, b"not a template").expect("write");

    let options = DocumentOptions {
        template: Some(TemplateOptions::new(&background)),
        ..Default::default()
    };
    let result = generate_pdf_bytes(DocumentKind::Template, &attendees(), &options);
    assert!(matches!(result, Err(AttendeeError::UnsupportedTemplate(_))));
}

#[test]
fn test_unreadable_template_image_fails_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("badge.png");
    std::fs::write(&background, b"not a png").expect("write");

    let options = DocumentOptions {
        template: Some(TemplateOptions::new(&background)),
        ..Default::default()
    };
    let result = generate_pdf_bytes(DocumentKind::Template, &attendees(), &options);
    assert!(matches!(result, Err(AttendeeError::Image(_))));
}
