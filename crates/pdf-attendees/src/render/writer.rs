//! Assembling drawn pages into a PDF document

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::text::Font;
use crate::types::{Progress, Result};

use super::assets::{ImageCatalog, RasterImage, TEMPLATE_RESOURCE, TemplateBackground};
use super::canvas::PageCanvas;
use super::xobject::import_page_as_form;

/// Write `pages` into a PDF.
///
/// Every page shares one resource dictionary holding both Helvetica faces,
/// each decoded image, and the template background when there is one.
/// `on_progress` is called after each page is added.
pub fn write_document(
    pages: &[PageCanvas],
    images: &ImageCatalog,
    background: Option<&TemplateBackground>,
    title: &str,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let resources_id = add_resources(&mut doc, images, background)?;

    let total = pages.len();
    let mut page_refs = Vec::with_capacity(total);
    for (index, page) in pages.iter().enumerate() {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), page.content()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page.width),
                    Object::Real(page.height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
        ]));
        page_refs.push(Object::Reference(page_id));

        on_progress(Progress {
            operation: "Writing pages".to_string(),
            current: index + 1,
            total,
        });
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    let info_id = doc.add_object(Dictionary::from_iter(vec![
        ("Title", Object::string_literal(title)),
        ("Producer", Object::string_literal("pdf-attendees")),
    ]));

    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn add_resources(
    doc: &mut Document,
    images: &ImageCatalog,
    background: Option<&TemplateBackground>,
) -> Result<ObjectId> {
    let mut fonts = Dictionary::new();
    for font in Font::all() {
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(font.base_font().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut xobjects = Dictionary::new();
    for image in images.images() {
        let image_id = doc.add_object(image_xobject(&image.raster)?);
        xobjects.set(image.name.as_str(), Object::Reference(image_id));
    }

    match background {
        Some(TemplateBackground::Image { raster, .. }) => {
            let image_id = doc.add_object(image_xobject(raster)?);
            xobjects.set(TEMPLATE_RESOURCE, Object::Reference(image_id));
        }
        Some(TemplateBackground::Pdf {
            document, page_id, ..
        }) => {
            let form_id = import_page_as_form(doc, document, *page_id)?;
            xobjects.set(TEMPLATE_RESOURCE, Object::Reference(form_id));
        }
        None => {}
    }

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    if !xobjects.is_empty() {
        resources.set("XObject", Object::Dictionary(xobjects));
    }
    Ok(doc.add_object(resources))
}

/// Flate-compressed DeviceRGB image stream
fn image_xobject(raster: &RasterImage) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raster.rgb)?;
    let data = encoder.finish()?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(raster.width as i64)),
        ("Height", Object::Integer(raster.height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);

    let mut stream = Stream::new(dict, data);
    // Already compressed
    stream.allows_compression = false;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontSpec;

    #[test]
    fn test_pages_and_progress() {
        let mut first = PageCanvas::new(612.0, 792.0);
        first.text(FontSpec::regular(12.0), 72.0, 720.0, "First");
        let second = PageCanvas::new(612.0, 792.0);

        let mut seen = Vec::new();
        let bytes = write_document(
            &[first, second],
            &ImageCatalog::new(),
            None,
            "Test",
            &mut |progress| seen.push((progress.current, progress.total)),
        )
        .expect("write");

        assert_eq!(seen, vec![(1, 2), (2, 2)]);

        let doc = Document::load_mem(&bytes).expect("reload");
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_fonts_use_win_ansi() {
        let bytes = write_document(
            &[PageCanvas::new(100.0, 100.0)],
            &ImageCatalog::new(),
            None,
            "Fonts",
            &mut |_| {},
        )
        .expect("write");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert_eq!(text.matches("/WinAnsiEncoding").count(), 2);
    }
}
