//! Page rendering
//!
//! Each document kind has a renderer that turns records into
//! [`PageCanvas`] drawing lists. [`write_document`] then assembles the pages
//! into a single PDF with shared fonts and images.

mod assets;
mod canvas;
mod cards;
mod facebook;
mod guides;
mod tents;
mod template;
mod writer;
mod xobject;

pub use assets::{EmbeddedImage, ImageCatalog, RasterImage, TEMPLATE_RESOURCE, TemplateBackground};
pub use canvas::{DrawOp, PageCanvas};
pub use cards::{back_page, front_page, render_backs, render_combined, render_fronts};
pub use facebook::{facebook_page, render_facebook};
pub use guides::{guide_pages, render_guides};
pub use tents::{render_tents, tent_page};
pub use template::{render_template, template_page};
pub use writer::write_document;
pub use xobject::{import_page_as_form, page_box};

use crate::options::DocumentOptions;
use crate::types::{AttendeeError, DocumentKind, Record, Result};

/// Draw every page of `kind` for `records`.
///
/// `background` is required for [`DocumentKind::Template`] and ignored otherwise.
pub fn render_pages(
    kind: DocumentKind,
    records: &[Record],
    options: &DocumentOptions,
    images: &mut ImageCatalog,
    background: Option<&TemplateBackground>,
) -> Result<Vec<PageCanvas>> {
    let mode = options.duplex_mode;
    let pages = match kind {
        DocumentKind::Fronts => render_fronts(records, &options.flashcard_geometry),
        DocumentKind::Backs => render_backs(records, &options.flashcard_geometry, mode, images),
        DocumentKind::Combined => render_combined(records, &options.flashcard_geometry, mode, images),
        DocumentKind::Guides => render_guides(records, &options.flashcard_geometry, mode),
        DocumentKind::Facebook => render_facebook(records, &options.facebook_geometry, images),
        DocumentKind::TableTents => render_tents(
            records,
            &options.tent_geometry,
            options.include_images,
            images,
        ),
        DocumentKind::Template => {
            let fields = options
                .template
                .as_ref()
                .map(|template| template.fields.as_slice())
                .ok_or_else(|| AttendeeError::Config("Template options are required".to_string()))?;
            let background = background.ok_or_else(|| {
                AttendeeError::Config("Template background was not loaded".to_string())
            })?;
            render_template(records, background, fields)
        }
    };
    Ok(pages)
}
