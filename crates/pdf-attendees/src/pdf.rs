use crate::filter::{apply_limit, filter_by_organization};
use crate::options::DocumentOptions;
use crate::render::{ImageCatalog, TemplateBackground, render_pages, write_document};
use crate::types::*;
use log::{debug, info, warn};
use std::path::Path;

/// Records selected for `kind`, and the names dropped for lacking a headshot.
///
/// Records without any name part never enter the pipeline. Excluded
/// organizations are removed next. Kinds that need headshots then drop
/// records without one, and the limit applies last so it counts only records
/// that will be drawn.
pub fn prepare_records(
    kind: DocumentKind,
    records: &[Record],
    options: &DocumentOptions,
) -> (Vec<Record>, Vec<String>) {
    let named: Vec<Record> = records.iter().filter(|record| record.has_name()).cloned().collect();
    if named.len() < records.len() {
        debug!("Ignoring {} record(s) without a name", records.len() - named.len());
    }
    let mut selected = filter_by_organization(&named, &options.excluded_organizations);

    let mut missing = Vec::new();
    if kind.requires_headshots() {
        selected.retain(|record| {
            let has_image = record.image().is_some();
            if !has_image {
                missing.push(record.full_name());
            }
            has_image
        });
        if !missing.is_empty() {
            warn!(
                "{}: leaving out {} record(s) without a headshot",
                kind.name(),
                missing.len()
            );
        }
    }

    (apply_limit(selected, options.limit), missing)
}

pub async fn generate_pdf(
    kind: DocumentKind,
    records: &[Record],
    options: &DocumentOptions,
    output_path: impl AsRef<Path>,
) -> Result<GenerationReport> {
    let records = records.to_vec();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    let document =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(kind, &records, &options)).await??;

    tokio::fs::write(&output_path, &document.bytes).await?;
    info!("Wrote {}", output_path.display());

    Ok(GenerationReport {
        output_path,
        page_count: document.page_count,
        record_count: document.record_count,
        missing_headshots: document.missing_headshots,
        skipped_images: document.skipped_images,
    })
}

pub fn generate_pdf_bytes(
    kind: DocumentKind,
    records: &[Record],
    options: &DocumentOptions,
) -> Result<GeneratedDocument> {
    generate_pdf_bytes_with_progress(kind, records, options, &mut |_| {})
}

/// Render `kind` to PDF bytes, reporting each written page to `on_progress`.
pub fn generate_pdf_bytes_with_progress(
    kind: DocumentKind,
    records: &[Record],
    options: &DocumentOptions,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<GeneratedDocument> {
    options.validate()?;

    let (records, missing_headshots) = prepare_records(kind, records, options);
    if records.is_empty() {
        return Err(AttendeeError::NoRecords);
    }

    let background = match kind {
        DocumentKind::Template => {
            let template = options.template.as_ref().ok_or_else(|| {
                AttendeeError::Config("Template documents need template options".to_string())
            })?;
            Some(TemplateBackground::open(&template.background)?)
        }
        _ => None,
    };

    if let Some(geometry) = options.geometry_for(kind) {
        debug!(
            "{}: {} per page ({:?}) on {}x{}pt",
            kind.name(),
            geometry.items_per_page,
            geometry.arrangement,
            geometry.page_width_pt,
            geometry.page_height_pt
        );
    }

    let mut images = ImageCatalog::new();
    let pages = render_pages(kind, &records, options, &mut images, background.as_ref())?;

    let title = options.title.as_deref().unwrap_or(kind.name());
    let bytes = write_document(&pages, &images, background.as_ref(), title, on_progress)?;

    info!(
        "{}: {} page(s) for {} record(s)",
        kind.name(),
        pages.len(),
        records.len()
    );

    Ok(GeneratedDocument {
        bytes,
        page_count: pages.len(),
        record_count: records.len(),
        missing_headshots,
        skipped_images: images.skipped().to_vec(),
    })
}
