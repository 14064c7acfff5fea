//! Flashcard fronts and backs
//!
//! Fronts carry the attendee's name, organization and title. Backs carry the
//! headshot, placed so each one prints behind its front after the duplex
//! flip. Card content is drawn at [`CARD_CONTENT_SCALE`] about the card center.

use crate::constants::*;
use crate::layout::{PageGeometry, Rect, back_side, fit_centered, front_side, page_chunks, positions};
use crate::text::{Font, FontSpec, TextBlock, wrap};
use crate::types::{DuplexMode, Record};

use super::assets::ImageCatalog;
use super::canvas::PageCanvas;

/// Move the origin to the card's bottom-left corner in card space, turning
/// the card 180° when `rotated` and scaling content about the card center.
fn card_transform(canvas: &mut PageCanvas, rect: &Rect, rotated: bool) {
    canvas.translate(rect.x, rect.y);
    canvas.translate(rect.width / 2.0, rect.height / 2.0);
    if rotated {
        canvas.rotate_180();
    }
    canvas.scale(CARD_CONTENT_SCALE);
    canvas.translate(-rect.width / 2.0, -rect.height / 2.0);
}

fn draw_front_card(canvas: &mut PageCanvas, record: &Record, rect: &Rect) {
    let full_name = record.full_name();
    let center_x = rect.width / 2.0;
    let text_width = (rect.width - CARD_TEXT_INSET_PT).max(0.0);

    canvas.isolated(|c| {
        card_transform(c, rect, false);

        let name = TextBlock::new(
            &full_name,
            FontSpec::bold(CARD_NAME_SIZE),
            text_width,
            DEFAULT_LINE_SPACING,
        );
        let mut last_baseline = rect.height - CARD_NAME_OFFSET_PT;
        for (line, baseline) in name.baselines(last_baseline) {
            c.centered_text(name.font, center_x, baseline, &line);
            last_baseline = baseline;
        }

        let mut y = last_baseline - CARD_NAME_TO_BODY_PT;

        let org_font = FontSpec::regular(CARD_ORG_SIZE);
        for line in wrap(&record.organization, Font::Helvetica, CARD_ORG_SIZE, text_width) {
            c.centered_text(org_font, center_x, y, &line);
            y -= CARD_ORG_LINE_STEP_PT;
        }

        let title_font = FontSpec::regular(CARD_TITLE_SIZE);
        for line in wrap(&record.title, Font::Helvetica, CARD_TITLE_SIZE, text_width) {
            c.centered_text(title_font, center_x, y, &line);
            y -= CARD_TITLE_LINE_STEP_PT;
        }
    });
}

fn draw_back_card(
    canvas: &mut PageCanvas,
    record: &Record,
    rect: &Rect,
    rotated: bool,
    images: &mut ImageCatalog,
) {
    let Some(path) = record.image() else {
        return;
    };
    let Some(image) = images.load(path) else {
        return;
    };
    let card = Rect::new(0.0, 0.0, rect.width, rect.height);
    let placed = fit_centered(image.raster.width as f32, image.raster.height as f32, &card);

    canvas.isolated(|c| {
        card_transform(c, rect, rotated);
        c.image(&image.name, placed);
    });
}

/// Card fronts for one chunk
pub fn front_page(chunk: &[Record], geometry: &PageGeometry) -> PageCanvas {
    let mut canvas = PageCanvas::new(geometry.page_width_pt, geometry.page_height_pt);
    let rects = positions(chunk.len(), geometry);
    for placement in front_side(chunk, &rects) {
        draw_front_card(&mut canvas, placement.item, &placement.rect);
    }
    canvas
}

/// Card backs for one chunk, arranged for `mode`
pub fn back_page(
    chunk: &[Record],
    geometry: &PageGeometry,
    mode: DuplexMode,
    images: &mut ImageCatalog,
) -> PageCanvas {
    let mut canvas = PageCanvas::new(geometry.page_width_pt, geometry.page_height_pt);
    let rects = positions(chunk.len(), geometry);
    let placements = back_side(
        chunk,
        &rects,
        mode,
        geometry.page_width_pt,
        geometry.page_height_pt,
    );
    for placement in placements {
        draw_back_card(&mut canvas, placement.item, &placement.rect, placement.rotated, images);
    }
    canvas
}

pub fn render_fronts(records: &[Record], geometry: &PageGeometry) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .map(|chunk| front_page(chunk, geometry))
        .collect()
}

pub fn render_backs(
    records: &[Record],
    geometry: &PageGeometry,
    mode: DuplexMode,
    images: &mut ImageCatalog,
) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .map(|chunk| back_page(chunk, geometry, mode, images))
        .collect()
}

/// Fronts and backs interleaved: front 1, back 1, front 2, back 2, ...
pub fn render_combined(
    records: &[Record],
    geometry: &PageGeometry,
    mode: DuplexMode,
    images: &mut ImageCatalog,
) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .flat_map(|chunk| [front_page(chunk, geometry), back_page(chunk, geometry, mode, images)])
        .collect()
}
