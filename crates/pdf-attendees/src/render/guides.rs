//! Cut guides for flashcard sheets
//!
//! Each chunk gets a front guide page and a back guide page. Both outline
//! the card cut lines, the safe area and the card centers.

use crate::constants::*;
use crate::layout::{PageGeometry, Rect, SheetSide, back_side, page_chunks, positions};
use crate::text::FontSpec;
use crate::types::{DuplexMode, Record};

use super::canvas::PageCanvas;

const FOOTER: &str =
    "Solid outline = 3x5 cut line. Dashed outline = safe area for text/images (80%).";

fn heading(side: SheetSide, page_number: usize, mode: DuplexMode) -> String {
    match side {
        SheetSide::Front => format!("Front cut guide – page {page_number}"),
        SheetSide::Back => {
            format!("Back cut guide – page {page_number} (align for {mode} duplex printing)")
        }
    }
}

fn guide_page(rects: &[Rect], geometry: &PageGeometry, heading: &str) -> PageCanvas {
    let mut canvas = PageCanvas::new(geometry.page_width_pt, geometry.page_height_pt);
    let label = FontSpec::regular(GUIDE_LABEL_SIZE);
    let left = geometry.margins.side_pt;

    canvas.text(label, left, geometry.page_height_pt - GUIDE_HEADER_OFFSET_PT, heading);

    for rect in rects {
        canvas.isolated(|c| {
            c.stroke_style(1.0, CUT_LINE_GRAY, &[4.0, 4.0]);
            c.stroke_rect(*rect);

            c.stroke_style(0.5, SAFE_AREA_GRAY, &[2.0, 3.0]);
            c.stroke_rect(rect.scaled_about_center(CARD_CONTENT_SCALE));

            let (cx, cy) = (rect.center_x(), rect.center_y());
            c.stroke_style(0.3, CROSSHAIR_GRAY, &[1.0, 2.0]);
            c.line(cx - CROSSHAIR_HALF_PT, cy, cx + CROSSHAIR_HALF_PT, cy);
            c.line(cx, cy - CROSSHAIR_HALF_PT, cx, cy + CROSSHAIR_HALF_PT);
        });
    }

    canvas.text(label, left, GUIDE_FOOTER_Y_PT, FOOTER);
    canvas
}

/// Front and back guide pages for one chunk; `page_number` starts at 1
pub fn guide_pages(
    chunk: &[Record],
    page_number: usize,
    geometry: &PageGeometry,
    mode: DuplexMode,
) -> [PageCanvas; 2] {
    let front_rects = positions(chunk.len(), geometry);
    let back_rects: Vec<Rect> = back_side(
        chunk,
        &front_rects,
        mode,
        geometry.page_width_pt,
        geometry.page_height_pt,
    )
    .into_iter()
    .map(|placement| placement.rect)
    .collect();

    [
        guide_page(&front_rects, geometry, &heading(SheetSide::Front, page_number, mode)),
        guide_page(&back_rects, geometry, &heading(SheetSide::Back, page_number, mode)),
    ]
}

pub fn render_guides(records: &[Record], geometry: &PageGeometry, mode: DuplexMode) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .enumerate()
        .flat_map(|(index, chunk)| guide_pages(chunk, index + 1, geometry, mode))
        .collect()
}
