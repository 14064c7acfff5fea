//! Facebook proof: a roster of headshots with names beside them

use crate::constants::*;
use crate::layout::{PageGeometry, Rect, fit_centered, page_chunks, positions};
use crate::text::{Font, FontSpec, wrap};
use crate::types::Record;

use super::assets::ImageCatalog;
use super::canvas::PageCanvas;

/// One line of the text column, offset from the first baseline
struct Line {
    text: String,
    font: FontSpec,
    offset: f32,
}

fn text_lines(record: &Record, width: f32) -> Vec<Line> {
    let mut lines = vec![Line {
        text: record.full_name(),
        font: FontSpec::bold(FACEBOOK_NAME_SIZE),
        offset: 0.0,
    }];

    let body = FontSpec::regular(FACEBOOK_BODY_SIZE);
    let org = wrap(&record.organization, Font::Helvetica, FACEBOOK_BODY_SIZE, width);
    let title = wrap(&record.title, Font::Helvetica, FACEBOOK_BODY_SIZE, width);

    // The body starts below the name; a title under an organization gets an extra gap
    let mut offset = -FACEBOOK_NAME_TO_BODY_PT;
    let mut step = 0.0;
    for text in org {
        offset -= step;
        lines.push(Line { text, font: body, offset });
        step = FACEBOOK_BODY_LINE_STEP_PT;
    }
    if lines.len() > 1 {
        step = FACEBOOK_BODY_SECTION_GAP_PT;
    }
    for text in title {
        offset -= step;
        lines.push(Line { text, font: body, offset });
        step = FACEBOOK_BODY_LINE_STEP_PT;
    }

    lines
}

/// Vertical extent of the lines relative to the first baseline, as (top, bottom)
fn extent(lines: &[Line]) -> (f32, f32) {
    lines.iter().fold((f32::MIN, f32::MAX), |(top, bottom), line| {
        (
            top.max(line.offset + line.font.size * ASCENT_RATIO),
            bottom.min(line.offset - line.font.size * DESCENT_RATIO),
        )
    })
}

fn draw_entry(canvas: &mut PageCanvas, record: &Record, band: &Rect, images: &mut ImageCatalog) {
    let envelope = Rect::new(
        band.x,
        band.y + FACEBOOK_IMAGE_PADDING_PT,
        FACEBOOK_IMAGE_WIDTH_PT,
        band.height - 2.0 * FACEBOOK_IMAGE_PADDING_PT,
    );

    let mut image_center = envelope.center_y();
    if let Some(path) = record.image()
        && let Some(image) = images.load(path)
    {
        let placed = fit_centered(
            image.raster.width as f32,
            image.raster.height as f32,
            &envelope,
        );
        image_center = placed.center_y();
        canvas.image(&image.name, placed);
    }

    let text_x = band.x + FACEBOOK_IMAGE_WIDTH_PT + FACEBOOK_TEXT_COLUMN_GAP_PT;
    let text_width = (band.right() - text_x).max(0.0);
    let lines = text_lines(record, text_width);
    let (top, bottom) = extent(&lines);
    let start_y = image_center - (top + bottom) / 2.0;

    for line in &lines {
        canvas.text(line.font, text_x, start_y + line.offset, &line.text);
    }
}

/// One page of the roster
pub fn facebook_page(chunk: &[Record], geometry: &PageGeometry, images: &mut ImageCatalog) -> PageCanvas {
    let mut canvas = PageCanvas::new(geometry.page_width_pt, geometry.page_height_pt);
    let bands = positions(chunk.len(), geometry);

    for (index, (record, band)) in chunk.iter().zip(&bands).enumerate() {
        draw_entry(&mut canvas, record, band, images);

        if index + 1 < bands.len() {
            canvas.isolated(|c| {
                c.stroke_style(FACEBOOK_SEPARATOR_WIDTH, FACEBOOK_SEPARATOR_GRAY, &[]);
                c.line(
                    geometry.margins.side_pt,
                    band.y,
                    geometry.page_width_pt - geometry.margins.side_pt,
                    band.y,
                );
            });
        }
    }
    canvas
}

pub fn render_facebook(
    records: &[Record],
    geometry: &PageGeometry,
    images: &mut ImageCatalog,
) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .map(|chunk| facebook_page(chunk, geometry, images))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawOp;

    fn separators(page: &PageCanvas) -> usize {
        page.ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    #[test]
    fn test_separators_between_entries() {
        let geometry = PageGeometry::facebook();
        let records: Vec<Record> = (0..7)
            .map(|i| Record::new("Member", i.to_string(), "Org", "Title"))
            .collect();
        let mut images = ImageCatalog::new();
        let pages = render_facebook(&records, &geometry, &mut images);

        assert_eq!(pages.len(), 2);
        assert_eq!(separators(&pages[0]), 4);
        assert_eq!(separators(&pages[1]), 1);
    }

    #[test]
    fn test_text_offsets() {
        let record = Record::new("Ada", "Lovelace", "Analytical Engines", "Countess");
        let lines = text_lines(&record, 300.0);
        let offsets: Vec<f32> = lines.iter().map(|line| line.offset).collect();

        let title = -FACEBOOK_NAME_TO_BODY_PT - FACEBOOK_BODY_SECTION_GAP_PT;
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1] + FACEBOOK_NAME_TO_BODY_PT).abs() < 0.001);
        assert!((offsets[2] - title).abs() < 0.001);
    }

    #[test]
    fn test_title_follows_name_without_org() {
        let record = Record::new("Ada", "Lovelace", "", "Countess");
        let lines = text_lines(&record, 300.0);
        assert_eq!(lines.len(), 2);
        assert!((lines[1].offset + FACEBOOK_NAME_TO_BODY_PT).abs() < 0.001);
    }

    #[test]
    fn test_text_centered_on_band_without_image() {
        let geometry = PageGeometry::facebook();
        let record = Record::new("Ada", "Lovelace", "", "");
        let mut images = ImageCatalog::new();
        let page = facebook_page(std::slice::from_ref(&record), &geometry, &mut images);

        let band = positions(1, &geometry)[0];
        let envelope_center = band.y + band.height / 2.0;
        let Some(DrawOp::Text { y, x, .. }) = page.ops().first() else {
            panic!("expected the name first");
        };
        let expected = envelope_center
            - (FACEBOOK_NAME_SIZE * ASCENT_RATIO - FACEBOOK_NAME_SIZE * DESCENT_RATIO) / 2.0;
        assert!((y - expected).abs() < 0.001);
        assert!((x - (band.x + FACEBOOK_IMAGE_WIDTH_PT + FACEBOOK_TEXT_COLUMN_GAP_PT)).abs() < 0.001);
    }
}
