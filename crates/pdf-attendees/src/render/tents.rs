//! Table tents, two side by side on each page

use crate::constants::*;
use crate::layout::{PageGeometry, Rect, fit_scale, page_chunks, positions};
use crate::text::{Font, FontSpec, wrap};
use crate::types::Record;

use super::assets::ImageCatalog;
use super::canvas::PageCanvas;

/// Draw wrapped lines centered on `center_x`, one `step` apart.
/// Returns the cursor one step below the last line.
fn centered_lines(
    canvas: &mut PageCanvas,
    text: &str,
    font: FontSpec,
    step: f32,
    center_x: f32,
    width: f32,
    mut y: f32,
) -> f32 {
    for line in wrap(text, font.font, font.size, width) {
        canvas.centered_text(font, center_x, y, &line);
        y -= step;
    }
    y
}

fn draw_tent(
    canvas: &mut PageCanvas,
    record: &Record,
    rect: &Rect,
    include_images: bool,
    images: &mut ImageCatalog,
) {
    canvas.isolated(|c| {
        c.stroke_style(0.5, TENT_BORDER_GRAY, &[]);
        c.stroke_rect(*rect);
    });

    let content = rect.inset(TENT_PADDING_PT);
    let center_x = content.center_x();
    let mut current_y = content.top();

    if include_images
        && let Some(path) = record.image()
        && let Some(image) = images.load(path)
    {
        let (src_w, src_h) = (image.raster.width as f32, image.raster.height as f32);
        let scale = fit_scale(
            src_w,
            src_h,
            TENT_IMAGE_MAX_WIDTH_PT.min(content.width),
            content.height * TENT_IMAGE_HEIGHT_RATIO,
        );
        let (width, height) = (src_w * scale, src_h * scale);
        let image_y = current_y - height;
        canvas.image(
            &image.name,
            Rect::new(center_x - width / 2.0, image_y, width, height),
        );
        current_y = image_y - TENT_PADDING_PT;
    }

    let name = record.full_name();
    if !name.is_empty() {
        let font = FontSpec::bold(TENT_NAME_SIZE);
        current_y = centered_lines(
            canvas,
            &name,
            font,
            TENT_NAME_SIZE * TENT_NAME_SPACING,
            center_x,
            content.width,
            current_y - TENT_NAME_SIZE,
        );
        current_y -= TENT_PADDING_PT;
    }

    current_y = centered_lines(
        canvas,
        &record.organization,
        FontSpec::new(Font::Helvetica, TENT_ORG_SIZE),
        TENT_ORG_SIZE * TENT_ORG_SPACING,
        center_x,
        content.width,
        current_y,
    );
    centered_lines(
        canvas,
        &record.title,
        FontSpec::new(Font::Helvetica, TENT_TITLE_SIZE),
        TENT_TITLE_SIZE * TENT_TITLE_SPACING,
        center_x,
        content.width,
        current_y,
    );
}

pub fn tent_page(
    chunk: &[Record],
    geometry: &PageGeometry,
    include_images: bool,
    images: &mut ImageCatalog,
) -> PageCanvas {
    let mut canvas = PageCanvas::new(geometry.page_width_pt, geometry.page_height_pt);
    for (record, rect) in chunk.iter().zip(positions(chunk.len(), geometry)) {
        draw_tent(&mut canvas, record, &rect, include_images, images);
    }
    canvas
}

pub fn render_tents(
    records: &[Record],
    geometry: &PageGeometry,
    include_images: bool,
    images: &mut ImageCatalog,
) -> Vec<PageCanvas> {
    page_chunks(records, geometry)
        .map(|chunk| tent_page(chunk, geometry, include_images, images))
        .collect()
}
