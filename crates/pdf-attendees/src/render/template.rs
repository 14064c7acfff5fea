//! Record fields overlaid on a template background, one page per record

use crate::constants::TEMPLATE_LINE_SPACING;
use crate::layout::Rect;
use crate::options::TemplateField;
use crate::text::TextBlock;
use crate::types::Record;

use super::assets::{TEMPLATE_RESOURCE, TemplateBackground};
use super::canvas::PageCanvas;

pub fn template_page(record: &Record, background: &TemplateBackground, fields: &[TemplateField]) -> PageCanvas {
    let (width, height) = background.page_size();
    let mut canvas = PageCanvas::new(width, height);

    match background {
        TemplateBackground::Image { .. } => {
            canvas.image(TEMPLATE_RESOURCE, Rect::new(0.0, 0.0, width, height));
        }
        // Shift so the MediaBox corner lands on the page origin
        TemplateBackground::Pdf { bbox, .. } => canvas.form(TEMPLATE_RESOURCE, -bbox.x, -bbox.y),
    }

    for field in fields {
        let value = record.field(&field.source);
        let block = TextBlock::new(
            &value,
            field.font_spec(),
            field.max_width_pt.unwrap_or(f32::INFINITY),
            TEMPLATE_LINE_SPACING,
        );
        let anchor_x = field.x_fraction * width;
        let first = block.centered_first_baseline(field.y_fraction * height);
        for (line, baseline) in block.baselines(first) {
            canvas.aligned_text(block.font, anchor_x, baseline, &line, field.align);
        }
    }
    canvas
}

pub fn render_template(
    records: &[Record],
    background: &TemplateBackground,
    fields: &[TemplateField],
) -> Vec<PageCanvas> {
    records
        .iter()
        .map(|record| template_page(record, background, fields))
        .collect()
}
