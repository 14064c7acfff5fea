//! Scale-to-fit placement of images

use super::Rect;

/// Largest uniform scale that fits `src` inside `target`
pub fn fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    if src_width <= 0.0 || src_height <= 0.0 {
        return 0.0;
    }
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h).max(0.0)
}

/// Rectangle for a `src_width` x `src_height` image scaled to fit and centered in `envelope`
pub fn fit_centered(src_width: f32, src_height: f32, envelope: &Rect) -> Rect {
    let scale = fit_scale(src_width, src_height, envelope.width, envelope.height);
    let width = src_width * scale;
    let height = src_height * scale;
    Rect::new(
        envelope.x + (envelope.width - width) / 2.0,
        envelope.y + (envelope.height - height) / 2.0,
        width,
        height,
    )
}
