//! Page drawing instructions
//!
//! Renderers describe each page as a list of [`DrawOp`]s. The list is plain
//! data, so tests can inspect exactly what a page draws, and the writer turns
//! it into a PDF content stream.

use std::fmt::Write;

use crate::layout::Rect;
use crate::text::{Font, FontSpec, TextAlign, encode_win_ansi};

/// One drawing instruction in page coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SaveState,
    RestoreState,
    /// Concatenate `[a b c d e f]` onto the current transformation matrix
    Transform([f32; 6]),
    StrokeGray(f32),
    LineWidth(f32),
    /// Dash pattern; an empty pattern is a solid line
    Dash { pattern: Vec<f32>, phase: f32 },
    StrokeRect(Rect),
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// A single line of text with its baseline starting at `(x, y)`
    Text {
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
    /// Image XObject stretched over `rect`
    Image { name: String, rect: Rect },
    /// Form XObject drawn with its origin moved to `(x, y)`
    Form { name: String, x: f32, y: f32 },
}

/// A page being drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    pub width: f32,
    pub height: f32,
    ops: Vec<DrawOp>,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Run `draw` between a save and a restore of the graphics state
    pub fn isolated(&mut self, draw: impl FnOnce(&mut Self)) {
        self.push(DrawOp::SaveState);
        draw(self);
        self.push(DrawOp::RestoreState);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.push(DrawOp::Transform([1.0, 0.0, 0.0, 1.0, x, y]));
    }

    pub fn scale(&mut self, factor: f32) {
        self.push(DrawOp::Transform([factor, 0.0, 0.0, factor, 0.0, 0.0]));
    }

    pub fn rotate_180(&mut self) {
        self.push(DrawOp::Transform([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]));
    }

    /// Set line width, gray level and dash pattern for the next strokes
    pub fn stroke_style(&mut self, width: f32, gray: f32, dash: &[f32]) {
        self.push(DrawOp::LineWidth(width));
        self.push(DrawOp::StrokeGray(gray));
        self.push(DrawOp::Dash {
            pattern: dash.to_vec(),
            phase: 0.0,
        });
    }

    pub fn stroke_rect(&mut self, rect: Rect) {
        self.push(DrawOp::StrokeRect(rect));
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    /// Draw one line of text. Empty text draws nothing.
    pub fn text(&mut self, font: FontSpec, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            font: font.font,
            size: font.size,
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Draw one line of text aligned against `anchor_x`
    pub fn aligned_text(&mut self, font: FontSpec, anchor_x: f32, y: f32, text: &str, align: TextAlign) {
        let x = align.start_x(anchor_x, font.width_of(text));
        self.text(font, x, y, text);
    }

    pub fn centered_text(&mut self, font: FontSpec, center_x: f32, y: f32, text: &str) {
        self.aligned_text(font, center_x, y, text, TextAlign::Center);
    }

    pub fn image(&mut self, name: &str, rect: Rect) {
        self.push(DrawOp::Image {
            name: name.to_string(),
            rect,
        });
    }

    pub fn form(&mut self, name: &str, x: f32, y: f32) {
        self.push(DrawOp::Form {
            name: name.to_string(),
            x,
            y,
        });
    }

    /// Text lines drawn on this page, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Serialize to PDF content stream operators
    pub fn content(&self) -> Vec<u8> {
        let mut out = String::new();
        for op in &self.ops {
            write_op(&mut out, op);
        }
        out.into_bytes()
    }
}

fn write_op(out: &mut String, op: &DrawOp) {
    // Writing into a String cannot fail
    let _ = match op {
        DrawOp::SaveState => writeln!(out, "q"),
        DrawOp::RestoreState => writeln!(out, "Q"),
        DrawOp::Transform(m) => writeln!(
            out,
            "{} {} {} {} {} {} cm",
            num(m[0]),
            num(m[1]),
            num(m[2]),
            num(m[3]),
            num(m[4]),
            num(m[5])
        ),
        DrawOp::StrokeGray(gray) => writeln!(out, "{} G", num(*gray)),
        DrawOp::LineWidth(width) => writeln!(out, "{} w", num(*width)),
        DrawOp::Dash { pattern, phase } => {
            let pattern: Vec<String> = pattern.iter().map(|v| num(*v)).collect();
            writeln!(out, "[{}] {} d", pattern.join(" "), num(*phase))
        }
        DrawOp::StrokeRect(rect) => writeln!(
            out,
            "{} {} {} {} re S",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height)
        ),
        DrawOp::Line { x1, y1, x2, y2 } => writeln!(
            out,
            "{} {} m {} {} l S",
            num(*x1),
            num(*y1),
            num(*x2),
            num(*y2)
        ),
        DrawOp::Text {
            font,
            size,
            x,
            y,
            text,
        } => writeln!(
            out,
            "BT /{} {} Tf {} {} Td <{}> Tj ET",
            font.resource_name(),
            num(*size),
            num(*x),
            num(*y),
            hex(&encode_win_ansi(text))
        ),
        DrawOp::Image { name, rect } => writeln!(
            out,
            "q {} 0 0 {} {} {} cm /{} Do Q",
            num(rect.width),
            num(rect.height),
            num(rect.x),
            num(rect.y),
            name
        ),
        DrawOp::Form { name, x, y } => {
            writeln!(out, "q 1 0 0 1 {} {} cm /{} Do Q", num(*x), num(*y), name)
        }
    };
}

/// Number formatted for a content stream: at most three decimals, no exponent
fn num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{:02X}", b);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(36.0), "36");
        assert_eq!(num(0.25), "0.25");
        assert_eq!(num(-1.0), "-1");
        assert_eq!(num(64.8), "64.8");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(1.0 / 3.0), "0.333");
    }

    #[test]
    fn test_text_is_hex_encoded() {
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.text(FontSpec::bold(30.0), 10.0, 20.0, "Hi");
        let content = String::from_utf8(canvas.content()).expect("utf8");
        assert_eq!(content, "BT /F2 30 Tf 10 20 Td <4869> Tj ET\n");
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.text(FontSpec::regular(12.0), 0.0, 0.0, "");
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn test_isolated_balances_state() {
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.isolated(|c| {
            c.translate(10.0, 10.0);
            c.stroke_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        });
        assert_eq!(canvas.ops().first(), Some(&DrawOp::SaveState));
        assert_eq!(canvas.ops().last(), Some(&DrawOp::RestoreState));

        let content = String::from_utf8(canvas.content()).expect("utf8");
        assert!(content.contains("1 0 0 1 10 10 cm"));
        assert!(content.contains("0 0 5 5 re S"));
    }

    #[test]
    fn test_centered_text_position() {
        let mut canvas = PageCanvas::new(612.0, 792.0);
        let font = FontSpec::regular(10.0);
        canvas.centered_text(font, 100.0, 50.0, "Hello");
        match &canvas.ops()[0] {
            DrawOp::Text { x, .. } => assert!((x - (100.0 - 22.78 / 2.0)).abs() < 0.001),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_dash_serialization() {
        let mut canvas = PageCanvas::new(612.0, 792.0);
        canvas.stroke_style(0.5, 0.6, &[2.0, 3.0]);
        canvas.stroke_style(1.0, 0.0, &[]);
        let content = String::from_utf8(canvas.content()).expect("utf8");
        assert!(content.contains("[2 3] 0 d"));
        assert!(content.contains("[] 0 d"));
    }
}
