//! Greedy word wrapping and block measurement

use std::str::SplitWhitespace;

use super::metrics::{Font, FontSpec, text_width};

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Words are accumulated while the line still fits. A word wider than
/// `max_width` on its own is emitted alone and allowed to overflow. Blank
/// input yields no lines.
///
/// Lines are rebuilt from words, so runs of whitespace inside the text
/// collapse to a single space. Text that fits therefore comes back as one
/// line equal to the trimmed input only when it has no inner whitespace runs:
/// `"Ada  Lovelace"` becomes `"Ada Lovelace"`.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> WrappedLines<'_> {
    WrappedLines {
        words: text.split_whitespace(),
        pending: None,
        font: FontSpec::new(font, size),
        max_width,
    }
}

/// Lazy iterator over wrapped lines. Call [`wrap`] again to start over.
#[derive(Debug, Clone)]
pub struct WrappedLines<'a> {
    words: SplitWhitespace<'a>,
    pending: Option<&'a str>,
    font: FontSpec,
    max_width: f32,
}

impl Iterator for WrappedLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.pending.take().or_else(|| self.words.next())?;
        let mut line = first.to_string();
        let mut width = self.font.width_of(first);
        let space = self.font.width_of(" ");

        for word in self.words.by_ref() {
            let word_width = self.font.width_of(word);
            if width + space + word_width <= self.max_width {
                line.push(' ');
                line.push_str(word);
                width += space + word_width;
            } else {
                self.pending = Some(word);
                break;
            }
        }

        Some(line)
    }
}

/// A piece of text set in one font, wrapped to a width
#[derive(Debug, Clone, Copy)]
pub struct TextBlock<'a> {
    pub text: &'a str,
    pub font: FontSpec,
    pub max_width: f32,
    pub line_spacing: f32,
}

impl<'a> TextBlock<'a> {
    pub fn new(text: &'a str, font: FontSpec, max_width: f32, line_spacing: f32) -> Self {
        Self {
            text,
            font,
            max_width,
            line_spacing,
        }
    }

    /// Fresh iterator over the wrapped lines
    pub fn lines(&self) -> WrappedLines<'a> {
        wrap(self.text, self.font.font, self.font.size, self.max_width)
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self) -> f32 {
        self.font.size * self.line_spacing
    }

    /// Total block height: lines × size × spacing
    pub fn height(&self) -> f32 {
        self.line_count() as f32 * self.line_height()
    }

    /// Baseline of the first line when the block is vertically centered on `anchor_y`
    pub fn centered_first_baseline(&self, anchor_y: f32) -> f32 {
        anchor_y + self.height() / 2.0 - self.font.size
    }

    /// Lines paired with their baselines, starting at `first_baseline` and stepping down
    pub fn baselines(&self, first_baseline: f32) -> impl Iterator<Item = (String, f32)> + use<'a> {
        let step = self.line_height();
        self.lines()
            .enumerate()
            .map(move |(index, line)| (line, first_baseline - index as f32 * step))
    }
}

/// Horizontal alignment of a line relative to an anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Left edge for a line of `width` placed against `anchor_x`
    pub fn start_x(self, anchor_x: f32, width: f32) -> f32 {
        match self {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - width / 2.0,
            TextAlign::Right => anchor_x - width,
        }
    }
}
