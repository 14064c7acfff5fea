//! Layout data types
//!
//! All coordinates are PDF user space: points, origin at the bottom-left
//! corner of the page, y growing upward.

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Same center, both sides multiplied by `factor`
    pub fn scaled_about_center(&self, factor: f32) -> Rect {
        let width = self.width * factor;
        let height = self.height * factor;
        Rect::new(
            self.center_x() - width / 2.0,
            self.center_y() - height / 2.0,
            width,
            height,
        )
    }

    /// Shrink by `amount` on every side, never below zero size
    pub fn inset(&self, amount: f32) -> Rect {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Rect::new(self.x + amount, self.y + amount, width, height)
    }

    /// True when the interiors intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// True when `self` lies inside a `width` x `height` page
    pub fn within_page(&self, width: f32, height: f32) -> bool {
        const EPS: f32 = 0.01;
        self.x >= -EPS
            && self.y >= -EPS
            && self.right() <= width + EPS
            && self.top() <= height + EPS
    }
}

/// How items share a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Arrangement {
    /// Fixed-size items stacked top to bottom; leftover height becomes the gap
    #[default]
    Stacked,
    /// Side-by-side columns sharing the available width, one row per page
    Columns,
    /// Equal horizontal bands filling the height between the margins
    Bands,
}

/// An item assigned to a rectangle on one side of a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a, T> {
    pub item: &'a T,
    pub rect: Rect,
    /// Drawn turned 180° about the rectangle center
    pub rotated: bool,
}

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}
