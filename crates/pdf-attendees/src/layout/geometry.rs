//! Item placement on a page
//!
//! Given how many items land on a page and the page geometry, compute the
//! rectangle each item occupies. The result depends only on the inputs.

use crate::constants::*;
use crate::types::{AttendeeError, Result};

use super::{Arrangement, Rect};

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMargins {
    pub top_pt: f32,
    pub bottom_pt: f32,
    /// Applied to both the left and right edge
    pub side_pt: f32,
}

impl PageMargins {
    pub fn uniform(margin_pt: f32) -> Self {
        Self {
            top_pt: margin_pt,
            bottom_pt: margin_pt,
            side_pt: margin_pt,
        }
    }
}

/// Geometry of one document type
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageGeometry {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Item width; only read by [`Arrangement::Stacked`], derived otherwise
    pub item_width_pt: f32,
    /// Item height; only read by [`Arrangement::Stacked`], derived otherwise
    pub item_height_pt: f32,
    pub items_per_page: usize,
    pub margins: PageMargins,
    /// Space between columns for [`Arrangement::Columns`]
    pub gap_pt: f32,
    pub arrangement: Arrangement,
}

impl PageGeometry {
    /// Three 5" x 3" cards per Letter page, centered horizontally
    pub fn flashcards() -> Self {
        Self {
            page_width_pt: LETTER_WIDTH_PT,
            page_height_pt: LETTER_HEIGHT_PT,
            item_width_pt: CARD_WIDTH_PT,
            item_height_pt: CARD_HEIGHT_PT,
            items_per_page: CARDS_PER_PAGE,
            margins: PageMargins {
                top_pt: CARD_TOP_MARGIN_PT,
                bottom_pt: CARD_BOTTOM_MARGIN_PT,
                side_pt: (LETTER_WIDTH_PT - CARD_WIDTH_PT) / 2.0,
            },
            gap_pt: 0.0,
            arrangement: Arrangement::Stacked,
        }
    }

    /// Five roster bands per Letter page
    pub fn facebook() -> Self {
        Self {
            page_width_pt: LETTER_WIDTH_PT,
            page_height_pt: LETTER_HEIGHT_PT,
            item_width_pt: 0.0,
            item_height_pt: 0.0,
            items_per_page: FACEBOOKS_PER_PAGE,
            margins: PageMargins {
                top_pt: FACEBOOK_TOP_MARGIN_PT,
                bottom_pt: FACEBOOK_BOTTOM_MARGIN_PT,
                side_pt: FACEBOOK_SIDE_MARGIN_PT,
            },
            gap_pt: 0.0,
            arrangement: Arrangement::Bands,
        }
    }

    /// Two table tents side by side per Letter page
    pub fn table_tents() -> Self {
        Self {
            page_width_pt: LETTER_WIDTH_PT,
            page_height_pt: LETTER_HEIGHT_PT,
            item_width_pt: 0.0,
            item_height_pt: 0.0,
            items_per_page: TENTS_PER_PAGE,
            margins: PageMargins::uniform(TENT_MARGIN_PT),
            gap_pt: TENT_GAP_PT,
            arrangement: Arrangement::Columns,
        }
    }

    /// Width available between the side margins
    pub fn available_width(&self) -> f32 {
        (self.page_width_pt - 2.0 * self.margins.side_pt).max(0.0)
    }

    /// Height available between the top and bottom margins
    pub fn available_height(&self) -> f32 {
        (self.page_height_pt - self.margins.top_pt - self.margins.bottom_pt).max(0.0)
    }

    /// Size of one item as laid out, derived for columns and bands
    pub fn item_size(&self) -> (f32, f32) {
        let per_page = self.items_per_page.max(1) as f32;
        match self.arrangement {
            Arrangement::Stacked => (self.item_width_pt, self.item_height_pt),
            Arrangement::Columns => {
                let gaps = self.gap_pt * (per_page - 1.0);
                (
                    ((self.available_width() - gaps) / per_page).max(0.0),
                    self.available_height(),
                )
            }
            Arrangement::Bands => (self.available_width(), self.available_height() / per_page),
        }
    }

    /// Check that a full page of items fits.
    pub fn validate(&self) -> Result<()> {
        if self.page_width_pt <= 0.0 || self.page_height_pt <= 0.0 {
            return Err(AttendeeError::Config(
                "Page dimensions must be positive".to_string(),
            ));
        }
        if self.items_per_page == 0 {
            return Err(AttendeeError::Config(
                "Items per page must be at least 1".to_string(),
            ));
        }
        let margins = &self.margins;
        if margins.top_pt < 0.0 || margins.bottom_pt < 0.0 || margins.side_pt < 0.0 {
            return Err(AttendeeError::Config("Margins must not be negative".to_string()));
        }
        if self.gap_pt < 0.0 {
            return Err(AttendeeError::Config("Gap must not be negative".to_string()));
        }

        match self.arrangement {
            Arrangement::Stacked => {
                if self.item_width_pt <= 0.0 || self.item_height_pt <= 0.0 {
                    return Err(AttendeeError::Config(
                        "Item dimensions must be positive".to_string(),
                    ));
                }
                let stacked = self.item_height_pt * self.items_per_page as f32;
                if stacked > self.available_height() + 0.01 {
                    return Err(AttendeeError::Config(format!(
                        "{} items of {:.1}pt do not fit in {:.1}pt of page height",
                        self.items_per_page,
                        self.item_height_pt,
                        self.available_height()
                    )));
                }
                if margins.side_pt + self.item_width_pt > self.page_width_pt + 0.01 {
                    return Err(AttendeeError::Config(format!(
                        "Item width {:.1}pt does not fit beside a {:.1}pt side margin",
                        self.item_width_pt, margins.side_pt
                    )));
                }
            }
            Arrangement::Columns | Arrangement::Bands => {
                let (width, height) = self.item_size();
                if width <= 0.0 || height <= 0.0 {
                    return Err(AttendeeError::Config(
                        "Margins and gaps leave no room for items".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Positions
// =============================================================================

/// Rectangles for `count` items on one page, in drawing order.
///
/// `count` is clamped to `items_per_page`. Stacked items start at the top
/// margin and spread the leftover height evenly between them; a negative
/// leftover collapses the gap to zero rather than overlapping items.
pub fn positions(count: usize, geometry: &PageGeometry) -> Vec<Rect> {
    let count = count.min(geometry.items_per_page);
    if count == 0 {
        return Vec::new();
    }

    match geometry.arrangement {
        Arrangement::Stacked => stacked_positions(count, geometry),
        Arrangement::Columns => column_positions(count, geometry),
        Arrangement::Bands => band_positions(count, geometry),
    }
}

fn stacked_positions(count: usize, geometry: &PageGeometry) -> Vec<Rect> {
    let (width, height) = geometry.item_size();
    let slack = geometry.available_height() - height * count as f32;
    let gap = if count > 1 {
        (slack / (count - 1) as f32).max(0.0)
    } else {
        0.0
    };

    let mut current_y = geometry.page_height_pt - geometry.margins.top_pt - height;
    let mut rects = Vec::with_capacity(count);
    for _ in 0..count {
        rects.push(Rect::new(geometry.margins.side_pt, current_y, width, height));
        current_y -= height + gap;
    }
    rects
}

fn column_positions(count: usize, geometry: &PageGeometry) -> Vec<Rect> {
    let (width, height) = geometry.item_size();
    (0..count)
        .map(|col| {
            Rect::new(
                geometry.margins.side_pt + col as f32 * (width + geometry.gap_pt),
                geometry.margins.bottom_pt,
                width,
                height,
            )
        })
        .collect()
}

fn band_positions(count: usize, geometry: &PageGeometry) -> Vec<Rect> {
    let (width, height) = geometry.item_size();
    let top = geometry.page_height_pt - geometry.margins.top_pt;
    (0..count)
        .map(|row| {
            Rect::new(
                geometry.margins.side_pt,
                top - (row + 1) as f32 * height,
                width,
                height,
            )
        })
        .collect()
}

/// Split `items` into page-sized chunks
pub fn page_chunks<'a, T>(items: &'a [T], geometry: &PageGeometry) -> std::slice::Chunks<'a, T> {
    items.chunks(geometry.items_per_page.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_is_empty() {
        assert!(positions(0, &PageGeometry::flashcards()).is_empty());
    }

    #[test]
    fn test_single_card_sits_at_top_margin() {
        let geometry = PageGeometry::flashcards();
        let rects = positions(1, &geometry);
        assert_eq!(rects.len(), 1);
        assert!((rects[0].top() - (LETTER_HEIGHT_PT - CARD_TOP_MARGIN_PT)).abs() < 0.001);
        assert!((rects[0].center_x() - LETTER_WIDTH_PT / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_full_page_spans_margins() {
        let geometry = PageGeometry::flashcards();
        let rects = positions(3, &geometry);
        // 792 - 72 - 3 * 216 = 72 of slack over two gaps
        assert!((rects[0].y - rects[1].top() - 36.0).abs() < 0.001);
        assert!((rects[2].y - CARD_BOTTOM_MARGIN_PT).abs() < 0.001);
    }

    #[test]
    fn test_every_count_fits_without_overlap() {
        for geometry in [
            PageGeometry::flashcards(),
            PageGeometry::facebook(),
            PageGeometry::table_tents(),
        ] {
            for count in 0..=geometry.items_per_page {
                let rects = positions(count, &geometry);
                assert_eq!(rects.len(), count);
                for (i, rect) in rects.iter().enumerate() {
                    assert!(rect.within_page(geometry.page_width_pt, geometry.page_height_pt));
                    for other in &rects[i + 1..] {
                        assert!(!rect.overlaps(other));
                    }
                }
                assert_eq!(rects, positions(count, &geometry));
            }
        }
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(positions(10, &PageGeometry::flashcards()).len(), 3);
    }

    #[test]
    fn test_negative_slack_collapses_gap() {
        let mut geometry = PageGeometry::flashcards();
        geometry.item_height_pt = 300.0;
        let rects = positions(3, &geometry);
        for pair in rects.windows(2) {
            assert!((pair[0].y - pair[1].top()).abs() < 0.001);
        }
    }

    #[test]
    fn test_tent_columns() {
        let geometry = PageGeometry::table_tents();
        let rects = positions(2, &geometry);
        let available = LETTER_WIDTH_PT - 2.0 * TENT_MARGIN_PT;
        let tent_width = (available - TENT_GAP_PT) / 2.0;

        assert!((rects[0].x - TENT_MARGIN_PT).abs() < 0.001);
        assert!((rects[1].x - (TENT_MARGIN_PT + tent_width + TENT_GAP_PT)).abs() < 0.001);
        assert!((rects[0].width - tent_width).abs() < 0.001);
        assert!((rects[0].height - (LETTER_HEIGHT_PT - 2.0 * TENT_MARGIN_PT)).abs() < 0.001);
    }

    #[test]
    fn test_bands_are_fixed_slots() {
        let geometry = PageGeometry::facebook();
        let two = positions(2, &geometry);
        let five = positions(5, &geometry);
        assert_eq!(two[..], five[..2]);
        assert!((five[4].y - FACEBOOK_BOTTOM_MARGIN_PT).abs() < 0.01);
    }

    #[test]
    fn test_presets_validate() {
        assert!(PageGeometry::flashcards().validate().is_ok());
        assert!(PageGeometry::facebook().validate().is_ok());
        assert!(PageGeometry::table_tents().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_items() {
        let mut geometry = PageGeometry::flashcards();
        geometry.items_per_page = 4;
        assert!(matches!(geometry.validate(), Err(AttendeeError::Config(_))));

        let mut geometry = PageGeometry::table_tents();
        geometry.gap_pt = 1000.0;
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_page_chunks() {
        let items: Vec<u32> = (0..7).collect();
        let sizes: Vec<usize> = page_chunks(&items, &PageGeometry::flashcards())
            .map(|chunk| chunk.len())
            .collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }
}
