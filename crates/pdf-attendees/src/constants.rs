//! Shared constants for attendee documents
//!
//! Page sizes, card dimensions and the typographic choices used by the
//! renderers live here so the layout code stays free of magic numbers.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert inches to points
pub const fn inch(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// US Letter width in points (8.5")
pub const LETTER_WIDTH_PT: f32 = inch(8.5);

/// US Letter height in points (11")
pub const LETTER_HEIGHT_PT: f32 = inch(11.0);

// =============================================================================
// Flashcards
// =============================================================================

/// 5" x 3" index card
pub const CARD_WIDTH_PT: f32 = inch(5.0);
pub const CARD_HEIGHT_PT: f32 = inch(3.0);
pub const CARDS_PER_PAGE: usize = 3;
pub const CARD_TOP_MARGIN_PT: f32 = inch(0.5);
pub const CARD_BOTTOM_MARGIN_PT: f32 = inch(0.5);

/// Card content is drawn at this scale about the card center; the guides
/// outline the same area as the safe zone.
pub const CARD_CONTENT_SCALE: f32 = 0.8;

pub const CARD_NAME_SIZE: f32 = 30.0;
pub const CARD_ORG_SIZE: f32 = 18.0;
pub const CARD_TITLE_SIZE: f32 = 16.0;
/// Name baseline distance below the card top
pub const CARD_NAME_OFFSET_PT: f32 = inch(0.9);
/// Gap between the last name line and the first organization line
pub const CARD_NAME_TO_BODY_PT: f32 = inch(1.2);
pub const CARD_ORG_LINE_STEP_PT: f32 = inch(0.45);
pub const CARD_TITLE_LINE_STEP_PT: f32 = inch(0.4);
/// Horizontal text inset, split evenly between both sides
pub const CARD_TEXT_INSET_PT: f32 = inch(1.0);

// =============================================================================
// Guides
// =============================================================================

pub const CUT_LINE_GRAY: f32 = 0.25;
pub const SAFE_AREA_GRAY: f32 = 0.6;
pub const CROSSHAIR_GRAY: f32 = 0.5;
pub const CROSSHAIR_HALF_PT: f32 = inch(0.2);
pub const GUIDE_LABEL_SIZE: f32 = 10.0;
pub const GUIDE_HEADER_OFFSET_PT: f32 = inch(0.3);
pub const GUIDE_FOOTER_Y_PT: f32 = inch(0.35);

// =============================================================================
// Facebook Proof
// =============================================================================

pub const FACEBOOKS_PER_PAGE: usize = 5;
pub const FACEBOOK_SIDE_MARGIN_PT: f32 = inch(0.6);
pub const FACEBOOK_TOP_MARGIN_PT: f32 = inch(0.75);
pub const FACEBOOK_BOTTOM_MARGIN_PT: f32 = inch(0.5);
pub const FACEBOOK_IMAGE_WIDTH_PT: f32 = inch(1.9);
pub const FACEBOOK_IMAGE_PADDING_PT: f32 = inch(0.12);
pub const FACEBOOK_SEPARATOR_GRAY: f32 = 0.85;
pub const FACEBOOK_SEPARATOR_WIDTH: f32 = 0.75;
pub const FACEBOOK_NAME_SIZE: f32 = 18.0;
pub const FACEBOOK_BODY_SIZE: f32 = 12.0;
pub const FACEBOOK_TEXT_COLUMN_GAP_PT: f32 = inch(0.3);
pub const FACEBOOK_NAME_TO_BODY_PT: f32 = inch(0.2);
pub const FACEBOOK_BODY_LINE_STEP_PT: f32 = inch(0.22);
pub const FACEBOOK_BODY_SECTION_GAP_PT: f32 = inch(0.22);

// =============================================================================
// Table Tents
// =============================================================================

pub const TENTS_PER_PAGE: usize = 2;
pub const TENT_MARGIN_PT: f32 = inch(0.5);
pub const TENT_GAP_PT: f32 = inch(0.25);
pub const TENT_PADDING_PT: f32 = inch(0.3);
pub const TENT_IMAGE_MAX_WIDTH_PT: f32 = inch(1.5);
/// Share of the content height the image may take
pub const TENT_IMAGE_HEIGHT_RATIO: f32 = 0.4;
pub const TENT_BORDER_GRAY: f32 = 0.9;
pub const TENT_NAME_SIZE: f32 = 32.0;
pub const TENT_ORG_SIZE: f32 = 18.0;
pub const TENT_TITLE_SIZE: f32 = 14.0;
pub const TENT_NAME_SPACING: f32 = 1.2;
pub const TENT_ORG_SPACING: f32 = 1.3;
pub const TENT_TITLE_SPACING: f32 = 1.2;

// =============================================================================
// Templates
// =============================================================================

pub const TEMPLATE_NAME_SIZE: f32 = 24.0;
pub const TEMPLATE_LINE_SPACING: f32 = 1.2;

/// Raster templates map one pixel to one point
pub const TEMPLATE_IMAGE_DPI: f32 = 72.0;

/// Extensions accepted as raster template backgrounds
pub const TEMPLATE_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

// =============================================================================
// Text
// =============================================================================

/// Default line spacing factor for wrapped blocks
pub const DEFAULT_LINE_SPACING: f32 = 1.2;

/// Ascent and descent as a share of the font size, used to center text blocks
pub const ASCENT_RATIO: f32 = 0.72;
pub const DESCENT_RATIO: f32 = 0.2;
