//! Duplex pairing of fronts and backs
//!
//! A front page is laid out with its chunk of items in position order. The
//! back page has to put each item's reverse side exactly behind its front
//! after the sheet comes back out of the printer.
//!
//! **Long edge:** the printer turns the back page 180° and the sheet flips on
//! its long edge. Items keep their order; positions are taken reversed.
//!
//! **Short edge:** the sheet flips on its short edge. Items are taken reversed;
//! positions keep their order.
//!
//! Either way every back item is drawn turned 180° about its own center.
//! Pairing is computed by mirroring each front rectangle through the flip, so a
//! chunk shorter than a full page still lines up with its fronts.

use crate::types::DuplexMode;

use super::{Placement, Rect};

/// Front side: item `i` at position `i`, upright
pub fn front_side<'a, T>(chunk: &'a [T], positions: &[Rect]) -> Vec<Placement<'a, T>> {
    chunk
        .iter()
        .zip(positions)
        .map(|(item, rect)| Placement {
            item,
            rect: *rect,
            rotated: false,
        })
        .collect()
}

/// Back side of a sheet whose front is [`front_side`]`(chunk, positions)`.
///
/// Placements are returned in drawing order: long edge walks the items in
/// order against the reversed positions, short edge walks the reversed items
/// against the positions in order.
pub fn back_side<'a, T>(
    chunk: &'a [T],
    positions: &[Rect],
    mode: DuplexMode,
    page_width: f32,
    page_height: f32,
) -> Vec<Placement<'a, T>> {
    let behind: Vec<Rect> = positions
        .iter()
        .map(|rect| position_behind(mode, rect, page_width, page_height))
        .collect();

    let pairs: Vec<(&'a T, Rect)> = match mode {
        DuplexMode::LongEdge => chunk.iter().zip(behind.iter().copied()).collect(),
        DuplexMode::ShortEdge => chunk
            .iter()
            .rev()
            .zip(behind.iter().rev().copied())
            .collect(),
    };

    pairs
        .into_iter()
        .map(|(item, rect)| Placement {
            item,
            rect,
            rotated: true,
        })
        .collect()
}

/// Where `rect` on the front lands in back-page coordinates.
///
/// Applying this twice returns the original rectangle, so it also answers
/// which front area a back rectangle covers.
pub fn position_behind(mode: DuplexMode, rect: &Rect, page_width: f32, page_height: f32) -> Rect {
    match mode {
        DuplexMode::LongEdge => mirror_x(&rotate_page_180(rect, page_width, page_height), page_width),
        DuplexMode::ShortEdge => mirror_y(rect, page_height),
    }
}

fn rotate_page_180(rect: &Rect, page_width: f32, page_height: f32) -> Rect {
    Rect::new(
        page_width - rect.right(),
        page_height - rect.top(),
        rect.width,
        rect.height,
    )
}

fn mirror_x(rect: &Rect, page_width: f32) -> Rect {
    Rect::new(page_width - rect.right(), rect.y, rect.width, rect.height)
}

fn mirror_y(rect: &Rect, page_height: f32) -> Rect {
    Rect::new(rect.x, page_height - rect.top(), rect.width, rect.height)
}
