//! Layout calculation
//!
//! This module handles the geometry behind every document:
//! - Item rectangles for a page (stacked cards, tent columns, roster bands)
//! - Duplex pairing of card fronts and backs
//! - Scale-to-fit placement of images

mod duplex;
mod fit;
mod geometry;
mod types;

pub use duplex::*;
pub use fit::*;
pub use geometry::*;
pub use types::*;
