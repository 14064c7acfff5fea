//! Text measurement and layout
//!
//! - Font metrics for the built-in Helvetica faces
//! - Greedy word wrap and multi-line block measurement
//! - Alignment helpers for placing lines against an anchor

mod metrics;
mod wrap;

pub use metrics::*;
pub use wrap::*;
