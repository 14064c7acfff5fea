pub mod constants;
mod csv;
mod filter;
mod headshot;
pub mod layout;
mod options;
mod pdf;
pub mod render;
mod session;
mod stats;
pub mod text;
mod types;

pub use self::csv::{load_from_csv, parse_csv};
pub use filter::{DEFAULT_EXCLUDED_ORGANIZATIONS, apply_limit, filter_by_organization};
pub use headshot::{HeadshotResolver, build_expected_prefix, sanitize_token};
pub use layout::{Arrangement, PageGeometry, PageMargins, Rect};
pub use options::*;
pub use pdf::{generate_pdf, generate_pdf_bytes, generate_pdf_bytes_with_progress, prepare_records};
pub use session::Session;
pub use stats::calculate_statistics;
pub use types::*;
