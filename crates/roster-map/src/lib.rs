pub mod mapper;
pub mod text;

pub use mapper::{AutoMapper, DEFAULT_MIN_CONFIDENCE, validate_mapping};
pub use text::normalize_text;
