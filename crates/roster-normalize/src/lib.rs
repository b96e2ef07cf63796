pub mod standardize;
pub mod value;

pub use standardize::standardize_field;
pub use value::{normalize, parse_date_value};
