pub mod cancel;
pub mod cell;
pub mod error;
pub mod hints;
pub mod mapping;
pub mod record;
pub mod schema;

pub use cancel::CancelToken;
pub use cell::CellValue;
pub use error::{ModelError, Result};
pub use hints::ColumnHint;
pub use mapping::{HeaderMapping, MappingValidation};
pub use record::{CanonicalRecord, FieldValue};
pub use schema::{FieldType, Schema, SchemaField};
