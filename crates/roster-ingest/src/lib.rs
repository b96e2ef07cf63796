pub mod delimited;
pub mod error;
pub mod format;
pub mod table;
pub mod workbook;

pub use delimited::read_delimited;
pub use error::{IngestError, Result};
pub use format::FileFormat;
pub use table::{RawTable, build_column_hints};
pub use workbook::read_workbook;

use std::path::Path;

/// Read any supported tabular file, dispatching on its extension.
pub fn read_table(path: &Path) -> Result<RawTable> {
    match FileFormat::from_path(path)? {
        FileFormat::Delimited { delimiter } => read_delimited(path, delimiter),
        FileFormat::Workbook => read_workbook(path),
    }
}
