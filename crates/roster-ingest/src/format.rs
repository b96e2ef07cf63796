use std::path::Path;

use crate::error::{IngestError, Result};

/// Supported source file families, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Delimited { delimiter: u8 },
    Workbook,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => Ok(FileFormat::Delimited { delimiter: b',' }),
            "tsv" | "tab" => Ok(FileFormat::Delimited { delimiter: b'\t' }),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FileFormat::Workbook),
            _ => Err(IngestError::UnsupportedFormat(format!(
                "{} (expected csv, tsv, txt, or a spreadsheet workbook)",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("roster.csv")).unwrap(),
            FileFormat::Delimited { delimiter: b',' }
        );
        assert_eq!(
            FileFormat::from_path(Path::new("roster.TSV")).unwrap(),
            FileFormat::Delimited { delimiter: b'\t' }
        );
        assert_eq!(
            FileFormat::from_path(Path::new("roster.xlsx")).unwrap(),
            FileFormat::Workbook
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            FileFormat::from_path(Path::new("roster.pdf")),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(FileFormat::from_path(Path::new("roster")).is_err());
    }
}
