use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// File extension not recognized; the whole import aborts on this.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("delimited read error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook read error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets: {0}")]
    EmptyWorkbook(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
