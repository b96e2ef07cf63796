use roster_model::CancelToken;

/// Per-import configuration. Everything defaults to on except
/// `require_mandatory_fields`.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Run the header auto-mapper; when off, raw headers are used verbatim.
    pub auto_map_headers: bool,
    /// Coerce values to their schema types and apply field standardizers.
    pub normalize_data: bool,
    /// Drop rows failing schema/business-rule validation from the result.
    pub validate_data: bool,
    /// Drop rows with no populated cells before processing.
    pub skip_empty_rows: bool,
    /// Promote missing required-field mappings from a warning to a failure.
    pub require_mandatory_fields: bool,
    /// Checked between row batches; cancelling aborts the import.
    pub cancel: CancelToken,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            auto_map_headers: true,
            normalize_data: true,
            validate_data: true,
            skip_empty_rows: true,
            require_mandatory_fields: false,
            cancel: CancelToken::new(),
        }
    }
}
