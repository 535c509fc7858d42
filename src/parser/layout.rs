use std::fmt;

use crate::error::ExtractError;

pub const DOCUMENT_SUFFIX: &str = ".pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// One roster table per page, rows flattened into a single string.
    PaginatedKeyworded,
    /// Converted text with one field per line and "List of Players" section headers.
    LineSequential,
}

impl fmt::Display for DocumentLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentLayout::PaginatedKeyworded => f.write_str("paginated"),
            DocumentLayout::LineSequential => f.write_str("line-sequential"),
        }
    }
}

pub fn select(identifier: &str, paginated_marker: &str) -> Result<DocumentLayout, ExtractError> {
    if !identifier.to_lowercase().ends_with(DOCUMENT_SUFFIX) {
        return Err(ExtractError::UnsupportedFormat(identifier.to_string()));
    }
    if !paginated_marker.is_empty() && identifier.contains(paginated_marker) {
        Ok(DocumentLayout::PaginatedKeyworded)
    } else {
        Ok(DocumentLayout::LineSequential)
    }
}
