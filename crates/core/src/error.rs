//! Error types for zipquote.

use std::path::PathBuf;
use thiserror::Error;
use zipquote_sheet::SheetError;

/// Result type for table loading.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors that abort a pricing table build.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The pricing file does not exist.
    #[error("Pricing file not found: {}", path.display())]
    Load { path: PathBuf },

    /// The pricing file exists but could not be read.
    #[error("Pricing file could not be read: {source}")]
    Unreadable {
        #[from]
        source: std::io::Error,
    },

    /// The spreadsheet engine could not open or decode the workbook.
    #[error("Spreadsheet engine error: {0}")]
    Engine(String),

    /// A price-matched sheet lacks required columns.
    #[error("Sheet '{sheet}' is missing required columns: {}", missing.join(", "))]
    Schema { sheet: String, missing: Vec<String> },
}

impl From<SheetError> for QuoteError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::NotFound { path } => Self::Load { path },
            SheetError::Io(source) => Self::Unreadable { source },
            other => Self::Engine(other.to_string()),
        }
    }
}

/// Invalid user input for a query. Nothing is looked up and no history is
/// written when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The ZIP input holds no digits.
    #[error("Please enter a valid 5-digit ZIP (got '{0}')")]
    InvalidZip(String),

    /// State or city has not been selected yet.
    #[error("Select both state and city")]
    MissingSelection,

    /// The state is not present in the pricing table.
    #[error("Unknown state: '{0}'")]
    UnknownState(String),

    /// The city is not offered for the selected state.
    #[error("'{city}' is not a city in {state}")]
    UnknownCity { city: String, state: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_lists_columns() {
        let err = QuoteError::Schema {
            sheet: "200".to_string(),
            missing: vec!["city".to_string(), "state".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Sheet '200' is missing required columns: city, state"
        );
    }

    #[test]
    fn test_sheet_errors_map_to_load_kinds() {
        let missing = QuoteError::from(SheetError::NotFound {
            path: PathBuf::from("pricing.xlsx"),
        });
        assert!(matches!(missing, QuoteError::Load { .. }));

        let engine = QuoteError::from(SheetError::Engine {
            path: PathBuf::from("pricing.txt"),
            message: "Unknown extension".to_string(),
        });
        assert!(matches!(engine, QuoteError::Engine(_)));

        let io = QuoteError::from(SheetError::Io(std::io::Error::other("permission denied")));
        assert!(matches!(io, QuoteError::Unreadable { .. }));
        assert!(io.to_string().contains("permission denied"));
    }
}
