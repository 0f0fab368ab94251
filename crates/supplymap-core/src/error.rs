use thiserror::Error;

/// Error type for parsing enumerated values from user input or catalogs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid severity: {0} (expected all, high, medium or low)")]
    InvalidSeverity(String),
    #[error("Invalid view: {0} (expected partnership or products)")]
    InvalidViewKind(String),
    #[error("Invalid hex color: {0}")]
    InvalidColor(String),
}
