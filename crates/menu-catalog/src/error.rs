//! Error types for the menu-catalog crate.

use thiserror::Error;

/// Errors that can occur while loading the menu.
///
/// Only whole-file problems surface as errors. Individual malformed records
/// are a data-hygiene concern and are dropped during normalization instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error while reading the menu file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The menu file was not valid JSON
    #[error("Failed to parse menu JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Normalization left nothing to serve
    #[error("Menu contained no usable dishes")]
    EmptyCatalog,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
