//! Error types for the data layer.
//!
//! The coordination layer itself fails soft: an unavailable view, an unset
//! selection mode, or a missing field configuration yields a no-op or `None`
//! rather than an error. Only data source fetches can fail, and those
//! failures propagate unchanged to whatever awaited them.

/// Result type alias for data source operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors produced by data source operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataError {
    /// A fetch failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The source cannot serve requests in its current state.
    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),
}
