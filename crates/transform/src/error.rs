//! Error types for the transformation pipelines.

use thiserror::Error;

/// Pipeline error type.
///
/// Each variant carries the underlying engine's message verbatim; the
/// dispatcher surfaces it to the user unsanitized.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("javascript minification failed: {0}")]
    JsMinify(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("html minification failed: {0}")]
    Html(String),

    #[error("css minification failed: {0}")]
    Css(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, TransformError>;
