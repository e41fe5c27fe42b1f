//! Error types for the structured fixture generator.

use thiserror::Error;

/// Errors that can occur while generating a structured fixture.
#[derive(Error, Debug)]
pub enum JsonFixtureError {
    /// Unknown format selector.
    #[error("Unknown structured format '{0}' (expected one of: {expected})", expected = crate::config::StructuredFormat::names().join(", "))]
    UnknownFormat(String),

    /// Record does not match its template.
    #[error("Record does not match the '{format}' template: {source}")]
    ShapeMismatch {
        format: String,
        #[source]
        source: fixture_core::ShapeError,
    },

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generator error (includes template validation).
    #[error("Generator error: {0}")]
    Generator(#[from] fixture_generator::GeneratorError),
}
