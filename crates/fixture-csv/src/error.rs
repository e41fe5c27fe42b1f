//! Error types for the tabular fixture generator.

use thiserror::Error;

/// Errors that can occur while generating a tabular fixture.
#[derive(Error, Debug)]
pub enum CsvFixtureError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed.
    #[error("Failed to parse column configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration declares no columns.
    #[error("Tabular configuration '{0}' declares no columns")]
    NoColumns(String),

    /// Column is configured with list or object values.
    #[error("Column '{0}' must produce scalar values")]
    NonScalarColumn(String),

    /// Record does not match the column template.
    #[error("Record does not match the column template at '{path}': expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Rendered bytes are not UTF-8.
    #[error("Rendered table is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Generator error (includes template validation).
    #[error("Generator error: {0}")]
    Generator(#[from] fixture_generator::GeneratorError),
}
