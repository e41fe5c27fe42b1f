//! Error types for the markup fixture generator.

use thiserror::Error;

/// Errors that can occur while generating a markup fixture.
#[derive(Error, Debug)]
pub enum XmlFixtureError {
    /// Unknown format selector.
    #[error("Unknown markup format '{0}' (expected one of: {expected})", expected = crate::config::MarkupFormat::names().join(", "))]
    UnknownFormat(String),

    /// Configured element name is not an XML name.
    #[error("'{0}' is not a valid XML element name")]
    InvalidElementName(String),

    /// Envelope does not produce a single root element.
    #[error("Template '{0}' needs an object envelope to act as the root element")]
    NoRootElement(String),

    /// Value does not match its template node.
    #[error("Document does not match the '{format}' template: {source}")]
    ShapeMismatch {
        format: String,
        #[source]
        source: fixture_core::ShapeError,
    },

    /// XML writer error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rendered bytes are not UTF-8.
    #[error("Rendered document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Generator error (includes template validation).
    #[error("Generator error: {0}")]
    Generator(#[from] fixture_generator::GeneratorError),
}
