//! Markup (XML) fixture generator.
//!
//! Five document schemas are available: `burp`, `nessus`, `generic`,
//! `project` and `deep-nested`. Each is a [`DocumentTemplate`](fixture_core::DocumentTemplate)
//! with an object envelope for the document element and a records slot for
//! the repeated record elements.
//!
//! Output is always well-formed: text and attribute values are escaped,
//! CDATA sections are split around `]]>`, and absent values omit their
//! element or attribute entirely.
//!
//! # Example
//!
//! ```ignore
//! use fixture_xml::{MarkupConfig, MarkupFormat, XmlFixtureGenerator};
//!
//! let config = MarkupConfig::new("scan.xml", 50, MarkupFormat::Burp);
//! let mut generator = XmlFixtureGenerator::new(config, None)?;
//! let document = generator.generate()?;
//! assert!(document.text.starts_with("<?xml"));
//! ```

mod config;
mod error;
mod generator;
mod serializer;
pub mod templates;

pub use config::{is_xml_name, MarkupConfig, MarkupFormat, MarkupOptions};
pub use error::XmlFixtureError;
pub use generator::XmlFixtureGenerator;
pub use serializer::{cdata_sections, render_document};
