//! Structured (JSON) fixture generator.
//!
//! Four record shapes are available: `organization`, `vulnerability-assessment`,
//! `compliance-framework` and `nested-scan`. Each is one declarative template
//! in [`templates`], consumed by both the synthesizer and the serializer. The
//! output is a single pretty-printed top-level array.
//!
//! # Example
//!
//! ```ignore
//! use fixture_json::{JsonFixtureGenerator, StructuredConfig, StructuredFormat};
//!
//! let config = StructuredConfig::new("scans.json", 8, StructuredFormat::NestedScan);
//! let mut generator = JsonFixtureGenerator::new(config, Some(42))?;
//! let document = generator.generate()?;
//! println!("{} records, {:.2} KB", document.records, document.size_kb());
//! ```

mod config;
mod error;
mod generator;
mod serializer;
pub mod templates;

pub use config::{StructuredConfig, StructuredFormat, StructuredOptions};
pub use error::JsonFixtureError;
pub use generator::JsonFixtureGenerator;
pub use serializer::render_records;
