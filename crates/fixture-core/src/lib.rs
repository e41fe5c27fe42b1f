//! Core types for scan fixture generation.
//!
//! This crate provides the types shared by the synthesizer and the three
//! serializers:
//!
//! - [`Value`] - Generated values, including ordered objects and timestamps
//! - [`Pattern`] - Placeholder patterns such as `CVE-{year}-{rand:5}`
//! - [`DocumentTemplate`] - Declarative shape of one output document
//! - [`RenderedDocument`] - Serialized output plus generation metrics
//!
//! # Architecture
//!
//! ```text
//! fixture-core (this crate)
//!    │
//!    ├─── fixture-generator  (synthesizes Values from templates)
//!    │
//!    ├─── fixture-csv        (tabular serializer)
//!    ├─── fixture-json       (structured serializer)
//!    └─── fixture-xml        (markup serializer)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::dsl::*;
//! use fixture_core::DocumentTemplate;
//!
//! let template = DocumentTemplate::new(
//!     "hosts",
//!     object("host", vec![field("ip", ipv4()), field("mac", mac())]),
//! );
//! assert!(template.validate().is_ok());
//! ```

pub mod document;
pub mod dsl;
pub mod pattern;
pub mod shape;
pub mod template;
pub mod values;

pub use document::{GenerationMetrics, OutputFormat, RenderedDocument};
pub use pattern::{Counter, CounterSource, Pattern, PatternError, Placeholder, Segment};
pub use shape::{check_node, check_record, ShapeError};
pub use template::{
    DocumentTemplate, FieldSpec, GeneratorConfig, Markup, Node, ObjectSpec, RepeatedSpec,
    Repetition, TemplateError, TimestampFormat, VarSpec, MAX_DAYS, MAX_DECIMALS,
};
pub use values::{format_timestamp, Record, Value};
