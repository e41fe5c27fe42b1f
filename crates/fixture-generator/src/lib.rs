//! Record synthesizer for scan fixtures.
//!
//! This crate provides the [`RecordSynthesizer`], which walks a
//! [`DocumentTemplate`](fixture_core::DocumentTemplate) and produces one
//! value tree per record. The random source is injected, so the same seed and
//! template produce the same records.
//!
//! # Architecture
//!
//! ```text
//! DocumentTemplate
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │  RecordSynthesizer   │
//! │                      │
//! │  - template          │
//! │  - rng (injected)    │
//! │  - now               │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!  SynthesizedDocument { envelope, records }
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::dsl::*;
//! use fixture_core::DocumentTemplate;
//! use fixture_generator::RecordSynthesizer;
//!
//! let template = DocumentTemplate::new(
//!     "orgs",
//!     object("organization", vec![
//!         field("id", pattern("ORG-{index+1:04}")),
//!         field("tier", cyclic(vec!["gold", "silver"])),
//!     ]),
//! );
//!
//! let mut synthesizer = RecordSynthesizer::seeded(template, 42).unwrap();
//! let record = synthesizer.synthesize_record(0, 1).unwrap();
//! assert_eq!(record.get_field("id").and_then(|v| v.as_str()), Some("ORG-0001"));
//! ```
//!
//! # Generators
//!
//! - `unique`, `cyclic`, `constant` - pure functions of the record index
//! - `int_range`, `float_range`, `weighted_bool`, `one_of` - random scalars
//! - `days_ago`, `now` - timestamps relative to the run's reference instant
//! - `pattern` - strings with placeholders
//! - `uuid_v4`, `object_id`, `ipv4`, `mac` - identifiers
//! - `item`, `label`, `var` - values read from the generation context
//! - `null`

pub mod context;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use context::{GenerationContext, PatternCache};
pub use generator::{GeneratorError, RecordIterator, RecordSynthesizer, SynthesizedDocument};
pub use generators::column::{constant_value, cyclic_value, unique_value};
pub use generators::generate_value;
pub use generators::repeated::repeat_group;
