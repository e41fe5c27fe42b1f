//! Tabular (CSV) fixture generator.
//!
//! This crate renders flat column templates as delimited rows: one header
//! line, then one line per record. Column values come from the index-keyed
//! generators (`unique`, `semi-unique`, `identical`) or any other scalar kind.
//!
//! # Example
//!
//! ```ignore
//! use fixture_csv::{CsvFixtureGenerator, TabularConfig};
//!
//! let config = TabularConfig::from_file("columns.yaml")?;
//! let mut generator = CsvFixtureGenerator::new(config, Some(42))?;
//!
//! // Render the whole table in memory
//! let document = generator.generate()?;
//! println!("{}", document.text);
//! ```

mod config;
mod error;
mod generator;

pub use config::{large_test_config, TabularConfig, LARGE_TEST_FILENAME, LARGE_TEST_RECORDS};
pub use error::CsvFixtureError;
pub use generator::{render_table, CsvFixtureGenerator, TableWriter};
