//! Scan Fixtures Library
//!
//! Synthetic security-scan fixtures for exercising import pipelines: flat CSV
//! tables, nested JSON documents and XML scanner exports.
//!
//! # Format Crates
//!
//! Each output format has its own crate built on a shared template model:
//!
//! - `fixture_csv` - delimited rows from flat column templates
//! - `fixture_json` - pretty-printed arrays of nested records
//! - `fixture_xml` - Burp, Nessus, generic, project and deep-nested exports
//!
//! # CLI Usage
//!
//! ```bash
//! # The canonical 180-column CSV fixture
//! scan-fixtures csv
//!
//! # A column file with a smaller row count
//! scan-fixtures csv --config columns.yaml --records 1000
//!
//! # Every small JSON preset, reproducibly
//! scan-fixtures --seed 42 json all
//!
//! # A large Nessus export into a custom directory
//! scan-fixtures --output-dir /tmp/fixtures xml nessus-large
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

pub mod presets;
pub mod writer;

// Re-export format crates for convenience
pub use fixture_csv as csv;
pub use fixture_json as json;
pub use fixture_xml as xml;

use presets::Preset;
use writer::{write_document, WriteSummary};

#[derive(Parser, Clone, Debug)]
pub struct OutputOpts {
    /// Directory fixtures are written to
    #[arg(
        long,
        global = true,
        default_value = "generated",
        env = "SCAN_FIXTURES_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Seed for reproducible output (random when omitted)
    #[arg(long, global = true, env = "SCAN_FIXTURES_SEED")]
    pub seed: Option<u64>,
}

/// Generate each preset and write it to the output directory.
///
/// Every document is rendered completely before its file is written.
pub fn generate_presets(
    presets: &[Preset],
    opts: &OutputOpts,
) -> anyhow::Result<Vec<WriteSummary>> {
    let mut summaries = Vec::with_capacity(presets.len());
    for preset in presets {
        let document = preset
            .generate(opts.seed)
            .with_context(|| format!("Failed to generate '{}'", preset.filename()))?;
        let summary = write_document(&opts.output_dir, preset.filename(), &document)?;
        summaries.push(summary);
    }
    Ok(summaries)
}
