//! Writes rendered fixtures to disk.

use anyhow::Context;
use fixture_core::{OutputFormat, RenderedDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What was written for one fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub records: u64,
    pub fields: usize,
    pub bytes: u64,
}

impl WriteSummary {
    pub fn size_kb(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Write a rendered document to `dir/filename` in a single call.
///
/// The directory is created if missing. On failure the document is left
/// untouched, so the caller may retry with another destination.
pub fn write_document(
    dir: &Path,
    filename: &str,
    document: &RenderedDocument,
) -> anyhow::Result<WriteSummary> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(filename);
    fs::write(&path, &document.text)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let summary = WriteSummary {
        path,
        format: document.format,
        records: document.records,
        fields: document.fields.len(),
        bytes: document.size_bytes(),
    };

    info!(
        "Wrote {} fixture {}: {} records, {} fields, {:.2} KB",
        summary.format,
        summary.path.display(),
        summary.records,
        summary.fields,
        summary.size_kb()
    );

    Ok(summary)
}
