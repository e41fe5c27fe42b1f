//! Rendered documents and generation metrics.

use std::fmt;
use std::time::Duration;

/// Output format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Json,
    Xml,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Metrics from a generate operation.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
    /// Number of records synthesized.
    pub records: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent synthesizing values.
    pub synthesis_duration: Duration,
    /// Time spent rendering text.
    pub render_duration: Duration,
}

impl GenerationMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// A complete document ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: OutputFormat,
    /// Document text
    pub text: String,
    /// Number of records in the document
    pub records: u64,
    /// Top-level record field names, in order
    pub fields: Vec<String>,
    pub metrics: GenerationMetrics,
}

impl RenderedDocument {
    /// Size of the text in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.text.len() as u64
    }

    /// Size in kilobytes, as reported in run summaries.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes() as f64 / 1024.0
    }
}
