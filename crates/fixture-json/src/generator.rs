//! Structured fixture generator.

use crate::config::StructuredConfig;
use crate::error::JsonFixtureError;
use crate::serializer::render_records;
use fixture_core::{GenerationMetrics, OutputFormat, RenderedDocument};
use fixture_generator::RecordSynthesizer;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info;

/// Structured fixture generator.
///
/// Synthesizer and serializer both work from the template of the configured
/// format, so the rendered records always match the declared shape.
pub struct JsonFixtureGenerator {
    config: StructuredConfig,
    synthesizer: RecordSynthesizer<StdRng>,
}

impl JsonFixtureGenerator {
    /// Create a generator for the configured format.
    pub fn new(config: StructuredConfig, seed: Option<u64>) -> Result<Self, JsonFixtureError> {
        let synthesizer = RecordSynthesizer::with_optional_seed(config.format.template(), seed)?;
        Ok(Self {
            config,
            synthesizer,
        })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &StructuredConfig {
        &self.config
    }

    /// Generate the whole document in memory.
    pub fn generate(&mut self) -> Result<RenderedDocument, JsonFixtureError> {
        let start_time = Instant::now();
        let total = self.config.total_records;

        info!(
            "Generating {} fixture '{}' with {} records",
            self.config.format, self.config.filename, total
        );

        let document = self.synthesizer.synthesize_document(total)?;

        let render_start = Instant::now();
        let text = render_records(
            self.synthesizer.template(),
            &document.records,
            self.config.options.include_nulls,
        )?;
        let render_duration = render_start.elapsed();

        let metrics = GenerationMetrics {
            records: document.records.len() as u64,
            total_duration: start_time.elapsed(),
            synthesis_duration: document.duration,
            render_duration,
        };

        info!(
            "JSON generation complete: {} records, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records,
            text.len(),
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(RenderedDocument {
            format: OutputFormat::Json,
            text,
            records: metrics.records,
            fields: self
                .synthesizer
                .template()
                .record_field_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            metrics,
        })
    }
}
