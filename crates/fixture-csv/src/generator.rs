//! Tabular fixture generator and row serializer.

use crate::config::TabularConfig;
use crate::error::CsvFixtureError;
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use fixture_core::{GenerationMetrics, OutputFormat, Record, RenderedDocument, Value};
use fixture_generator::RecordSynthesizer;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Rows between progress log lines.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Delimited-row writer over an in-memory buffer.
///
/// Fields are written verbatim: no quoting and no escaping of embedded
/// delimiters. Values are assumed delimiter-free by construction.
pub struct TableWriter {
    columns: Vec<String>,
    writer: Writer<Vec<u8>>,
    rows: u64,
}

impl TableWriter {
    /// Create a writer and emit the header line.
    pub fn new(columns: Vec<String>) -> Result<Self, CsvFixtureError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&columns)?;
        Ok(Self {
            columns,
            writer,
            rows: 0,
        })
    }

    /// Append one record as a data line.
    pub fn write_record(&mut self, record: &Record) -> Result<(), CsvFixtureError> {
        let fields = record_to_row(record, &self.columns)?;
        self.writer.write_record(&fields)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data lines written.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Finish the table. Lines are newline-joined with no trailing newline.
    pub fn finish(self) -> Result<String, CsvFixtureError> {
        let mut bytes = self
            .writer
            .into_inner()
            .map_err(|e| CsvFixtureError::Io(std::io::Error::other(e.to_string())))?;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes)?)
    }
}

/// Render a header plus one line per record.
pub fn render_table(columns: &[&str], records: &[Record]) -> Result<String, CsvFixtureError> {
    let mut writer = TableWriter::new(columns.iter().map(|c| c.to_string()).collect())?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}

/// Convert a record to its string fields, checking it against the columns.
fn record_to_row(record: &Record, columns: &[String]) -> Result<Vec<String>, CsvFixtureError> {
    let path = format!("[{}]", record.index);
    let members = record
        .value
        .as_object()
        .ok_or_else(|| CsvFixtureError::ShapeMismatch {
            path: path.clone(),
            expected: "object".to_string(),
            found: record.value.kind_name().to_string(),
        })?;

    if members.len() != columns.len() {
        return Err(CsvFixtureError::ShapeMismatch {
            path,
            expected: format!("{} columns", columns.len()),
            found: format!("{} fields", members.len()),
        });
    }

    members
        .iter()
        .zip(columns)
        .map(|((name, value), column)| {
            if name != column {
                return Err(CsvFixtureError::ShapeMismatch {
                    path: format!("{path}.{column}"),
                    expected: format!("column '{column}'"),
                    found: format!("field '{name}'"),
                });
            }
            cell_text(value).ok_or_else(|| CsvFixtureError::ShapeMismatch {
                path: format!("{path}.{column}"),
                expected: "scalar".to_string(),
                found: value.kind_name().to_string(),
            })
        })
        .collect()
}

/// Scalar cells only; arrays and objects would break the column count.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => None,
        other => other.to_text(),
    }
}

/// Tabular fixture generator.
pub struct CsvFixtureGenerator {
    config: TabularConfig,
    synthesizer: RecordSynthesizer<StdRng>,
}

impl CsvFixtureGenerator {
    /// Create a generator. The column template is validated here, so a bad
    /// configuration fails before any row is produced.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut generator = CsvFixtureGenerator::new(large_test_config(), Some(42))?;
    /// let document = generator.generate()?;
    /// ```
    pub fn new(config: TabularConfig, seed: Option<u64>) -> Result<Self, CsvFixtureError> {
        let template = config.template()?;
        let synthesizer = RecordSynthesizer::with_optional_seed(template, seed)?;
        Ok(Self {
            config,
            synthesizer,
        })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &TabularConfig {
        &self.config
    }

    /// Generate the table with the configured number of rows.
    pub fn generate(&mut self) -> Result<RenderedDocument, CsvFixtureError> {
        let start_time = Instant::now();
        let total = self.config.total_records;
        let columns: Vec<String> = self
            .config
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            "Generating CSV fixture '{}' with {} rows and {} columns",
            self.config.filename,
            total,
            columns.len()
        );
        for description in self.config.describe_columns() {
            info!("  - {}", description);
        }

        let mut synthesis_time = Duration::ZERO;
        let mut render_time = Duration::ZERO;

        let mut writer = TableWriter::new(columns.clone())?;
        let mut records = self.synthesizer.records(total)?;
        loop {
            let synth_start = Instant::now();
            let Some(record) = records.next() else {
                break;
            };
            let record = record?;
            synthesis_time += synth_start.elapsed();

            let render_start = Instant::now();
            writer.write_record(&record)?;
            render_time += render_start.elapsed();

            if writer.rows() % PROGRESS_INTERVAL == 0 {
                debug!("Written {} rows", writer.rows());
            }
        }

        let rows = writer.rows();
        let render_start = Instant::now();
        let text = writer.finish()?;
        render_time += render_start.elapsed();

        let metrics = GenerationMetrics {
            records: rows,
            total_duration: start_time.elapsed(),
            synthesis_duration: synthesis_time,
            render_duration: render_time,
        };

        info!(
            "CSV generation complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            rows,
            text.len(),
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(RenderedDocument {
            format: OutputFormat::Csv,
            text,
            records: rows,
            fields: columns,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::dsl::*;
    use fixture_core::{FieldSpec, GeneratorConfig};

    fn status_config(total_records: u64) -> TabularConfig {
        TabularConfig {
            filename: "statuses.csv".to_string(),
            total_records,
            columns: vec![
                FieldSpec::new("id", unique()),
                FieldSpec::new("status", cyclic(vec!["A", "B"])),
            ],
        }
    }

    #[test]
    fn test_id_status_scenario() {
        let mut generator = CsvFixtureGenerator::new(status_config(3), Some(42)).unwrap();
        let doc = generator.generate().unwrap();

        assert_eq!(doc.text, "id,status\nid_000000,A\nid_000001,B\nid_000002,A");
        assert_eq!(doc.records, 3);
        assert_eq!(doc.fields, vec!["id", "status"]);
        assert_eq!(doc.format, OutputFormat::Csv);
    }

    #[test]
    fn test_zero_records_is_header_only() {
        let mut generator = CsvFixtureGenerator::new(status_config(0), None).unwrap();
        let doc = generator.generate().unwrap();
        assert_eq!(doc.text, "id,status");
        assert_eq!(doc.records, 0);
    }

    #[test]
    fn test_empty_candidates_fail_before_output() {
        let config = TabularConfig {
            filename: "bad.csv".to_string(),
            total_records: 10,
            columns: vec![FieldSpec::new(
                "status",
                GeneratorConfig::Cyclic { values: vec![] },
            )],
        };
        assert!(matches!(
            CsvFixtureGenerator::new(config, Some(1)),
            Err(CsvFixtureError::Generator(_))
        ));
    }

    #[test]
    fn test_every_line_has_header_field_count() {
        let config = TabularConfig {
            filename: "mixed.csv".to_string(),
            total_records: 250,
            columns: vec![
                FieldSpec::new("id", unique()),
                FieldSpec::new("size", cyclic(vec!["Small", "Medium", "Large"])),
                FieldSpec::new("score", int(0, 100)),
                FieldSpec::new("region", GeneratorConfig::Constant { value: None }),
            ],
        };
        let mut generator = CsvFixtureGenerator::new(config, Some(9)).unwrap();
        let doc = generator.generate().unwrap();

        let lines: Vec<&str> = doc.text.split('\n').collect();
        assert_eq!(lines.len(), 251);
        let width = lines[0].split(',').count();
        assert_eq!(width, 4);
        for (i, line) in lines[1..].iter().enumerate() {
            let cells: Vec<&str> = line.split(',').collect();
            assert_eq!(cells.len(), width);
            assert_eq!(cells[0], format!("id_{i:06}"));
            assert_eq!(cells[1], ["Small", "Medium", "Large"][i % 3]);
            assert_eq!(cells[3], "region_constant");
        }
    }

    #[test]
    fn test_embedded_delimiters_are_not_quoted() {
        let config = TabularConfig {
            filename: "raw.csv".to_string(),
            total_records: 1,
            columns: vec![FieldSpec::new("note", constant("a,\"b\""))],
        };
        let mut generator = CsvFixtureGenerator::new(config, Some(1)).unwrap();
        let doc = generator.generate().unwrap();
        assert_eq!(doc.text, "note\na,\"b\"");
    }

    #[test]
    fn test_render_table_rejects_mismatched_records() {
        let record = Record::new(
            0,
            Value::Object(vec![("other".to_string(), Value::Int(1))]),
        );
        assert!(matches!(
            render_table(&["id"], &[record]),
            Err(CsvFixtureError::ShapeMismatch { .. })
        ));

        let nested = Record::new(
            0,
            Value::Object(vec![("id".to_string(), Value::Object(vec![]))]),
        );
        assert!(matches!(
            render_table(&["id"], &[nested]),
            Err(CsvFixtureError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_array_cells_are_rejected() {
        let record = Record::new(
            0,
            Value::Object(vec![
                ("id".to_string(), Value::string("x")),
                ("tags".to_string(), Value::from(vec!["a", "b"])),
            ]),
        );
        match render_table(&["id", "tags"], &[record]) {
            Err(CsvFixtureError::ShapeMismatch {
                path,
                expected,
                found,
            }) => {
                assert_eq!(path, "[0].tags");
                assert_eq!(expected, "scalar");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
