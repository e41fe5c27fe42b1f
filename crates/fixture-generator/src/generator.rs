//! Record synthesizer that walks a document template.

use crate::context::{GenerationContext, PatternCache};
use crate::generators::generate_value;
use crate::generators::repeated::repeat_group;
use chrono::{DateTime, Utc};
use fixture_core::{
    DocumentTemplate, GeneratorConfig, Node, Pattern, PatternError, Record, Repetition,
    TemplateError, Value,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Records between progress log lines.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Template failed validation
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Cyclic or one-of field without candidates
    #[error("Field '{0}' has an empty candidate set")]
    EmptyCandidates(String),

    /// Variable not set in the current context
    #[error("Field '{field}' refers to unknown variable '{name}'")]
    UnknownVariable { field: String, name: String },

    /// Group context requested where there is none
    #[error("Field '{field}' needs an enclosing repeated group {depth} level(s) up")]
    ContextOutsideGroup { field: String, depth: usize },

    /// Relative date outside the representable range
    #[error("Field '{field}': {days} days from now is not a representable instant")]
    TimestampOutOfRange { field: String, days: f64 },

    /// Malformed pattern
    #[error("Field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: PatternError,
    },
}

/// Output of one synthesis run: the envelope and the records it wraps.
#[derive(Debug, Clone)]
pub struct SynthesizedDocument {
    /// Envelope value tree; the records slot contributes no member.
    /// `Null` when the envelope is the bare records slot.
    pub envelope: Value,
    pub records: Vec<Record>,
    /// Time spent synthesizing
    pub duration: Duration,
}

/// Synthesizer that turns a [`DocumentTemplate`] into records.
///
/// The random source is injected; use [`RecordSynthesizer::seeded`] for
/// reproducible runs. The template is validated on construction so a bad
/// template never yields partial output.
pub struct RecordSynthesizer<R = StdRng> {
    template: DocumentTemplate,
    rng: R,
    /// Reference instant for relative dates, fixed for the run
    now: DateTime<Utc>,
    /// Current document variable values, aligned with `template.envelope_vars`
    envelope_values: Vec<Value>,
    /// Every pattern in the template, parsed once
    patterns: PatternCache,
}

impl RecordSynthesizer<StdRng> {
    /// Create a synthesizer with a seeded RNG.
    pub fn seeded(template: DocumentTemplate, seed: u64) -> Result<Self, GeneratorError> {
        Self::new(template, StdRng::seed_from_u64(seed))
    }

    /// Create a synthesizer seeded from the operating system.
    pub fn from_os_rng(template: DocumentTemplate) -> Result<Self, GeneratorError> {
        Self::new(template, StdRng::from_os_rng())
    }

    /// Seeded when `seed` is given, otherwise seeded from the OS.
    pub fn with_optional_seed(
        template: DocumentTemplate,
        seed: Option<u64>,
    ) -> Result<Self, GeneratorError> {
        match seed {
            Some(seed) => Self::seeded(template, seed),
            None => Self::from_os_rng(template),
        }
    }
}

impl<R: Rng> RecordSynthesizer<R> {
    /// Create a synthesizer with the given random source.
    pub fn new(template: DocumentTemplate, rng: R) -> Result<Self, GeneratorError> {
        template.validate()?;
        let patterns = compile_patterns(&template)?;
        Ok(Self {
            template,
            rng,
            now: Utc::now(),
            envelope_values: Vec::new(),
            patterns,
        })
    }

    /// Fix the reference instant for relative dates.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Get a reference to the template.
    pub fn template(&self) -> &DocumentTemplate {
        &self.template
    }

    /// Synthesize one record.
    ///
    /// Document variables are drawn on first use and then shared by every
    /// record until the next [`synthesize_document`](Self::synthesize_document).
    pub fn synthesize_record(&mut self, index: u64, total: u64) -> Result<Record, GeneratorError> {
        if self.envelope_values.len() != self.template.envelope_vars.len() {
            self.draw_envelope_vars(total)?;
        }

        let Self {
            template,
            rng,
            now,
            envelope_values,
            patterns,
        } = self;

        let mut ctx = GenerationContext::new(index, total, *now).with_patterns(patterns);
        ctx.extend_vars(
            template
                .envelope_vars
                .iter()
                .map(|v| v.name.as_str())
                .zip(envelope_values.iter().cloned()),
        );
        for var in &template.record_vars {
            let value = generate_value(&var.name, &var.generator, rng, &ctx)?;
            ctx.set_var(&var.name, value);
        }

        let value = build_node(&template.record, rng, &mut ctx)?;
        Ok(Record::new(index, value))
    }

    /// Synthesize the envelope and `total` records.
    pub fn synthesize_document(&mut self, total: u64) -> Result<SynthesizedDocument, GeneratorError> {
        let start = Instant::now();
        info!(
            "Synthesizing {} records for template '{}'",
            total, self.template.name
        );

        self.draw_envelope_vars(total)?;
        let envelope = {
            let Self {
                template,
                rng,
                now,
                envelope_values,
                patterns,
            } = self;
            let mut ctx = GenerationContext::new(0, total, *now).with_patterns(patterns);
            ctx.extend_vars(
                template
                    .envelope_vars
                    .iter()
                    .map(|v| v.name.as_str())
                    .zip(envelope_values.iter().cloned()),
            );
            build_node(&template.envelope, rng, &mut ctx)?
        };

        let mut records = Vec::with_capacity(total.min(1 << 20) as usize);
        for index in 0..total {
            records.push(self.synthesize_record(index, total)?);
            if (index + 1) % PROGRESS_INTERVAL == 0 {
                debug!("Synthesized {} / {} records", index + 1, total);
            }
        }

        let duration = start.elapsed();
        info!(
            "Synthesized {} records for '{}' in {:?}",
            total, self.template.name, duration
        );

        Ok(SynthesizedDocument {
            envelope,
            records,
            duration,
        })
    }

    /// Lazily synthesize records `0..total`.
    ///
    /// Document variables are redrawn when the iterator is created.
    pub fn records(&mut self, total: u64) -> Result<RecordIterator<'_, R>, GeneratorError> {
        self.draw_envelope_vars(total)?;
        Ok(RecordIterator {
            synthesizer: self,
            next: 0,
            total,
        })
    }

    fn draw_envelope_vars(&mut self, total: u64) -> Result<(), GeneratorError> {
        let Self {
            template,
            rng,
            now,
            envelope_values,
            patterns,
        } = self;

        envelope_values.clear();
        let mut ctx = GenerationContext::new(0, total, *now).with_patterns(patterns);
        for var in &template.envelope_vars {
            let value = generate_value(&var.name, &var.generator, rng, &ctx)?;
            ctx.set_var(&var.name, value.clone());
            envelope_values.push(value);
        }
        Ok(())
    }
}

/// Iterator that lazily synthesizes records.
pub struct RecordIterator<'a, R> {
    synthesizer: &'a mut RecordSynthesizer<R>,
    next: u64,
    total: u64,
}

impl<R: Rng> Iterator for RecordIterator<'_, R> {
    type Item = Result<Record, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.synthesizer.synthesize_record(index, self.total))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for RecordIterator<'_, R> {}

/// Parse every pattern in the template once.
fn compile_patterns(template: &DocumentTemplate) -> Result<PatternCache, GeneratorError> {
    fn collect<'a>(node: &'a Node, out: &mut Vec<(&'a str, &'a GeneratorConfig)>) {
        match node {
            Node::Field(field) => out.push((field.name.as_str(), &field.generator)),
            Node::Object(object) => object.children.iter().for_each(|c| collect(c, out)),
            Node::Repeated(group) => collect(&group.item, out),
            Node::Records => {}
        }
    }

    let mut generators: Vec<(&str, &GeneratorConfig)> = template
        .envelope_vars
        .iter()
        .chain(&template.record_vars)
        .map(|var| (var.name.as_str(), &var.generator))
        .collect();
    collect(&template.envelope, &mut generators);
    collect(&template.record, &mut generators);

    let mut patterns = PatternCache::new();
    for (field, generator) in generators {
        if let GeneratorConfig::Pattern { pattern } = generator {
            if patterns.contains_key(pattern) {
                continue;
            }
            let parsed = Pattern::parse(pattern).map_err(|source| GeneratorError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            patterns.insert(pattern.clone(), parsed);
        }
    }
    Ok(patterns)
}

fn is_present<R: Rng>(rng: &mut R, presence: Option<f64>) -> bool {
    match presence {
        Some(p) => rng.random_bool(p.clamp(0.0, 1.0)),
        None => true,
    }
}

/// Build the value for one template node.
fn build_node<'a, R: Rng>(
    node: &'a Node,
    rng: &mut R,
    ctx: &mut GenerationContext<'a>,
) -> Result<Value, GeneratorError> {
    match node {
        Node::Field(field) => {
            if !is_present(rng, field.presence) {
                return Ok(Value::Null);
            }
            generate_value(&field.name, &field.generator, rng, ctx)
        }
        Node::Object(object) => {
            if !is_present(rng, object.presence) {
                return Ok(Value::Null);
            }
            let mut members = Vec::with_capacity(object.children.len());
            for child in &object.children {
                if let Some(name) = child.name() {
                    members.push((name.to_string(), build_node(child, rng, ctx)?));
                }
            }
            Ok(Value::Object(members))
        }
        Node::Repeated(group) => {
            if !is_present(rng, group.presence) {
                return Ok(Value::Array(Vec::new()));
            }
            let items = match &group.count {
                Repetition::Range { min, max } => repeat_group(rng, *min, *max, |rng, i| {
                    ctx.enter_group(i, None);
                    let item = build_node(&group.item, rng, ctx);
                    ctx.leave_group();
                    item
                })?,
                Repetition::Each { labels } => {
                    let mut items = Vec::with_capacity(labels.len());
                    for (i, label) in labels.iter().enumerate() {
                        ctx.enter_group(i as u64, Some(label.as_str()));
                        let item = build_node(&group.item, rng, ctx);
                        ctx.leave_group();
                        items.push(item?);
                    }
                    items
                }
            };
            Ok(Value::Array(items))
        }
        Node::Records => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fixture_core::dsl::*;
    use fixture_core::VarSpec;

    fn scan_template() -> DocumentTemplate {
        DocumentTemplate::new(
            "scan",
            object(
                "scan",
                vec![
                    field("scanId", pattern("SCAN-{index+1:04}")),
                    field("target", ipv4()),
                    field("note", pick(&["a", "b"])).optional(0.5),
                    repeated(
                        "ports",
                        1,
                        5,
                        object(
                            "port",
                            vec![
                                field("number", int(1, 65535)),
                                field("position", item(1)),
                                repeated("services", 0, 2, field("name", pattern("svc-{item@1}-{item}"))),
                            ],
                        ),
                    ),
                ],
            ),
        )
    }

    fn field_names(record: &Record) -> Vec<String> {
        record
            .value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    #[test]
    fn test_synthesize_single_record() {
        let mut synthesizer = RecordSynthesizer::seeded(scan_template(), 42).unwrap();
        let record = synthesizer.synthesize_record(6, 10).unwrap();

        assert_eq!(record.index, 6);
        assert_eq!(record.get_field("scanId"), Some(&Value::string("SCAN-0007")));
        assert_eq!(field_names(&record), vec!["scanId", "target", "note", "ports"]);

        let ports = record.get_field("ports").unwrap().as_array().unwrap();
        assert!((1..=5).contains(&ports.len()));
        for (i, port) in ports.iter().enumerate() {
            assert_eq!(port.get("position"), Some(&Value::Int(i as i64 + 1)));
            let services = port.get("services").unwrap().as_array().unwrap();
            assert!(services.len() <= 2);
            for (j, service) in services.iter().enumerate() {
                assert_eq!(service, &Value::String(format!("svc-{i}-{j}")));
            }
        }
    }

    #[test]
    fn test_shape_is_stable_across_records() {
        let mut synthesizer = RecordSynthesizer::seeded(scan_template(), 7).unwrap();
        let doc = synthesizer.synthesize_document(50).unwrap();

        assert_eq!(doc.records.len(), 50);
        assert_eq!(doc.envelope, Value::Null);
        for record in &doc.records {
            assert_eq!(field_names(record), vec!["scanId", "target", "note", "ports"]);
            let note = record.get_field("note").unwrap();
            assert!(note.is_null() || note.as_str().is_some());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut a = RecordSynthesizer::seeded(scan_template(), 99).unwrap().with_clock(now);
        let mut b = RecordSynthesizer::seeded(scan_template(), 99).unwrap().with_clock(now);

        let doc_a = a.synthesize_document(5).unwrap();
        let doc_b = b.synthesize_document(5).unwrap();
        assert_eq!(doc_a.records, doc_b.records);
    }

    #[test]
    fn test_patterns_are_parsed_once_per_template() {
        let template = scan_template().with_record_vars(vec![VarSpec::new(
            "tag",
            pattern("T-{index}"),
        )]);
        let synthesizer = RecordSynthesizer::seeded(template, 1).unwrap();

        let mut cached: Vec<&str> = synthesizer.patterns.keys().map(String::as_str).collect();
        cached.sort_unstable();
        assert_eq!(cached, vec!["SCAN-{index+1:04}", "T-{index}", "svc-{item@1}-{item}"]);
    }

    #[test]
    fn test_invalid_template_is_rejected_up_front() {
        let template = DocumentTemplate::new(
            "bad",
            object("r", vec![field("status", cyclic(Vec::<&str>::new()))]),
        );
        let result = RecordSynthesizer::seeded(template, 1);
        assert!(matches!(
            result,
            Err(GeneratorError::Template(TemplateError::EmptyCandidates { .. }))
        ));
    }

    #[test]
    fn test_document_and_record_variables() {
        let template = DocumentTemplate::new(
            "hosts",
            object(
                "item",
                vec![
                    field("host", var("host")),
                    field("summary", pattern("{var:kind} on {var:host}")),
                ],
            ),
        )
        .with_envelope(object(
            "report",
            vec![field("name", var("host")).attribute(), records()],
        ))
        .with_envelope_vars(vec![VarSpec::new("host", ipv4())])
        .with_record_vars(vec![VarSpec::new("kind", pick(&["XSS", "SQLi"]))]);

        let mut synthesizer = RecordSynthesizer::seeded(template, 5).unwrap();
        let doc = synthesizer.synthesize_document(20).unwrap();

        let host = doc.envelope.get("name").unwrap().clone();
        assert_eq!(doc.envelope.as_object().unwrap().len(), 1);
        for record in &doc.records {
            assert_eq!(record.get_field("host"), Some(&host));
            let summary = record.get_field("summary").unwrap().as_str().unwrap();
            let expected_suffix = format!(" on {}", host.as_str().unwrap());
            assert!(summary.ends_with(&expected_suffix));
            assert!(summary.starts_with("XSS") || summary.starts_with("SQLi"));
        }
    }

    #[test]
    fn test_each_group_and_absent_group() {
        let template = DocumentTemplate::new(
            "compliance",
            object(
                "framework",
                vec![
                    each(
                        "families",
                        &["AC", "AU"],
                        object(
                            "family",
                            vec![
                                field("id", label()),
                                repeated("controls", 2, 2, field("id", pattern("{label@1}-{item+1}"))),
                            ],
                        ),
                    ),
                    repeated("never", 1, 3, field("x", int(0, 1))).optional(0.0),
                    object("gone", vec![field("x", int(0, 1))]).optional(0.0),
                ],
            ),
        );

        let mut synthesizer = RecordSynthesizer::seeded(template, 1).unwrap();
        let record = synthesizer.synthesize_record(0, 1).unwrap();

        let families = record.get_field("families").unwrap().as_array().unwrap();
        assert_eq!(families.len(), 2);
        assert_eq!(families[1].get("id"), Some(&Value::string("AU")));
        let controls = families[1].get("controls").unwrap().as_array().unwrap();
        assert_eq!(
            controls,
            &[Value::string("AU-1"), Value::string("AU-2")]
        );

        assert_eq!(record.get_field("never"), Some(&Value::Array(vec![])));
        assert_eq!(record.get_field("gone"), Some(&Value::Null));
    }

    #[test]
    fn test_record_iterator() {
        let mut synthesizer = RecordSynthesizer::seeded(scan_template(), 3).unwrap();
        let records: Vec<Record> = synthesizer
            .records(4)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 4);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i as u64);
        }
    }
}
