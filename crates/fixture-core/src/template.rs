//! Declarative record templates.
//!
//! A template is the single description of a fixture's shape. The synthesizer
//! walks it to produce values and the serializers walk it again to render and
//! check those values, so the two can never disagree about the shape.
//!
//! ## Type Hierarchy
//!
//! - [`GeneratorConfig`] - how one leaf value is produced
//! - [`FieldSpec`] - a named leaf with its generator and markup placement
//! - [`Node`] - a field, an object, a repeated group, or the records slot
//! - [`DocumentTemplate`] - envelope + record node + variables

use crate::pattern::{Pattern, PatternError, Placeholder, Segment};
use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors found while loading or validating a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Error reading a configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML/JSON configuration
    #[error("Failed to parse configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A cyclic or one-of field without candidates
    #[error("Field '{field}' has an empty candidate set")]
    EmptyCandidates { field: String },

    /// A numeric range or repetition range with min > max
    #[error("Field '{field}' has an invalid range: {reason}")]
    InvalidRange { field: String, reason: String },

    /// A probability outside [0, 1]
    #[error("Field '{field}' has an invalid probability {value}")]
    InvalidProbability { field: String, value: f64 },

    /// A malformed pattern
    #[error("Field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: PatternError,
    },

    /// `item`/`label` used where no suitable repeated group encloses the field
    #[error("Field '{field}' refers to repeated-group context that does not exist: {reason}")]
    ContextOutsideGroup { field: String, reason: String },

    /// Reference to a variable that is not declared before use
    #[error("Field '{field}' refers to unknown variable '{name}'")]
    UnknownVariable { field: String, name: String },

    /// The envelope has no records slot
    #[error("Template '{0}' has no records slot in its envelope")]
    MissingRecordsSlot(String),

    /// More than one records slot, or a slot in a record or repeated group
    #[error("Template '{template}' has a misplaced records slot: {reason}")]
    MisplacedRecordsSlot { template: String, reason: String },

    /// The record node must be an object
    #[error("Template '{0}' must use an object as its record node")]
    RecordNotObject(String),

    /// Element text mixed with child elements
    #[error("Element '{element}' mixes text content with child elements")]
    MixedContent { element: String },
}

// ============================================================================
// Generators
// ============================================================================

/// Largest `days_ago` offset, in either direction.
pub const MAX_DAYS: f64 = 1_000_000.0;

/// Most decimal places a `float_range` may round to.
pub const MAX_DECIMALS: u32 = 15;

/// How a timestamp is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// ISO-8601 instant with milliseconds (a timestamp value)
    #[default]
    Iso,
    /// Calendar date only, `YYYY-MM-DD`
    Date,
    /// RFC 1123 HTTP date, `Tue, 05 Mar 2024 07:08:09 GMT`
    Http,
}

/// Generator configuration for a leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// `{field}_{index:06}`; injective in the record index
    Unique,

    /// `values[index % len]`; a pure function of the record index
    #[serde(alias = "semi_unique", alias = "semi-unique")]
    Cyclic {
        #[serde(alias = "uniqueValues")]
        values: Vec<Value>,
    },

    /// A fixed value, `{field}_constant` when none is configured
    #[serde(alias = "identical")]
    Constant {
        #[serde(
            default,
            alias = "identicalValue",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Value>,
    },

    /// Random integer in `[min, max]`
    IntRange { min: i64, max: i64 },

    /// Random float in `[min, max]`, optionally rounded
    FloatRange {
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimals: Option<u32>,
    },

    /// Boolean that is true with probability `true_weight`
    WeightedBool { true_weight: f64 },

    /// Random selection from a pool of values
    OneOf { values: Vec<Value> },

    /// `now - uniform(0, 1) * days`; negative days reach into the future
    DaysAgo {
        days: f64,
        #[serde(default)]
        format: TimestampFormat,
    },

    /// The generation time
    Now {
        #[serde(default)]
        format: TimestampFormat,
    },

    /// Pattern string with placeholders (see [`crate::pattern`])
    Pattern { pattern: String },

    /// Random UUID v4
    UuidV4,

    /// 24 lowercase hex characters
    ObjectId,

    /// Random IPv4 address (first and last octet never 0)
    Ipv4,

    /// Random upper-case MAC address
    Mac,

    /// Index of the innermost enclosing repeated group plus `offset`
    Item {
        #[serde(default)]
        offset: i64,
    },

    /// Label of the innermost enclosing per-label group
    Label,

    /// A document or record variable
    Var { name: String },

    /// Always null
    Null,
}

impl GeneratorConfig {
    /// Short human description used in run summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Unique => "unique".to_string(),
            Self::Cyclic { values } => format!("semi-unique ({} values)", values.len()),
            Self::Constant { .. } => "identical".to_string(),
            Self::IntRange { min, max } => format!("int {min}..={max}"),
            Self::FloatRange { min, max, .. } => format!("float {min}..={max}"),
            Self::WeightedBool { true_weight } => format!("bool (p={true_weight})"),
            Self::OneOf { values } => format!("one of {} values", values.len()),
            Self::DaysAgo { days, .. } => format!("date within {days} days"),
            Self::Now { .. } => "now".to_string(),
            Self::Pattern { pattern } => format!("pattern '{pattern}'"),
            Self::UuidV4 => "uuid".to_string(),
            Self::ObjectId => "object id".to_string(),
            Self::Ipv4 => "ipv4".to_string(),
            Self::Mac => "mac".to_string(),
            Self::Item { .. } => "item index".to_string(),
            Self::Label => "label".to_string(),
            Self::Var { name } => format!("variable '{name}'"),
            Self::Null => "null".to_string(),
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Where a field lands in markup output. Ignored by other formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Markup {
    /// Child element with escaped text
    #[default]
    Element,
    /// Attribute on the parent element
    Attribute,
    /// Child element whose text is wrapped in CDATA
    Cdata,
    /// Text content of the parent element
    Text,
    /// Text content of the parent element, wrapped in CDATA
    CdataText,
}

/// A named leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,

    /// Generator configuration for this field
    #[serde(flatten)]
    pub generator: GeneratorConfig,

    /// Markup placement
    #[serde(default)]
    pub markup: Markup,

    /// Probability that the value is present; absent values are null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<f64>,
}

impl FieldSpec {
    /// Create a new field.
    pub fn new(name: impl Into<String>, generator: GeneratorConfig) -> Self {
        Self {
            name: name.into(),
            generator,
            markup: Markup::Element,
            presence: None,
        }
    }
}

/// A named object with ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    pub children: Vec<Node>,
    /// Probability that the object is present; absent objects are null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<f64>,
}

/// How many items a repeated group holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Repetition {
    /// Uniform count in `[min, max]`, resampled per occurrence
    Range { min: u32, max: u32 },
    /// One item per label, in order
    Each { labels: Vec<String> },
}

/// A variable-length sequence of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedSpec {
    pub name: String,
    pub count: Repetition,
    pub item: Box<Node>,
    /// Probability that the group is populated; absent groups are empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<f64>,
}

/// One node of a template tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Field(FieldSpec),
    Object(ObjectSpec),
    Repeated(RepeatedSpec),
    /// Where the records go inside a document envelope
    Records,
}

impl Node {
    /// The node's name (the records slot has none).
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Field(f) => Some(&f.name),
            Node::Object(o) => Some(&o.name),
            Node::Repeated(r) => Some(&r.name),
            Node::Records => None,
        }
    }

    /// Number of records slots in this subtree.
    pub fn records_slots(&self) -> usize {
        match self {
            Node::Field(_) => 0,
            Node::Object(o) => o.children.iter().map(Node::records_slots).sum(),
            Node::Repeated(r) => r.item.records_slots(),
            Node::Records => 1,
        }
    }
}

/// A variable drawn before the tree it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarSpec {
    pub name: String,
    #[serde(flatten)]
    pub generator: GeneratorConfig,
}

impl VarSpec {
    pub fn new(name: impl Into<String>, generator: GeneratorConfig) -> Self {
        Self {
            name: name.into(),
            generator,
        }
    }
}

// ============================================================================
// Document Templates
// ============================================================================

/// The full shape of one output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Template name (the format selector)
    pub name: String,

    /// Document structure around the records; holds exactly one records slot
    #[serde(default = "records_slot")]
    pub envelope: Node,

    /// Shape of every record
    pub record: Node,

    /// Variables drawn once per document
    #[serde(default)]
    pub envelope_vars: Vec<VarSpec>,

    /// Variables drawn once per record, before the record tree
    #[serde(default)]
    pub record_vars: Vec<VarSpec>,
}

fn records_slot() -> Node {
    Node::Records
}

impl DocumentTemplate {
    /// Load and validate a template file (YAML or JSON).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a template.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        let template: DocumentTemplate = serde_yaml::from_str(yaml)?;
        template.validate()?;
        Ok(template)
    }

    /// Create a template whose envelope is the bare records slot.
    pub fn new(name: impl Into<String>, record: Node) -> Self {
        Self {
            name: name.into(),
            envelope: Node::Records,
            record,
            envelope_vars: Vec::new(),
            record_vars: Vec::new(),
        }
    }

    /// Replace the envelope.
    pub fn with_envelope(mut self, envelope: Node) -> Self {
        self.envelope = envelope;
        self
    }

    /// Add envelope-scoped variables.
    pub fn with_envelope_vars(mut self, vars: Vec<VarSpec>) -> Self {
        self.envelope_vars = vars;
        self
    }

    /// Add record-scoped variables.
    pub fn with_record_vars(mut self, vars: Vec<VarSpec>) -> Self {
        self.record_vars = vars;
        self
    }

    /// Top-level field names of a record.
    pub fn record_field_names(&self) -> Vec<&str> {
        match &self.record {
            Node::Object(o) => o.children.iter().filter_map(Node::name).collect(),
            _ => Vec::new(),
        }
    }

    /// Check the template for configuration errors.
    ///
    /// Runs before any synthesis so a bad template never produces output.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut vars: Vec<&str> = Vec::new();
        for var in &self.envelope_vars {
            validate_generator(&var.name, &var.generator, &[], &vars)?;
            vars.push(&var.name);
        }

        match self.envelope.records_slots() {
            0 => return Err(TemplateError::MissingRecordsSlot(self.name.clone())),
            1 => {}
            n => {
                return Err(TemplateError::MisplacedRecordsSlot {
                    template: self.name.clone(),
                    reason: format!("envelope has {n} records slots"),
                })
            }
        }
        let mut groups = Vec::new();
        self.validate_node(&self.envelope, true, &mut groups, &vars)?;

        for var in &self.record_vars {
            validate_generator(&var.name, &var.generator, &[], &vars)?;
            vars.push(&var.name);
        }

        if !matches!(self.record, Node::Object(_)) {
            return Err(TemplateError::RecordNotObject(self.name.clone()));
        }
        self.validate_node(&self.record, false, &mut groups, &vars)
    }

    /// `groups` holds one entry per enclosing repeated group, innermost
    /// last; `true` marks a per-label group.
    fn validate_node(
        &self,
        node: &Node,
        in_envelope: bool,
        groups: &mut Vec<bool>,
        vars: &[&str],
    ) -> Result<(), TemplateError> {
        match node {
            Node::Field(field) => {
                check_presence(&field.name, field.presence)?;
                validate_generator(&field.name, &field.generator, groups, vars)
            }
            Node::Object(object) => {
                check_presence(&object.name, object.presence)?;
                check_markup_content(object)?;
                for child in &object.children {
                    self.validate_node(child, in_envelope, groups, vars)?;
                }
                Ok(())
            }
            Node::Repeated(group) => {
                check_presence(&group.name, group.presence)?;
                let labelled = match &group.count {
                    Repetition::Range { min, max } => {
                        if min > max {
                            return Err(TemplateError::InvalidRange {
                                field: group.name.clone(),
                                reason: format!("repetition {min}..={max} is empty"),
                            });
                        }
                        false
                    }
                    Repetition::Each { .. } => true,
                };
                groups.push(labelled);
                let result = self.validate_node(&group.item, in_envelope, groups, vars);
                groups.pop();
                result
            }
            Node::Records if !in_envelope => Err(TemplateError::MisplacedRecordsSlot {
                template: self.name.clone(),
                reason: "records slot inside the record template".to_string(),
            }),
            Node::Records if !groups.is_empty() => Err(TemplateError::MisplacedRecordsSlot {
                template: self.name.clone(),
                reason: "records slot inside a repeated group".to_string(),
            }),
            Node::Records => Ok(()),
        }
    }
}

fn check_presence(field: &str, presence: Option<f64>) -> Result<(), TemplateError> {
    match presence {
        Some(p) if !(0.0..=1.0).contains(&p) => Err(TemplateError::InvalidProbability {
            field: field.to_string(),
            value: p,
        }),
        _ => Ok(()),
    }
}

fn check_markup_content(object: &ObjectSpec) -> Result<(), TemplateError> {
    let mut text = 0;
    let mut elements = 0;
    for child in &object.children {
        match child {
            Node::Field(f) if matches!(f.markup, Markup::Text | Markup::CdataText) => text += 1,
            Node::Field(f) if f.markup == Markup::Attribute => {}
            Node::Records => {}
            _ => elements += 1,
        }
    }
    if text > 1 || (text == 1 && elements > 0) {
        return Err(TemplateError::MixedContent {
            element: object.name.clone(),
        });
    }
    Ok(())
}

fn validate_generator(
    field: &str,
    generator: &GeneratorConfig,
    groups: &[bool],
    vars: &[&str],
) -> Result<(), TemplateError> {
    let outside = |reason: String| TemplateError::ContextOutsideGroup {
        field: field.to_string(),
        reason,
    };
    let invalid_range = |reason: String| TemplateError::InvalidRange {
        field: field.to_string(),
        reason,
    };

    match generator {
        GeneratorConfig::Cyclic { values } | GeneratorConfig::OneOf { values } => {
            if values.is_empty() {
                return Err(TemplateError::EmptyCandidates {
                    field: field.to_string(),
                });
            }
        }
        GeneratorConfig::IntRange { min, max } => {
            if min > max {
                return Err(invalid_range(format!("{min}..={max} is empty")));
            }
        }
        GeneratorConfig::FloatRange { min, max, decimals } => {
            if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) || min > max {
                return Err(invalid_range(format!("{min}..={max} is not a valid range")));
            }
            if let Some(decimals) = decimals {
                if *decimals > MAX_DECIMALS {
                    return Err(invalid_range(format!(
                        "{decimals} decimals exceeds the maximum of {MAX_DECIMALS}"
                    )));
                }
            }
        }
        GeneratorConfig::WeightedBool { true_weight } => {
            check_presence(field, Some(*true_weight))?;
        }
        GeneratorConfig::DaysAgo { days, .. } => {
            if !days.is_finite() || days.abs() > MAX_DAYS {
                return Err(invalid_range(format!(
                    "{days} days is outside -{MAX_DAYS}..={MAX_DAYS}"
                )));
            }
        }
        GeneratorConfig::Pattern { pattern } => {
            let parsed = Pattern::parse(pattern).map_err(|source| TemplateError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            if let Some(depth) = parsed.max_group_depth() {
                if depth >= groups.len() {
                    return Err(outside(format!(
                        "pattern reaches {} group levels up but only {} enclose it",
                        depth + 1,
                        groups.len()
                    )));
                }
            }
            for segment in parsed.segments() {
                if let Segment::Placeholder(Placeholder::Label { depth, .. }) = segment {
                    if !groups[groups.len() - 1 - depth] {
                        return Err(outside(format!(
                            "group {depth} levels up has no labels"
                        )));
                    }
                }
            }
            let unknown = parsed
                .variables()
                .find(|name| !vars.contains(name))
                .map(str::to_string);
            if let Some(name) = unknown {
                return Err(TemplateError::UnknownVariable {
                    field: field.to_string(),
                    name,
                });
            }
        }
        GeneratorConfig::Item { .. } => {
            if groups.is_empty() {
                return Err(outside("item index outside any repeated group".to_string()));
            }
        }
        GeneratorConfig::Label => {
            if groups.last() != Some(&true) {
                return Err(outside("innermost group has no labels".to_string()));
            }
        }
        GeneratorConfig::Var { name } => {
            if !vars.contains(&name.as_str()) {
                return Err(TemplateError::UnknownVariable {
                    field: field.to_string(),
                    name: name.clone(),
                });
            }
        }
        GeneratorConfig::Unique
        | GeneratorConfig::Constant { .. }
        | GeneratorConfig::Now { .. }
        | GeneratorConfig::UuidV4
        | GeneratorConfig::ObjectId
        | GeneratorConfig::Ipv4
        | GeneratorConfig::Mac
        | GeneratorConfig::Null => {}
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::*;

    fn template(record: Node) -> DocumentTemplate {
        DocumentTemplate::new("test", record)
    }

    #[test]
    fn test_parse_field_specs() {
        let yaml = r#"
- name: id
  type: unique
- name: status
  type: semi-unique
  values: ["A", "B"]
- name: legacy
  type: semi-unique
  uniqueValues: ["x"]
- name: fixed
  type: identical
  identicalValue: "constant_value_1"
- name: score
  type: int_range
  min: 1
  max: 5
"#;
        let fields: Vec<FieldSpec> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].generator, GeneratorConfig::Unique);
        assert_eq!(
            fields[1].generator,
            GeneratorConfig::Cyclic {
                values: vec![Value::string("A"), Value::string("B")]
            }
        );
        assert_eq!(
            fields[2].generator,
            GeneratorConfig::Cyclic {
                values: vec![Value::string("x")]
            }
        );
        assert_eq!(
            fields[3].generator,
            GeneratorConfig::Constant {
                value: Some(Value::string("constant_value_1"))
            }
        );
        assert_eq!(fields[4].markup, Markup::Element);
    }

    #[test]
    fn test_unknown_generator_type_is_rejected() {
        let yaml = "name: id\ntype: fibonacci\n";
        let result: Result<FieldSpec, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_node_tree() {
        let yaml = r#"
node: object
name: host
children:
  - node: field
    name: ip
    type: ipv4
    markup: attribute
  - node: repeated
    name: ports
    count: { type: range, min: 1, max: 3 }
    item:
      node: field
      name: port
      type: int_range
      min: 1
      max: 65535
"#;
        let node: Node = serde_yaml::from_str(yaml).unwrap();
        let expected = object(
            "host",
            vec![
                field("ip", ipv4()).attribute(),
                repeated("ports", 1, 3, field("port", int(1, 65535))),
            ],
        );
        assert_eq!(node, expected);
    }

    #[test]
    fn test_template_from_yaml() {
        let yaml = r#"
name: hosts
envelope:
  node: object
  name: scan
  children:
    - node: field
      name: scanner
      type: constant
      value: nmap
      markup: attribute
    - node: records
record:
  node: object
  name: host
  children:
    - node: field
      name: id
      type: pattern
      pattern: "HOST-{index:03}"
record_vars:
  - name: port
    type: int_range
    min: 1
    max: 1024
"#;
        let template = DocumentTemplate::from_yaml(yaml).unwrap();
        assert_eq!(template.name, "hosts");
        assert_eq!(template.envelope.records_slots(), 1);
        assert_eq!(template.record_field_names(), vec!["id"]);
        assert_eq!(template.record_vars[0].name, "port");
    }

    #[test]
    fn test_template_from_yaml_defaults_envelope() {
        let yaml = "name: flat\nrecord:\n  node: object\n  name: row\n  children: []\n";
        let template = DocumentTemplate::from_yaml(yaml).unwrap();
        assert_eq!(template.envelope, Node::Records);
    }

    #[test]
    fn test_template_from_yaml_is_validated() {
        let yaml = r#"
name: broken
record:
  node: object
  name: row
  children:
    - node: field
      name: status
      type: one_of
      values: []
"#;
        let err = DocumentTemplate::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyCandidates { .. }));

        let err = DocumentTemplate::from_yaml("name: [").unwrap_err();
        assert!(matches!(err, TemplateError::YamlError(_)));
    }

    #[test]
    fn test_validate_accepts_nested_context() {
        let record = object(
            "record",
            vec![
                field("id", pattern("ORG-{index:04}")),
                each(
                    "frameworks",
                    &["SOC2", "NIST"],
                    object(
                        "framework",
                        vec![
                            field("name", label()),
                            repeated(
                                "controls",
                                1,
                                3,
                                field("id", pattern("{label@1}-{item+1:03}")),
                            ),
                        ],
                    ),
                ),
            ],
        );
        assert!(template(record).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_candidates() {
        let record = object("record", vec![field("status", cyclic(Vec::<&str>::new()))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::EmptyCandidates { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_item_outside_group() {
        let record = object("record", vec![field("n", item(0))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::ContextOutsideGroup { .. })
        ));

        let record = object(
            "record",
            vec![repeated("xs", 1, 2, field("x", pattern("{item@1}")))],
        );
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::ContextOutsideGroup { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_label_in_range_group() {
        let record = object("record", vec![repeated("xs", 1, 2, field("x", label()))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::ContextOutsideGroup { .. })
        ));
    }

    #[test]
    fn test_validate_variables() {
        let record = object("record", vec![field("x", pattern("{var:kind} found"))]);
        assert!(matches!(
            template(record.clone()).validate(),
            Err(TemplateError::UnknownVariable { .. })
        ));

        let with_var =
            template(record).with_record_vars(vec![VarSpec::new("kind", pick(&["XSS", "CSRF"]))]);
        assert!(with_var.validate().is_ok());
    }

    #[test]
    fn test_validate_records_slot() {
        let record = object("record", vec![field("x", int(0, 1))]);

        let missing = template(record.clone()).with_envelope(object("root", vec![]));
        assert!(matches!(
            missing.validate(),
            Err(TemplateError::MissingRecordsSlot(_))
        ));

        let twice = template(record.clone()).with_envelope(object("root", vec![records(), records()]));
        assert!(matches!(
            twice.validate(),
            Err(TemplateError::MisplacedRecordsSlot { .. })
        ));

        let nested = template(object("record", vec![records()]));
        assert!(matches!(
            nested.validate(),
            Err(TemplateError::MisplacedRecordsSlot { .. })
        ));

        let not_object = template(field("x", int(0, 1)));
        assert!(matches!(
            not_object.validate(),
            Err(TemplateError::RecordNotObject(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_ranges_and_probabilities() {
        let record = object("record", vec![field("x", int(5, 1))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidRange { .. })
        ));

        let record = object("record", vec![repeated("xs", 4, 2, field("x", int(0, 1)))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidRange { .. })
        ));

        let record = object("record", vec![field("x", chance(1.5))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unrepresentable_numbers() {
        let record = object("record", vec![field("x", days_ago(1_000_000_000.0))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidRange { .. })
        ));
        let record = object("record", vec![field("x", days_ago(-MAX_DAYS))]);
        assert!(template(record).validate().is_ok());

        let record = object("record", vec![field("x", float(-1.0e308, 1.0e308))]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidRange { .. })
        ));

        let rounded = GeneratorConfig::FloatRange {
            min: 0.0,
            max: 1.0,
            decimals: Some(400),
        };
        let record = object("record", vec![field("x", rounded)]);
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_reports_unknown_pattern_variable() {
        let record = object("record", vec![field("x", pattern("{var:missing}-{index}"))]);
        match template(record).validate() {
            Err(TemplateError::UnknownVariable { field, name }) => {
                assert_eq!(field, "x");
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_mixed_content() {
        let record = object(
            "record",
            vec![object(
                "host",
                vec![field("ip", ipv4()).attribute(), field("url", pattern("x")).text(), field("child", int(0, 1))],
            )],
        );
        assert!(matches!(
            template(record).validate(),
            Err(TemplateError::MixedContent { .. })
        ));
    }

    #[test]
    fn test_record_field_names() {
        let tpl = template(object(
            "record",
            vec![field("a", unique()), object("b", vec![]), repeated("c", 0, 1, field("x", int(0, 1)))],
        ));
        assert_eq!(tpl.record_field_names(), vec!["a", "b", "c"]);
    }
}
