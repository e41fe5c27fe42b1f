//! Builder helpers for writing templates in Rust.
//!
//! ```rust
//! use fixture_core::dsl::*;
//!
//! let record = object(
//!     "issue",
//!     vec![
//!         field("serialNumber", pattern("{index+1000}")),
//!         field("severity", pick(&["High", "Medium", "Low"])),
//!         field("confidence", pick(&["Certain", "Firm"])).optional(0.8),
//!     ],
//! );
//! assert_eq!(record.name(), Some("issue"));
//! ```

use crate::template::{
    FieldSpec, GeneratorConfig, Markup, Node, ObjectSpec, RepeatedSpec, Repetition,
    TimestampFormat, VarSpec,
};
use crate::values::Value;

/// A leaf field.
pub fn field(name: &str, generator: GeneratorConfig) -> Node {
    Node::Field(FieldSpec::new(name, generator))
}

/// An object with ordered children.
pub fn object(name: &str, children: Vec<Node>) -> Node {
    Node::Object(ObjectSpec {
        name: name.to_string(),
        children,
        presence: None,
    })
}

/// A group of `min..=max` items.
pub fn repeated(name: &str, min: u32, max: u32, item: Node) -> Node {
    Node::Repeated(RepeatedSpec {
        name: name.to_string(),
        count: Repetition::Range { min, max },
        item: Box::new(item),
        presence: None,
    })
}

/// A group with one item per label.
pub fn each(name: &str, labels: &[&str], item: Node) -> Node {
    Node::Repeated(RepeatedSpec {
        name: name.to_string(),
        count: Repetition::Each {
            labels: labels.iter().map(|l| l.to_string()).collect(),
        },
        item: Box::new(item),
        presence: None,
    })
}

/// The records slot of an envelope.
pub fn records() -> Node {
    Node::Records
}

/// A variable declaration.
pub fn var_spec(name: &str, generator: GeneratorConfig) -> VarSpec {
    VarSpec::new(name, generator)
}

impl Node {
    /// Make the node present with probability `presence`.
    pub fn optional(mut self, presence: f64) -> Self {
        match &mut self {
            Node::Field(f) => f.presence = Some(presence),
            Node::Object(o) => o.presence = Some(presence),
            Node::Repeated(r) => r.presence = Some(presence),
            Node::Records => {}
        }
        self
    }

    /// Render the field as an attribute of its parent element.
    pub fn attribute(self) -> Self {
        self.with_markup(Markup::Attribute)
    }

    /// Wrap the field's text in CDATA.
    pub fn cdata(self) -> Self {
        self.with_markup(Markup::Cdata)
    }

    /// Render the field as its parent's text content.
    pub fn text(self) -> Self {
        self.with_markup(Markup::Text)
    }

    /// Render the field as its parent's text content inside CDATA.
    pub fn cdata_text(self) -> Self {
        self.with_markup(Markup::CdataText)
    }

    /// Only fields carry markup; other nodes are returned unchanged.
    fn with_markup(mut self, markup: Markup) -> Self {
        if let Node::Field(f) = &mut self {
            f.markup = markup;
        }
        self
    }
}

pub fn unique() -> GeneratorConfig {
    GeneratorConfig::Unique
}

pub fn cyclic<T: Into<Value>>(values: Vec<T>) -> GeneratorConfig {
    GeneratorConfig::Cyclic {
        values: values.into_iter().map(Into::into).collect(),
    }
}

pub fn constant(value: impl Into<Value>) -> GeneratorConfig {
    GeneratorConfig::Constant {
        value: Some(value.into()),
    }
}

pub fn pattern(pattern: &str) -> GeneratorConfig {
    GeneratorConfig::Pattern {
        pattern: pattern.to_string(),
    }
}

/// Random pick from string choices.
pub fn pick(choices: &[&str]) -> GeneratorConfig {
    GeneratorConfig::OneOf {
        values: choices.iter().map(|c| Value::from(*c)).collect(),
    }
}

/// Random pick from arbitrary values.
pub fn pick_values(values: Vec<Value>) -> GeneratorConfig {
    GeneratorConfig::OneOf { values }
}

pub fn int(min: i64, max: i64) -> GeneratorConfig {
    GeneratorConfig::IntRange { min, max }
}

pub fn float(min: f64, max: f64) -> GeneratorConfig {
    GeneratorConfig::FloatRange {
        min,
        max,
        decimals: None,
    }
}

pub fn rounded(min: f64, max: f64, decimals: u32) -> GeneratorConfig {
    GeneratorConfig::FloatRange {
        min,
        max,
        decimals: Some(decimals),
    }
}

pub fn chance(true_weight: f64) -> GeneratorConfig {
    GeneratorConfig::WeightedBool { true_weight }
}

/// ISO timestamp up to `days` in the past (negative: in the future).
pub fn days_ago(days: f64) -> GeneratorConfig {
    GeneratorConfig::DaysAgo {
        days,
        format: TimestampFormat::Iso,
    }
}

/// `YYYY-MM-DD` date up to `days` in the past.
pub fn date_days_ago(days: f64) -> GeneratorConfig {
    GeneratorConfig::DaysAgo {
        days,
        format: TimestampFormat::Date,
    }
}

pub fn now() -> GeneratorConfig {
    GeneratorConfig::Now {
        format: TimestampFormat::Iso,
    }
}

pub fn http_now() -> GeneratorConfig {
    GeneratorConfig::Now {
        format: TimestampFormat::Http,
    }
}

pub fn uuid() -> GeneratorConfig {
    GeneratorConfig::UuidV4
}

pub fn object_id() -> GeneratorConfig {
    GeneratorConfig::ObjectId
}

pub fn ipv4() -> GeneratorConfig {
    GeneratorConfig::Ipv4
}

pub fn mac() -> GeneratorConfig {
    GeneratorConfig::Mac
}

pub fn item(offset: i64) -> GeneratorConfig {
    GeneratorConfig::Item { offset }
}

pub fn label() -> GeneratorConfig {
    GeneratorConfig::Label
}

pub fn var(name: &str) -> GeneratorConfig {
    GeneratorConfig::Var {
        name: name.to_string(),
    }
}

pub fn null() -> GeneratorConfig {
    GeneratorConfig::Null
}
