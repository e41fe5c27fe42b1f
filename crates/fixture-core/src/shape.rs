//! Checking synthesized values against their template.
//!
//! Serializers call [`check_record`] before rendering anything, so a record
//! that does not match the template aborts the document instead of producing
//! partial output.

use crate::template::{Node, Repetition};
use crate::values::{Record, Value};

/// A value that does not match its template node.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("shape mismatch at '{path}': expected {expected}, found {found}")]
pub struct ShapeError {
    /// Location of the mismatch, e.g. `[3].ports[0].number`
    pub path: String,
    pub expected: String,
    pub found: String,
}

/// Check one record against the template's record node.
pub fn check_record(record_node: &Node, record: &Record) -> Result<(), ShapeError> {
    check_node(record_node, &record.value, &format!("[{}]", record.index))
}

/// Check a value against a node.
pub fn check_node(node: &Node, value: &Value, path: &str) -> Result<(), ShapeError> {
    let mismatch = |expected: String| ShapeError {
        path: path.to_string(),
        expected,
        found: describe(value),
    };

    match node {
        Node::Field(field) => match value {
            Value::Object(_) => Err(mismatch(format!("a value for field '{}'", field.name))),
            Value::Array(items) if items.iter().any(|i| !i.is_scalar()) => {
                Err(mismatch("an array of scalars".to_string()))
            }
            _ => Ok(()),
        },
        Node::Object(object) => {
            if value.is_null() && object.presence.is_some() {
                return Ok(());
            }
            let members = value
                .as_object()
                .ok_or_else(|| mismatch(format!("object '{}'", object.name)))?;
            let children: Vec<&Node> = object
                .children
                .iter()
                .filter(|c| c.name().is_some())
                .collect();
            if members.len() != children.len() {
                return Err(mismatch(format!("{} members", children.len())));
            }
            for ((key, member), child) in members.iter().zip(children) {
                let name = child.name().unwrap_or_default();
                let child_path = format!("{path}.{name}");
                if key != name {
                    return Err(ShapeError {
                        path: child_path,
                        expected: format!("member '{name}'"),
                        found: format!("member '{key}'"),
                    });
                }
                check_node(child, member, &child_path)?;
            }
            Ok(())
        }
        Node::Repeated(group) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(format!("array '{}'", group.name)))?;
            let absent_ok = group.presence.is_some() && items.is_empty();
            let in_bounds = match &group.count {
                Repetition::Range { min, max } => {
                    (*min as usize..=*max as usize).contains(&items.len())
                }
                Repetition::Each { labels } => items.len() == labels.len(),
            };
            if !(in_bounds || absent_ok) {
                return Err(mismatch(format!("a count allowed by group '{}'", group.name)));
            }
            for (i, item) in items.iter().enumerate() {
                check_node(&group.item, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        Node::Records => Err(mismatch("no value for a records slot".to_string())),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(members) => format!("object with {} members", members.len()),
        other => other.kind_name().to_string(),
    }
}
