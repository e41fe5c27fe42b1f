//! Pretty-printed array serializer.

use crate::error::JsonFixtureError;
use fixture_core::{check_record, DocumentTemplate, Record, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Borrowed view of a value that can drop null object members.
struct JsonView<'a> {
    value: &'a Value,
    include_nulls: bool,
}

impl<'a> JsonView<'a> {
    fn child(&self, value: &'a Value) -> Self {
        Self {
            value,
            include_nulls: self.include_nulls,
        }
    }
}

impl Serialize for JsonView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let kept: Vec<&(String, Value)> = members
                    .iter()
                    .filter(|(_, v)| self.include_nulls || !v.is_null())
                    .collect();
                let mut map = serializer.serialize_map(Some(kept.len()))?;
                for (key, value) in kept {
                    map.serialize_entry(key, &self.child(value))?;
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// All records as one top-level array.
struct RecordArray<'a> {
    records: &'a [Record],
    include_nulls: bool,
}

impl Serialize for RecordArray<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in self.records {
            seq.serialize_element(&JsonView {
                value: &record.value,
                include_nulls: self.include_nulls,
            })?;
        }
        seq.end()
    }
}

/// Render records as a pretty-printed JSON array.
///
/// Every record is checked against the template before anything is
/// rendered.
pub fn render_records(
    template: &DocumentTemplate,
    records: &[Record],
    include_nulls: bool,
) -> Result<String, JsonFixtureError> {
    for record in records {
        check_record(&template.record, record).map_err(|source| {
            JsonFixtureError::ShapeMismatch {
                format: template.name.clone(),
                source,
            }
        })?;
    }

    let text = serde_json::to_string_pretty(&RecordArray {
        records,
        include_nulls,
    })?;
    Ok(text)
}
