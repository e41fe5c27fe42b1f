//! Tabular fixture configuration.

use crate::error::CsvFixtureError;
use fixture_core::{DocumentTemplate, FieldSpec, GeneratorConfig, Node, ObjectSpec, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the canonical large fixture.
pub const LARGE_TEST_FILENAME: &str = "large-test-data.csv";

/// Row count of the canonical large fixture.
pub const LARGE_TEST_RECORDS: u64 = 100_000;

/// Candidate sets the canonical fixture's semi-unique columns cycle through.
const SEMI_UNIQUE_CANDIDATES: [&[&str]; 20] = [
    &["A", "B", "C"],
    &["Red", "Green", "Blue", "Yellow"],
    &["Small", "Medium", "Large", "XLarge", "XXLarge"],
    &["North", "South", "East", "West"],
    &["Active", "Inactive", "Pending", "Suspended", "Archived"],
    &["Bronze", "Silver", "Gold", "Platinum"],
    &["Low", "Medium", "High", "Critical"],
    &["Q1", "Q2", "Q3", "Q4"],
    &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    &[
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    &["Draft", "Review", "Approved", "Published", "Archived"],
    &["Beginner", "Intermediate", "Advanced", "Expert"],
    &["Mobile", "Desktop", "Tablet", "Smart TV", "Console"],
    &["Free", "Basic", "Premium", "Enterprise"],
    &["Public", "Private", "Protected", "Internal"],
    &["Creating", "Processing", "Complete", "Failed", "Cancelled"],
    &["Alpha", "Beta", "RC", "Stable", "Deprecated"],
    &["Local", "Regional", "National", "International"],
    &["Light", "Dark", "Auto"],
    &["Email", "SMS", "Push", "InApp", "None"],
];

/// Configuration of one tabular fixture.
///
/// ```yaml
/// filename: statuses.csv
/// total_records: 3
/// columns:
///   - name: id
///     type: unique
///   - name: status
///     type: semi-unique
///     values: [A, B]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularConfig {
    /// Output file name
    pub filename: String,

    /// Number of data rows
    #[serde(alias = "totalRecords")]
    pub total_records: u64,

    /// Column specifications, in output order
    pub columns: Vec<FieldSpec>,
}

impl TabularConfig {
    /// Parse a configuration from YAML (JSON is accepted as well).
    pub fn from_yaml(content: &str) -> Result<Self, CsvFixtureError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CsvFixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Column names, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// One-line description per column: `name: kind`.
    pub fn describe_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format!("{}: {}", c.name, c.generator.describe()))
            .collect()
    }

    /// Build the shared template: one flat object per row.
    pub fn template(&self) -> Result<DocumentTemplate, CsvFixtureError> {
        if self.columns.is_empty() {
            return Err(CsvFixtureError::NoColumns(self.filename.clone()));
        }
        if let Some(column) = self.columns.iter().find(|c| !yields_scalars(&c.generator)) {
            return Err(CsvFixtureError::NonScalarColumn(column.name.clone()));
        }
        let row = Node::Object(ObjectSpec {
            name: "row".to_string(),
            children: self.columns.iter().cloned().map(Node::Field).collect(),
            presence: None,
        });
        Ok(DocumentTemplate::new(self.filename.clone(), row))
    }
}

fn yields_scalars(generator: &GeneratorConfig) -> bool {
    match generator {
        GeneratorConfig::Cyclic { values } | GeneratorConfig::OneOf { values } => {
            values.iter().all(Value::is_scalar)
        }
        GeneratorConfig::Constant { value: Some(value) } => value.is_scalar(),
        _ => true,
    }
}

/// The canonical 180-column fixture: 20 unique, 140 semi-unique and 20
/// identical columns over 100,000 rows.
pub fn large_test_config() -> TabularConfig {
    let mut columns = Vec::with_capacity(180);

    for i in 1..=20 {
        columns.push(FieldSpec::new(format!("unique_{i}"), GeneratorConfig::Unique));
    }

    for i in 1..=140 {
        let candidates = SEMI_UNIQUE_CANDIDATES[(i - 1) % SEMI_UNIQUE_CANDIDATES.len()];
        columns.push(FieldSpec::new(
            format!("semi_unique_{i}"),
            GeneratorConfig::Cyclic {
                values: candidates.iter().map(|v| Value::from(*v)).collect(),
            },
        ));
    }

    for i in 1..=20 {
        columns.push(FieldSpec::new(
            format!("identical_{i}"),
            GeneratorConfig::Constant {
                value: Some(Value::String(format!("constant_value_{i}"))),
            },
        ));
    }

    TabularConfig {
        filename: LARGE_TEST_FILENAME.to_string(),
        total_records: LARGE_TEST_RECORDS,
        columns,
    }
}
