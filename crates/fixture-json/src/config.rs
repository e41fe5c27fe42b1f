//! Structured fixture configuration.

use crate::error::JsonFixtureError;
use crate::templates;
use fixture_core::DocumentTemplate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The record shapes the structured generator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuredFormat {
    /// Enterprise organization hierarchy
    Organization,
    /// Security vulnerability assessment
    VulnerabilityAssessment,
    /// Compliance framework structure
    ComplianceFramework,
    /// Multi-level nested scan results
    NestedScan,
}

impl StructuredFormat {
    pub const ALL: [StructuredFormat; 4] = [
        StructuredFormat::Organization,
        StructuredFormat::VulnerabilityAssessment,
        StructuredFormat::ComplianceFramework,
        StructuredFormat::NestedScan,
    ];

    /// Selector name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StructuredFormat::Organization => "organization",
            StructuredFormat::VulnerabilityAssessment => "vulnerability-assessment",
            StructuredFormat::ComplianceFramework => "compliance-framework",
            StructuredFormat::NestedScan => "nested-scan",
        }
    }

    /// All selector names.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }

    /// The shared template for this format.
    pub fn template(&self) -> DocumentTemplate {
        match self {
            StructuredFormat::Organization => templates::organization(),
            StructuredFormat::VulnerabilityAssessment => templates::vulnerability_assessment(),
            StructuredFormat::ComplianceFramework => templates::compliance_framework(),
            StructuredFormat::NestedScan => templates::nested_scan(),
        }
    }
}

impl StructuredFormat {
    /// Resolve a selector, falling back to the first schema when it is unknown.
    pub fn from_selector(selector: &str) -> Self {
        selector.parse().unwrap_or_else(|_| {
            let fallback = Self::ALL[0];
            warn!("Unknown structured format '{selector}', using '{fallback}'");
            fallback
        })
    }
}

impl fmt::Display for StructuredFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructuredFormat {
    type Err = JsonFixtureError;

    /// Case-insensitive; unknown selectors are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lowered)
            .ok_or_else(|| JsonFixtureError::UnknownFormat(s.to_string()))
    }
}

fn default_true() -> bool {
    true
}

/// Format-specific overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredOptions {
    /// Emit object members whose value is null
    #[serde(default = "default_true", alias = "includeNulls")]
    pub include_nulls: bool,
}

impl Default for StructuredOptions {
    fn default() -> Self {
        Self {
            include_nulls: true,
        }
    }
}

/// Configuration of one structured fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredConfig {
    /// Output file name
    pub filename: String,

    /// Number of top-level records
    #[serde(alias = "totalRecords")]
    pub total_records: u64,

    /// Unknown selectors fall back to the first schema
    #[serde(deserialize_with = "lenient_format")]
    pub format: StructuredFormat,

    #[serde(default)]
    pub options: StructuredOptions,
}

fn lenient_format<'de, D>(deserializer: D) -> Result<StructuredFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let selector = String::deserialize(deserializer)?;
    Ok(StructuredFormat::from_selector(&selector))
}

impl StructuredConfig {
    pub fn new(filename: impl Into<String>, total_records: u64, format: StructuredFormat) -> Self {
        Self {
            filename: filename.into(),
            total_records,
            format,
            options: StructuredOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StructuredOptions) -> Self {
        self.options = options;
        self
    }
}
