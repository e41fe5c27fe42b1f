//! Named fixture presets.
//!
//! Each preset is a ready-made configuration: a file name, a record count
//! and a format. `all` expands to every small preset of a family.

use anyhow::bail;
use fixture_core::RenderedDocument;
use fixture_csv::{large_test_config, CsvFixtureGenerator, TabularConfig};
use fixture_json::{JsonFixtureGenerator, StructuredConfig, StructuredFormat};
use fixture_xml::{MarkupConfig, MarkupFormat, MarkupOptions, XmlFixtureGenerator};

/// One fixture to generate.
#[derive(Debug, Clone, PartialEq)]
pub enum Preset {
    Tabular(TabularConfig),
    Structured(StructuredConfig),
    Markup(MarkupConfig),
}

impl Preset {
    /// Output file name.
    pub fn filename(&self) -> &str {
        match self {
            Preset::Tabular(c) => &c.filename,
            Preset::Structured(c) => &c.filename,
            Preset::Markup(c) => &c.filename,
        }
    }

    /// Configured record count.
    pub fn total_records(&self) -> u64 {
        match self {
            Preset::Tabular(c) => c.total_records,
            Preset::Structured(c) => c.total_records,
            Preset::Markup(c) => c.total_records,
        }
    }

    /// Override the record count.
    pub fn with_records(mut self, total_records: u64) -> Self {
        match &mut self {
            Preset::Tabular(c) => c.total_records = total_records,
            Preset::Structured(c) => c.total_records = total_records,
            Preset::Markup(c) => c.total_records = total_records,
        }
        self
    }

    /// Override the output file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        match &mut self {
            Preset::Tabular(c) => c.filename = filename,
            Preset::Structured(c) => c.filename = filename,
            Preset::Markup(c) => c.filename = filename,
        }
        self
    }

    /// Generate the fixture in memory.
    pub fn generate(&self, seed: Option<u64>) -> anyhow::Result<RenderedDocument> {
        let document = match self {
            Preset::Tabular(config) => CsvFixtureGenerator::new(config.clone(), seed)?.generate()?,
            Preset::Structured(config) => {
                JsonFixtureGenerator::new(config.clone(), seed)?.generate()?
            }
            Preset::Markup(config) => XmlFixtureGenerator::new(config.clone(), seed)?.generate()?,
        };
        Ok(document)
    }
}

/// A preset name with its one-line description.
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
}

const fn info(name: &'static str, description: &'static str) -> PresetInfo {
    PresetInfo { name, description }
}

pub const CSV_PRESETS: &[PresetInfo] = &[info(
    "large",
    "180 columns (20 unique, 140 semi-unique, 20 identical), 100,000 rows",
)];

pub const JSON_PRESETS: &[PresetInfo] = &[
    info("organization", "Enterprise organization hierarchy (5 records)"),
    info("vulnerability-assessment", "Security vulnerability data (10 records)"),
    info("compliance-framework", "Compliance framework structure (3 records)"),
    info("nested-scan", "Multi-level nested scan results (8 records)"),
    info("all", "Generate all small formats"),
    info("organization-large", "Large organization data (700 records)"),
    info("vulnerability-assessment-large", "Large vulnerability data (1,300 records)"),
    info("compliance-framework-large", "Large compliance data (320 records)"),
    info("nested-scan-large", "Large nested scan data (300 records)"),
];

pub const XML_PRESETS: &[PresetInfo] = &[
    info("burp", "Burp Suite security scan format (50 issues)"),
    info("nessus", "Nessus vulnerability scan format (100 items)"),
    info("generic", "Generic XML with nested elements (25 records)"),
    info("project", "Security project controls format (20 controls)"),
    info("deep-nested", "Complex hierarchical structure (10 departments)"),
    info("all", "Generate all small formats"),
    info("burp-large", "Large Burp Suite scan (18,000 issues)"),
    info("nessus-large", "Large Nessus scan (26,200 items)"),
    info("generic-large", "Large generic XML (41,300 records)"),
    info("deep-nested-large", "Large deep hierarchy (3,250 departments)"),
];

fn names(presets: &[PresetInfo]) -> String {
    presets
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Usage text listing a family's presets.
pub fn usage(family: &str, presets: &[PresetInfo]) -> String {
    let width = presets.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let mut text = format!("Available {family} presets:\n");
    for preset in presets {
        text.push_str(&format!(
            "  {:<width$} - {}\n",
            preset.name, preset.description
        ));
    }
    text
}

/// Resolve a tabular preset.
pub fn csv_preset(name: &str) -> anyhow::Result<Vec<Preset>> {
    match name.to_ascii_lowercase().as_str() {
        "large" => Ok(vec![Preset::Tabular(large_test_config())]),
        _ => bail!(
            "Unknown csv preset '{name}' (available: {})",
            names(CSV_PRESETS)
        ),
    }
}

/// Resolve a structured preset.
pub fn json_preset(name: &str) -> anyhow::Result<Vec<Preset>> {
    let structured = |filename: &str, total: u64, format| {
        Preset::Structured(StructuredConfig::new(filename, total, format))
    };
    let small = || {
        vec![
            structured("test-organization-data.json", 5, StructuredFormat::Organization),
            structured(
                "test-vulnerability-assessment.json",
                10,
                StructuredFormat::VulnerabilityAssessment,
            ),
            structured(
                "test-compliance-framework.json",
                3,
                StructuredFormat::ComplianceFramework,
            ),
            structured("test-nested-scan.json", 8, StructuredFormat::NestedScan),
        ]
    };

    let presets = match name.to_ascii_lowercase().as_str() {
        "organization" => vec![small().swap_remove(0)],
        "vulnerability-assessment" => vec![small().swap_remove(1)],
        "compliance-framework" => vec![small().swap_remove(2)],
        "nested-scan" => vec![small().swap_remove(3)],
        "all" => small(),
        "organization-large" => vec![structured(
            "large-organization-data.json",
            700,
            StructuredFormat::Organization,
        )],
        "vulnerability-assessment-large" => vec![structured(
            "large-vulnerability-assessment.json",
            1300,
            StructuredFormat::VulnerabilityAssessment,
        )],
        "compliance-framework-large" => vec![structured(
            "large-compliance-framework.json",
            320,
            StructuredFormat::ComplianceFramework,
        )],
        "nested-scan-large" => vec![structured(
            "large-nested-scan.json",
            300,
            StructuredFormat::NestedScan,
        )],
        _ => bail!(
            "Unknown json preset '{name}' (available: {})",
            names(JSON_PRESETS)
        ),
    };
    Ok(presets)
}

/// Resolve a markup preset.
pub fn xml_preset(name: &str) -> anyhow::Result<Vec<Preset>> {
    let markup = |filename: &str, total: u64, format| {
        Preset::Markup(MarkupConfig::new(filename, total, format))
    };
    let generic = |filename: &str, total: u64, root: &str| {
        Preset::Markup(
            MarkupConfig::new(filename, total, MarkupFormat::Generic).with_options(MarkupOptions {
                root_element: root.to_string(),
                include_attributes: true,
                include_cdata: true,
            }),
        )
    };
    let small = || {
        vec![
            markup("test-burp-scan.xml", 50, MarkupFormat::Burp),
            markup("test-nessus-scan.xml", 100, MarkupFormat::Nessus),
            generic("test-generic-data.xml", 25, "testData"),
            markup("test-project-controls.xml", 20, MarkupFormat::Project),
            markup("test-deep-nested.xml", 10, MarkupFormat::DeepNested),
        ]
    };

    let presets = match name.to_ascii_lowercase().as_str() {
        "burp" => vec![small().swap_remove(0)],
        "nessus" => vec![small().swap_remove(1)],
        "generic" => vec![small().swap_remove(2)],
        "project" => vec![small().swap_remove(3)],
        "deep-nested" => vec![small().swap_remove(4)],
        "all" => small(),
        "burp-large" => vec![markup("large-burp-scan.xml", 18_000, MarkupFormat::Burp)],
        "nessus-large" => vec![markup("large-nessus-scan.xml", 26_200, MarkupFormat::Nessus)],
        "generic-large" => vec![generic("large-generic-data.xml", 41_300, "largeTestData")],
        "deep-nested-large" => vec![markup(
            "large-deep-nested.xml",
            3250,
            MarkupFormat::DeepNested,
        )],
        _ => bail!(
            "Unknown xml preset '{name}' (available: {})",
            names(XML_PRESETS)
        ),
    };
    Ok(presets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_preset_resolves() {
        for preset in CSV_PRESETS {
            assert!(!csv_preset(preset.name).unwrap().is_empty());
        }
        for preset in JSON_PRESETS {
            assert!(!json_preset(preset.name).unwrap().is_empty());
        }
        for preset in XML_PRESETS {
            assert!(!xml_preset(preset.name).unwrap().is_empty());
        }
    }

    #[test]
    fn test_unknown_presets_are_errors() {
        let err = json_preset("org").unwrap_err();
        assert!(err.to_string().contains("Unknown json preset 'org'"));
        assert!(xml_preset("burp-suite").is_err());
        assert!(csv_preset("small").is_err());
    }

    #[test]
    fn test_single_presets() {
        let presets = json_preset("Nested-Scan").unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].filename(), "test-nested-scan.json");
        assert_eq!(presets[0].total_records(), 8);

        let presets = xml_preset("generic-large").unwrap();
        match &presets[0] {
            Preset::Markup(config) => {
                assert_eq!(config.total_records, 41_300);
                assert_eq!(config.options.root_element, "largeTestData");
                assert!(config.options.include_cdata);
            }
            other => panic!("unexpected preset {other:?}"),
        }
    }

    #[test]
    fn test_all_expands_small_presets() {
        let filenames: Vec<String> = xml_preset("all")
            .unwrap()
            .iter()
            .map(|p| p.filename().to_string())
            .collect();
        assert_eq!(
            filenames,
            [
                "test-burp-scan.xml",
                "test-nessus-scan.xml",
                "test-generic-data.xml",
                "test-project-controls.xml",
                "test-deep-nested.xml"
            ]
        );
        assert_eq!(json_preset("all").unwrap().len(), 4);
    }

    #[test]
    fn test_overrides() {
        let preset = csv_preset("large")
            .unwrap()
            .remove(0)
            .with_records(3)
            .with_filename("small.csv");
        assert_eq!(preset.total_records(), 3);
        assert_eq!(preset.filename(), "small.csv");

        let doc = preset.generate(Some(1)).unwrap();
        assert_eq!(doc.text.lines().count(), 4);
        assert_eq!(doc.fields.len(), 180);
    }

    #[test]
    fn test_usage_lists_every_preset() {
        let text = usage("xml", XML_PRESETS);
        for preset in XML_PRESETS {
            assert!(text.contains(preset.name));
        }
    }
}
