//! Markup fixture configuration.

use crate::error::XmlFixtureError;
use crate::templates;
use fixture_core::DocumentTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The document schemas the markup generator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkupFormat {
    /// Burp Suite issue export
    Burp,
    /// Nessus v2 report with a single host
    Nessus,
    /// Generic records; shaped by [`MarkupOptions`]
    Generic,
    /// FedRAMP-style control catalogue
    Project,
    /// Organization with one deep branch per department
    DeepNested,
}

impl MarkupFormat {
    pub const ALL: [MarkupFormat; 5] = [
        MarkupFormat::Burp,
        MarkupFormat::Nessus,
        MarkupFormat::Generic,
        MarkupFormat::Project,
        MarkupFormat::DeepNested,
    ];

    /// Selector name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupFormat::Burp => "burp",
            MarkupFormat::Nessus => "nessus",
            MarkupFormat::Generic => "generic",
            MarkupFormat::Project => "project",
            MarkupFormat::DeepNested => "deep-nested",
        }
    }

    /// All selector names.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }

    /// The shared template for this format. Only `generic` reads the options.
    pub fn template(&self, options: &MarkupOptions) -> DocumentTemplate {
        match self {
            MarkupFormat::Burp => templates::burp(),
            MarkupFormat::Nessus => templates::nessus(),
            MarkupFormat::Generic => templates::generic(options),
            MarkupFormat::Project => templates::project(),
            MarkupFormat::DeepNested => templates::deep_nested(),
        }
    }
}

impl fmt::Display for MarkupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupFormat {
    type Err = XmlFixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lowered)
            .ok_or_else(|| XmlFixtureError::UnknownFormat(s.to_string()))
    }
}

fn default_root_element() -> String {
    "data".to_string()
}

fn default_true() -> bool {
    true
}

/// Options for the generic schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupOptions {
    /// Name of the document element
    #[serde(default = "default_root_element", alias = "rootElement")]
    pub root_element: String,

    /// Emit `version`/`generated` on the root and `index` on each record
    #[serde(default = "default_true", alias = "includeAttributes")]
    pub include_attributes: bool,

    /// Wrap record names in CDATA
    #[serde(default, alias = "includeCDATA", alias = "includeCdata")]
    pub include_cdata: bool,
}

impl MarkupOptions {
    /// Reject options that cannot produce a well-formed document.
    pub fn validate(&self) -> Result<(), XmlFixtureError> {
        if !is_xml_name(&self.root_element) {
            return Err(XmlFixtureError::InvalidElementName(self.root_element.clone()));
        }
        Ok(())
    }
}

/// Whether `name` matches the XML 1.0 `Name` production.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            root_element: default_root_element(),
            include_attributes: true,
            include_cdata: false,
        }
    }
}

/// Configuration of one markup fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Output file name
    pub filename: String,

    /// Number of record elements
    #[serde(alias = "totalRecords")]
    pub total_records: u64,

    pub format: MarkupFormat,

    #[serde(default)]
    pub options: MarkupOptions,
}

impl MarkupConfig {
    pub fn new(filename: impl Into<String>, total_records: u64, format: MarkupFormat) -> Self {
        Self {
            filename: filename.into(),
            total_records,
            format,
            options: MarkupOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MarkupOptions) -> Self {
        self.options = options;
        self
    }

    /// The template for the configured format and options.
    pub fn template(&self) -> Result<DocumentTemplate, XmlFixtureError> {
        self.options.validate()?;
        Ok(self.format.template(&self.options))
    }
}
