//! Markup fixture generator.

use crate::config::MarkupConfig;
use crate::error::XmlFixtureError;
use crate::serializer::render_document;
use fixture_core::{GenerationMetrics, OutputFormat, RenderedDocument};
use fixture_generator::RecordSynthesizer;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info;

/// Markup fixture generator.
pub struct XmlFixtureGenerator {
    config: MarkupConfig,
    synthesizer: RecordSynthesizer<StdRng>,
}

impl XmlFixtureGenerator {
    /// Create a generator for the configured format and options.
    pub fn new(config: MarkupConfig, seed: Option<u64>) -> Result<Self, XmlFixtureError> {
        let synthesizer = RecordSynthesizer::with_optional_seed(config.template()?, seed)?;
        Ok(Self {
            config,
            synthesizer,
        })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &MarkupConfig {
        &self.config
    }

    /// Generate the whole document in memory.
    pub fn generate(&mut self) -> Result<RenderedDocument, XmlFixtureError> {
        let start_time = Instant::now();
        let total = self.config.total_records;

        info!(
            "Generating {} fixture '{}' with {} records",
            self.config.format, self.config.filename, total
        );

        let document = self.synthesizer.synthesize_document(total)?;

        let render_start = Instant::now();
        let text = render_document(
            self.synthesizer.template(),
            &document.envelope,
            &document.records,
        )?;
        let render_duration = render_start.elapsed();

        let metrics = GenerationMetrics {
            records: document.records.len() as u64,
            total_duration: start_time.elapsed(),
            synthesis_duration: document.duration,
            render_duration,
        };

        info!(
            "XML generation complete: {} records, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records,
            text.len(),
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(RenderedDocument {
            format: OutputFormat::Xml,
            text,
            records: metrics.records,
            fields: self
                .synthesizer
                .template()
                .record_field_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MarkupFormat, MarkupOptions};
    use quick_xml::events::{BytesStart, Event};
    use quick_xml::Reader;

    struct Element {
        name: String,
        depth: usize,
        attributes: Vec<(String, String)>,
    }

    fn attrs(e: &BytesStart<'_>) -> Vec<(String, String)> {
        e.attributes()
            .map(|a| {
                let a = a.unwrap();
                (
                    String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                    a.unescape_value().unwrap().into_owned(),
                )
            })
            .collect()
    }

    /// Parse every element, failing on any well-formedness error.
    fn elements(xml: &str) -> Vec<Element> {
        let mut reader = Reader::from_str(xml);
        let mut depth = 0;
        let mut out = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    out.push(Element {
                        name: String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
                        depth,
                        attributes: attrs(&e),
                    });
                    depth += 1;
                }
                Event::Empty(e) => out.push(Element {
                    name: String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
                    depth,
                    attributes: attrs(&e),
                }),
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(depth, 0);
        out
    }

    fn generate(config: MarkupConfig, seed: u64) -> RenderedDocument {
        let mut generator = XmlFixtureGenerator::new(config, Some(seed)).unwrap();
        generator.generate().unwrap()
    }

    fn count(elements: &[Element], name: &str, depth: usize) -> usize {
        elements
            .iter()
            .filter(|e| e.name == name && e.depth == depth)
            .count()
    }

    #[test]
    fn test_every_format_is_well_formed_with_n_records() {
        let record_element = |format: MarkupFormat| match format {
            MarkupFormat::Burp => ("issue", 1),
            MarkupFormat::Nessus => ("ReportItem", 3),
            MarkupFormat::Generic => ("record", 1),
            MarkupFormat::Project => ("control", 2),
            MarkupFormat::DeepNested => ("departments", 1),
        };
        for format in MarkupFormat::ALL {
            for total in [0, 1, 7] {
                let doc = generate(MarkupConfig::new("t.xml", total, format), total + 3);
                assert!(doc.text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
                assert!(doc.text.ends_with(">\n"));

                let parsed = elements(&doc.text);
                let (name, depth) = record_element(format);
                assert_eq!(count(&parsed, name, depth) as u64, total, "{format}");
                assert_eq!(doc.records, total);
            }
        }
    }

    #[test]
    fn test_burp_issue_content() {
        let doc = generate(MarkupConfig::new("b.xml", 5, MarkupFormat::Burp), 1);
        let parsed = elements(&doc.text);

        assert_eq!(parsed[0].name, "issues");
        assert_eq!(parsed[0].attributes[0], ("burpVersion".to_string(), "2024.12.5".to_string()));
        assert!(parsed[0].attributes[1].1.ends_with(" GMT"));

        assert!(doc.text.contains("<name><![CDATA["));
        assert!(doc.text.contains("<request method=\""));
        assert!(doc.text.contains(" HTTP/1.1]]></request>"));
        for request in parsed.iter().filter(|e| e.name == "request") {
            assert_eq!(request.attributes[1], ("base64".to_string(), "false".to_string()));
        }
        assert_eq!(count(&parsed, "integrity", 4), 5);
    }

    #[test]
    fn test_nessus_single_host() {
        let doc = generate(MarkupConfig::new("n.xml", 12, MarkupFormat::Nessus), 2);
        let parsed = elements(&doc.text);

        let hosts: Vec<&Element> = parsed.iter().filter(|e| e.name == "ReportHost").collect();
        assert_eq!(hosts.len(), 1);
        let host_ip = &hosts[0].attributes[0].1;
        assert!(doc.text.contains(&format!("<tag name=\"host-ip\">{host_ip}</tag>")));

        for item in parsed.iter().filter(|e| e.name == "ReportItem") {
            let names: Vec<&str> = item.attributes.iter().map(|(k, _)| k.as_str()).collect();
            assert_eq!(names, ["port", "protocol", "severity", "pluginID", "pluginName"]);
            let port = &item.attributes[0].1;
            let protocol = &item.attributes[1].1;
            assert!(doc
                .text
                .contains(&format!("Detected service on port {port}/{protocol}")));
        }
    }

    #[test]
    fn test_generic_options() {
        let options = MarkupOptions {
            root_element: "testData".to_string(),
            include_attributes: true,
            include_cdata: true,
        };
        let doc = generate(
            MarkupConfig::new("g.xml", 3, MarkupFormat::Generic).with_options(options),
            4,
        );
        let parsed = elements(&doc.text);
        assert_eq!(parsed[0].name, "testData");
        assert_eq!(parsed[0].attributes[0], ("version".to_string(), "1.0".to_string()));
        assert!(doc.text.contains("<record id=\"1\" index=\"0\">"));
        assert!(doc.text.contains("<name><![CDATA[Record_000002]]></name>"));
        assert!(doc.text.contains("<tag>tag_2</tag>"));

        let plain = MarkupOptions {
            root_element: "data".to_string(),
            include_attributes: false,
            include_cdata: false,
        };
        let doc = generate(
            MarkupConfig::new("g.xml", 2, MarkupFormat::Generic).with_options(plain),
            4,
        );
        assert!(doc.text.contains("\n<data>\n"));
        assert!(doc.text.contains("<record id=\"2\">"));
        assert!(doc.text.contains("<name>Record_000001</name>"));
    }

    #[test]
    fn test_invalid_root_element_is_rejected_before_output() {
        let options = MarkupOptions {
            root_element: "test data".to_string(),
            ..MarkupOptions::default()
        };
        let config = MarkupConfig::new("g.xml", 3, MarkupFormat::Generic).with_options(options);
        assert!(matches!(
            XmlFixtureGenerator::new(config, Some(1)),
            Err(XmlFixtureError::InvalidElementName(_))
        ));
    }

    #[test]
    fn test_project_controls() {
        let doc = generate(MarkupConfig::new("p.xml", 12, MarkupFormat::Project), 5);
        assert!(doc.text.contains("<control id=\"AC-01\">"));
        assert!(doc.text.contains("<requirement id=\"AC-12-1\">"));
        assert!(doc.text.contains("<printApplicability>true</printApplicability>"));
        assert!(doc.text.contains("<name><![CDATA[Test Security Project]]></name>"));
    }

    #[test]
    fn test_deep_nested_branches() {
        let doc = generate(MarkupConfig::new("d.xml", 4, MarkupFormat::DeepNested), 6);
        let parsed = elements(&doc.text);
        assert!(doc.text.contains("<department id=\"DEPT-003\""));
        assert_eq!(count(&parsed, "personnel", 3), 4);
        assert_eq!(count(&parsed, "technology", 3), 4);
        assert_eq!(count(&parsed, "compliance", 3), 4);
        assert!(doc.text.contains("<system name=\"hr\" permissions=\"read,write\"/>"));
        let max_depth = parsed.iter().map(|e| e.depth).max().unwrap();
        assert!(max_depth >= 14);
    }
}
