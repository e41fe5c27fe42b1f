//! Well-formed XML serializer.
//!
//! Walks a template and its synthesized values together. The envelope's
//! object is the document element; the records slot expands to one element
//! per record. Null values omit their element or attribute.

use crate::error::XmlFixtureError;
use fixture_core::{
    check_node, check_record, DocumentTemplate, FieldSpec, Markup, Node, ObjectSpec, Record, Value,
};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Render an envelope and its records as an XML document.
///
/// The envelope and every record are checked against the template before
/// anything is written.
pub fn render_document(
    template: &DocumentTemplate,
    envelope: &Value,
    records: &[Record],
) -> Result<String, XmlFixtureError> {
    let Node::Object(root) = &template.envelope else {
        return Err(XmlFixtureError::NoRootElement(template.name.clone()));
    };

    let mismatch = |source| XmlFixtureError::ShapeMismatch {
        format: template.name.clone(),
        source,
    };
    check_node(&template.envelope, envelope, &root.name).map_err(mismatch)?;
    for record in records {
        check_record(&template.record, record).map_err(mismatch)?;
    }

    let mut writer = MarkupWriter {
        writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        record_node: &template.record,
        records,
    };
    writer
        .writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_object(root, envelope)?;

    let mut bytes = writer.writer.into_inner().into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// Split text so that no CDATA section contains `]]>`.
///
/// `a]]>b` becomes `a]]` and `>b`, written as two adjacent sections.
pub fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

struct MarkupWriter<'a> {
    writer: Writer<Cursor<Vec<u8>>>,
    record_node: &'a Node,
    records: &'a [Record],
}

impl MarkupWriter<'_> {
    fn write_node(&mut self, node: &Node, value: &Value) -> Result<(), XmlFixtureError> {
        match node {
            Node::Field(field) => self.write_field(field, value),
            Node::Object(object) => self.write_object(object, value),
            Node::Repeated(group) => {
                for item in value.as_array().unwrap_or_default() {
                    self.write_node(&group.item, item)?;
                }
                Ok(())
            }
            Node::Records => self.write_records(),
        }
    }

    fn write_records(&mut self) -> Result<(), XmlFixtureError> {
        let record_node = self.record_node;
        for record in self.records {
            self.write_node(record_node, &record.value)?;
        }
        Ok(())
    }

    /// A field outside attribute/text position becomes its own element.
    fn write_field(&mut self, field: &FieldSpec, value: &Value) -> Result<(), XmlFixtureError> {
        let Some(text) = text_of(value) else {
            return Ok(());
        };
        let name = field.name.as_str();
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        match field.markup {
            Markup::Cdata | Markup::CdataText => self.write_cdata(&text)?,
            _ => self.writer.write_event(Event::Text(BytesText::new(&text)))?,
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn write_object(&mut self, object: &ObjectSpec, value: &Value) -> Result<(), XmlFixtureError> {
        let Some(members) = value.as_object() else {
            return Ok(());
        };

        // Pair each child with its member; the records slot has none.
        let mut values = members.iter().map(|(_, v)| v);
        let children: Vec<(&Node, Option<&Value>)> = object
            .children
            .iter()
            .map(|child| match child {
                Node::Records => (child, None),
                _ => (child, values.next()),
            })
            .collect();

        let mut start = BytesStart::new(object.name.as_str());
        let mut content = Vec::new();
        for (child, value) in children {
            match (child, value) {
                (Node::Field(field), Some(value)) if field.markup == Markup::Attribute => {
                    if let Some(text) = text_of(value) {
                        start.push_attribute((field.name.as_str(), text.as_str()));
                    }
                }
                _ => {
                    if self.emits(child, value) {
                        content.push((child, value));
                    }
                }
            }
        }

        if content.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for (child, value) in content {
            match (child, value) {
                (Node::Field(field), Some(value)) if field.markup == Markup::Text => {
                    if let Some(text) = text_of(value) {
                        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
                    }
                }
                (Node::Field(field), Some(value)) if field.markup == Markup::CdataText => {
                    if let Some(text) = text_of(value) {
                        self.write_cdata(&text)?;
                    }
                }
                (Node::Records, _) => self.write_records()?,
                (node, Some(value)) => self.write_node(node, value)?,
                (_, None) => {}
            }
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(object.name.as_str())))?;
        Ok(())
    }

    fn write_cdata(&mut self, text: &str) -> Result<(), XmlFixtureError> {
        for section in cdata_sections(text) {
            self.writer.write_event(Event::CData(BytesCData::new(section)))?;
        }
        Ok(())
    }

    /// Whether a child produces any output inside its parent element.
    fn emits(&self, node: &Node, value: Option<&Value>) -> bool {
        match (node, value) {
            (Node::Records, _) => !self.records.is_empty(),
            (Node::Repeated(_), Some(value)) => {
                value.as_array().map(|items| !items.is_empty()).unwrap_or(false)
            }
            (_, Some(value)) => !value.is_null(),
            (_, None) => false,
        }
    }
}

/// Text for a leaf value; `None` when the value is absent.
fn text_of(value: &Value) -> Option<String> {
    if value.is_null() {
        None
    } else {
        value.to_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::dsl::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn obj(members: Vec<(&str, Value)>) -> Value {
        Value::Object(
            members
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn template() -> DocumentTemplate {
        DocumentTemplate::new(
            "hosts",
            object(
                "host",
                vec![
                    field("ip", ipv4()).attribute(),
                    field("name", pattern("h{index}")),
                    field("banner", null()).cdata(),
                    repeated("port", 0, 3, field("port", int(1, 10))),
                ],
            ),
        )
        .with_envelope(object(
            "scan",
            vec![field("tool", constant("x")).attribute(), records()],
        ))
    }

    fn host(index: u64, name: &str, banner: Value, ports: Vec<i64>) -> Record {
        Record::new(
            index,
            obj(vec![
                ("ip", Value::string("10.0.0.1")),
                ("name", Value::string(name)),
                ("banner", banner),
                ("port", Value::from(ports)),
            ]),
        )
    }

    /// Parse the whole document, failing on any well-formedness error.
    fn parse(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut names = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => {
                    names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap())
                }
                Event::Eof => break,
                _ => {}
            }
        }
        names
    }

    #[test]
    fn test_document_layout() {
        let envelope = obj(vec![("tool", Value::string("x"))]);
        let records = [
            host(0, "h0", Value::Null, vec![22, 80]),
            host(1, "h1", Value::string("ssh"), vec![]),
        ];
        let xml = render_document(&template(), &envelope, &records).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <scan tool=\"x\">\n  \
               <host ip=\"10.0.0.1\">\n    \
                 <name>h0</name>\n    \
                 <port>22</port>\n    \
                 <port>80</port>\n  \
               </host>\n  \
               <host ip=\"10.0.0.1\">\n    \
                 <name>h1</name>\n    \
                 <banner><![CDATA[ssh]]></banner>\n  \
               </host>\n\
             </scan>\n"
        );
    }

    #[test]
    fn test_empty_document_is_self_closing_root() {
        let envelope = obj(vec![("tool", Value::string("x"))]);
        let xml = render_document(&template(), &envelope, &[]).unwrap();
        assert!(xml.ends_with("<scan tool=\"x\"/>\n"));
        assert_eq!(parse(&xml), vec!["scan"]);
    }

    #[test]
    fn test_reserved_characters_stay_well_formed() {
        let envelope = obj(vec![("tool", Value::string("a\"<b>&'c"))]);
        let records = [host(
            0,
            "<script>&amp;</script>",
            Value::string("x]]>y]]>]]>z <tag> & stuff"),
            vec![1],
        )];
        let xml = render_document(&template(), &envelope, &records).unwrap();

        assert!(!xml.contains("<script>"));
        assert!(xml.contains("<![CDATA[x]]]]><![CDATA[>y]]]]><![CDATA[>]]]]><![CDATA[>z <tag> & stuff]]>"));
        assert_eq!(parse(&xml), vec!["scan", "host", "name", "banner", "port"]);

        // Text and CDATA read back unchanged
        let mut reader = Reader::from_str(&xml);
        let mut name_text = String::new();
        let mut banner = String::new();
        let mut current = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => current = String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
                Event::Text(t) if current == "name" => name_text.push_str(&t.unescape().unwrap()),
                Event::CData(c) if current == "banner" => {
                    banner.push_str(std::str::from_utf8(&c.into_inner()).unwrap())
                }
                Event::End(_) => current.clear(),
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(name_text, "<script>&amp;</script>");
        assert_eq!(banner, "x]]>y]]>]]>z <tag> & stuff");
    }

    #[test]
    fn test_cdata_sections() {
        assert_eq!(cdata_sections("plain"), vec!["plain"]);
        assert_eq!(cdata_sections("a]]>b"), vec!["a]]", ">b"]);
        assert_eq!(cdata_sections("]]>"), vec!["]]", ">"]);
        assert_eq!(cdata_sections(""), vec![""]);
    }

    #[test]
    fn test_attribute_and_text_content() {
        let template = DocumentTemplate::new(
            "req",
            object(
                "request",
                vec![
                    field("method", constant("GET")).attribute(),
                    field("text", constant("GET /?a=1&b=<2> HTTP/1.1")).cdata_text(),
                ],
            ),
        )
        .with_envelope(object("log", vec![records()]));

        let record = Record::new(
            0,
            obj(vec![
                ("method", Value::string("GET")),
                ("text", Value::string("GET /?a=1&b=<2> HTTP/1.1")),
            ]),
        );
        let xml = render_document(&template, &obj(vec![]), &[record]).unwrap();
        assert!(xml.contains(
            "<request method=\"GET\"><![CDATA[GET /?a=1&b=<2> HTTP/1.1]]></request>"
        ));
    }

    #[test]
    fn test_bare_records_envelope_is_rejected() {
        let template = DocumentTemplate::new("flat", object("row", vec![]));
        assert!(matches!(
            render_document(&template, &Value::Null, &[]),
            Err(XmlFixtureError::NoRootElement(_))
        ));
    }

    #[test]
    fn test_mismatched_record_aborts() {
        let envelope = obj(vec![("tool", Value::string("x"))]);
        let bad = Record::new(3, obj(vec![("ip", Value::Int(1))]));
        let err = render_document(&template(), &envelope, &[bad]).unwrap_err();
        assert!(matches!(err, XmlFixtureError::ShapeMismatch { .. }));
    }
}
