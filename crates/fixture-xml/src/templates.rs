//! Document templates for the markup formats.
//!
//! Every template has an object envelope (the document element plus any
//! fixed header content) and a records slot where the record elements go.

use crate::config::MarkupOptions;
use fixture_core::dsl::*;
use fixture_core::{DocumentTemplate, GeneratorConfig, Node};

const CLEARANCE_LEVELS: &[&str] = &["PUBLIC", "CONFIDENTIAL", "SECRET", "TOP_SECRET"];

/// Element with one attribute and text content, e.g. `<host ip="..">..</host>`.
fn tagged(name: &str, attribute: (&str, GeneratorConfig), text: GeneratorConfig) -> Node {
    object(
        name,
        vec![
            field(attribute.0, attribute.1).attribute(),
            field("text", text).text(),
        ],
    )
}

/// Element carrying attributes only.
fn empty(name: &str, attributes: Vec<(&str, GeneratorConfig)>) -> Node {
    object(
        name,
        attributes
            .into_iter()
            .map(|(attr, generator)| field(attr, generator).attribute())
            .collect(),
    )
}

// ============================================================================
// Burp
// ============================================================================

/// Burp Suite issue export: `<issues>` with one `<issue>` per record.
pub fn burp() -> DocumentTemplate {
    let envelope = object(
        "issues",
        vec![
            field("burpVersion", constant("2024.12.5")).attribute(),
            field("exportTime", http_now()).attribute(),
            records(),
        ],
    );

    let record = object(
        "issue",
        vec![
            field("serialNumber", pattern("{rand:19}")),
            field("type", pattern("{int:7000000..7999999}")),
            field("name", var("vulnType")).cdata(),
            tagged("host", ("ip", ipv4()), pattern("https://{var:domain}")),
            field("path", var("path")).cdata(),
            field("location", var("location")).cdata(),
            field("severity", pick(&["Low", "Medium", "High", "Critical"])),
            field("confidence", pick(&["Tentative", "Firm", "Certain"])),
            field("issueBackground", pattern("{var:vulnType} found in application")).cdata(),
            field(
                "issueDetail",
                pattern("Parameter {var:parameter} is vulnerable to {var:vulnType}"),
            )
            .cdata(),
            burp_analysis(),
            object(
                "requestresponse",
                vec![
                    object(
                        "request",
                        vec![
                            field("method", var("method")).attribute(),
                            field("base64", constant("false")).attribute(),
                            field("text", pattern("{var:method} {var:location} HTTP/1.1"))
                                .cdata_text(),
                        ],
                    ),
                    object(
                        "response",
                        vec![
                            field("base64", constant("false")).attribute(),
                            field(
                                "text",
                                pattern(
                                    "HTTP/1.1 {pick:200 OK|302 Found|403 Forbidden|500 Internal Server Error}",
                                ),
                            )
                            .cdata_text(),
                        ],
                    ),
                ],
            ),
        ],
    );

    DocumentTemplate::new("burp", record)
        .with_envelope(envelope)
        .with_record_vars(vec![
            var_spec(
                "vulnType",
                pick(&[
                    "SQL injection",
                    "XSS vulnerability",
                    "Command injection",
                    "Open Redirect",
                    "CSRF vulnerability",
                    "Information disclosure",
                    "Authentication bypass",
                    "Directory traversal",
                ]),
            ),
            var_spec(
                "domain",
                pick(&["example.com", "testsite.org", "webapp.net", "api.service.com"]),
            ),
            var_spec(
                "path",
                pick(&["/api", "/search", "/login", "/users", "/admin", "/dashboard"]),
            ),
            var_spec(
                "parameter",
                pick(&["id", "q", "user", "token", "search", "filter"]),
            ),
            var_spec("method", pick(&["GET", "POST", "PUT", "DELETE"])),
            var_spec("location", pattern("{var:path}?{var:parameter}={int:0..99}")),
        ])
}

fn burp_analysis() -> Node {
    let score = || ("score", int(0, 9));

    object(
        "analysis",
        vec![
            object(
                "classification",
                vec![
                    tagged(
                        "category",
                        ("type", constant("primary")),
                        pick(&["injection", "xss", "csrf", "auth"]),
                    ),
                    object(
                        "subcategory",
                        vec![
                            field("level1", pick(&["sql", "nosql", "ldap", "xpath"])),
                            object(
                                "level2",
                                vec![
                                    field("technique", pick(&["union", "boolean", "time", "error"])),
                                    object(
                                        "complexity",
                                        vec![
                                            field("level", pick(&["low", "medium", "high"])).attribute(),
                                            object(
                                                "factors",
                                                vec![
                                                    tagged(
                                                        "authentication",
                                                        ("required", chance(0.5)),
                                                        pick(&["none", "basic", "session"]),
                                                    ),
                                                    field("privileges", pick(&["anonymous", "user", "admin"])),
                                                    object(
                                                        "network",
                                                        vec![
                                                            field("access", pick(&["local", "adjacent", "network"])),
                                                            field("encryption", chance(0.7)),
                                                        ],
                                                    ),
                                                ],
                                            ),
                                        ],
                                    ),
                                ],
                            ),
                        ],
                    ),
                ],
            ),
            object(
                "impact",
                vec![
                    object(
                        "confidentiality",
                        vec![
                            field("score", int(0, 9)).attribute(),
                            object(
                                "dataTypes",
                                vec![
                                    tagged("type", ("sensitive", chance(0.5)), constant("user_data")),
                                    tagged("type", ("sensitive", chance(0.5)), constant("system_config")),
                                ],
                            ),
                        ],
                    ),
                    empty("integrity", vec![score()]),
                    empty("availability", vec![score()]),
                ],
            ),
        ],
    )
}

// ============================================================================
// Nessus
// ============================================================================

/// Nessus v2 report: one host whose report items are the records.
pub fn nessus() -> DocumentTemplate {
    let host_tag = |name: &str, value: GeneratorConfig| tagged("tag", ("name", constant(name)), value);

    let envelope = object(
        "NessusClientData_v2",
        vec![object(
            "Report",
            vec![
                field("name", constant("Security_Scan")).attribute(),
                field("xmlns:cm", constant("http://www.nessus.org/cm")).attribute(),
                object(
                    "ReportHost",
                    vec![
                        field("name", var("hostIp")).attribute(),
                        object(
                            "HostProperties",
                            vec![
                                host_tag("mac-address", var("macAddress")),
                                host_tag("host-ip", var("hostIp")),
                                host_tag("operating-system", constant("Linux Ubuntu 20.04")),
                                host_tag("system-type", constant("general-purpose")),
                                host_tag("Credentialed_Scan", constant("true")),
                            ],
                        ),
                        records(),
                    ],
                ),
            ],
        )],
    );

    let record = object(
        "ReportItem",
        vec![
            field("port", var("port")).attribute(),
            field("protocol", var("protocol")).attribute(),
            field("severity", pick(&["0", "1", "2", "3", "4"])).attribute(),
            field("pluginID", pattern("{int:100000..999999}")).attribute(),
            field(
                "pluginName",
                pick(&[
                    "Target Credential Status by Authentication Protocol",
                    "SSH Rate Limited Device",
                    "SSL Certificate Verification",
                    "HTTP Server Security Headers",
                    "Weak Cipher Suites",
                    "Operating System Detection",
                    "Service Detection",
                ]),
            )
            .attribute(),
            field(
                "description",
                constant(
                    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
                ),
            ),
            field(
                "solution",
                constant("Update the affected software to the latest version or apply vendor patches."),
            ),
            field("risk_factor", pick(&["None", "Low", "Medium", "High", "Critical"])),
            field(
                "plugin_output",
                pattern("Detected service on port {var:port}/{var:protocol}"),
            ),
        ],
    );

    DocumentTemplate::new("nessus", record)
        .with_envelope(envelope)
        .with_envelope_vars(vec![
            var_spec("hostIp", ipv4()),
            var_spec("macAddress", mac()),
        ])
        .with_record_vars(vec![
            var_spec("port", int(1, 65535)),
            var_spec("protocol", pick(&["tcp", "udp"])),
        ])
}

// ============================================================================
// Generic
// ============================================================================

/// Generic records under a configurable document element.
pub fn generic(options: &MarkupOptions) -> DocumentTemplate {
    let mut root = Vec::new();
    if options.include_attributes {
        root.push(field("version", constant("1.0")).attribute());
        root.push(field("generated", now()).attribute());
    }
    root.push(records());

    let mut record = vec![field("id", pattern("{index+1}")).attribute()];
    if options.include_attributes {
        record.push(field("index", pattern("{index}")).attribute());
    }
    let name = field("name", pattern("Record_{index:06}"));
    record.push(if options.include_cdata { name.cdata() } else { name });
    record.extend([
        field("value", int(0, 999)),
        field("category", pick(&["A", "B", "C", "D"])),
        field("active", chance(0.5)),
        object(
            "metadata",
            vec![
                field("created", days_ago(365.0)),
                object(
                    "tags",
                    vec![
                        field("tag", pattern("tag_{index%5}")),
                        field("tag", pattern("category_{pick:alpha|beta|gamma}")),
                    ],
                ),
            ],
        ),
    ]);

    DocumentTemplate::new("generic", object("record", record))
        .with_envelope(object(&options.root_element, root))
}

// ============================================================================
// Project
// ============================================================================

/// FedRAMP-style project: fixed metadata, then one `<control>` per record.
pub fn project() -> DocumentTemplate {
    let envelope = object(
        "project",
        vec![
            field("version", constant("1.0")).attribute(),
            field("type", constant("FEDRAMP_REV_5")).attribute(),
            object(
                "meta",
                vec![
                    field("name", constant("Test Security Project")).cdata(),
                    field("color", constant("#3B82F6")),
                    field("printApplicability", constant(true)),
                    field("cannedText", constant(false)),
                ],
            ),
            object(
                "system",
                vec![
                    field("systemName", constant("Test Information System")).cdata(),
                    field("systemShortName", constant("TIS")),
                    field("packageId", pattern("TIS-{rand:8}")),
                    field("authorizationType", constant("ATO")),
                    field("status", constant("OPERATIONAL")),
                ],
            ),
            object("controls", vec![records()]),
        ],
    );

    let record = object(
        "control",
        vec![
            field("id", var("controlId")).attribute(),
            field("title", pattern("Access Control {index+1}")).cdata(),
            field(
                "description",
                constant("This control addresses access control requirements for the system."),
            )
            .cdata(),
            field(
                "implementationStatus",
                pick(&["IMPLEMENTED", "PARTIALLY_IMPLEMENTED", "PLANNED", "NOT_APPLICABLE"]),
            ),
            object(
                "requirements",
                vec![object(
                    "requirement",
                    vec![
                        field("id", pattern("{var:controlId}-1")).attribute(),
                        field(
                            "statement",
                            constant("The system shall implement access control policies."),
                        )
                        .cdata(),
                        field(
                            "implementationGuidance",
                            constant("Implement role-based access control mechanisms."),
                        )
                        .cdata(),
                    ],
                )],
            ),
        ],
    );

    DocumentTemplate::new("project", record)
        .with_envelope(envelope)
        .with_record_vars(vec![var_spec("controlId", pattern("AC-{index+1:02}"))])
}

// ============================================================================
// Deep nested
// ============================================================================

/// Organization with one `<departments>` branch per record.
pub fn deep_nested() -> DocumentTemplate {
    let envelope = object(
        "organization",
        vec![
            field("id", pattern("ORG-{rand:8}")).attribute(),
            field("type", constant("enterprise")).attribute(),
            object(
                "metadata",
                vec![
                    field("created", now()).attribute(),
                    field("version", constant("2.1")).attribute(),
                    field("generator", constant("XML Deep Nesting Generator")),
                    field(
                        "description",
                        constant("Complex hierarchical data with multiple navigation paths"),
                    )
                    .cdata(),
                ],
            ),
            records(),
        ],
    );

    let department = object(
        "department",
        vec![
            field("id", pattern("DEPT-{index:03}")).attribute(),
            field("active", chance(0.8)).attribute(),
            department_info(),
            department_personnel(),
            department_technology(),
            department_compliance(),
        ],
    );

    DocumentTemplate::new("deep-nested", object("departments", vec![department]))
        .with_envelope(envelope)
}

/// Wrap `inner` in a chain of single-child elements, outermost first.
fn nest(names: &[&str], inner: Node) -> Node {
    names
        .iter()
        .rev()
        .fold(inner, |child, name| object(name, vec![child]))
}

fn department_info() -> Node {
    let validation = object(
        "validation",
        vec![
            tagged("primary", ("algorithm", constant("AES256")), pattern("{rand:16}")),
            tagged("secondary", ("algorithm", constant("RSA2048")), pattern("{rand:19}")),
            object(
                "biometric",
                vec![
                    empty("fingerprint", vec![("enabled", chance(0.7))]),
                    empty("retinal", vec![("enabled", chance(0.3))]),
                    empty("facial", vec![("enabled", chance(0.5))]),
                ],
            ),
        ],
    );
    let method = object(
        "method",
        vec![
            field("type", constant("card")).attribute(),
            field("required", constant(true)).attribute(),
            validation,
        ],
    );
    let zone = object(
        "zone",
        vec![
            field("type", constant("restricted")).attribute(),
            field("clearance", pick(CLEARANCE_LEVELS)).attribute(),
            nest(&["access", "methods"], method),
        ],
    );

    object(
        "info",
        vec![
            field(
                "name",
                pattern("{pick:Engineering|Security|Operations|Finance|Legal|HR} Department {index+1}"),
            )
            .cdata(),
            object(
                "location",
                vec![
                    field("building", pattern("{pick:North|South|East|West} Building")),
                    object(
                        "floor",
                        vec![
                            field("level", int(1, 20)).attribute(),
                            object("zones", vec![zone]),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn department_personnel() -> Node {
    let system = |name: &str, permissions: &str| {
        empty(
            "system",
            vec![("name", constant(name)), ("permissions", constant(permissions))],
        )
    };

    let director = object(
        "director",
        vec![
            field("id", pattern("DIR-{index}-1")).attribute(),
            field("level", constant("senior")).attribute(),
            object(
                "profile",
                vec![
                    object(
                        "personal",
                        vec![
                            field("name", pattern("Director {index+1}")),
                            object(
                                "clearance",
                                vec![
                                    field("level", pick(&["SECRET", "TOP_SECRET"])).attribute(),
                                    object(
                                        "validations",
                                        vec![
                                            empty("background", vec![("completed", date_days_ago(365.0))]),
                                            empty(
                                                "polygraph",
                                                vec![("status", pick(&["PASSED", "PENDING", "FAILED"]))],
                                            ),
                                        ],
                                    ),
                                ],
                            ),
                        ],
                    ),
                    nest(
                        &["access"],
                        object(
                            "systems",
                            vec![
                                system("financial", "read,write,delete"),
                                system("hr", "read,write"),
                                system("security", "read"),
                            ],
                        ),
                    ),
                ],
            ),
        ],
    );

    nest(&["personnel", "management", "directors"], director)
}

fn department_technology() -> Node {
    let rule = object(
        "rule",
        vec![
            field("id", pattern("FW-{index}-{int:0..99}")).attribute(),
            field("action", pick(&["ALLOW", "DENY", "LOG"])).attribute(),
            object(
                "source",
                vec![
                    field("ip", ipv4()),
                    object(
                        "ports",
                        vec![
                            tagged("port", ("protocol", constant("tcp")), int(1, 65535)),
                            tagged("port", ("protocol", constant("udp")), int(1, 65535)),
                        ],
                    ),
                ],
            ),
            object(
                "destination",
                vec![
                    field("ip", ipv4()),
                    object(
                        "services",
                        vec![empty(
                            "service",
                            vec![
                                ("name", pick(&["HTTP", "HTTPS", "SSH", "FTP", "SMTP"])),
                                ("port", int(1, 65535)),
                            ],
                        )],
                    ),
                ],
            ),
        ],
    );
    let subnet = object(
        "subnet",
        vec![
            field("cidr", pattern("{ip}/24")).attribute(),
            nest(&["security", "firewall", "rules"], rule),
        ],
    );
    let network = object(
        "network",
        vec![
            field("type", constant("production")).attribute(),
            field("vlan", int(100, 4099)).attribute(),
            object("subnets", vec![subnet]),
        ],
    );

    nest(&["technology", "infrastructure", "networks"], network)
}

fn department_compliance() -> Node {
    let approval = |role: &str| {
        empty(
            "approval",
            vec![("role", constant(role)), ("date", date_days_ago(30.0))],
        )
    };

    let document = object(
        "document",
        vec![
            field("type", constant("policy")).attribute(),
            field("classification", pick(&["PUBLIC", "INTERNAL", "CONFIDENTIAL"])).attribute(),
            object(
                "metadata",
                vec![
                    field("created", days_ago(365.0)),
                    field("version", pattern("{int:1..10}.{int:0..9}")),
                    object("approvals", vec![approval("manager"), approval("legal")]),
                ],
            ),
        ],
    );
    let control = object(
        "control",
        vec![
            field("id", pattern("CTRL-{index}-{int:0..49}")).attribute(),
            field("status", pick(&["COMPLIANT", "NON_COMPLIANT", "PARTIAL"])).attribute(),
            nest(&["evidence", "documents"], document),
        ],
    );
    let framework = object(
        "framework",
        vec![
            field("name", pick(&["SOC2", "ISO27001", "NIST", "FEDRAMP"])).attribute(),
            field("version", constant("2.0")).attribute(),
            object("controls", vec![control]),
        ],
    );

    nest(&["compliance", "frameworks"], framework)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes_have_one_records_slot() {
        for template in [
            burp(),
            nessus(),
            generic(&MarkupOptions::default()),
            project(),
            deep_nested(),
        ] {
            assert!(matches!(template.envelope, Node::Object(_)));
            assert_eq!(template.envelope.records_slots(), 1);
            template.validate().unwrap();
        }
    }

    #[test]
    fn test_generic_follows_options() {
        let plain = generic(&MarkupOptions {
            root_element: "rows".to_string(),
            include_attributes: false,
            include_cdata: false,
        });
        assert_eq!(plain.envelope.name(), Some("rows"));
        assert_eq!(
            plain.record_field_names(),
            vec!["id", "name", "value", "category", "active", "metadata"]
        );

        let full = generic(&MarkupOptions::default());
        assert_eq!(
            full.record_field_names(),
            vec!["id", "index", "name", "value", "category", "active", "metadata"]
        );
    }

    #[test]
    fn test_nest_wraps_outermost_first() {
        let node = nest(&["a", "b"], field("c", null()));
        assert_eq!(node.name(), Some("a"));
        match node {
            Node::Object(a) => assert_eq!(a.children[0].name(), Some("b")),
            _ => panic!("expected object"),
        }
    }
}
