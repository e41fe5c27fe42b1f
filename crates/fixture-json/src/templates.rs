//! Record templates for the structured formats.
//!
//! Each function returns the one declaration both the synthesizer and the
//! serializer work from. Every template's envelope is the bare records slot,
//! so the document is a single top-level array.

use fixture_core::dsl::*;
use fixture_core::{DocumentTemplate, Node, Value};

const CLEARANCE_LEVELS: &[&str] = &["PUBLIC", "CONFIDENTIAL", "SECRET", "TOP_SECRET"];
const DEPARTMENT_TYPES: &str =
    "Engineering|Security|Operations|Finance|Legal|HR|Marketing|Sales";
const SYSTEM_TYPES: &[&str] = &["financial", "hr", "security", "engineering", "legal"];
const ORG_FRAMEWORKS: &[&str] = &["SOC2", "ISO27001", "NIST", "FEDRAMP", "CMMC"];
const VULN_TYPES: &str = "SQL Injection|XSS|CSRF|Buffer Overflow|Authentication Bypass";
const SEVERITIES: &[&str] = &["low", "medium", "high", "critical"];
const IMPACT_LEVELS: &[&str] = &["none", "partial", "complete"];
const LOW_MEDIUM_HIGH: &[&str] = &["low", "medium", "high"];
const CONTROL_FAMILIES: &[&str] = &[
    "Access Control",
    "Audit",
    "Risk Assessment",
    "System Protection",
    "Incident Response",
];

fn severity() -> fixture_core::GeneratorConfig {
    pick(SEVERITIES)
}

fn clearance() -> fixture_core::GeneratorConfig {
    pick(CLEARANCE_LEVELS)
}

/// `major.minor` with the given major range.
fn version(major_max: i64, minor_max: i64) -> fixture_core::GeneratorConfig {
    pattern(&format!("{{int:1..{major_max}}}.{{int:0..{minor_max}}}"))
}

fn strings(values: &[&str]) -> Value {
    Value::from(values.to_vec())
}

// ============================================================================
// Organization
// ============================================================================

/// Enterprise organization hierarchy: one department with personnel,
/// infrastructure and compliance subtrees.
pub fn organization() -> DocumentTemplate {
    DocumentTemplate::new(
        "organization",
        object(
            "organization",
            vec![
                field("_id", object_id()),
                field("organizationId", pattern("ORG-{index:04}")),
                object(
                    "metadata",
                    vec![
                        field("created", days_ago(180.0)),
                        field("lastModified", days_ago(30.0)),
                        field("version", version(5, 9)),
                        field("source", constant("json-generator")),
                        field("classification", clearance()),
                    ],
                ),
                repeated("departments", 1, 1, department()),
            ],
        ),
    )
}

fn department() -> Node {
    object(
        "department",
        vec![
            field("departmentId", pattern("DEPT-{index}-001")),
            field("name", pattern(&format!("{{pick:{DEPARTMENT_TYPES}}} Department"))),
            field("active", chance(0.9)),
            object(
                "hierarchy",
                vec![
                    field("level", int(1, 5)),
                    field("parentDepartment", pattern("DEPT-{prior}-001")).optional(0.5),
                    repeated("subdepartments", 0, 2, subdepartment()),
                ],
            ),
            object(
                "technology",
                vec![object(
                    "infrastructure",
                    vec![repeated("networks", 1, 3, network())],
                )],
            ),
            object(
                "compliance",
                vec![each("frameworks", ORG_FRAMEWORKS, org_framework())],
            ),
        ],
    )
}

fn subdepartment() -> Node {
    object(
        "subdepartment",
        vec![
            field("departmentId", pattern("DEPT-{index}-{item+2:03}")),
            field(
                "name",
                pattern(&format!("{{pick:{DEPARTMENT_TYPES}}} Subdivision {{item+1}}")),
            ),
            object(
                "personnel",
                vec![
                    field("headCount", int(5, 54)),
                    object(
                        "management",
                        vec![repeated("directors", 1, 3, director())],
                    ),
                ],
            ),
        ],
    )
}

fn director() -> Node {
    object(
        "director",
        vec![
            field("directorId", pattern("DIR-{index}-{item@1}-{item}")),
            object(
                "profile",
                vec![
                    object(
                        "personal",
                        vec![
                            field("employeeId", pattern("EMP-{hex:8}")),
                            field("guid", uuid()),
                            object("security", vec![clearance_record(), access()]),
                        ],
                    ),
                    responsibilities(),
                ],
            ),
        ],
    )
}

fn clearance_record() -> Node {
    object(
        "clearance",
        vec![
            field("level", clearance()),
            field("expirationDate", days_ago(-30.0)),
            object(
                "validations",
                vec![
                    object(
                        "background",
                        vec![
                            field("completed", days_ago(1095.0)),
                            field("status", pick(&["PASSED", "PENDING", "EXPIRED"])),
                            field("investigationType", pick(&["T3", "T5", "TS/SCI"])),
                            object(
                                "adjudication",
                                vec![
                                    field("date", days_ago(365.0)),
                                    field("authority", pick(&["DoD CAF", "OPM", "DHS"])),
                                    repeated(
                                        "conditions",
                                        1,
                                        1,
                                        object(
                                            "condition",
                                            vec![
                                                field("type", constant("periodic_review")),
                                                field("frequency", constant("annual")),
                                                field("nextDue", days_ago(-365.0)),
                                            ],
                                        ),
                                    )
                                    .optional(0.2),
                                ],
                            ),
                        ],
                    ),
                    object(
                        "polygraph",
                        vec![
                            field("type", pick(&["lifestyle", "counterintelligence", "none"])),
                            field("status", pick(&["PASSED", "PENDING", "FAILED", "N/A"])),
                            field("lastUpdate", days_ago(730.0)),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn access() -> Node {
    object(
        "access",
        vec![
            each(
                "systems",
                SYSTEM_TYPES,
                object(
                    "system",
                    vec![
                        field("systemName", label()),
                        field(
                            "permissions",
                            pick_values(vec![
                                strings(&["read"]),
                                strings(&["read", "write"]),
                                strings(&["read", "write", "delete"]),
                                strings(&["admin"]),
                            ]),
                        ),
                        field("lastAccess", days_ago(7.0)),
                        object(
                            "accessHistory",
                            vec![
                                field("totalSessions", int(0, 999)),
                                field("averageSessionDuration", int(15, 254)),
                                field("lastFailedAttempt", days_ago(30.0)).optional(0.3),
                            ],
                        ),
                    ],
                ),
            ),
            object(
                "physicalAccess",
                vec![repeated("facilities", 1, 4, facility())],
            ),
        ],
    )
}

fn facility() -> Node {
    object(
        "facility",
        vec![
            field("facilityId", pattern("FAC-{index}-{item}")),
            field("building", pattern("Building {pick:Alpha|Beta|Gamma|Delta}")),
            repeated(
                "zones",
                1,
                5,
                object(
                    "zone",
                    vec![
                        field("zoneId", pattern("ZONE-{item@1}-{item}")),
                        field("type", pick(&["open", "restricted", "secure", "vault"])),
                        field("clearanceRequired", clearance()),
                        object("accessMethods", vec![card_access(), biometric()]),
                    ],
                ),
            ),
        ],
    )
}

fn card_access() -> Node {
    object(
        "cardAccess",
        vec![
            field("enabled", constant(true)),
            field("cardNumber", pattern("{hex:16}")),
            field("validFrom", days_ago(90.0)),
            field("validUntil", days_ago(-90.0)),
            object(
                "restrictions",
                vec![
                    repeated(
                        "timeWindows",
                        1,
                        1,
                        object(
                            "timeWindow",
                            vec![
                                field(
                                    "days",
                                    constant(strings(&[
                                        "monday",
                                        "tuesday",
                                        "wednesday",
                                        "thursday",
                                        "friday",
                                    ])),
                                ),
                                field("startTime", constant("06:00")),
                                field("endTime", constant("22:00")),
                            ],
                        ),
                    ),
                    field("escortRequired", chance(0.3)),
                    field("maxOccupancy", int(1, 20)),
                ],
            ),
        ],
    )
}

fn biometric() -> Node {
    object(
        "biometric",
        vec![
            field("enabled", chance(0.6)),
            object(
                "methods",
                vec![
                    object(
                        "fingerprint",
                        vec![
                            field("enrolled", chance(0.7)),
                            field("templates", int(1, 10)),
                            field("lastCalibration", days_ago(30.0)),
                        ],
                    ),
                    object(
                        "retinal",
                        vec![
                            field("enrolled", chance(0.2)),
                            field("lastScan", days_ago(7.0)).optional(0.5),
                        ],
                    ),
                    object(
                        "facial",
                        vec![
                            field("enrolled", chance(0.4)),
                            field("accuracy", int(85, 99)),
                            field(
                                "lightingConditions",
                                pick(&["optimal", "suboptimal", "poor"]),
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn responsibilities() -> Node {
    object(
        "responsibilities",
        vec![
            field(
                "primaryRole",
                pick(&[
                    "Technical Lead",
                    "Project Manager",
                    "Security Officer",
                    "Compliance Manager",
                ]),
            ),
            repeated(
                "secondaryRoles",
                0,
                2,
                field(
                    "role",
                    pick(&["Mentor", "Reviewer", "Emergency Contact", "Deputy"]),
                ),
            ),
            repeated("projects", 1, 5, project()),
        ],
    )
}

fn project() -> Node {
    object(
        "project",
        vec![
            field("projectId", pattern("PROJ-{index}-{item}")),
            field(
                "name",
                pattern("Project {pick:Alpha|Beta|Gamma|Delta|Epsilon} {item+1}"),
            ),
            field("role", pick(&["lead", "contributor", "reviewer", "stakeholder"])),
            field("allocation", int(20, 99)),
            object(
                "timeline",
                vec![
                    field("startDate", days_ago(180.0)),
                    field("endDate", days_ago(-30.0)),
                    repeated("milestones", 1, 5, milestone()),
                ],
            ),
        ],
    )
}

fn milestone() -> Node {
    object(
        "milestone",
        vec![
            field("milestoneId", pattern("MS-{item@1}-{item}")),
            field("description", pattern("Milestone {item+1}")),
            field("targetDate", days_ago(60.0)),
            field(
                "status",
                pick(&["completed", "in_progress", "pending", "blocked"]),
            ),
            repeated(
                "dependencies",
                1,
                1,
                field("milestoneId", pattern("MS-{item@2}-{item@1-1}")),
            )
            .optional(0.5),
            repeated(
                "deliverables",
                1,
                3,
                object(
                    "deliverable",
                    vec![
                        field("deliverableId", pattern("DEL-{item@2}-{item@1}-{item}")),
                        field(
                            "type",
                            pick(&["document", "software", "analysis", "presentation"]),
                        ),
                        field("classification", clearance()),
                        repeated("reviewers", 1, 3, field("reviewer", pattern("REV-{hex:8}"))),
                    ],
                ),
            ),
        ],
    )
}

fn network() -> Node {
    let address = || {
        object(
            "address",
            vec![
                field("type", pick(&["host", "network", "range"])),
                field("value", ipv4()),
                field("mask", constant("/24")).optional(0.5),
            ],
        )
    };

    object(
        "network",
        vec![
            field("networkId", pattern("NET-{index}-{item}")),
            field(
                "type",
                pick(&["production", "staging", "development", "management"]),
            ),
            object(
                "configuration",
                vec![
                    object(
                        "addressing",
                        vec![
                            object(
                                "ipv4",
                                vec![
                                    field("cidr", pattern("{ip}/24")),
                                    field("gateway", ipv4()),
                                    repeated("dns", 2, 2, field("server", ipv4())),
                                    object(
                                        "dhcp",
                                        vec![
                                            field("enabled", chance(0.7)),
                                            object(
                                                "range",
                                                vec![field("start", ipv4()), field("end", ipv4())],
                                            ),
                                            field("leaseTime", int(3600, 89_999)),
                                            repeated(
                                                "reservations",
                                                0,
                                                9,
                                                object(
                                                    "reservation",
                                                    vec![
                                                        field("mac", mac()),
                                                        field("ip", ipv4()),
                                                        field("hostname", pattern("host-{hex:8}")),
                                                    ],
                                                ),
                                            ),
                                        ],
                                    ),
                                ],
                            ),
                            object(
                                "vlan",
                                vec![
                                    field("id", int(100, 4099)),
                                    field("name", pattern("VLAN_{pick:PROD|DEV|MGMT|DMZ}_{item}")),
                                    field("isolation", chance(0.5)),
                                ],
                            ),
                        ],
                    ),
                    object(
                        "security",
                        vec![
                            object(
                                "firewall",
                                vec![repeated(
                                    "rules",
                                    5,
                                    24,
                                    object(
                                        "rule",
                                        vec![
                                            field("ruleId", pattern("FW-{index}-{item@1}-{item}")),
                                            field("priority", item(1)),
                                            field("action", pick(&["ALLOW", "DENY", "LOG", "REJECT"])),
                                            field(
                                                "direction",
                                                pick(&["inbound", "outbound", "bidirectional"]),
                                            ),
                                            object(
                                                "source",
                                                vec![
                                                    repeated("addresses", 1, 3, address()),
                                                    repeated(
                                                        "ports",
                                                        1,
                                                        5,
                                                        object(
                                                            "port",
                                                            vec![
                                                                field("protocol", pick(&["tcp", "udp", "icmp"])),
                                                                field("port", int(1, 65535)),
                                                                field(
                                                                    "service",
                                                                    pick(&["HTTP", "HTTPS", "SSH", "FTP", "SMTP", "DNS"]),
                                                                ),
                                                            ],
                                                        ),
                                                    ),
                                                ],
                                            ),
                                            object(
                                                "destination",
                                                vec![
                                                    repeated("addresses", 1, 3, address()),
                                                    repeated(
                                                        "services",
                                                        1,
                                                        3,
                                                        object(
                                                            "service",
                                                            vec![
                                                                field(
                                                                    "name",
                                                                    pick(&["web", "database", "email", "file-share"]),
                                                                ),
                                                                field("port", int(1, 65535)),
                                                                field("protocol", pick(&["tcp", "udp"])),
                                                            ],
                                                        ),
                                                    ),
                                                ],
                                            ),
                                            object(
                                                "conditions",
                                                vec![
                                                    object(
                                                        "timeRestrictions",
                                                        vec![
                                                            field(
                                                                "schedule",
                                                                pick(&["business_hours", "24x7", "maintenance_window"]),
                                                            ),
                                                            field("timezone", constant("UTC")),
                                                        ],
                                                    )
                                                    .optional(0.3),
                                                    repeated(
                                                        "userGroups",
                                                        1,
                                                        3,
                                                        field("group", pattern("GROUP-{hex:8}")),
                                                    )
                                                    .optional(0.4),
                                                ],
                                            ),
                                        ],
                                    ),
                                )],
                            ),
                            object(
                                "monitoring",
                                vec![object(
                                    "ids",
                                    vec![
                                        field("enabled", chance(0.8)),
                                        repeated(
                                            "signatures",
                                            50,
                                            149,
                                            object(
                                                "signature",
                                                vec![
                                                    field("signatureId", pattern("SIG-{item}")),
                                                    field("name", pattern("Signature {item+1}")),
                                                    field("severity", severity()),
                                                    field(
                                                        "category",
                                                        pick(&[
                                                            "malware",
                                                            "intrusion",
                                                            "policy_violation",
                                                            "reconnaissance",
                                                        ]),
                                                    ),
                                                    field("lastTriggered", days_ago(30.0)).optional(0.7),
                                                    field("falsePositiveRate", float(0.0, 0.1)),
                                                ],
                                            ),
                                        ),
                                    ],
                                )],
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn org_framework() -> Node {
    object(
        "framework",
        vec![
            field("frameworkId", pattern("FW-{label}-{index}")),
            field("name", label()),
            field("version", version(3, 4)),
            object(
                "implementation",
                vec![
                    field(
                        "status",
                        pick(&["in_progress", "implemented", "planned", "not_applicable"]),
                    ),
                    field("completionPercentage", int(0, 100)),
                    field("lastAssessment", days_ago(90.0)),
                    field("nextAssessment", days_ago(-90.0)),
                    repeated("controls", 10, 59, org_control()),
                ],
            ),
        ],
    )
}

fn org_control() -> Node {
    object(
        "control",
        vec![
            field("controlId", pattern("{label@1}-{item+1:03}")),
            field("title", pattern("Control {item+1}")),
            field(
                "description",
                pattern("This control addresses {pick:access|audit|risk|change} management requirements."),
            ),
            field(
                "status",
                pick(&["compliant", "non_compliant", "partially_compliant", "not_tested"]),
            ),
            object(
                "implementation",
                vec![
                    field("responsible", pattern("ROLE-{hex:8}")),
                    field("implementationDate", days_ago(365.0)),
                    field(
                        "testingFrequency",
                        pick(&["monthly", "quarterly", "annually", "continuous"]),
                    ),
                    field("lastTested", days_ago(30.0)),
                    object(
                        "evidence",
                        vec![
                            repeated("documents", 1, 5, evidence_document()),
                            object(
                                "automation",
                                vec![
                                    field(
                                        "toolName",
                                        pick(&["Nessus", "Qualys", "Rapid7", "Tenable", "Custom"]),
                                    ),
                                    field("scanFrequency", pick(&["daily", "weekly", "monthly"])),
                                    field("lastScan", days_ago(7.0)),
                                    repeated(
                                        "findings",
                                        0,
                                        19,
                                        object(
                                            "finding",
                                            vec![
                                                field("findingId", pattern("FIND-{item@1}-{item}")),
                                                field("severity", severity()),
                                                field(
                                                    "status",
                                                    pick(&["open", "closed", "mitigated", "accepted"]),
                                                ),
                                                field("description", pattern("Automated finding {item+1}")),
                                                field("remediation", pattern("Remediation step {item+1}")),
                                                field("dueDate", days_ago(-30.0)),
                                            ],
                                        ),
                                    ),
                                ],
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn evidence_document() -> Node {
    object(
        "document",
        vec![
            field("documentId", pattern("DOC-{item@1}-{item}")),
            field("title", pattern("Evidence Document {item+1}")),
            field(
                "type",
                pick(&["policy", "procedure", "test_result", "screenshot", "log"]),
            ),
            field("classification", clearance()),
            field("location", pattern("https://documents.example.com/{hex:24}")),
            object(
                "metadata",
                vec![
                    field("created", days_ago(180.0)),
                    field("lastModified", days_ago(30.0)),
                    field("version", version(10, 9)),
                    repeated(
                        "approvals",
                        1,
                        3,
                        object(
                            "approval",
                            vec![
                                field("approver", pattern("USER-{hex:8}")),
                                field(
                                    "role",
                                    pick(&["manager", "security_officer", "compliance_officer", "legal"]),
                                ),
                                field("date", days_ago(60.0)),
                                field("status", pick(&["approved", "pending", "rejected"])),
                                field("comments", pattern("Review comment {item+1}")).optional(0.3),
                            ],
                        ),
                    ),
                ],
            ),
        ],
    )
}

// ============================================================================
// Vulnerability assessment
// ============================================================================

/// One scanned host/application with 10-59 vulnerabilities.
pub fn vulnerability_assessment() -> DocumentTemplate {
    DocumentTemplate::new(
        "vulnerability-assessment",
        object(
            "assessment",
            vec![
                field("_id", object_id()),
                field("assessmentId", pattern("ASSESS-{index:06}")),
                field("guid", uuid()),
                object(
                    "metadata",
                    vec![
                        field("scanDate", days_ago(30.0)),
                        field("scanDuration", int(300, 7499)),
                        field(
                            "scanType",
                            pick(&["authenticated", "unauthenticated", "hybrid"]),
                        ),
                        field(
                            "tool",
                            pick(&["Burp Suite", "OWASP ZAP", "Nessus", "Qualys", "Custom"]),
                        ),
                        field("version", pattern("{int:1..10}.{int:0..9}.{int:0..9}")),
                    ],
                ),
                object(
                    "target",
                    vec![
                        object(
                            "host",
                            vec![
                                field("ip", ipv4()),
                                field("hostname", pattern("host-{index}.example.com")),
                                repeated(
                                    "ports",
                                    1,
                                    10,
                                    object(
                                        "port",
                                        vec![
                                            field("port", int(1, 65535)),
                                            field("protocol", pick(&["tcp", "udp"])),
                                            field(
                                                "service",
                                                pick(&["http", "https", "ssh", "ftp", "smtp", "dns"]),
                                            ),
                                            field("version", version(5, 9)),
                                        ],
                                    ),
                                ),
                            ],
                        ),
                        object(
                            "application",
                            vec![
                                field("name", pattern("Application {index}")),
                                field("version", pattern("{int:1..5}.{int:0..9}.{int:0..9}")),
                                field(
                                    "framework",
                                    pick(&["Spring", "Django", "Express", "Laravel", "ASP.NET"]),
                                ),
                                field(
                                    "language",
                                    pick(&["Java", "Python", "JavaScript", "PHP", "C#"]),
                                ),
                            ],
                        ),
                    ],
                ),
                repeated("vulnerabilities", 10, 59, vulnerability()),
            ],
        ),
    )
}

fn vulnerability() -> Node {
    object(
        "vulnerability",
        vec![
            field("vulnerabilityId", pattern("VULN-{index}-{item}")),
            field("cveId", pattern("CVE-{year}-{int:0..9999:04}")).optional(0.3),
            field("type", pattern(&format!("{{pick:{VULN_TYPES}}}"))),
            field("severity", severity()),
            field(
                "status",
                pick(&["new", "confirmed", "false_positive", "fixed", "accepted"]),
            ),
            object(
                "details",
                vec![
                    field(
                        "description",
                        pattern(&format!("{{pick:{VULN_TYPES}}} vulnerability found in parameter")),
                    ),
                    object(
                        "location",
                        vec![
                            field(
                                "url",
                                pattern("https://host-{index}.example.com{pick:/api|/login|/search|/admin}"),
                            ),
                            field(
                                "parameter",
                                pick(&["id", "username", "search", "file", "redirect"]),
                            ),
                            field("method", pick(&["GET", "POST", "PUT", "DELETE"])),
                            object(
                                "evidence",
                                vec![
                                    object(
                                        "request",
                                        vec![
                                            object(
                                                "headers",
                                                vec![
                                                    field("User-Agent", constant("Security Scanner")),
                                                    field(
                                                        "Content-Type",
                                                        constant("application/x-www-form-urlencoded"),
                                                    ),
                                                    field("Accept", constant("text/html,application/xhtml+xml")),
                                                ],
                                            ),
                                            field(
                                                "body",
                                                pattern("param1=value1&param2=value2&{pick:id|search}=malicious_payload"),
                                            )
                                            .optional(0.5),
                                        ],
                                    ),
                                    object(
                                        "response",
                                        vec![
                                            field(
                                                "statusCode",
                                                pick_values(vec![
                                                    Value::Int(200),
                                                    Value::Int(302),
                                                    Value::Int(403),
                                                    Value::Int(500),
                                                ]),
                                            ),
                                            object(
                                                "headers",
                                                vec![
                                                    field("Content-Type", constant("text/html")),
                                                    field("Server", pick(&["Apache", "Nginx", "IIS"])),
                                                ],
                                            ),
                                            field("body", constant("Response indicating vulnerability...")),
                                            field("responseTime", int(100, 5099)),
                                        ],
                                    ),
                                ],
                            ),
                        ],
                    ),
                    object(
                        "impact",
                        vec![
                            field("confidentiality", pick(IMPACT_LEVELS)),
                            field("integrity", pick(IMPACT_LEVELS)),
                            field("availability", pick(IMPACT_LEVELS)),
                            field("cvssScore", rounded(0.0, 10.0, 1)),
                            field("businessImpact", pick(LOW_MEDIUM_HIGH)),
                            field("technicalImpact", pick(LOW_MEDIUM_HIGH)),
                        ],
                    ),
                    object(
                        "remediation",
                        vec![
                            field(
                                "recommendation",
                                pattern(&format!(
                                    "Fix {{pick:{VULN_TYPES}}} by implementing proper input validation"
                                )),
                            ),
                            field("effort", pick(LOW_MEDIUM_HIGH)),
                            field("priority", severity()),
                            field("timeline", int(7, 96)),
                            repeated(
                                "resources",
                                1,
                                3,
                                field(
                                    "resource",
                                    pick(&["developer", "security_engineer", "system_admin", "devops"]),
                                ),
                            ),
                        ],
                    ),
                ],
            ),
            object(
                "discovery",
                vec![
                    field(
                        "discoveredBy",
                        pick(&["automated_scan", "manual_testing", "code_review", "penetration_test"]),
                    ),
                    field("discoveryDate", days_ago(30.0)),
                    field("confirmedDate", days_ago(25.0)).optional(0.7),
                    field("tester", pattern("TESTER-{hex:8}")),
                    field("testingMethod", pick(&["blackbox", "whitebox", "greybox"])),
                ],
            ),
        ],
    )
}

// ============================================================================
// Compliance framework
// ============================================================================

/// One framework with scope, assessment and five control families.
pub fn compliance_framework() -> DocumentTemplate {
    DocumentTemplate::new(
        "compliance-framework",
        object(
            "complianceFramework",
            vec![
                field("_id", object_id()),
                field("frameworkId", pattern("FRAMEWORK-{index:04}")),
                field("guid", uuid()),
                object(
                    "framework",
                    vec![
                        field(
                            "name",
                            pick(&["SOC2", "ISO27001", "NIST", "FEDRAMP", "CMMC", "PCI DSS"]),
                        ),
                        field("version", version(3, 4)),
                        field("effectiveDate", days_ago(1095.0)),
                        field("organization", pattern("Organization {index}")),
                        compliance_scope(),
                        compliance_assessment(),
                        each("controlFamilies", CONTROL_FAMILIES, control_family()),
                    ],
                ),
            ],
        ),
    )
}

fn compliance_scope() -> Node {
    object(
        "scope",
        vec![
            repeated(
                "systems",
                5,
                14,
                object(
                    "system",
                    vec![
                        field("systemId", pattern("SYS-{index}-{item}")),
                        field("name", pattern("System {item+1}")),
                        field(
                            "classification",
                            pick(&["public", "internal", "confidential", "restricted"]),
                        ),
                        repeated(
                            "dataTypes",
                            1,
                            5,
                            field(
                                "dataType",
                                pick(&["pii", "phi", "financial", "intellectual_property", "operational"]),
                            ),
                        ),
                    ],
                ),
            ),
            repeated(
                "processes",
                3,
                10,
                object(
                    "process",
                    vec![
                        field("processId", pattern("PROC-{index}-{item}")),
                        field("name", pattern("Process {item+1}")),
                        field("owner", pattern("OWNER-{hex:8}")),
                        field("criticality", severity()),
                    ],
                ),
            ),
        ],
    )
}

fn compliance_assessment() -> Node {
    object(
        "assessment",
        vec![
            field("assessmentId", pattern("ASSESS-FRAMEWORK-{index}")),
            object(
                "period",
                vec![field("start", days_ago(365.0)), field("end", days_ago(30.0))],
            ),
            object(
                "assessor",
                vec![
                    field(
                        "organization",
                        pick(&["Internal", "Big Four Firm", "Specialized Auditor"]),
                    ),
                    field("leadAuditor", pattern("AUDITOR-{hex:8}")),
                    repeated(
                        "team",
                        2,
                        6,
                        object(
                            "member",
                            vec![
                                field("auditorId", pattern("AUD-{index}-{item}")),
                                field("role", pick(&["lead", "senior", "staff", "specialist"])),
                                field(
                                    "specialization",
                                    pick(&["technical", "process", "documentation", "interview"]),
                                ),
                            ],
                        ),
                    ),
                ],
            ),
            object(
                "methodology",
                vec![
                    field("approach", pick(&["risk_based", "comprehensive", "targeted"])),
                    field("samplingMethod", pick(&["statistical", "judgmental", "hybrid"])),
                    repeated(
                        "testingProcedures",
                        5,
                        14,
                        object(
                            "procedure",
                            vec![
                                field("procedureId", pattern("TEST-PROC-{item}")),
                                field("name", pattern("Testing Procedure {item+1}")),
                                field(
                                    "type",
                                    pick(&["inquiry", "observation", "inspection", "reperformance"]),
                                ),
                                field("scope", pick(&["population", "sample", "walkthrough"])),
                            ],
                        ),
                    ),
                ],
            ),
        ],
    )
}

fn control_family() -> Node {
    object(
        "controlFamily",
        vec![
            field("familyId", pattern("CF-{item+1}")),
            field("name", label()),
            field("description", pattern("Controls related to {label:lower}")),
            repeated("controls", 5, 19, family_control()),
        ],
    )
}

fn family_control() -> Node {
    object(
        "control",
        vec![
            field("controlId", pattern("{item@1+1}.{item+1}")),
            field("title", pattern("{label@1} Control {item+1}")),
            field("objective", pattern("Ensure proper {label@1:lower} implementation")),
            field("riskLevel", pick(LOW_MEDIUM_HIGH)),
            field("controlType", pick(&["preventive", "detective", "corrective"])),
            field(
                "frequency",
                pick(&["continuous", "daily", "weekly", "monthly", "quarterly", "annually"]),
            ),
            object(
                "implementation",
                vec![
                    field(
                        "status",
                        pick(&["designed", "implemented", "operating_effectively", "deficient"]),
                    ),
                    field(
                        "designEffectiveness",
                        pick(&["effective", "ineffective", "not_evaluated"]),
                    ),
                    field(
                        "operatingEffectiveness",
                        pick(&["effective", "ineffective", "not_evaluated"]),
                    ),
                    field("owner", pattern("OWNER-{hex:8}")),
                    object(
                        "evidence",
                        vec![
                            repeated(
                                "policies",
                                1,
                                3,
                                object(
                                    "policy",
                                    vec![
                                        field("policyId", pattern("POL-{item@2}-{item@1}-{item}")),
                                        field("name", pattern("Policy {item+1}")),
                                        field("version", version(5, 9)),
                                        field("approvalDate", days_ago(365.0)),
                                        field("reviewDate", days_ago(90.0)),
                                    ],
                                ),
                            ),
                            repeated("procedures", 1, 5, control_procedure()),
                            repeated(
                                "artifacts",
                                1,
                                5,
                                object(
                                    "artifact",
                                    vec![
                                        field("artifactId", pattern("ART-{item@2}-{item@1}-{item}")),
                                        field(
                                            "type",
                                            pick(&["screenshot", "log", "report", "configuration", "documentation"]),
                                        ),
                                        field("description", pattern("Artifact {item+1}")),
                                        field("location", pattern("https://evidence.example.com/{hex:24}")),
                                        field("collectionDate", days_ago(30.0)),
                                        field("retention", int(365, 2919)),
                                    ],
                                ),
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn control_procedure() -> Node {
    object(
        "procedure",
        vec![
            field("procedureId", pattern("PROC-{item@2}-{item@1}-{item}")),
            field("name", pattern("Procedure {item+1}")),
            field("lastUpdated", days_ago(180.0)),
            repeated(
                "testResults",
                1,
                4,
                object(
                    "testResult",
                    vec![
                        field("testDate", days_ago(90.0)),
                        field("result", pick(&["pass", "fail", "not_applicable"])),
                        field("tester", pattern("TESTER-{hex:8}")),
                        repeated(
                            "findings",
                            1,
                            3,
                            object(
                                "finding",
                                vec![
                                    field("findingId", pattern("FIND-{item@4}-{item@3}-{item}")),
                                    field("severity", pick(LOW_MEDIUM_HIGH)),
                                    field("description", pattern("Finding {item+1}")),
                                    field("recommendation", pattern("Recommendation {item+1}")),
                                    field("status", pick(&["open", "closed", "in_progress"])),
                                ],
                            ),
                        )
                        .optional(0.3),
                    ],
                ),
            ),
        ],
    )
}

// ============================================================================
// Nested scan
// ============================================================================

/// Scan results nested five levels deep plus per-scan result trees.
pub fn nested_scan() -> DocumentTemplate {
    let nested_levels = ["level5", "level4", "level3", "level2", "level1"]
        .into_iter()
        .fold(
            vec![
                field("deepData", pattern("Deep nested value {index}")),
                repeated("configurations", 1, 5, configuration()),
            ],
            |children, name| vec![object(name, children)],
        );

    DocumentTemplate::new(
        "nested-scan",
        object(
            "scan",
            vec![
                field("_id", object_id()),
                field("scanId", pattern("SCAN-{index:06}")),
                field("guid", uuid()),
                object("nested", nested_levels),
                repeated(
                    "scans",
                    1,
                    3,
                    object(
                        "scan",
                        vec![
                            field("scanIndex", item(0)),
                            repeated("results", 5, 14, scan_result()),
                        ],
                    ),
                ),
            ],
        ),
    )
}

fn configuration() -> Node {
    let encryption = object(
        "encryption",
        vec![
            field("algorithm", pick(&["AES256", "RSA2048", "ECDSA"])),
            object(
                "keyRotation",
                vec![
                    field("frequency", pick(&["daily", "weekly", "monthly"])),
                    field("lastRotation", days_ago(30.0)),
                    field("nextRotation", days_ago(-30.0)),
                ],
            ),
        ],
    );
    let nested = ["security", "advanced", "settings", "nested"]
        .into_iter()
        .fold(encryption, |child, name| object(name, vec![child]));

    object(
        "configuration",
        vec![field("configId", pattern("CONFIG-{index}-{item}")), nested],
    )
}

fn scan_result() -> Node {
    let investigation = object(
        "investigation",
        vec![
            field("findings", pattern("Root cause analysis for vulnerability {item}")),
            field("methodology", pick(&["static", "dynamic", "interactive"])),
            field("confidence", int(60, 99)),
        ],
    );
    let details = ["cause", "root", "analysis", "technical", "details"]
        .into_iter()
        .fold(investigation, |child, name| object(name, vec![child]));

    let vulnerabilities = repeated(
        "vulnerabilities",
        1,
        5,
        object(
            "vulnerability",
            vec![
                field(
                    "vulnerabilityId",
                    pattern("VULN-{index}-{item@2}-{item@1}-{item}"),
                ),
                details,
            ],
        ),
    );
    let data = ["findings", "nested", "data"]
        .into_iter()
        .fold(vulnerabilities, |child, name| object(name, vec![child]));

    object(
        "result",
        vec![
            field("resultId", pattern("RESULT-{index}-{item@1}-{item}")),
            data,
        ],
    )
}
