//! Pattern strings with placeholders.
//!
//! Patterns are parsed once into [`Segment`]s; the generator crate expands
//! them against a random source and the current generation context.
//!
//! Supported placeholders:
//!
//! - `{index}` - record index; `{item}` / `{item@D}` - index of the enclosing
//!   repeated group, `D` levels up (0 is the innermost). Both accept `+N`/`-N`
//!   offsets (saturating at 0), `%N` and a zero-padded width: `{index+1:02}`.
//! - `{label}` / `{label@D}` / `{label:lower}` - label of an enclosing
//!   per-label group
//! - `{prior}` - random earlier record number (at least 1)
//! - `{uuid}`, `{ip}`, `{mac}`, `{year}`
//! - `{rand:N}` - N random digits without a leading zero
//! - `{hex:N}` - N random lowercase hex characters
//! - `{int:A..B}` / `{int:A..B:0W}` - random integer in `[A, B]`
//! - `{pick:a|b|c}` - random choice
//! - `{var:name}` - a document or record variable

use std::fmt;

/// Error produced while parsing a pattern.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid pattern '{pattern}': {reason}")]
pub struct PatternError {
    /// The offending pattern
    pub pattern: String,
    /// What is wrong with it
    pub reason: String,
}

/// Where a counter placeholder reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterSource {
    /// The record index
    Index,
    /// The index of an enclosing repeated group
    Item { depth: usize },
}

/// A numeric placeholder derived from the generation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub source: CounterSource,
    pub offset: i64,
    pub modulo: Option<u64>,
    pub width: usize,
}

impl Counter {
    /// Apply offset, modulo and padding to a raw counter value.
    pub fn render(&self, raw: u64) -> String {
        let shifted = (raw as i64).saturating_add(self.offset).max(0) as u64;
        let value = match self.modulo {
            Some(m) => shifted % m,
            None => shifted,
        };
        format!("{value:0width$}", width = self.width)
    }
}

/// A single placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Counter(Counter),
    Label { depth: usize, lower: bool },
    Prior,
    Uuid,
    Ip,
    Mac,
    Year,
    RandDigits(usize),
    Hex(usize),
    Int { min: i64, max: i64, width: usize },
    Pick(Vec<String>),
    Var(String),
}

/// Literal text or a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let fail = |reason: String| PatternError {
            pattern: pattern.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| fail("unclosed placeholder".to_string()))?;
            let placeholder = parse_placeholder(&after[..close]).map_err(fail)?;
            segments.push(Segment::Placeholder(placeholder));
            rest = &after[close + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Deepest repeated-group level referenced by `{item@D}` or `{label@D}`.
    pub fn max_group_depth(&self) -> Option<usize> {
        self.placeholders()
            .filter_map(|p| match p {
                Placeholder::Counter(Counter {
                    source: CounterSource::Item { depth },
                    ..
                }) => Some(*depth),
                Placeholder::Label { depth, .. } => Some(*depth),
                _ => None,
            })
            .max()
    }

    /// Names of the variables this pattern reads.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.placeholders().filter_map(|p| match p {
            Placeholder::Var(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_placeholder(body: &str) -> Result<Placeholder, String> {
    match body {
        "uuid" => return Ok(Placeholder::Uuid),
        "ip" => return Ok(Placeholder::Ip),
        "mac" => return Ok(Placeholder::Mac),
        "year" => return Ok(Placeholder::Year),
        "prior" => return Ok(Placeholder::Prior),
        _ => {}
    }

    if let Some(rest) = body.strip_prefix("rand:") {
        return parse_len(rest).map(Placeholder::RandDigits);
    }
    if let Some(rest) = body.strip_prefix("hex:") {
        return parse_len(rest).map(Placeholder::Hex);
    }
    if let Some(rest) = body.strip_prefix("int:") {
        return parse_int_range(rest);
    }
    if let Some(rest) = body.strip_prefix("pick:") {
        let options: Vec<String> = rest.split('|').map(str::to_string).collect();
        if rest.is_empty() {
            return Err("pick needs at least one option".to_string());
        }
        return Ok(Placeholder::Pick(options));
    }
    if let Some(rest) = body.strip_prefix("var:") {
        if rest.is_empty() {
            return Err("var needs a name".to_string());
        }
        return Ok(Placeholder::Var(rest.to_string()));
    }
    if body.starts_with("label") {
        return parse_label(body);
    }
    if body.starts_with("index") || body.starts_with("item") {
        return parse_counter(body).map(Placeholder::Counter);
    }

    Err(format!("unknown placeholder '{{{body}}}'"))
}

fn parse_len(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("expected a positive length, got '{s}'")),
        Ok(n) => Ok(n),
    }
}

fn parse_width(s: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .map_err(|_| format!("expected a width like '06', got '{s}'"))
}

fn parse_int_range(s: &str) -> Result<Placeholder, String> {
    let (range, width) = match s.split_once(':') {
        Some((range, width)) => (range, parse_width(width)?),
        None => (s, 0),
    };
    let (min, max) = range
        .split_once("..")
        .ok_or_else(|| format!("expected 'A..B', got '{range}'"))?;
    let min = min
        .parse::<i64>()
        .map_err(|_| format!("invalid range start '{min}'"))?;
    let max = max
        .parse::<i64>()
        .map_err(|_| format!("invalid range end '{max}'"))?;
    if min > max {
        return Err(format!("range {min}..{max} is empty"));
    }
    Ok(Placeholder::Int { min, max, width })
}

/// Split a leading `@D` depth marker off `s`.
fn take_depth(s: &str) -> Result<(usize, &str), String> {
    match s.strip_prefix('@') {
        Some(rest) => {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let depth = rest[..end]
                .parse::<usize>()
                .map_err(|_| format!("invalid depth in '{s}'"))?;
            Ok((depth, &rest[end..]))
        }
        None => Ok((0, s)),
    }
}

fn parse_label(body: &str) -> Result<Placeholder, String> {
    let rest = &body["label".len()..];
    let (depth, rest) = take_depth(rest)?;
    match rest {
        "" => Ok(Placeholder::Label {
            depth,
            lower: false,
        }),
        ":lower" => Ok(Placeholder::Label { depth, lower: true }),
        other => Err(format!("unexpected '{other}' in label placeholder")),
    }
}

fn parse_counter(body: &str) -> Result<Counter, String> {
    let (head, width) = match body.split_once(':') {
        Some((head, width)) => (head, parse_width(width)?),
        None => (body, 0),
    };

    let name_end = head
        .find(|c: char| matches!(c, '@' | '+' | '-' | '%'))
        .unwrap_or(head.len());
    let (name, rest) = head.split_at(name_end);
    let (depth, mut rest) = take_depth(rest)?;

    let mut offset = 0;
    if rest.starts_with('+') || rest.starts_with('-') {
        let end = rest[1..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|e| e + 1)
            .unwrap_or(rest.len());
        offset = rest[..end]
            .parse::<i64>()
            .map_err(|_| format!("invalid offset in '{body}'"))?;
        rest = &rest[end..];
    }

    let mut modulo = None;
    if let Some(m) = rest.strip_prefix('%') {
        match m.parse::<u64>() {
            Ok(0) | Err(_) => return Err(format!("invalid modulus in '{body}'")),
            Ok(m) => modulo = Some(m),
        }
        rest = "";
    }

    if !rest.is_empty() {
        return Err(format!("unexpected '{rest}' in '{body}'"));
    }

    let source = match (name, depth) {
        ("index", 0) => CounterSource::Index,
        ("index", _) => return Err("index does not take a depth".to_string()),
        ("item", depth) => CounterSource::Item { depth },
        _ => return Err(format!("unknown counter '{name}'")),
    };

    Ok(Counter {
        source,
        offset,
        modulo,
        width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_placeholder(pattern: &str) -> Placeholder {
        let parsed = Pattern::parse(pattern).unwrap();
        match parsed.segments() {
            [Segment::Placeholder(p)] => p.clone(),
            other => panic!("expected a single placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_only() {
        let parsed = Pattern::parse("no placeholders here").unwrap();
        assert_eq!(
            parsed.segments(),
            &[Segment::Literal("no placeholders here".to_string())]
        );
    }

    #[test]
    fn test_counter_modifiers() {
        let counter = match only_placeholder("{index+1:02}") {
            Placeholder::Counter(c) => c,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(counter.source, CounterSource::Index);
        assert_eq!(counter.render(0), "01");
        assert_eq!(counter.render(41), "42");

        let counter = match only_placeholder("{item@2-1}") {
            Placeholder::Counter(c) => c,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(counter.source, CounterSource::Item { depth: 2 });
        assert_eq!(counter.render(0), "0");
        assert_eq!(counter.render(5), "4");

        let counter = match only_placeholder("{index%5}") {
            Placeholder::Counter(c) => c,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(counter.render(12), "2");
    }

    #[test]
    fn test_keyed_placeholders() {
        assert_eq!(only_placeholder("{rand:19}"), Placeholder::RandDigits(19));
        assert_eq!(only_placeholder("{hex:8}"), Placeholder::Hex(8));
        assert_eq!(
            only_placeholder("{int:0..9999:04}"),
            Placeholder::Int {
                min: 0,
                max: 9999,
                width: 4
            }
        );
        assert_eq!(
            only_placeholder("{pick:GET|POST}"),
            Placeholder::Pick(vec!["GET".to_string(), "POST".to_string()])
        );
        assert_eq!(
            only_placeholder("{label@1:lower}"),
            Placeholder::Label {
                depth: 1,
                lower: true
            }
        );
    }

    #[test]
    fn test_group_depth_and_variables() {
        let parsed = Pattern::parse("MS-{item@2}-{item@1} {var:kind} {label}").unwrap();
        assert_eq!(parsed.max_group_depth(), Some(2));
        assert_eq!(parsed.variables().collect::<Vec<_>>(), vec!["kind"]);

        let parsed = Pattern::parse("ORG-{index:04}").unwrap();
        assert_eq!(parsed.max_group_depth(), None);
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(Pattern::parse("open {index").is_err());
        assert!(Pattern::parse("{bogus}").is_err());
        assert!(Pattern::parse("{int:9..1}").is_err());
        assert!(Pattern::parse("{rand:0}").is_err());
        assert!(Pattern::parse("{index@1}").is_err());
        assert!(Pattern::parse("{index%0}").is_err());
        assert!(Pattern::parse("{pick:}").is_err());
    }
}
