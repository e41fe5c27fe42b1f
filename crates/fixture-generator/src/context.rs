//! Generation context passed to every value generator.

use chrono::{DateTime, Utc};
use fixture_core::{Pattern, Value};
use std::collections::HashMap;

/// Patterns parsed once per template, keyed by their text.
pub type PatternCache = HashMap<String, Pattern>;

/// Position inside one enclosing repeated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPosition<'a> {
    /// 0-based item index within the group
    pub index: u64,
    /// Label of the item for per-label groups
    pub label: Option<&'a str>,
}

/// Everything a generator may read besides the random source.
///
/// The record index is the only deterministic input. Group positions are
/// stacked innermost last; variables are looked up newest first so record
/// variables shadow document variables of the same name.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    /// Record index (0-based)
    pub index: u64,
    /// Configured total record count
    pub total: u64,
    /// Reference instant for relative dates
    pub now: DateTime<Utc>,
    groups: Vec<GroupPosition<'a>>,
    vars: Vec<(&'a str, Value)>,
    patterns: Option<&'a PatternCache>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(index: u64, total: u64, now: DateTime<Utc>) -> Self {
        Self {
            index,
            total,
            now,
            groups: Vec::new(),
            vars: Vec::new(),
            patterns: None,
        }
    }

    /// Use patterns parsed ahead of time.
    pub fn with_patterns(mut self, patterns: &'a PatternCache) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// A pre-parsed pattern, if one was cached for this text.
    pub fn pattern(&self, text: &str) -> Option<&'a Pattern> {
        self.patterns.and_then(|patterns| patterns.get(text))
    }

    /// Item index of the group `depth` levels up (0 is the innermost).
    pub fn item(&self, depth: usize) -> Option<u64> {
        self.group(depth).map(|g| g.index)
    }

    /// Label of the group `depth` levels up.
    pub fn label(&self, depth: usize) -> Option<&'a str> {
        self.group(depth).and_then(|g| g.label)
    }

    /// Number of enclosing groups.
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    fn group(&self, depth: usize) -> Option<&GroupPosition<'a>> {
        let len = self.groups.len();
        if depth < len {
            self.groups.get(len - 1 - depth)
        } else {
            None
        }
    }

    pub fn enter_group(&mut self, index: u64, label: Option<&'a str>) {
        self.groups.push(GroupPosition { index, label });
    }

    pub fn leave_group(&mut self) {
        self.groups.pop();
    }

    /// Look up a variable.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn set_var(&mut self, name: &'a str, value: Value) {
        self.vars.push((name, value));
    }

    /// Copy in variables drawn elsewhere (document variables).
    pub fn extend_vars<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        self.vars.extend(vars);
    }

    /// Drop every variable set after the first `len`.
    pub fn truncate_vars(&mut self, len: usize) {
        self.vars.truncate(len);
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }
}
