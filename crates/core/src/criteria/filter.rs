//! Filter expressions over JSON documents.
//!
//! A [`Filter`] maps dotted field paths to a [`Condition`]. Paths are resolved
//! the way a document store resolves them: when a path segment lands on an
//! array, resolution continues into every element, so `tags.name` over
//! `{"tags": [{"name": "quick"}, {"name": "easy"}]}` yields both names.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Case-insensitive literal substring pattern.
///
/// The text is never interpreted as a pattern language; it is matched
/// verbatim, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    folded: String,
}

impl Pattern {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    /// The pattern as supplied.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    fn to_query_value(&self) -> Value {
        json!({ "$regex": regex_lite::escape(&self.text), "$options": "i" })
    }
}

/// A constraint on the values found at a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Some value contains the pattern.
    Matches(Pattern),
    /// Some value equals one of the listed strings exactly.
    In(Vec<String>),
    /// Every pattern is matched by at least one value.
    ///
    /// An empty pattern list matches nothing, like `$all: []`.
    All(Vec<Pattern>),
}

impl Condition {
    fn holds(&self, values: &[&str]) -> bool {
        match self {
            Condition::Matches(pattern) => values.iter().any(|v| pattern.is_match(v)),
            Condition::In(set) => values.iter().any(|v| set.iter().any(|s| s == v)),
            Condition::All(patterns) => {
                !patterns.is_empty()
                    && patterns
                        .iter()
                        .all(|p| values.iter().any(|v| p.is_match(v)))
            }
        }
    }

    fn to_query_value(&self) -> Value {
        match self {
            Condition::Matches(pattern) => pattern.to_query_value(),
            Condition::In(set) => json!({ "$in": set }),
            Condition::All(patterns) => {
                let patterns: Vec<Value> = patterns.iter().map(Pattern::to_query_value).collect();
                json!({ "$all": patterns })
            }
        }
    }
}

/// Conjunction of per-field conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: BTreeMap<String, Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, condition: Condition) {
        self.clauses.insert(field.into(), condition);
    }

    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.insert(field, condition);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.clauses.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the document satisfies every clause.
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses.iter().all(|(field, condition)| {
            let values = resolve_strings(document, field);
            condition.holds(&values)
        })
    }

    /// Render as a MongoDB-style query document (used for logging).
    pub fn to_query_document(&self) -> Value {
        let map: Map<String, Value> = self
            .clauses
            .iter()
            .map(|(field, condition)| (field.clone(), condition.to_query_value()))
            .collect();
        Value::Object(map)
    }
}

/// Collect every string reachable at `path`, fanning out over arrays.
fn resolve_strings<'a>(document: &'a Value, path: &str) -> Vec<&'a str> {
    let mut current = vec![document];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            collect_field(value, segment, &mut next);
        }
        current = next;
    }

    let mut strings = Vec::new();
    for value in current {
        match value {
            Value::String(s) => strings.push(s.as_str()),
            Value::Array(items) => strings.extend(items.iter().filter_map(Value::as_str)),
            _ => {}
        }
    }
    strings
}

fn collect_field<'a>(value: &'a Value, segment: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(field) = map.get(segment) {
                out.push(field);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_field(item, segment, out);
            }
        }
        _ => {}
    }
}
