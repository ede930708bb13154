//! Scope Extraction
//!
//! Query results mark importable scope values with a field (by default
//! `scope`) holding `{ id, location }`. Every marked record found in document
//! order becomes a [`ScopeBinding`]; repeated ids keep their first location.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    // not keywords, but illegal as binding names in module code
    "eval", "arguments",
];

/// A value to import and expose by name inside the MDX body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeBinding {
    pub id: String,
    pub location: String,
}

impl ScopeBinding {
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }

    /// Whether `id` can be emitted as an import binding.
    pub fn is_valid_identifier(&self) -> bool {
        IDENTIFIER.is_match(&self.id) && !RESERVED_WORDS.contains(&self.id.as_str())
    }

    fn from_record(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let id = record.get("id")?.as_str()?;
        let location = record.get("location")?.as_str()?;
        Some(Self::new(id, location))
    }
}

/// Collect the scope bindings of a result tree, deduplicated by id.
pub fn extract_scopes(result: &Value, scope_field: &str) -> Vec<ScopeBinding> {
    let mut found = Vec::new();
    collect(result, scope_field, &mut found);

    let mut unique: IndexMap<String, ScopeBinding> = IndexMap::new();
    for binding in found {
        unique.entry(binding.id.clone()).or_insert(binding);
    }
    unique.into_values().collect()
}

fn collect(value: &Value, scope_field: &str, found: &mut Vec<ScopeBinding>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == scope_field && collect_marked(child, found) {
                    continue;
                }
                collect(child, scope_field, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, scope_field, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Returns false when the marked value holds no scope records, so the caller
/// keeps descending into it.
fn collect_marked(value: &Value, found: &mut Vec<ScopeBinding>) -> bool {
    if let Some(binding) = ScopeBinding::from_record(value) {
        found.push(binding);
        return true;
    }
    match value {
        Value::Array(items) => {
            let before = found.len();
            found.extend(items.iter().filter_map(ScopeBinding::from_record));
            found.len() > before
        }
        _ => false,
    }
}
