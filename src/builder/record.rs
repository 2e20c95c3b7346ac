//! Binding records: one flat fact per matched result row.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Source batch a binding record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Aop,
    Relationship,
    Gene,
    Compound,
    Component,
    Organ,
    Expression,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Aop => "aop",
            RecordKind::Relationship => "relationship",
            RecordKind::Gene => "gene",
            RecordKind::Compound => "compound",
            RecordKind::Component => "component",
            RecordKind::Organ => "organ",
            RecordKind::Expression => "expression",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bound term. Only `value` is read by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingValue {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub term_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl From<&str> for BindingValue {
    fn from(value: &str) -> Self {
        Self { value: value.to_owned(), ..Self::default() }
    }
}

/// Variable name → bound value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingRecord(IndexMap<String, BindingValue>);

impl BindingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: &str, value: &str) -> Self {
        self.insert(variable, value);
        self
    }

    pub fn insert(&mut self, variable: &str, value: &str) {
        self.0.insert(variable.to_owned(), BindingValue::from(value));
    }

    /// The bound value, trimmed; an absent variable reads as `""`.
    pub fn get(&self, variable: &str) -> &str {
        self.0.get(variable).map(|b| b.value.trim()).unwrap_or_default()
    }

    /// The bound value, or `None` when absent or empty.
    pub fn get_opt(&self, variable: &str) -> Option<&str> {
        Some(self.get(variable)).filter(|v| !v.is_empty())
    }

    /// The bound value, or a malformed-record error naming the field.
    pub fn require(&self, variable: &str, kind: RecordKind) -> Result<&str> {
        self.get_opt(variable).ok_or_else(|| Error::MalformedRecord {
            kind,
            field: variable.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for BindingRecord {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut record = BindingRecord::new();
        for (variable, value) in iter {
            record.insert(variable, value);
        }
        record
    }
}

// ============================================================================
// SPARQL 1.1 JSON results
// ============================================================================

#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<BindingRecord>,
}

/// Binding records of a SPARQL JSON results document.
pub fn parse_sparql_json(json: &str) -> Result<Vec<BindingRecord>> {
    let parsed: SparqlResults = serde_json::from_str(json)?;
    Ok(parsed.results.bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_reads_empty() {
        let record = BindingRecord::new().with("ke", " https://identifiers.org/aop.events/1 ");
        assert_eq!(record.get("ke"), "https://identifiers.org/aop.events/1");
        assert_eq!(record.get("missing"), "");
        assert_eq!(record.get_opt("missing"), None);
    }

    #[test]
    fn test_require() {
        let record: BindingRecord = [("ke", "KE1"), ("ensembl", "")].into_iter().collect();
        assert_eq!(record.require("ke", RecordKind::Gene).unwrap(), "KE1");
        let err = record.require("ensembl", RecordKind::Gene).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { ref field, .. } if field == "ensembl"));
    }

    #[test]
    fn test_parse_sparql_json() {
        let json = r#"{
            "head": {"vars": ["ke", "ensembl"]},
            "results": {"bindings": [
                {"ke": {"type": "uri", "value": "https://identifiers.org/aop.events/1"},
                 "ensembl": {"type": "literal", "value": "ENSG00000141510"}},
                {"ke": {"type": "uri", "value": "https://identifiers.org/aop.events/2"}}
            ]}
        }"#;
        let records = parse_sparql_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ensembl"), "ENSG00000141510");
        assert_eq!(records[1].get("ensembl"), "");
    }
}
