//! Edge (directed) in the pathway graph.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{merge_properties, NodeId, PropertyMap, Value};
use crate::Error;

/// Stable edge identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Default identity `{source}_{target}`.
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("{source}_{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EdgeId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self { Self(s) }
}

/// Semantic class of an edge. The label may vary within a kind
/// (component actions, expression levels), the kind does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "ker")]
    KeyEventRelationship,
    #[serde(rename = "part-of")]
    PartOf,
    #[serde(rename = "translates-to")]
    TranslatesTo,
    #[serde(rename = "is-stressor-of")]
    IsStressorOf,
    #[serde(rename = "has-process")]
    HasProcess,
    #[serde(rename = "involves")]
    Involves,
    #[serde(rename = "associated-with")]
    AssociatedWith,
    #[serde(rename = "expressed-in")]
    ExpressedIn,
    #[serde(rename = "custom")]
    Custom,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 9] = [
        EdgeKind::KeyEventRelationship,
        EdgeKind::PartOf,
        EdgeKind::TranslatesTo,
        EdgeKind::IsStressorOf,
        EdgeKind::HasProcess,
        EdgeKind::Involves,
        EdgeKind::AssociatedWith,
        EdgeKind::ExpressedIn,
        EdgeKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::KeyEventRelationship => "ker",
            EdgeKind::PartOf => "part-of",
            EdgeKind::TranslatesTo => "translates-to",
            EdgeKind::IsStressorOf => "is-stressor-of",
            EdgeKind::HasProcess => "has-process",
            EdgeKind::Involves => "involves",
            EdgeKind::AssociatedWith => "associated-with",
            EdgeKind::ExpressedIn => "expressed-in",
            EdgeKind::Custom => "custom",
        }
    }

    /// Label used when the source record does not supply one.
    pub fn default_label(&self) -> &'static str {
        match self {
            EdgeKind::KeyEventRelationship => "",
            EdgeKind::PartOf => "part of",
            EdgeKind::TranslatesTo => "translates to",
            EdgeKind::IsStressorOf => "is stressor of",
            EdgeKind::HasProcess => "has process",
            EdgeKind::Involves => "involves",
            EdgeKind::AssociatedWith => "associated with",
            EdgeKind::ExpressedIn => "expressed in",
            EdgeKind::Custom => "",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(format!("edge kind '{s}'")))
    }
}

/// A directed edge. Only valid when both endpoints are addressable node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    pub kind: EdgeKind,
    pub properties: PropertyMap,
}

impl Edge {
    /// Edge with the default `{source}_{target}` id and the kind's default label.
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
            label: kind.default_label().to_owned(),
            kind,
            properties: PropertyMap::new(),
        }
    }

    /// Explicit id, for when several distinct edges join the same pair.
    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: &NodeId) -> Option<&NodeId> {
        if *from == self.source { Some(&self.target) }
        else if *from == self.target { Some(&self.source) }
        else { None }
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        self.source == *node || self.target == *node
    }

    /// Same policy as nodes: union properties, keep the first label.
    pub fn merge_from(&mut self, other: &Edge) {
        if self.label.is_empty() {
            self.label = other.label.clone();
        }
        merge_properties(&mut self.properties, &other.properties);
    }
}
