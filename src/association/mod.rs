//! # Association Variants
//!
//! Each association turns one semantic fact (one field-extracted binding
//! record) into a graph [`Fragment`] and, for most kinds, one flat
//! provenance row. Associations are value objects: built once, never
//! mutated afterwards.
//!
//! ```text
//! Gene            transcript ─translates to→ protein ─part of→ KE
//!                 transcript ─part of→ KE                 (no protein)
//! Compound        chemical ─is stressor of→ MIE
//! Component       KE ─<action>|has process→ process ─involves→ object
//! Organ           KE ─associated with→ organ
//! GeneExpression  transcript ─expressed in (<level>)→ organ
//! KER             KE ─<ker id>→ KE
//! ```

pub mod gene;
pub mod compound;
pub mod component;
pub mod organ;
pub mod expression;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Edge, KeyEventRelationship, Node};

pub use gene::GeneAssociation;
pub use compound::CompoundAssociation;
pub use component::{ComponentAssociation, RECOGNIZED_ACTIONS};
pub use organ::OrganAssociation;
pub use expression::GeneExpressionAssociation;

/// One flat, string-keyed row.
pub type FlatRow = IndexMap<String, String>;

/// Graph elements produced by one expansion. Nodes are always merged
/// before edges, so an edge may point at a node of the same fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

/// The capability every association kind implements.
pub trait Expand {
    /// Graph elements for this fact. May be empty.
    fn expand(&self) -> Fragment;

    /// Flat provenance row, for kinds that have one.
    fn to_row(&self) -> Option<FlatRow> {
        None
    }
}

impl Expand for KeyEventRelationship {
    fn expand(&self) -> Fragment {
        Fragment { nodes: Vec::new(), edges: vec![self.to_edge()] }
    }
}

/// Discriminant of [`Association`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    Gene,
    Compound,
    Component,
    Organ,
    GeneExpression,
    KeyEventRelationship,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::Gene => "gene",
            AssociationKind::Compound => "compound",
            AssociationKind::Component => "component",
            AssociationKind::Organ => "organ",
            AssociationKind::GeneExpression => "gene_expression",
            AssociationKind::KeyEventRelationship => "key_event_relationship",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed sum over the six association kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Association {
    Gene(GeneAssociation),
    Compound(CompoundAssociation),
    Component(ComponentAssociation),
    Organ(OrganAssociation),
    GeneExpression(GeneExpressionAssociation),
    KeyEventRelationship(KeyEventRelationship),
}

impl Association {
    pub fn kind(&self) -> AssociationKind {
        match self {
            Association::Gene(_) => AssociationKind::Gene,
            Association::Compound(_) => AssociationKind::Compound,
            Association::Component(_) => AssociationKind::Component,
            Association::Organ(_) => AssociationKind::Organ,
            Association::GeneExpression(_) => AssociationKind::GeneExpression,
            Association::KeyEventRelationship(_) => AssociationKind::KeyEventRelationship,
        }
    }
}

impl Expand for Association {
    fn expand(&self) -> Fragment {
        match self {
            Association::Gene(a) => a.expand(),
            Association::Compound(a) => a.expand(),
            Association::Component(a) => a.expand(),
            Association::Organ(a) => a.expand(),
            Association::GeneExpression(a) => a.expand(),
            Association::KeyEventRelationship(a) => a.expand(),
        }
    }

    fn to_row(&self) -> Option<FlatRow> {
        match self {
            Association::Gene(a) => a.to_row(),
            Association::Compound(a) => a.to_row(),
            Association::Component(a) => a.to_row(),
            Association::Organ(a) => a.to_row(),
            Association::GeneExpression(a) => a.to_row(),
            Association::KeyEventRelationship(a) => a.to_row(),
        }
    }
}

impl From<GeneAssociation> for Association {
    fn from(a: GeneAssociation) -> Self { Association::Gene(a) }
}
impl From<CompoundAssociation> for Association {
    fn from(a: CompoundAssociation) -> Self { Association::Compound(a) }
}
impl From<ComponentAssociation> for Association {
    fn from(a: ComponentAssociation) -> Self { Association::Component(a) }
}
impl From<OrganAssociation> for Association {
    fn from(a: OrganAssociation) -> Self { Association::Organ(a) }
}
impl From<GeneExpressionAssociation> for Association {
    fn from(a: GeneExpressionAssociation) -> Self { Association::GeneExpression(a) }
}
impl From<KeyEventRelationship> for Association {
    fn from(a: KeyEventRelationship) -> Self { Association::KeyEventRelationship(a) }
}

/// Build a [`FlatRow`] from `(key, value)` pairs.
pub(crate) fn flat_row<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> FlatRow {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
}
