//! # aop-network: Adverse Outcome Pathway network assembly
//!
//! Turns flat binding records (one matched fact each) into a deduplicated
//! pathway graph of key events, genes, proteins, chemicals, organs and
//! biological components, and rebuilds tabular views from that graph.
//!
//! ## Design Principles
//!
//! 1. **Identity is the id**: two elements are the same exactly when their ids match
//! 2. **Merge, never duplicate**: re-inserting an id unions properties in place
//! 3. **Closed association set**: six variants, one `expand()` capability
//! 4. **Graph is the source of truth**: tables and exports read nodes and edges only
//!
//! ## Quick Start
//!
//! ```rust
//! use aop_network::{build_gene_table, BindingRecord, NetworkBuilder};
//!
//! let mut builder = NetworkBuilder::default();
//! builder.ingest_aop_records(&[BindingRecord::new()
//!     .with("aop", "https://identifiers.org/aop/17")
//!     .with("aop_title", "Inhibition of AChE")
//!     .with("mie", "https://identifiers.org/aop.events/12")
//!     .with("mie_title", "Inhibition, AChE")]);
//! builder.ingest_gene_records(&[BindingRecord::new()
//!     .with("ke", "https://identifiers.org/aop.events/12")
//!     .with("ensembl", "ENSG00000087085")
//!     .with("uniprot", "P22303")]);
//!
//! let (graph, session) = builder.finish();
//! assert_eq!(graph.summary().mie_count, 1);
//! assert_eq!(build_gene_table(&graph).len(), 1);
//! assert_eq!(session.report.total_skipped(), 0);
//! ```
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | `model` | Nodes, edges, identity rules, key events |
//! | `association` | The six association variants and `expand()` |
//! | `graph` | The merge-on-id aggregate and its summary |
//! | `builder` | Binding records → associations → graph |
//! | `tables` | Gene/protein, component and expression views |
//! | `export` | Element list for visualization sinks |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod association;
pub mod graph;
pub mod builder;
pub mod session;
pub mod tables;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeId, NodeKind, Edge, EdgeId, EdgeKind, Value, PropertyMap,
    AopInfo, KeyEvent, KeyEventType, KeyEventRelationship, UNAVAILABLE,
};

// ============================================================================
// Re-exports: Associations and graph
// ============================================================================

pub use association::{
    Association, AssociationKind, Expand, Fragment, FlatRow,
    GeneAssociation, CompoundAssociation, ComponentAssociation,
    OrganAssociation, GeneExpressionAssociation,
};
pub use graph::{NetworkGraph, GraphSummary};

// ============================================================================
// Re-exports: Builder and session
// ============================================================================

pub use builder::{NetworkBuilder, BindingRecord, RecordKind, parse_sparql_json};
pub use session::{Session, BuildConfig, IngestReport};

// ============================================================================
// Re-exports: Views
// ============================================================================

pub use tables::{
    build_gene_table, build_component_table, build_gene_expression_table,
    GeneTableRow, ComponentTableRow, GeneExpressionRow,
};
pub use export::{GraphExport, Element, StyleRule};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed {kind} record: missing {field}")]
    MalformedRecord { kind: RecordKind, field: String },

    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    #[error("Invalid element: {0}")]
    InvalidElement(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
