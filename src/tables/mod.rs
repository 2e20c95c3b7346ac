//! # Table Views
//!
//! Denormalized relational views rebuilt from an assembled
//! [`NetworkGraph`](crate::NetworkGraph) by traversal, never from raw
//! records. Every builder is a pure function of the graph: call them in
//! any order, as often as needed. Output order follows graph insertion
//! order.
//!
//! | View | Builder | Dedup key |
//! |------|---------|-----------|
//! | Gene / protein | [`build_gene_table`] | `(gene_label, protein_label, uniprot_id)` |
//! | Component | [`build_component_table`] | `(ke, process, object \| "no_object")` |
//! | Gene expression | [`build_gene_expression_table`] | `(gene node, organ node)` |

pub mod gene;
pub mod component;
pub mod expression;

pub use gene::{build_gene_table, GeneTableRow};
pub use component::{build_component_table, ComponentTableRow};
pub use expression::{build_gene_expression_table, GeneExpressionRow};

/// Separator for multi-valued cells.
pub const MULTI_VALUE_SEPARATOR: &str = "; ";
