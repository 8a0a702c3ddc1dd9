//! Domain layer: catalog records, relation graph and the algorithms over it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod family;
pub mod filter;
pub mod tier;
pub mod walker;

pub use arena::{NodeData, RelationArena, RelationNode};
pub use builder::GraphBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use family::{extended_family, immediate_family};
pub use filter::{CatalogFilter, FilterRules};
pub use tier::{ItemTier, PriceTier};
pub use walker::{correct_answers, large_tree_roots, render_tree, tree_names, tree_size};
