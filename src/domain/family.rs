//! Extended-family expansion used to build distractor pools.

use std::collections::BTreeSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::RelationArena;

/// Parents followed by children of `idx`. Unknown indices have no family.
pub fn immediate_family(graph: &RelationArena, idx: Index) -> Vec<Index> {
    graph
        .get_node(idx)
        .map(|node| node.parents.iter().chain(&node.children).copied().collect())
        .unwrap_or_default()
}

/// Identifiers in the extended family of `root_id`.
///
/// The set is the root's immediate family plus, for every member of it, the
/// immediate families of that member's own family members. That is the union of
/// hop-1 and hop-3 neighbours; hop-2 items are only stepped through and appear
/// only when they are also hop-1 or hop-3. The root itself is not removed.
#[instrument(level = "debug", skip(graph))]
pub fn extended_family(graph: &RelationArena, root_id: &str) -> BTreeSet<String> {
    let Some(root) = graph.index_of(root_id) else {
        return BTreeSet::new();
    };

    let immediate = immediate_family(graph, root);
    let mut extended: BTreeSet<Index> = immediate.iter().copied().collect();

    for &member in &immediate {
        for second in immediate_family(graph, member) {
            extended.extend(immediate_family(graph, second));
        }
    }

    let ids: BTreeSet<String> = extended
        .into_iter()
        .filter_map(|idx| graph.id_of(idx).map(String::from))
        .collect();
    debug!("extended family of {}: {} items", root_id, ids.len());
    ids
}
