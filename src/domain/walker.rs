//! Crafting tree walks over the relation arena.
//!
//! A crafting tree is never stored; it is recomputed from the child links of the
//! root each time. Walks follow children, i.e. from an item towards its materials.

use std::collections::HashSet;

use generational_arena::Index;
use termtree::Tree;
use tracing::{debug, instrument, trace};

use crate::domain::arena::RelationArena;

/// Names of the crafting tree rooted at `root_id`, in depth-first pre-order.
///
/// The root comes first, followed by each child's walk in child-list order.
/// Diamond dependencies yield duplicate names; they are kept. An unknown root
/// yields an empty list. An id already on the current descent path is not
/// entered again, so cyclic data terminates without changing acyclic output.
#[instrument(level = "trace", skip(graph))]
pub fn tree_names(graph: &RelationArena, root_id: &str) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(root) = graph.index_of(root_id) {
        collect_names(graph, root, &mut HashSet::new(), &mut names);
    }
    names
}

/// Same walk as [`tree_names`], starting from an arena index.
pub fn tree_names_at(graph: &RelationArena, root: Index) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(graph, root, &mut HashSet::new(), &mut names);
    names
}

fn collect_names(
    graph: &RelationArena,
    idx: Index,
    path: &mut HashSet<Index>,
    names: &mut Vec<String>,
) {
    let Some(node) = graph.get_node(idx) else {
        trace!("data gap: stale index {:?}", idx);
        return;
    };
    if !path.insert(idx) {
        trace!("cycle at {}, not descending", node.data.id);
        return;
    }
    names.push(node.data.name.clone());
    for &child in &node.children {
        collect_names(graph, child, path, names);
    }
    path.remove(&idx);
}

/// Number of names in the crafting tree, root included.
pub fn tree_size(graph: &RelationArena, root_id: &str) -> usize {
    tree_names(graph, root_id).len()
}

/// Correct answers for a crafting question: the tree names without the root.
///
/// The list keeps walk order and duplicates; the root's own name never appears.
pub fn correct_answers(graph: &RelationArena, root_id: &str) -> Vec<String> {
    let mut names = tree_names(graph, root_id).into_iter();
    let Some(root_name) = names.next() else {
        return Vec::new();
    };
    names.filter(|name| *name != root_name).collect()
}

/// Roots whose crafting tree has at least `min_size` names, in arena order.
#[instrument(level = "debug", skip(graph))]
pub fn large_tree_roots(graph: &RelationArena, min_size: usize) -> Vec<Index> {
    let roots: Vec<Index> = graph
        .iter()
        .filter(|(idx, _)| tree_names_at(graph, *idx).len() >= min_size)
        .map(|(idx, _)| idx)
        .collect();
    debug!("large trees: {} of {} nodes", roots.len(), graph.len());
    roots
}

/// Printable crafting tree for `root_id`, or None for an unknown root.
pub fn render_tree(graph: &RelationArena, root_id: &str) -> Option<Tree<String>> {
    let root = graph.index_of(root_id)?;
    let mut path = HashSet::new();
    build_tree(graph, root, &mut path)
}

fn build_tree(graph: &RelationArena, idx: Index, path: &mut HashSet<Index>) -> Option<Tree<String>> {
    let node = graph.get_node(idx)?;
    if !path.insert(idx) {
        return None;
    }
    let leaves: Vec<_> = node
        .children
        .iter()
        .filter_map(|&child| build_tree(graph, child, path))
        .collect();
    path.remove(&idx);
    Some(Tree::new(node.data.to_string()).with_leaves(leaves))
}
