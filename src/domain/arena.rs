use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Data payload for relation nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Total price, if the record carries one
    pub price: Option<u32>,
    pub tags: Vec<String>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.price {
            Some(price) => write!(f, "{} ({}g)", self.name, price),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Node in the crafting relation graph.
#[derive(Debug)]
pub struct RelationNode {
    pub data: NodeData,
    /// Items this item is a material for
    pub parents: Vec<Index>,
    /// Items this item is made from
    pub children: Vec<Index>,
}

/// Arena-based relation graph with a lookup table by identifier.
///
/// Nodes reference each other by arena index, so cyclic data cannot create
/// ownership cycles. Built once per catalog snapshot, read-only afterwards.
#[derive(Debug, Default)]
pub struct RelationArena {
    arena: Arena<RelationNode>,
    by_id: HashMap<String, Index>,
    order: Vec<Index>,
}

impl RelationArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData) -> Index {
        let id = data.id.clone();
        let node_idx = self.arena.insert(RelationNode {
            data,
            parents: Vec::new(),
            children: Vec::new(),
        });
        self.by_id.insert(id, node_idx);
        self.order.push(node_idx);
        node_idx
    }

    /// Link `item` as made from `material`.
    ///
    /// Appends `item` to the material's parents and `material` to the item's children.
    /// Returns false, leaving the graph untouched, if either index is stale.
    #[instrument(level = "trace", skip(self))]
    pub fn add_edge(&mut self, item: Index, material: Index) -> bool {
        if !self.arena.contains(item) || !self.arena.contains(material) {
            return false;
        }
        if let Some(node) = self.arena.get_mut(material) {
            node.parents.push(item);
        }
        if let Some(node) = self.arena.get_mut(item) {
            node.children.push(material);
        }
        true
    }

    pub fn get_node(&self, idx: Index) -> Option<&RelationNode> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&RelationNode> {
        self.index_of(id).and_then(|idx| self.get_node(idx))
    }

    /// Resolve an item by identifier, falling back to an exact display name match.
    pub fn resolve(&self, id_or_name: &str) -> Option<Index> {
        self.index_of(id_or_name).or_else(|| {
            self.iter()
                .find(|(_, node)| node.data.name == id_or_name)
                .map(|(idx, _)| idx)
        })
    }

    pub fn name_of(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).map(|node| node.data.name.as_str())
    }

    pub fn id_of(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).map(|node| node.data.id.as_str())
    }

    pub fn parent_ids(&self, idx: Index) -> Vec<&str> {
        self.linked_ids(idx, |node| &node.parents)
    }

    pub fn child_ids(&self, idx: Index) -> Vec<&str> {
        self.linked_ids(idx, |node| &node.children)
    }

    fn linked_ids<F>(&self, idx: Index, links: F) -> Vec<&str>
    where
        F: Fn(&RelationNode) -> &Vec<Index>,
    {
        self.get_node(idx)
            .map(|node| links(node).iter().filter_map(|&l| self.id_of(l)).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> NodeIterator<'_> {
        NodeIterator {
            arena: self,
            position: 0,
        }
    }
}

pub struct NodeIterator<'a> {
    arena: &'a RelationArena,
    position: usize,
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = (Index, &'a RelationNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&idx) = self.arena.order.get(self.position) {
            self.position += 1;
            if let Some(node) = self.arena.get_node(idx) {
                return Some((idx, node));
            }
        }
        None
    }
}
