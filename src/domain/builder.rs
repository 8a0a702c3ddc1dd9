//! Graph builder for turning a filtered catalog into a relation arena.

use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, RelationArena};
use crate::domain::entities::Catalog;

/// Constructs the bidirectional relation graph from a filtered catalog.
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the relation arena in two linear passes.
    ///
    /// The first pass creates one node per item, the second connects each item to
    /// those of its materials that have a node. Materials outside the catalog are
    /// dropped, not rerouted.
    #[instrument(level = "debug", skip_all, fields(items = catalog.len()))]
    pub fn build(&self, catalog: &Catalog) -> RelationArena {
        let mut graph = RelationArena::new();

        for id in catalog.keys() {
            if let Some(data) = self.node_data(id, catalog) {
                graph.insert_node(data);
            }
        }

        let mut edges = 0usize;
        for (id, item) in catalog {
            let Some(item_idx) = graph.index_of(id) else {
                continue;
            };
            for material in item.materials() {
                match graph.index_of(material) {
                    Some(material_idx) => {
                        if graph.add_edge(item_idx, material_idx) {
                            edges += 1;
                        }
                    }
                    None => trace!("data gap: {} made from unknown {}", id, material),
                }
            }
        }

        debug!("build: {} nodes, {} edges", graph.len(), edges);
        graph
    }

    /// Node payload for `id`, or None when the record is missing or ally-restricted.
    pub fn node_data(&self, id: &str, catalog: &Catalog) -> Option<NodeData> {
        let item = catalog.get(id)?;
        if item.required_ally.is_some() {
            return None;
        }
        Some(NodeData {
            id: id.to_string(),
            name: item.name.clone(),
            price: item.gold.total,
            tags: item.tags.clone(),
        })
    }
}
