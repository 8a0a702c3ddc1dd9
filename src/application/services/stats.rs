//! Catalog statistics and per-item relation reports

use std::collections::BTreeMap;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ApplicationResult;
use crate::domain::{
    extended_family, large_tree_roots, tree_names, Catalog, CatalogFilter, DomainError,
    FilterRules, GraphBuilder, ItemTier, PriceTier,
};

/// Counts over a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_items: usize,
    pub filtered_items: usize,
    pub large_trees: usize,
    pub by_tier: BTreeMap<ItemTier, usize>,
    pub by_price_tier: BTreeMap<PriceTier, usize>,
    /// In-scope items without a price
    pub unpriced: usize,
}

/// Relations of a single in-scope item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyReport {
    pub id: String,
    pub name: String,
    pub price: Option<u32>,
    pub tier: ItemTier,
    /// Names of items this one is a material for
    pub used_in: Vec<String>,
    /// Names of the materials this one is made from
    pub made_from: Vec<String>,
    /// Names in the extended family, the item itself excluded
    pub extended_family: Vec<String>,
    pub tree: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StatsService {
    filter: CatalogFilter,
    min_tree_size: usize,
}

impl StatsService {
    pub fn new(rules: FilterRules, min_tree_size: usize) -> Self {
        Self {
            filter: CatalogFilter::new(rules),
            min_tree_size,
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn summarize(&self, catalog: &Catalog) -> CatalogSummary {
        let filtered = self.filter.apply(catalog);
        let graph = GraphBuilder::new().build(&filtered);

        let mut by_tier = BTreeMap::new();
        let mut by_price_tier = BTreeMap::new();
        let mut unpriced = 0;
        for (_, node) in graph.iter() {
            *by_tier.entry(ItemTier::of(node)).or_insert(0) += 1;
            match node.data.price {
                Some(price) => *by_price_tier.entry(PriceTier::of(price)).or_insert(0) += 1,
                None => unpriced += 1,
            }
        }

        CatalogSummary {
            total_items: catalog.len(),
            filtered_items: filtered.len(),
            large_trees: large_tree_roots(&graph, self.min_tree_size).len(),
            by_tier,
            by_price_tier,
            unpriced,
        }
    }

    /// Report for an in-scope item given by identifier or exact display name.
    #[instrument(level = "debug", skip(self, catalog))]
    pub fn family_report(&self, catalog: &Catalog, item: &str) -> ApplicationResult<FamilyReport> {
        let filtered = self.filter.apply(catalog);
        let graph = GraphBuilder::new().build(&filtered);

        let idx = graph
            .resolve(item)
            .ok_or_else(|| DomainError::UnknownItem(item.to_string()))?;
        let node = graph
            .get_node(idx)
            .ok_or_else(|| DomainError::UnknownItem(item.to_string()))?;
        let names = |links: &[Index]| -> Vec<String> {
            links
                .iter()
                .filter_map(|&l| graph.name_of(l).map(String::from))
                .collect()
        };

        let id = node.data.id.clone();
        let extended = extended_family(&graph, &id)
            .into_iter()
            .filter(|member| *member != id)
            .filter_map(|member| graph.node_by_id(&member).map(|n| n.data.name.clone()))
            .collect();

        Ok(FamilyReport {
            name: node.data.name.clone(),
            price: node.data.price,
            tier: ItemTier::of(node),
            used_in: names(&node.parents),
            made_from: names(&node.children),
            extended_family: extended,
            tree: tree_names(&graph, &id),
            id,
        })
    }
}
