//! Catalog filter: reduces a raw catalog to the in-scope item set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::Catalog;

/// Rule tables for the catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterRules {
    /// Map an item must be available on
    pub primary_map: String,
    /// Items available on every one of these maps are dropped as universal
    pub tracked_maps: Vec<String>,
    /// Items carrying any of these tags are excluded
    pub excluded_tags: Vec<String>,
    /// Item names exempt from tag exclusion
    pub tag_exceptions: Vec<String>,
    /// Hand-curated identifier removals
    pub excluded_ids: Vec<String>,
    /// Identifier prefix of alternate game mode duplicates
    pub variant_prefix: String,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            primary_map: "11".into(),
            tracked_maps: vec!["11".into(), "12".into(), "21".into(), "30".into()],
            excluded_tags: vec![
                "Consumable".into(),
                "Trinket".into(),
                "Boots".into(),
                "Jungle".into(),
                "Lane".into(),
            ],
            tag_exceptions: vec!["Long Sword".into(), "ロング ソード".into()],
            excluded_ids: ["6693", "6673", "4641", "4637", "1516", "1517", "1518", "1519"]
                .into_iter()
                .map(String::from)
                .collect(),
            variant_prefix: "32".into(),
        }
    }
}

/// Applies [`FilterRules`] to a catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    rules: FilterRules,
}

impl CatalogFilter {
    pub fn new(rules: FilterRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FilterRules {
        &self.rules
    }

    /// Filter the catalog. The input is left untouched.
    ///
    /// Ally-restricted items are removed first. Map eligibility and the tag-exclusion
    /// set are then both computed from that pre-filtered catalog and composed, followed
    /// by the manual and variant exclusions.
    #[instrument(level = "debug", skip_all, fields(items = catalog.len()))]
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let allowed = self.without_ally_restricted(catalog);
        let tag_excluded = self.tag_excluded(&allowed);

        let filtered: Catalog = self
            .map_eligible(&allowed)
            .into_iter()
            .filter(|(id, _)| !tag_excluded.contains(id))
            .filter(|(id, _)| !self.rules.excluded_ids.contains(id))
            .filter(|(id, _)| !self.is_variant(id))
            .collect();

        debug!(
            "filter: {} of {} items in scope ({} tag-excluded)",
            filtered.len(),
            catalog.len(),
            tag_excluded.len()
        );
        filtered
    }

    fn without_ally_restricted(&self, catalog: &Catalog) -> Catalog {
        catalog
            .iter()
            .filter(|(_, item)| item.required_ally.is_none())
            .map(|(id, item)| (id.clone(), item.clone()))
            .collect()
    }

    /// Items on the primary map that are not available on every tracked map.
    pub fn map_eligible(&self, catalog: &Catalog) -> Catalog {
        catalog
            .iter()
            .filter(|(_, item)| item.available_on(&self.rules.primary_map))
            .filter(|(_, item)| {
                !self
                    .rules
                    .tracked_maps
                    .iter()
                    .all(|map| item.available_on(map))
            })
            .map(|(id, item)| (id.clone(), item.clone()))
            .collect()
    }

    /// Identifiers carrying a disallowed tag, minus the named exceptions.
    pub fn tag_excluded(&self, catalog: &Catalog) -> BTreeSet<String> {
        catalog
            .iter()
            .filter(|(_, item)| item.has_any_tag(&self.rules.excluded_tags))
            .filter(|(_, item)| !self.rules.tag_exceptions.contains(&item.name))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn is_variant(&self, id: &str) -> bool {
        !self.rules.variant_prefix.is_empty() && id.starts_with(&self.rules.variant_prefix)
    }
}
