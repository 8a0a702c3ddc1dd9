//! Domain entities: catalog records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Catalog snapshot keyed by item identifier.
///
/// A `BTreeMap` keeps iteration order stable, so seeded sampling is reproducible.
pub type Catalog = BTreeMap<String, Item>;

/// Price block of a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gold {
    /// Total price including materials
    pub total: Option<u32>,
    /// Combine cost on top of the materials
    pub base: Option<u32>,
    pub purchasable: Option<bool>,
}

/// Raw catalog record, shaped like a Data Dragon `item.json` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    #[serde(default)]
    pub gold: Gold,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Material identifiers this item is made from
    #[serde(default, rename = "from", skip_serializing_if = "Option::is_none")]
    pub made_from: Option<Vec<String>>,
    /// Map availability flags, keyed by map identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<BTreeMap<String, bool>>,
    /// Ally unit required to obtain the item
    #[serde(default, rename = "requiredAlly", skip_serializing_if = "Option::is_none")]
    pub required_ally: Option<String>,
}

impl Item {
    /// Create a record with a name and total price, no tags and no materials.
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            gold: Gold {
                total: Some(price),
                ..Gold::default()
            },
            ..Self::default()
        }
    }

    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.made_from = Some(materials.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_maps<I, S>(mut self, maps: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        self.maps = Some(maps.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn with_required_ally(mut self, ally: impl Into<String>) -> Self {
        self.required_ally = Some(ally.into());
        self
    }

    /// Total price, or `MalformedRecord` when the record has none.
    pub fn price(&self, id: &str) -> DomainResult<u32> {
        self.gold.total.ok_or_else(|| DomainError::MalformedRecord {
            id: id.to_string(),
            field: "gold.total",
        })
    }

    /// Whether the item is flagged available on `map_id`. Absent flags mean unavailable.
    pub fn available_on(&self, map_id: &str) -> bool {
        self.maps
            .as_ref()
            .and_then(|maps| maps.get(map_id))
            .copied()
            .unwrap_or(false)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    pub fn materials(&self) -> &[String] {
        self.made_from.as_deref().unwrap_or_default()
    }
}
