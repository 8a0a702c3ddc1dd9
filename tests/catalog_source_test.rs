//! Tests for catalog sources

use std::sync::Arc;

use tempfile::TempDir;

use itemquiz::infrastructure::catalog::{
    parse_catalog, CatalogSource, JsonCatalogSource, StaticCatalogSource,
};
use itemquiz::infrastructure::traits::{MemoryFileSystem, RealFileSystem};
use itemquiz::infrastructure::InfraError;
use itemquiz::util::testing::chain_catalog;

const ITEM_JSON: &str = r#"{
  "type": "item",
  "version": "14.1.1",
  "basic": {"name": ""},
  "data": {
    "1036": {
      "name": "Long Sword",
      "gold": {"base": 350, "purchasable": true, "total": 350, "sell": 245},
      "tags": ["Damage", "Lane"],
      "maps": {"11": true, "12": true, "21": true, "30": false},
      "stats": {"FlatPhysicalDamageMod": 10}
    },
    "3133": {
      "name": "Caulfield's Warhammer",
      "from": ["1036", "1036"],
      "into": ["3071"],
      "gold": {"base": 400, "purchasable": true, "total": 1100, "sell": 770},
      "tags": ["Damage", "CooldownReduction"],
      "maps": {"11": true, "12": true}
    }
  }
}"#;

#[test]
fn given_data_dragon_document_when_parsing_then_reads_data_section() {
    // Act
    let catalog = parse_catalog(ITEM_JSON).expect("parse");

    // Assert
    assert_eq!(catalog.len(), 2);
    let hammer = &catalog["3133"];
    assert_eq!(hammer.name, "Caulfield's Warhammer");
    assert_eq!(hammer.gold.total, Some(1100));
    assert_eq!(hammer.materials(), ["1036", "1036"]);
    assert!(catalog["1036"].available_on("11"));
    assert!(!catalog["1036"].available_on("30"));
}

#[test]
fn given_bare_map_when_parsing_then_reads_it_directly() {
    // Arrange
    let json = r#"{"1001": {"name": "Boots", "gold": {"total": 300}, "tags": ["Boots"]}}"#;

    // Act
    let catalog = parse_catalog(json).expect("parse");

    // Assert
    assert_eq!(catalog["1001"].name, "Boots");
    assert!(catalog["1001"].maps.is_none());
}

#[test]
fn given_file_on_disk_when_loading_then_returns_catalog() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("item.json");
    std::fs::write(&path, ITEM_JSON).unwrap();
    let source = JsonCatalogSource::new(&path, Arc::new(RealFileSystem));

    // Act
    let catalog = source.load().expect("load");

    // Assert
    assert_eq!(source.path(), path.as_path());
    assert!(catalog.contains_key("1036"));
}

#[test]
fn given_missing_file_when_loading_then_returns_io_error() {
    // Arrange
    let source = JsonCatalogSource::new("/nowhere/item.json", Arc::new(MemoryFileSystem::new()));

    // Act
    let result = source.load();

    // Assert
    assert!(matches!(result, Err(InfraError::Io { .. })));
}

#[test]
fn given_invalid_json_when_loading_then_returns_parse_error() {
    // Arrange
    let fs = MemoryFileSystem::new().with_file("/data/item.json", "{ not json");
    let source = JsonCatalogSource::new("/data/item.json", Arc::new(fs));

    // Act
    let result = source.load();

    // Assert
    assert!(matches!(result, Err(InfraError::Parse { .. })));
}

#[test]
fn given_static_catalog_when_loading_then_returns_copy() {
    let source = StaticCatalogSource::new(chain_catalog());
    assert_eq!(source.load().expect("load"), chain_catalog());
}
