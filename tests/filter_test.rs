//! Tests for CatalogFilter

use rstest::rstest;

use itemquiz::domain::{CatalogFilter, FilterRules, Item};
use itemquiz::util::testing::{catalog, item};

fn filter() -> CatalogFilter {
    CatalogFilter::new(FilterRules::default())
}

#[test]
fn given_mixed_catalog_when_filtering_then_keeps_only_primary_map_items() {
    // Arrange
    let input = catalog([
        ("1001", item("Dagger", 300)),
        ("1002", Item::new("Aram Only", 300).with_maps([("12", true)])),
        ("1003", Item::new("No Maps", 300)),
        ("1004", Item::new("Off", 300).with_maps([("11", false)])),
    ]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["1001"]);
}

#[test]
fn given_item_on_every_tracked_map_when_filtering_then_excludes_it() {
    // Arrange
    let everywhere = Item::new("Everywhere", 500)
        .with_maps([("11", true), ("12", true), ("21", true), ("30", true)]);
    let almost = Item::new("Almost", 500).with_maps([("11", true), ("12", true), ("21", true)]);
    let input = catalog([("1", everywhere), ("2", almost)]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert!(!filtered.contains_key("1"));
    assert!(filtered.contains_key("2"));
}

#[rstest]
#[case("Consumable")]
#[case("Trinket")]
#[case("Boots")]
#[case("Jungle")]
#[case("Lane")]
fn given_disallowed_tag_when_filtering_then_excludes_item(#[case] tag: &str) {
    // Arrange
    let input = catalog([("1", item("Tagged", 50).with_tags([tag, "Damage"]))]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert!(filtered.is_empty());
}

#[rstest]
#[case("Long Sword")]
#[case("ロング ソード")]
fn given_tag_exception_name_when_filtering_then_keeps_item(#[case] name: &str) {
    // Arrange
    let input = catalog([("1036", item(name, 350).with_tags(["Lane", "Damage"]))]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert!(filtered.contains_key("1036"));
}

#[rstest]
#[case("6693")]
#[case("1516")]
#[case("3200")]
#[case("328008")]
fn given_excluded_or_variant_id_when_filtering_then_excludes_item(#[case] id: &'static str) {
    // Arrange
    let input = catalog([(id, item("Blocked", 1000)), ("3031", item("Kept", 3400))]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert!(!filtered.contains_key(id));
    assert!(filtered.contains_key("3031"));
}

#[test]
fn given_ally_restricted_item_when_filtering_then_excludes_it() {
    // Arrange
    let input = catalog([
        ("7001", item("Masterwork", 3200).with_required_ally("Ornn")),
        ("3031", item("Plain", 3400)),
    ]);

    // Act
    let filtered = filter().apply(&input);

    // Assert
    assert_eq!(filtered.len(), 1);
    assert!(filtered.contains_key("3031"));
}

#[test]
fn given_filtered_catalog_when_filtering_again_then_output_is_unchanged() {
    // Arrange
    let input = catalog([
        ("1001", item("Dagger", 300)),
        ("2003", item("Potion", 50).with_tags(["Consumable"])),
        ("3200", item("Variant", 2000)),
        ("7001", item("Masterwork", 3200).with_required_ally("Ornn")),
        ("1036", item("Long Sword", 350).with_tags(["Lane"])),
    ]);
    let filter = filter();
    let once = filter.apply(&input);

    // Act
    let twice = filter.apply(&once);

    // Assert
    assert_eq!(once, twice);
}

#[test]
fn given_input_catalog_when_filtering_then_input_is_not_modified() {
    // Arrange
    let input = catalog([
        ("2003", item("Potion", 50).with_tags(["Consumable"])),
        ("1001", item("Dagger", 300)),
    ]);
    let before = input.clone();

    // Act
    let _ = filter().apply(&input);

    // Assert
    assert_eq!(input, before);
}

#[test]
fn given_custom_rules_when_filtering_then_uses_them() {
    // Arrange
    let rules = FilterRules {
        excluded_tags: vec!["Damage".to_string()],
        excluded_ids: vec![],
        variant_prefix: String::new(),
        ..FilterRules::default()
    };
    let input = catalog([
        ("1", item("Hitter", 300).with_tags(["Damage"])),
        ("2", item("Potion", 50).with_tags(["Consumable"])),
        ("3200", item("Variant", 2000)),
    ]);

    // Act
    let filtered = CatalogFilter::new(rules).apply(&input);

    // Assert
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["2", "3200"]);
}
