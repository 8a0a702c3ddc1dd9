//! Tests for StatsService

use itemquiz::application::services::StatsService;
use itemquiz::application::ApplicationError;
use itemquiz::domain::{DomainError, FilterRules, ItemTier, PriceTier};
use itemquiz::util::testing::{item, quiz_catalog};

fn service() -> StatsService {
    StatsService::new(FilterRules::default(), 5)
}

#[test]
fn given_quiz_catalog_when_summarizing_then_counts_tiers() {
    // Arrange
    let mut catalog = quiz_catalog();
    catalog.insert("2003".to_string(), item("Potion", 50).with_tags(["Consumable"]));

    // Act
    let summary = service().summarize(&catalog);

    // Assert: Ring is a top-level item, so it counts as legendary by relation
    assert_eq!(summary.total_items, 8);
    assert_eq!(summary.filtered_items, 7);
    assert_eq!(summary.large_trees, 1);
    assert_eq!(summary.by_tier.get(&ItemTier::Basic), Some(&2));
    assert_eq!(summary.by_tier.get(&ItemTier::Intermediate), Some(&2));
    assert_eq!(summary.by_tier.get(&ItemTier::Legendary), Some(&3));
    assert_eq!(summary.by_tier.get(&ItemTier::Standalone), None);
    assert_eq!(summary.by_price_tier.get(&PriceTier::Legendary), Some(&1));
    assert_eq!(summary.by_price_tier.get(&PriceTier::Intermediate), Some(&4));
    assert_eq!(summary.by_price_tier.get(&PriceTier::Material), Some(&2));
    assert_eq!(summary.unpriced, 0);
}

#[test]
fn given_item_name_when_reporting_then_lists_relations() {
    // Act
    let report = service()
        .family_report(&quiz_catalog(), "Blade")
        .expect("report");

    // Assert
    assert_eq!(report.id, "20");
    assert_eq!(report.price, Some(1100));
    assert_eq!(report.tier, ItemTier::Intermediate);
    assert_eq!(report.used_in, vec!["Legend", "Other"]);
    assert_eq!(report.made_from, vec!["Sword"]);
    assert_eq!(report.tree, vec!["Blade", "Sword"]);
    assert!(!report.extended_family.contains(&"Blade".to_string()));
}

#[test]
fn given_unknown_item_when_reporting_then_returns_unknown_item() {
    let result = service().family_report(&quiz_catalog(), "Nope");
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::UnknownItem(_)))
    ));
}
