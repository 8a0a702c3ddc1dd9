//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Local: UNION with negation support (local adds directory-specific entries)
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! These tests run without a global config (temp directories only), so they
//! exercise local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use itemquiz::config::{local_config_path, merge_array, Settings};
use itemquiz::domain::FilterRules;

fn write_local(dir: &TempDir, content: &str) {
    fs::write(local_config_path(dir.path()), content).expect("write local config");
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn given_local_config_with_tags_when_load_then_unions_with_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
[filter]
excluded_tags = ["GoldPer"]
"#,
    );

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    let tags = &settings.filter.excluded_tags;
    assert!(tags.contains(&"GoldPer".to_string()));
    assert!(tags.contains(&"Consumable".to_string()));
    assert_eq!(tags.len(), FilterRules::default().excluded_tags.len() + 1);
}

#[test]
fn given_local_config_with_negation_when_load_then_removes_negated_entry() {
    // Arrange
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
[filter]
excluded_tags = ["!Lane"]
excluded_ids = ["!6693", "3070"]
"#,
    );

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(!settings.filter.excluded_tags.contains(&"Lane".to_string()));
    assert!(!settings.filter.excluded_ids.contains(&"6693".to_string()));
    assert!(settings.filter.excluded_ids.contains(&"3070".to_string()));
}

#[test]
fn given_local_quiz_section_when_load_then_overrides_scalars() {
    // Arrange
    let dir = TempDir::new().unwrap();
    write_local(
        &dir,
        r#"
seed = 42

[quiz]
min_tree_size = 3
distractor_min_price = 500
"#,
    );

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.seed, Some(42));
    assert_eq!(settings.quiz.min_tree_size, 3);
    assert_eq!(settings.quiz.option_count, 10);
    assert_eq!(settings.quiz.distractor_min_price, Some(500));
}

#[test]
fn given_no_local_config_when_load_then_filter_matches_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.filter.primary_map, "11");
    assert_eq!(settings.filter.variant_prefix, "32");
    assert_eq!(settings.quiz.min_tree_size, 5);
}

#[test]
fn given_invalid_toml_when_load_then_returns_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    write_local(&dir, "[quiz\nmin_tree_size = ");

    // Act
    let result = Settings::load(Some(dir.path()));

    // Assert
    assert!(result.is_err());
}

#[test]
fn given_explicit_file_when_load_file_then_merges_onto_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
catalog_path = "/data/item.json"

[filter]
tag_exceptions = ["Dagger"]
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_file(&path).expect("load file");

    // Assert
    assert_eq!(settings.catalog_path, Some(PathBuf::from("/data/item.json")));
    assert!(settings.filter.tag_exceptions.contains(&"Dagger".to_string()));
    assert!(settings.filter.tag_exceptions.contains(&"Long Sword".to_string()));
}

#[test]
fn given_settings_when_to_toml_then_parses_back() {
    // Arrange
    let settings = Settings {
        seed: Some(7),
        ..Settings::default()
    };

    // Act
    let rendered = settings.to_toml().expect("to toml");
    let parsed: Settings = toml::from_str(&rendered).expect("parse back");

    // Assert
    assert_eq!(parsed, settings);
}

#[test]
fn given_template_when_parsing_then_it_is_valid_toml() {
    let parsed: Result<Settings, _> = toml::from_str(&Settings::template());
    assert_eq!(parsed.expect("template parses"), Settings::default());
}

#[test]
fn given_overlay_with_negation_when_merge_array_then_sorted_union() {
    let merged = merge_array(&strings(&["b", "a"]), &strings(&["c", "!a", "b"]));
    assert_eq!(merged, strings(&["b", "c"]));
}
