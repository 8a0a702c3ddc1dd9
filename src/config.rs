//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/itemquiz/itemquiz.toml`
//! 3. Local config: `<dir>/.itemquiz.toml` (usually the working directory)
//! 4. Environment variables: `ITEMQUIZ_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::QuizSettings;
use crate::application::ApplicationError;
use crate::domain::FilterRules;

/// Raw quiz config for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQuizConfig {
    pub min_tree_size: Option<usize>,
    pub option_count: Option<usize>,
    pub distractor_min_price: Option<u32>,
}

/// Raw filter config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFilterConfig {
    pub primary_map: Option<String>,
    pub tracked_maps: Option<Vec<String>>,
    pub excluded_tags: Option<Vec<String>>,
    pub tag_exceptions: Option<Vec<String>>,
    pub excluded_ids: Option<Vec<String>>,
    pub variant_prefix: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub quiz: RawQuizConfig,
    pub filter: RawFilterConfig,
}

/// Merge arrays with union semantics and negation support.
///
/// - Items from overlay are added to base
/// - Items prefixed with `!` remove the corresponding item from the result
/// - Duplicates are de-duplicated
///
/// # Examples
/// ```ignore
/// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
/// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let mut result: HashSet<String> = base.iter().cloned().collect();

    for pattern in overlay {
        if let Some(negated) = pattern.strip_prefix('!') {
            result.remove(negated);
        } else {
            result.insert(pattern.clone());
        }
    }

    // Convert to sorted Vec for deterministic output
    let mut vec: Vec<String> = result.into_iter().collect();
    vec.sort();
    vec
}

fn merge_list(base: &[String], overlay: &Option<Vec<String>>) -> Vec<String> {
    overlay
        .as_ref()
        .map(|o| merge_array(base, o))
        .unwrap_or_else(|| base.to_vec())
}

fn replace_list(base: &[String], overlay: &Option<Vec<String>>) -> Vec<String> {
    overlay.clone().unwrap_or_else(|| base.to_vec())
}

/// Merge overlay filter config onto base with union semantics for arrays.
pub fn merge_filter(base: &FilterRules, overlay: &RawFilterConfig) -> FilterRules {
    FilterRules {
        primary_map: overlay
            .primary_map
            .clone()
            .unwrap_or_else(|| base.primary_map.clone()),
        tracked_maps: merge_list(&base.tracked_maps, &overlay.tracked_maps),
        excluded_tags: merge_list(&base.excluded_tags, &overlay.excluded_tags),
        tag_exceptions: merge_list(&base.tag_exceptions, &overlay.tag_exceptions),
        excluded_ids: merge_list(&base.excluded_ids, &overlay.excluded_ids),
        variant_prefix: overlay
            .variant_prefix
            .clone()
            .unwrap_or_else(|| base.variant_prefix.clone()),
    }
}

/// Apply global filter config onto defaults with REPLACE semantics for arrays.
pub fn apply_global_filter(base: &FilterRules, global: &RawFilterConfig) -> FilterRules {
    FilterRules {
        primary_map: global
            .primary_map
            .clone()
            .unwrap_or_else(|| base.primary_map.clone()),
        tracked_maps: replace_list(&base.tracked_maps, &global.tracked_maps),
        excluded_tags: replace_list(&base.excluded_tags, &global.excluded_tags),
        tag_exceptions: replace_list(&base.tag_exceptions, &global.tag_exceptions),
        excluded_ids: replace_list(&base.excluded_ids, &global.excluded_ids),
        variant_prefix: global
            .variant_prefix
            .clone()
            .unwrap_or_else(|| base.variant_prefix.clone()),
    }
}

fn merge_quiz(base: &QuizSettings, overlay: &RawQuizConfig) -> QuizSettings {
    QuizSettings {
        min_tree_size: overlay.min_tree_size.unwrap_or(base.min_tree_size),
        option_count: overlay.option_count.unwrap_or(base.option_count),
        distractor_min_price: overlay.distractor_min_price.or(base.distractor_min_price),
    }
}

/// Unified configuration for itemquiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Catalog JSON file used when `--catalog` is not given
    pub catalog_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible questions
    pub seed: Option<u64>,
    pub quiz: QuizSettings,
    pub filter: FilterRules,
}

/// Get the XDG config directory for itemquiz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "itemquiz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("itemquiz.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".itemquiz.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the catalog path.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.catalog_path {
            let raw = path.to_string_lossy().to_string();
            if let Ok(expanded) = shellexpand::full(&raw) {
                self.catalog_path = Some(PathBuf::from(expanded.as_ref()));
            }
        }
    }

    /// Merge overlay config onto self (base) with union semantics for arrays.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_path: overlay
                .catalog_path
                .clone()
                .or_else(|| self.catalog_path.clone()),
            seed: overlay.seed.or(self.seed),
            quiz: merge_quiz(&self.quiz, &overlay.quiz),
            filter: merge_filter(&self.filter, &overlay.filter),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    ///
    /// Defaults are the stock rule tables; a global config that lists tags or
    /// ids defines the full table.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            catalog_path: global
                .catalog_path
                .clone()
                .or_else(|| self.catalog_path.clone()),
            seed: global.seed.or(self.seed),
            quiz: merge_quiz(&self.quiz, &global.quiz),
            filter: apply_global_filter(&self.filter, &global.filter),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.itemquiz.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with negation support
    /// - Any → Env vars: REPLACE (explicit user override)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("config: global {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("config: local {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Load a single config file on top of the defaults (union semantics).
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        Ok(settings)
    }

    /// Apply ITEMQUIZ_* environment variables as explicit overrides.
    ///
    /// Env vars replace values (not merge). Lists are comma separated.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("ITEMQUIZ")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_path") {
            settings.catalog_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("seed") {
            settings.seed = Some(parse_env("seed", &val)?);
        }
        if let Ok(val) = config.get_string("quiz.min_tree_size") {
            settings.quiz.min_tree_size = parse_env("quiz.min_tree_size", &val)?;
        }
        if let Ok(val) = config.get_string("quiz.option_count") {
            settings.quiz.option_count = parse_env("quiz.option_count", &val)?;
        }
        if let Ok(val) = config.get_string("quiz.distractor_min_price") {
            settings.quiz.distractor_min_price = Some(parse_env("quiz.distractor_min_price", &val)?);
        }
        if let Ok(val) = config.get_string("filter.primary_map") {
            settings.filter.primary_map = val;
        }
        if let Ok(val) = config.get_string("filter.tracked_maps") {
            settings.filter.tracked_maps = split_list(&val);
        }
        if let Ok(val) = config.get_string("filter.excluded_tags") {
            settings.filter.excluded_tags = split_list(&val);
        }
        if let Ok(val) = config.get_string("filter.tag_exceptions") {
            settings.filter.tag_exceptions = split_list(&val);
        }
        if let Ok(val) = config.get_string("filter.excluded_ids") {
            settings.filter.excluded_ids = split_list(&val);
        }
        if let Ok(val) = config.get_string("filter.variant_prefix") {
            settings.filter.variant_prefix = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# itemquiz configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/itemquiz/itemquiz.toml  (defines your baseline)
#   Local:  ./.itemquiz.toml                  (per-directory additions)
#   Env:    ITEMQUIZ_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!item" in local config to REMOVE an inherited entry:
#     excluded_tags = ["GoldPer", "!Lane"]

# Catalog file (Data Dragon item.json)
# catalog_path = "~/data/item.json"

# Fixed seed for reproducible questions
# seed = 42

[quiz]
# Minimum crafting tree size, root included
# min_tree_size = 5

# Number of options shown
# option_count = 10

# Drop distractors cheaper than this (unset keeps basic materials)
# distractor_min_price = 500

[filter]
# primary_map = "11"
# tracked_maps = ["11", "12", "21", "30"]
# excluded_tags = ["Consumable", "Trinket", "Boots", "Jungle", "Lane"]
# tag_exceptions = ["Long Sword"]
# excluded_ids = ["6693", "6673", "4641", "4637", "1516", "1517", "1518", "1519"]
# variant_prefix = "32"
"#
        .to_string()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ApplicationError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| ApplicationError::Config {
        message: format!("ITEMQUIZ {key}={value}: {e}"),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
