//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::services::{PriceQuiz, QuizEngine, StatsService};
use crate::config::Settings;
use crate::infrastructure::catalog::{CatalogSource, JsonCatalogSource};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub quiz: QuizEngine,
    pub price: PriceQuiz,
    pub stats: StatsService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let quiz = QuizEngine::new(settings.quiz.clone(), settings.filter.clone());
        let price = PriceQuiz::new(settings.filter.clone());
        let stats = StatsService::new(settings.filter.clone(), settings.quiz.min_tree_size);
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            quiz,
            price,
            stats,
        }
    }

    /// Catalog source for `path`, falling back to the configured catalog path.
    pub fn catalog_source(&self, path: Option<PathBuf>) -> InfraResult<Box<dyn CatalogSource>> {
        let path = path
            .or_else(|| self.settings.catalog_path.clone())
            .ok_or(InfraError::NoCatalog)?;
        Ok(Box::new(JsonCatalogSource::new(path, Arc::clone(&self.fs))))
    }

    /// Seeded RNG when a seed is configured, entropy-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
