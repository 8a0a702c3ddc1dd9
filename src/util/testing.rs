//! Shared test setup and catalog fixtures

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Catalog, Item};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let module_filter = filter_fn(|metadata| metadata.target().starts_with("itemquiz"));
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Item available on the primary map ("11").
pub fn item(name: &str, price: u32) -> Item {
    Item::new(name, price).with_maps([("11", true)])
}

/// Item available on the primary map, made from `materials`.
pub fn crafted(name: &str, price: u32, materials: &[&str]) -> Item {
    item(name, price).with_materials(materials.iter().copied())
}

/// Build a catalog from `(id, item)` pairs.
pub fn catalog<I>(entries: I) -> Catalog
where
    I: IntoIterator<Item = (&'static str, Item)>,
{
    entries
        .into_iter()
        .map(|(id, item)| (id.to_string(), item))
        .collect()
}

/// A <- B <- C: C is made from B, B from A.
pub fn chain_catalog() -> Catalog {
    catalog([
        ("1", item("A", 300)),
        ("2", crafted("B", 900, &["1"])),
        ("3", crafted("C", 2500, &["2"])),
    ])
}

/// One legendary with a five-name tree and a bit of surrounding family.
///
/// ```text
/// 30 Legend <- 20 Blade <- 10 Sword
///           <- 21 Cloak <- 11 Cape
/// 40 Other  <- 20 Blade
/// 22 Ring   <- 11 Cape
/// ```
pub fn quiz_catalog() -> Catalog {
    catalog([
        ("10", item("Sword", 350)),
        ("11", item("Cape", 400)),
        ("20", crafted("Blade", 1100, &["10"])),
        ("21", crafted("Cloak", 900, &["11"])),
        ("22", crafted("Ring", 800, &["11"])),
        ("30", crafted("Legend", 3200, &["20", "21"])),
        ("40", crafted("Other", 2800, &["20"])),
    ])
}
