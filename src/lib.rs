//! itemquiz: crafting-tree quiz engine
//!
//! Layers:
//! - `domain`: catalog records, filtering, the relation graph and its walks
//! - `application`: quiz services and caller-owned session state
//! - `infrastructure`: catalog loading, filesystem seam, service wiring
//! - `cli`: argument parsing and interactive commands

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
