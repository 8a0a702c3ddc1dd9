//! Application layer: quiz services and session state
//!
//! This layer orchestrates domain logic; it performs no I/O.

pub mod error;
pub mod services;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use session::{Round, SessionState, Streak};
