//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services are plain structs; callers own the session state and the RNG.

mod price;
mod quiz;
mod stats;

pub use price::{PriceQuestion, PriceQuiz, PriceReport, PriceSession};
pub use quiz::{AnswerMark, GradeReport, QuizEngine, QuizQuestion, QuizSession, QuizSettings};
pub use stats::{CatalogSummary, FamilyReport, StatsService};
