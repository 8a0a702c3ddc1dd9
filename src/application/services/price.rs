//! Price quiz service
//!
//! Shows a random in-scope item and asks for its total price.

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::session::{Round, SessionState};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Catalog, CatalogFilter, DomainError, FilterRules};

/// A posed price question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuestion {
    pub item_id: String,
    pub item_name: String,
    pub correct_price: u32,
}

/// Outcome of grading a price guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReport {
    pub correct: bool,
    pub guess: u32,
    pub correct_price: u32,
    pub consecutive_correct: u32,
    pub previous_consecutive_correct: u32,
}

pub type PriceSession = SessionState<PriceQuestion>;

#[derive(Debug, Clone, Default)]
pub struct PriceQuiz {
    filter: CatalogFilter,
}

impl PriceQuiz {
    pub fn new(rules: FilterRules) -> Self {
        Self {
            filter: CatalogFilter::new(rules),
        }
    }

    /// Pick a uniformly random in-scope item.
    #[instrument(level = "debug", skip_all)]
    pub fn pose_question<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        state: PriceSession,
        rng: &mut R,
    ) -> ApplicationResult<(PriceSession, PriceQuestion)> {
        let filtered = self.filter.apply(catalog);
        let (id, item) = filtered
            .iter()
            .choose(rng)
            .ok_or(DomainError::EmptyCatalog)?;

        let question = PriceQuestion {
            item_id: id.clone(),
            item_name: item.name.clone(),
            correct_price: item.price(id)?,
        };
        debug!("price question: {} ({})", question.item_name, question.item_id);

        let mut streak = state.streak;
        streak.clear_previous();
        let next = PriceSession {
            round: Round::QuestionPosed(question.clone()),
            streak,
        };
        Ok((next, question))
    }

    /// Grade a guess. A missing guess counts as zero.
    pub fn grade(
        &self,
        state: PriceSession,
        guess: Option<u32>,
    ) -> ApplicationResult<(PriceSession, PriceReport)> {
        let question = match state.round {
            Round::QuestionPosed(question) => question,
            Round::Graded { .. } => return Err(ApplicationError::AlreadyGraded),
            Round::AwaitingRoot => return Err(ApplicationError::NoActiveQuestion),
        };

        let guess = guess.unwrap_or(0);
        let correct = guess == question.correct_price;
        let mut streak = state.streak;
        streak.record(correct);

        let report = PriceReport {
            correct,
            guess,
            correct_price: question.correct_price,
            consecutive_correct: streak.consecutive_correct,
            previous_consecutive_correct: streak.previous_consecutive_correct,
        };
        let next = PriceSession {
            round: Round::Graded { question, correct },
            streak,
        };
        Ok((next, report))
    }
}
