//! Caller-owned session state
//!
//! The engine never stores sessions. Each call takes a `SessionState` and returns
//! the next one; where it lives between calls is up to the caller.

use serde::{Deserialize, Serialize};

/// Consecutive-correct counters for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub consecutive_correct: u32,
    /// Counter value right before the last miss, kept for "streak broken" display
    pub previous_consecutive_correct: u32,
}

impl Streak {
    /// Apply a graded outcome.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.consecutive_correct += 1;
        } else {
            self.previous_consecutive_correct = self.consecutive_correct;
            self.consecutive_correct = 0;
        }
    }

    /// Forget the broken streak once a new question is shown.
    pub fn clear_previous(&mut self) {
        self.previous_consecutive_correct = 0;
    }
}

/// Progress of the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round<Q> {
    AwaitingRoot,
    QuestionPosed(Q),
    Graded { question: Q, correct: bool },
}

impl<Q> Default for Round<Q> {
    fn default() -> Self {
        Round::AwaitingRoot
    }
}

/// Per-player state passed into and returned from every engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState<Q> {
    pub round: Round<Q>,
    pub streak: Streak,
}

impl<Q> Default for SessionState<Q> {
    fn default() -> Self {
        Self {
            round: Round::AwaitingRoot,
            streak: Streak::default(),
        }
    }
}

impl<Q> SessionState<Q> {
    /// Fresh state for a first visit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_question(&self) -> Option<&Q> {
        match &self.round {
            Round::AwaitingRoot => None,
            Round::QuestionPosed(q) | Round::Graded { question: q, .. } => Some(q),
        }
    }

    /// Discard the current round, keeping only the counters.
    pub fn next_question(self) -> Self {
        Self {
            round: Round::AwaitingRoot,
            streak: self.streak,
        }
    }
}
