//! Crafting quiz service
//!
//! Poses "which of these go into X?" questions and grades submissions.

use std::collections::BTreeSet;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::session::{Round, SessionState};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    correct_answers, extended_family, large_tree_roots, Catalog, CatalogFilter, DomainError,
    FilterRules, GraphBuilder, RelationArena,
};

/// Tuning knobs for crafting questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizSettings {
    /// Minimum crafting tree size (root included) for an item to be asked about
    pub min_tree_size: usize,
    /// Maximum number of options shown
    pub option_count: usize,
    /// Drop distractors priced below this; None keeps cheap basic materials
    pub distractor_min_price: Option<u32>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            min_tree_size: 5,
            option_count: 10,
            distractor_min_price: None,
        }
    }
}

/// A posed crafting question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub root_id: String,
    pub root_name: String,
    pub root_price: u32,
    /// Crafting tree names without the root, in walk order (may repeat)
    pub correct_answers: Vec<String>,
    /// Deduplicated extended-family names without the root name
    pub distractor_pool: Vec<String>,
    /// Options shown to the player, sampled from the pool
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn correct_answer_set(&self) -> BTreeSet<String> {
        self.correct_answers.iter().cloned().collect()
    }

    /// The submission that grades as correct: displayed options that are correct answers.
    pub fn expected_selection(&self) -> BTreeSet<String> {
        let correct = self.correct_answer_set();
        self.options
            .iter()
            .filter(|option| correct.contains(*option))
            .cloned()
            .collect()
    }
}

/// Feedback for one displayed option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMark {
    pub name: String,
    pub is_correct: bool,
    pub checked: bool,
}

/// Outcome of grading a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    pub correct: bool,
    pub consecutive_correct: u32,
    pub previous_consecutive_correct: u32,
    /// Full correct-answer set, deduplicated, in walk order
    pub correct_answers: Vec<String>,
    /// Options the player should have selected
    pub expected: BTreeSet<String>,
    pub marks: Vec<AnswerMark>,
}

pub type QuizSession = SessionState<QuizQuestion>;

/// Service posing and grading crafting questions.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    settings: QuizSettings,
    filter: CatalogFilter,
}

impl QuizEngine {
    pub fn new(settings: QuizSettings, rules: FilterRules) -> Self {
        Self {
            settings,
            filter: CatalogFilter::new(rules),
        }
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn rules(&self) -> &FilterRules {
        self.filter.rules()
    }

    /// Filter the catalog and build its relation graph.
    pub fn prepare(&self, catalog: &Catalog) -> (Catalog, RelationArena) {
        let filtered = self.filter.apply(catalog);
        let graph = GraphBuilder::new().build(&filtered);
        (filtered, graph)
    }

    /// Pose a new question, replacing whatever round the session was in.
    ///
    /// Runs the full pipeline from scratch. Fails with `EmptyEligibleSet` when no
    /// item has a large enough crafting tree, and with `MalformedRecord` when the
    /// chosen root has no price.
    #[instrument(level = "debug", skip_all)]
    pub fn pose_question<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        state: QuizSession,
        rng: &mut R,
    ) -> ApplicationResult<(QuizSession, QuizQuestion)> {
        let (filtered, graph) = self.prepare(catalog);

        let roots = large_tree_roots(&graph, self.settings.min_tree_size);
        let root = *roots.choose(rng).ok_or(DomainError::EmptyEligibleSet {
            min_tree_size: self.settings.min_tree_size,
        })?;
        let root_node = graph
            .get_node(root)
            .ok_or_else(|| DomainError::UnknownItem(format!("{:?}", root)))?;
        let root_id = root_node.data.id.clone();
        let root_name = root_node.data.name.clone();
        let root_price = root_node.data.price.ok_or(DomainError::MalformedRecord {
            id: root_id.clone(),
            field: "gold.total",
        })?;

        let distractor_pool = self.distractor_pool(&filtered, &graph, &root_id, &root_name)?;
        let option_count = self.settings.option_count.min(distractor_pool.len());
        let options: Vec<String> = distractor_pool
            .choose_multiple(rng, option_count)
            .cloned()
            .collect();

        let question = QuizQuestion {
            correct_answers: correct_answers(&graph, &root_id),
            root_id,
            root_name,
            root_price,
            distractor_pool,
            options,
        };
        info!(
            "posed {} ({}): {} options from a pool of {}",
            question.root_name,
            question.root_id,
            question.options.len(),
            question.distractor_pool.len()
        );

        let mut streak = state.streak;
        streak.clear_previous();
        let next = QuizSession {
            round: Round::QuestionPosed(question.clone()),
            streak,
        };
        Ok((next, question))
    }

    /// Deduplicated names of the root's extended family, excluding the root's name.
    fn distractor_pool(
        &self,
        filtered: &Catalog,
        graph: &RelationArena,
        root_id: &str,
        root_name: &str,
    ) -> ApplicationResult<Vec<String>> {
        let mut names = BTreeSet::new();
        for id in extended_family(graph, root_id) {
            if id == root_id {
                continue;
            }
            let Some(item) = filtered.get(&id) else {
                continue;
            };
            if let Some(min_price) = self.settings.distractor_min_price {
                if item.price(&id)? < min_price {
                    continue;
                }
            }
            if item.name != root_name {
                names.insert(item.name.clone());
            }
        }
        debug!("distractor pool for {}: {} names", root_id, names.len());
        Ok(names.into_iter().collect())
    }

    /// Grade a submission against the posed question.
    ///
    /// The submission is correct iff its name set equals the displayed options that
    /// are also correct answers. Correct answers never shown as options are not
    /// expected.
    #[instrument(level = "debug", skip(self, state))]
    pub fn grade(
        &self,
        state: QuizSession,
        answers: &[String],
    ) -> ApplicationResult<(QuizSession, GradeReport)> {
        let question = match state.round {
            Round::QuestionPosed(question) => question,
            Round::Graded { .. } => return Err(ApplicationError::AlreadyGraded),
            Round::AwaitingRoot => return Err(ApplicationError::NoActiveQuestion),
        };

        let submitted: BTreeSet<String> = answers.iter().cloned().collect();
        let expected = question.expected_selection();
        let correct = submitted == expected;

        let mut streak = state.streak;
        streak.record(correct);
        debug!(
            "graded {}: correct={} streak={}",
            question.root_id, correct, streak.consecutive_correct
        );

        let correct_set = question.correct_answer_set();
        let marks = question
            .options
            .iter()
            .map(|name| AnswerMark {
                name: name.clone(),
                is_correct: correct_set.contains(name),
                checked: submitted.contains(name),
            })
            .collect();

        let report = GradeReport {
            correct,
            consecutive_correct: streak.consecutive_correct,
            previous_consecutive_correct: streak.previous_consecutive_correct,
            correct_answers: question.correct_answers.iter().unique().cloned().collect(),
            expected,
            marks,
        };
        let next = QuizSession {
            round: Round::Graded { question, correct },
            streak,
        };
        Ok((next, report))
    }

    /// Move on from the current round, keeping the streak counters.
    pub fn next_question(&self, state: QuizSession) -> QuizSession {
        state.next_question()
    }
}
