//! Hand-rank oracle: maps hole cards plus a board to a total-order score.
//!
//! Scores follow the classic equivalence-class numbering: `1` is a royal
//! flush, [`WORST_SCORE`] is seven-five high. Lower is stronger.

use crate::cards::Card;
use crate::evaluator::{all_hand_values, evaluate_best, Category, EvalError, HandValue};
use crate::hand::{known_cards, HandError};
use std::sync::OnceLock;

/// Number of distinct five-card hand classes, and the weakest score.
pub const WORST_SCORE: u16 = 7462;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Scores a two-card hand against a board of up to five cards.
pub trait HandRanker {
    /// Score `hole` on `board`; needs at least five cards in total.
    fn evaluate(&self, board: &[Card], hole: &[Card]) -> Result<u16, RankError>;

    /// Human-readable class for a score, e.g. `"Full House"`.
    fn class_name(&self, score: u16) -> &'static str;

    /// `1 - score / 7462`: near 1 for the nuts, near 0 for the weakest hands.
    fn strength(&self, board: &[Card], hole: &[Card]) -> Result<f64, RankError> {
        let score = self.evaluate(board, hole)?;
        Ok(normalize(score))
    }
}

pub fn normalize(score: u16) -> f64 {
    1.0 - f64::from(score) / f64::from(WORST_SCORE)
}

/// The default oracle, backed by [`crate::evaluator`] and a shared class table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRanker;

impl StandardRanker {
    pub fn new() -> Self {
        StandardRanker
    }

    fn table() -> &'static [HandValue] {
        static TABLE: OnceLock<Vec<HandValue>> = OnceLock::new();
        TABLE.get_or_init(all_hand_values)
    }

    /// Score a hand value by its position among all classes, strongest first.
    pub fn score_of(value: HandValue) -> u16 {
        let table = Self::table();
        let pos = table.partition_point(|v| *v > value);
        (pos + 1).min(WORST_SCORE as usize) as u16
    }
}

impl HandRanker for StandardRanker {
    fn evaluate(&self, board: &[Card], hole: &[Card]) -> Result<u16, RankError> {
        known_cards(hole, board)?;
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(hole);
        cards.extend_from_slice(board);
        let ev = evaluate_best(&cards)?;
        Ok(Self::score_of(ev.value()))
    }

    fn class_name(&self, score: u16) -> &'static str {
        let table = Self::table();
        let idx = usize::from(score.clamp(1, WORST_SCORE)) - 1;
        table.get(idx).map(|v| v.category()).unwrap_or(Category::HighCard).name()
    }
}
