//! Agents: pluggable deciders seated at the table.
//!
//! The engine owns one boxed [`Agent`] per seat, asks the seat to move with a
//! read-only [`TurnContext`], and broadcasts every applied action back to all
//! agents. Agents never see or mutate engine state directly.

use crate::action::{Action, ActionKind};
use crate::cards::Card;
use crate::hand::HoleCards;

mod baseline;
mod bayesian;
mod human;

pub use baseline::{BaselineAgent, BaselineProfile};
pub use bayesian::{BayesianAgent, BayesianProfile};
pub use human::HumanAgent;

/// What the acting seat knows about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub seat: usize,
    pub stack: u64,
    /// Chips already committed on this street.
    pub round_bet: u64,
    pub hole: Option<HoleCards>,
}

/// Read-only snapshot handed to [`Agent::get_action`].
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// Street high-water mark.
    pub current_bet: u64,
    /// Smallest legal raise target (not increment).
    pub min_raise: u64,
    pub pot: u64,
    pub big_blind: u64,
    pub board: &'a [Card],
    pub seat: SeatView,
}

impl TurnContext<'_> {
    pub fn to_call(&self) -> u64 {
        self.current_bet.saturating_sub(self.seat.round_bet)
    }

    /// The most this seat can have committed on the street.
    pub fn max_total(&self) -> u64 {
        self.seat.round_bet + self.seat.stack
    }

    /// Break-even equity for a call: `to_call / (pot + 2 * to_call)`.
    pub fn pot_odds(&self) -> f64 {
        let to_call = self.to_call();
        if to_call == 0 {
            return 0.0;
        }
        to_call as f64 / (self.pot + 2 * to_call) as f64
    }

    /// Check when free, otherwise fold.
    pub fn passive(&self) -> Action {
        if self.to_call() == 0 {
            Action::Check
        } else {
            Action::Fold
        }
    }

    /// A raise to `current_bet + fraction * pot`, floored at the minimum
    /// raise and turned into an all-in once it reaches the stack.
    pub fn raise_by_pot(&self, fraction: f64) -> Action {
        let max_total = self.max_total();
        if max_total <= self.current_bet {
            return Action::AllIn;
        }
        let sized = self.current_bet + (self.pot as f64 * fraction.max(0.0)).round() as u64;
        let target = sized.max(self.min_raise).max(self.current_bet + 1);
        if target >= max_total {
            Action::AllIn
        } else {
            Action::Raise(target)
        }
    }

    /// Whether `action` would be accepted by the engine from this seat.
    pub fn is_legal(&self, action: Action) -> bool {
        match action {
            Action::Fold | Action::Call | Action::AllIn => true,
            Action::Check => self.to_call() == 0,
            Action::Raise(target) => {
                let max_total = self.max_total();
                target > self.current_bet
                    && target <= max_total
                    && (target >= self.min_raise || target == max_total)
            }
        }
    }
}

/// A seat controller.
///
/// Only `get_action` is required. Decisions must not fail: an agent that
/// cannot decide degrades to a safe action on its own.
pub trait Agent {
    fn name(&self) -> &str;

    /// New hand: `hole` was dealt to `seat`.
    fn receive_cards(&mut self, _seat: usize, _hole: HoleCards) {}

    fn get_action(&mut self, ctx: &TurnContext<'_>) -> Action;

    /// Called on every agent, the actor included, after an action is applied.
    fn observe_action(&mut self, _actor: usize, _action: &Action, _board: &[Card]) {}

    /// Called once per showdown with an opponent's revealed hand and how it was played.
    fn analyze_showdown(
        &mut self,
        _opponent: &HoleCards,
        _board: &[Card],
        _final_action: ActionKind,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current_bet: u64, round_bet: u64, stack: u64, pot: u64) -> TurnContext<'static> {
        TurnContext {
            current_bet,
            min_raise: (current_bet + 20).max(2 * current_bet),
            pot,
            big_blind: 20,
            board: &[],
            seat: SeatView { seat: 0, stack, round_bet, hole: None },
        }
    }

    #[test]
    fn pot_odds_use_the_doubled_call() {
        let c = ctx(100, 0, 1000, 200);
        assert!((c.pot_odds() - 100.0 / 400.0).abs() < 1e-12);
        assert_eq!(ctx(0, 0, 1000, 40).pot_odds(), 0.0);
    }

    #[test]
    fn sizing_is_floored_and_capped() {
        // tiny pot: floored at the minimum raise
        assert_eq!(ctx(20, 10, 1000, 30).raise_by_pot(0.1), Action::Raise(40));
        assert_eq!(ctx(0, 0, 1000, 100).raise_by_pot(0.6), Action::Raise(60));
        // past the stack: all-in
        assert_eq!(ctx(100, 0, 150, 400).raise_by_pot(1.0), Action::AllIn);
    }

    #[test]
    fn legality_mirrors_the_engine() {
        let c = ctx(100, 0, 150, 200);
        assert!(!c.is_legal(Action::Check));
        assert!(!c.is_legal(Action::Raise(100)));
        assert!(!c.is_legal(Action::Raise(160)));
        assert!(!c.is_legal(Action::Raise(120)));
        // short of the minimum but all-in
        assert!(c.is_legal(Action::Raise(150)));
        assert!(ctx(0, 0, 150, 40).is_legal(Action::Check));
        assert_eq!(c.passive(), Action::Fold);
    }
}
