//! Bayesian opponent model.
//!
//! Keeps a posterior over the opponent's 169 starting-hand categories and
//! reweights it after every observed opponent action with a behavioural
//! likelihood `L(action | strength, aggressiveness)`. The aggressiveness
//! index is recalibrated only from showdown feedback.

use crate::action::{Action, ActionKind};
use crate::cards::Card;
use crate::hand::{CardMask, HoleCards};
use crate::oracle::{HandRanker, StandardRanker};
use crate::range::{HandCategory, Range, Tier, CATEGORY_COUNT};

/// Tunable constants of the likelihood model. None of these are load-bearing
/// individually; they shape monotone strength-to-likelihood curves.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BeliefConfig {
    /// Prior weight per tier (normalized on use).
    pub prior_premium: f64,
    pub prior_middle: f64,
    pub prior_junk: f64,
    /// Preflop strength per tier.
    pub preflop_premium: f64,
    pub preflop_middle: f64,
    pub preflop_junk: f64,
    pub raise_center: f64,
    /// How far the raise center moves per unit of `1 - aggressiveness`.
    pub raise_center_shift: f64,
    pub raise_center_bounds: (f64, f64),
    pub raise_steepness: f64,
    pub bluff_weight: f64,
    pub raise_cap: f64,
    pub call_center: f64,
    pub call_width: f64,
    pub trap_threshold: f64,
    pub trap_probability: f64,
    pub check_center: f64,
    pub check_steepness: f64,
    pub fold_center: f64,
    pub fold_steepness: f64,
    /// Multiplier applied to every tally before counting a new action.
    pub tally_decay: f64,
    /// Bluff estimate before any action has been seen.
    pub default_bluff: f64,
    /// Fraction of the opponent's aggressive-action share read as bluffs.
    pub bluff_share: f64,
    pub aggressiveness_bounds: (f64, f64),
    pub trap_detect_strength: f64,
    pub bluff_detect_strength: f64,
    pub trap_factor: f64,
    pub bluff_factor: f64,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            prior_premium: 3.0,
            prior_middle: 2.0,
            prior_junk: 1.0,
            preflop_premium: 0.8,
            preflop_middle: 0.55,
            preflop_junk: 0.3,
            raise_center: 0.65,
            raise_center_shift: 0.2,
            raise_center_bounds: (0.5, 0.95),
            raise_steepness: 10.0,
            bluff_weight: 0.3,
            raise_cap: 0.99,
            call_center: 0.6,
            call_width: 0.2,
            trap_threshold: 0.9,
            trap_probability: 0.3,
            check_center: 0.5,
            check_steepness: 8.0,
            fold_center: 0.3,
            fold_steepness: 10.0,
            tally_decay: 0.9,
            default_bluff: 0.1,
            bluff_share: 0.4,
            aggressiveness_bounds: (0.5, 2.0),
            trap_detect_strength: 0.8,
            bluff_detect_strength: 0.4,
            trap_factor: 0.9,
            bluff_factor: 1.1,
        }
    }
}

impl BeliefConfig {
    pub fn prior(&self) -> Range {
        Range::heads_up_prior(self.prior_premium, self.prior_middle, self.prior_junk)
    }

    fn preflop_strength(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Premium => self.preflop_premium,
            Tier::Middle => self.preflop_middle,
            Tier::Junk => self.preflop_junk,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Exponentially decayed counts of the opponent's action types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionTally {
    counts: [f64; 5],
}

impl ActionTally {
    pub fn record(&mut self, kind: ActionKind, decay: f64) {
        for c in &mut self.counts {
            *c *= decay;
        }
        self.counts[kind.index()] += 1.0;
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    pub fn count(&self, kind: ActionKind) -> f64 {
        self.counts[kind.index()]
    }

    /// Share of raises and all-ins, or `None` before any action.
    pub fn aggressive_share(&self) -> Option<f64> {
        let total = self.total();
        if total <= f64::EPSILON {
            return None;
        }
        let aggressive = self.count(ActionKind::Raise) + self.count(ActionKind::AllIn);
        Some(aggressive / total)
    }
}

/// Posterior over one opponent's starting hand, plus the opponent's
/// aggressiveness index and recent action tally.
///
/// One engine models one opponent for one agent; engines are never shared.
#[derive(Debug, Clone)]
pub struct BeliefEngine<R = StandardRanker> {
    config: BeliefConfig,
    ranker: R,
    owner: Option<usize>,
    prior: Range,
    posterior: Range,
    aggressiveness: f64,
    tally: ActionTally,
}

impl BeliefEngine<StandardRanker> {
    pub fn new(config: BeliefConfig) -> Self {
        Self::with_ranker(config, StandardRanker)
    }
}

impl Default for BeliefEngine<StandardRanker> {
    fn default() -> Self {
        Self::new(BeliefConfig::default())
    }
}

impl<R: HandRanker> BeliefEngine<R> {
    pub fn with_ranker(config: BeliefConfig, ranker: R) -> Self {
        let prior = config.prior();
        Self {
            config,
            ranker,
            owner: None,
            posterior: prior.clone(),
            prior,
            aggressiveness: 1.0,
            tally: ActionTally::default(),
        }
    }

    /// Replace the prior (and the current posterior) with `prior`.
    pub fn with_prior(mut self, prior: Range) -> Self {
        self.posterior = prior.clone();
        self.prior = prior;
        self
    }

    /// Seat whose own actions are ignored by [`BeliefEngine::observe`].
    pub fn set_owner(&mut self, seat: usize) {
        self.owner = Some(seat);
    }

    pub fn config(&self) -> &BeliefConfig {
        &self.config
    }

    pub fn prior(&self) -> &Range {
        &self.prior
    }

    pub fn posterior(&self) -> &Range {
        &self.posterior
    }

    pub fn aggressiveness(&self) -> f64 {
        self.aggressiveness
    }

    pub fn tally(&self) -> &ActionTally {
        &self.tally
    }

    /// Start of a new hand: back to the prior. Aggressiveness and tallies persist.
    pub fn reset_hand(&mut self) {
        self.posterior = self.prior.clone();
    }

    /// Coarse probability that an aggressive action is a bluff.
    pub fn bluff_probability(&self) -> f64 {
        match self.tally.aggressive_share() {
            Some(share) => (share * self.config.bluff_share).clamp(0.0, 0.5),
            None => self.config.default_bluff,
        }
    }

    /// Feed one observed action. Actions by the owner are ignored.
    pub fn observe(&mut self, actor: usize, action: &Action, board: &[Card]) {
        if self.owner == Some(actor) {
            return;
        }
        self.tally.record(action.kind(), self.config.tally_decay);
        self.update(action.kind(), board);
    }

    /// Multiply the posterior by `L(kind | strength)` per category and renormalize.
    ///
    /// If every category is judged impossible the update is discarded and the
    /// posterior goes back to the prior.
    pub fn update(&mut self, kind: ActionKind, board: &[Card]) {
        let strengths = self.category_strengths(board);
        let mut weights = Vec::with_capacity(CATEGORY_COUNT);
        for (i, strength) in strengths.iter().enumerate() {
            let likelihood = strength.map_or(0.0, |s| self.likelihood(kind, s));
            weights.push(self.posterior[i] * likelihood);
        }
        match Range::from_weights(weights) {
            Some(next) => {
                self.posterior = next;
                log::debug!(
                    "belief update on {kind:?}: mean strength {:.3}",
                    self.expected_strength(&strengths)
                );
            }
            None => {
                log::warn!("belief update on {kind:?} left no mass; resetting to prior");
                self.posterior = self.prior.clone();
            }
        }
    }

    /// Strength in `[0, 1]` per category, `None` where the board rules it out.
    pub fn category_strengths(&self, board: &[Card]) -> Vec<Option<f64>> {
        let mut dead = CardMask::EMPTY;
        for &c in board {
            dead.insert(c);
        }
        HandCategory::all()
            .into_iter()
            .map(|category| {
                if board.len() < 3 {
                    return Some(self.config.preflop_strength(category.tier()));
                }
                let representative = category.live_combos(dead).into_iter().next()?;
                self.ranker.strength(board, &representative.as_array()).ok()
            })
            .collect()
    }

    /// `L(kind | strength, aggressiveness)`.
    pub fn likelihood(&self, kind: ActionKind, strength: f64) -> f64 {
        let cfg = &self.config;
        let aggr = self.aggressiveness;
        match kind {
            ActionKind::Raise | ActionKind::AllIn => {
                let (lo, hi) = cfg.raise_center_bounds;
                let shifted = cfg.raise_center + (1.0 - aggr) * cfg.raise_center_shift;
                let center = shifted.clamp(lo, hi);
                let value = sigmoid(cfg.raise_steepness * (strength - center));
                let bluff = self.bluff_probability() * aggr * cfg.bluff_weight;
                (value + bluff).min(cfg.raise_cap)
            }
            ActionKind::Call => {
                let width = cfg.call_width * (1.0 + (1.0 - aggr).max(0.0));
                let d = strength - cfg.call_center;
                (-(d * d) / (2.0 * width * width)).exp()
            }
            ActionKind::Check => {
                if strength > cfg.trap_threshold {
                    (cfg.trap_probability / aggr).min(1.0)
                } else {
                    1.0 - sigmoid(cfg.check_steepness * (strength - cfg.check_center))
                }
            }
            ActionKind::Fold => 1.0 - sigmoid(cfg.fold_steepness * (strength - cfg.fold_center)),
        }
    }

    /// Showdown feedback: revealed strong hands played passively read as
    /// trapping, weak hands played aggressively read as bluffing.
    pub fn analyze_showdown(
        &mut self,
        opponent: &HoleCards,
        board: &[Card],
        final_action: ActionKind,
    ) {
        let strength = match self.ranker.strength(board, &opponent.as_array()) {
            Ok(s) => s,
            Err(err) => {
                log::debug!("showdown feedback skipped: {err}");
                return;
            }
        };
        let cfg = &self.config;
        let before = self.aggressiveness;
        if strength > cfg.trap_detect_strength && final_action.is_passive() {
            self.aggressiveness *= cfg.trap_factor;
        } else if strength < cfg.bluff_detect_strength && final_action.is_aggressive() {
            self.aggressiveness *= cfg.bluff_factor;
        }
        let (lo, hi) = cfg.aggressiveness_bounds;
        self.aggressiveness = self.aggressiveness.clamp(lo, hi);
        if self.aggressiveness != before {
            log::debug!(
                "aggressiveness {before:.3} -> {:.3} ({final_action:?}, strength {strength:.3})",
                self.aggressiveness
            );
        }
    }

    fn expected_strength(&self, strengths: &[Option<f64>]) -> f64 {
        strengths.iter().enumerate().map(|(i, s)| self.posterior[i] * s.unwrap_or(0.0)).sum()
    }
}
