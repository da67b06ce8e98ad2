use crate::action::{Action, ActionKind};
use crate::belief::{BeliefConfig, BeliefEngine};
use crate::cards::Card;
use crate::equity::EquityEstimator;
use crate::hand::HoleCards;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::{Agent, TurnContext};

/// Tuning for [`BayesianAgent`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BayesianProfile {
    pub iterations: usize,
    /// Unopened pot: bet for value above this equity.
    pub value_threshold: f64,
    /// Facing a bet: raise above this equity.
    pub raise_threshold: f64,
    /// Below this equity a hand only ever bets as a bluff.
    pub weak_threshold: f64,
    /// Chance to check a value hand instead of betting.
    pub trap_frequency: f64,
    /// Chance to call a raising hand instead of raising.
    pub slowplay_frequency: f64,
    pub bluff_frequency: f64,
    /// Estimated opponent bluff rate above which the call threshold is lowered.
    pub bluff_alert: f64,
    /// Multiplier on pot odds once the opponent looks bluffy.
    pub bluff_call_factor: f64,
    pub bet_fraction: f64,
    pub raise_fraction: f64,
    pub bluff_fraction: f64,
    pub rng_seed: Option<u64>,
    pub belief: BeliefConfig,
}

impl Default for BayesianProfile {
    fn default() -> Self {
        Self {
            iterations: 300,
            value_threshold: 0.7,
            raise_threshold: 0.75,
            weak_threshold: 0.4,
            trap_frequency: 0.15,
            slowplay_frequency: 0.2,
            bluff_frequency: 0.1,
            bluff_alert: 0.3,
            bluff_call_factor: 0.8,
            bet_fraction: 0.6,
            raise_fraction: 0.75,
            bluff_fraction: 0.5,
            rng_seed: None,
            belief: BeliefConfig::default(),
        }
    }
}

impl BayesianProfile {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_belief(mut self, belief: BeliefConfig) -> Self {
        self.belief = belief;
        self
    }

    /// Disable trapping, slowplaying and bluffing.
    pub fn pure(mut self) -> Self {
        self.trap_frequency = 0.0;
        self.slowplay_frequency = 0.0;
        self.bluff_frequency = 0.0;
        self
    }
}

/// Range-aware player: equity against its posterior over the opponent's
/// hand, with a mixed strategy layered on top.
#[derive(Debug)]
pub struct BayesianAgent {
    name: String,
    profile: BayesianProfile,
    rng: StdRng,
    equity: EquityEstimator,
    belief: BeliefEngine,
}

impl BayesianAgent {
    pub fn new(name: impl Into<String>, profile: BayesianProfile) -> Self {
        let mut rng = match profile.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let equity = EquityEstimator::seeded(rng.next_u64());
        let belief = BeliefEngine::new(profile.belief.clone());
        Self { name: name.into(), profile, rng, equity, belief }
    }

    pub fn profile(&self) -> &BayesianProfile {
        &self.profile
    }

    pub fn belief(&self) -> &BeliefEngine {
        &self.belief
    }

    fn roll(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.rng.random::<f64>() < probability
    }

    fn unopened(&mut self, ctx: &TurnContext<'_>, equity: f64) -> Action {
        let p = &self.profile;
        let (value, trap, weak, bluff) =
            (p.value_threshold, p.trap_frequency, p.weak_threshold, p.bluff_frequency);
        if equity > value {
            if self.roll(trap) {
                log::debug!("{}: trapping with equity {equity:.3}", self.name);
                return Action::Check;
            }
            return ctx.raise_by_pot(self.profile.bet_fraction);
        }
        if equity < weak && self.roll(bluff) {
            log::debug!("{}: bluffing with equity {equity:.3}", self.name);
            return ctx.raise_by_pot(self.profile.bluff_fraction);
        }
        Action::Check
    }

    fn facing_bet(&mut self, ctx: &TurnContext<'_>, equity: f64) -> Action {
        let mut threshold = ctx.pot_odds();
        if self.belief.bluff_probability() > self.profile.bluff_alert {
            threshold *= self.profile.bluff_call_factor;
        }
        if equity > self.profile.raise_threshold {
            if self.roll(self.profile.slowplay_frequency) {
                log::debug!("{}: slowplaying with equity {equity:.3}", self.name);
                return Action::Call;
            }
            return ctx.raise_by_pot(self.profile.raise_fraction);
        }
        if equity >= threshold {
            return Action::Call;
        }
        if self.roll(self.profile.bluff_frequency) {
            log::debug!("{}: bluff-raising with equity {equity:.3}", self.name);
            return ctx.raise_by_pot(self.profile.raise_fraction);
        }
        Action::Fold
    }
}

impl Agent for BayesianAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_cards(&mut self, seat: usize, _hole: HoleCards) {
        self.belief.set_owner(seat);
        self.belief.reset_hand();
    }

    fn get_action(&mut self, ctx: &TurnContext<'_>) -> Action {
        let Some(hole) = ctx.seat.hole else {
            return ctx.passive();
        };
        let equity = self.equity.equity_vs_range(
            &hole.as_array(),
            ctx.board,
            self.belief.posterior(),
            self.profile.iterations,
        );
        if ctx.to_call() == 0 {
            self.unopened(ctx, equity)
        } else {
            self.facing_bet(ctx, equity)
        }
    }

    fn observe_action(&mut self, actor: usize, action: &Action, board: &[Card]) {
        self.belief.observe(actor, action, board);
    }

    fn analyze_showdown(&mut self, opponent: &HoleCards, board: &[Card], final_action: ActionKind) {
        self.belief.analyze_showdown(opponent, board, final_action);
    }
}
