use crate::action::Action;
use crate::equity::EquityEstimator;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};

use super::{Agent, TurnContext};

/// Tuning for [`BaselineAgent`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BaselineProfile {
    /// Equity above which the agent bets or raises.
    pub raise_threshold: f64,
    /// Bet and raise size as a fraction of the pot.
    pub bet_fraction: f64,
    /// Probability of picking a uniformly random legal action instead.
    pub noise: f64,
    pub iterations: usize,
    pub rng_seed: Option<u64>,
}

impl Default for BaselineProfile {
    fn default() -> Self {
        Self {
            raise_threshold: 0.75,
            bet_fraction: 0.6,
            noise: 0.1,
            iterations: 300,
            rng_seed: None,
        }
    }
}

impl BaselineProfile {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.clamp(0.0, 1.0);
        self
    }
}

/// Threshold player: equity against a random hand versus pot odds.
#[derive(Debug)]
pub struct BaselineAgent {
    name: String,
    profile: BaselineProfile,
    rng: StdRng,
    equity: EquityEstimator,
}

impl BaselineAgent {
    pub fn new(name: impl Into<String>, profile: BaselineProfile) -> Self {
        let mut rng = match profile.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let equity = EquityEstimator::seeded(rng.next_u64());
        Self { name: name.into(), profile, rng, equity }
    }

    pub fn profile(&self) -> &BaselineProfile {
        &self.profile
    }

    fn random_action(&mut self, ctx: &TurnContext<'_>) -> Action {
        let raise = ctx.raise_by_pot(self.profile.bet_fraction);
        let choices = if ctx.to_call() == 0 {
            vec![Action::Check, raise]
        } else {
            vec![Action::Fold, Action::Call, raise]
        };
        choices.choose(&mut self.rng).copied().unwrap_or_else(|| ctx.passive())
    }
}

impl Agent for BaselineAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(&mut self, ctx: &TurnContext<'_>) -> Action {
        let Some(hole) = ctx.seat.hole else {
            return ctx.passive();
        };
        if self.rng.random::<f64>() < self.profile.noise {
            return self.random_action(ctx);
        }
        let equity =
            self.equity.equity_vs_random(&hole.as_array(), ctx.board, self.profile.iterations);
        if equity > self.profile.raise_threshold {
            return ctx.raise_by_pot(self.profile.bet_fraction);
        }
        if ctx.to_call() == 0 {
            Action::Check
        } else if equity >= ctx.pot_odds() {
            Action::Call
        } else {
            Action::Fold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SeatView;
    use crate::cards::{parse_cards, Card};

    fn ctx<'a>(hole: &str, board: &'a [Card], current_bet: u64, pot: u64) -> TurnContext<'a> {
        TurnContext {
            current_bet,
            min_raise: (current_bet + 20).max(2 * current_bet),
            pot,
            big_blind: 20,
            board,
            seat: SeatView {
                seat: 0,
                stack: 1000,
                round_bet: 0,
                hole: Some(hole.parse().unwrap()),
            },
        }
    }

    fn quiet() -> BaselineAgent {
        BaselineAgent::new("base", BaselineProfile::default().with_seed(3).with_noise(0.0))
    }

    #[test]
    fn raises_the_nuts() {
        let board = parse_cards("Qs Js Ts 2d 3c").unwrap();
        let action = quiet().get_action(&ctx("As Ks", &board, 0, 100));
        assert_eq!(action, Action::Raise(60));
    }

    #[test]
    fn folds_air_to_a_big_bet() {
        let board = parse_cards("As Ks Qd Jd 9h").unwrap();
        let action = quiet().get_action(&ctx("2c 3h", &board, 500, 600));
        assert_eq!(action, Action::Fold);
    }

    #[test]
    fn checks_middling_hands_when_free() {
        let board = parse_cards("Kh 9s 4c").unwrap();
        let action = quiet().get_action(&ctx("8d 7d", &board, 0, 40));
        assert_eq!(action, Action::Check);
    }

    #[test]
    fn noisy_agent_stays_legal() {
        let profile = BaselineProfile::default().with_seed(11).with_noise(1.0);
        let mut agent = BaselineAgent::new("noisy", profile);
        let board = parse_cards("Kh 9s 4c").unwrap();
        let c = ctx("8d 7d", &board, 100, 200);
        for _ in 0..50 {
            assert!(c.is_legal(agent.get_action(&c)));
        }
    }
}
