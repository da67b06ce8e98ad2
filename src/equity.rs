//! Monte Carlo equity: win probability against a random hand or a weighted range.
//!
//! Malformed input never aborts a decision; every failure path yields
//! [`NEUTRAL_EQUITY`].

use crate::cards::Card;
use crate::hand::{known_cards, CardMask, HoleCards};
use crate::oracle::{HandRanker, StandardRanker};
use crate::range::{HandCategory, Range};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;

/// Returned whenever there is not enough information to simulate.
pub const NEUTRAL_EQUITY: f64 = 0.5;

/// Win/tie/loss counts from the hero's perspective.
///
/// Merging is commutative and associative, so trials can be split across workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl Tally {
    pub fn record(&mut self, hero_score: u16, villain_score: u16) {
        match hero_score.cmp(&villain_score) {
            Ordering::Less => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Greater => self.losses += 1,
        }
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    pub fn trials(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// `(wins + ties / 2) / trials`, or neutral when nothing was recorded.
    pub fn equity(&self) -> f64 {
        let n = self.trials();
        if n == 0 {
            return NEUTRAL_EQUITY;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / n as f64
    }
}

/// Sequential Monte Carlo equity estimator with its own seedable RNG.
#[derive(Debug, Clone)]
pub struct EquityEstimator<R = StandardRanker> {
    ranker: R,
    rng: ChaCha8Rng,
}

impl EquityEstimator<StandardRanker> {
    pub fn new() -> Self {
        Self::seeded(rand::rng().random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_ranker(StandardRanker, seed)
    }
}

impl Default for EquityEstimator<StandardRanker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: HandRanker> EquityEstimator<R> {
    pub fn with_ranker(ranker: R, seed: u64) -> Self {
        Self { ranker, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn ranker(&self) -> &R {
        &self.ranker
    }

    /// Equity of `hero` against one uniformly random opponent hand.
    ///
    /// On a complete board only the opponent's hand is random, so half the
    /// iterations are run.
    pub fn equity_vs_random(&mut self, hero: &[Card], board: &[Card], iterations: usize) -> f64 {
        let known = match known_cards(hero, board) {
            Ok(mask) => mask,
            Err(err) => {
                log::warn!("equity fallback on malformed input: {err}");
                return NEUTRAL_EQUITY;
            }
        };
        let mut pool = known.complement();
        let runout = 5 - board.len();
        let needed = runout + 2;
        if pool.len() < needed || iterations == 0 {
            return NEUTRAL_EQUITY;
        }
        let iterations = if runout == 0 { (iterations / 2).max(1) } else { iterations };

        let mut full_board = Vec::with_capacity(5);
        let mut tally = Tally::default();
        for _ in 0..iterations {
            let (drawn, _) = pool.partial_shuffle(&mut self.rng, needed);
            let villain = [drawn[0], drawn[1]];
            full_board.clear();
            full_board.extend_from_slice(board);
            full_board.extend_from_slice(&drawn[2..]);
            self.showdown(hero, &villain, &full_board, &mut tally);
        }
        tally.equity()
    }

    /// Equity of `hero` against an opponent drawn from `range`.
    ///
    /// Categories are picked by their mass, then a live concrete combo
    /// uniformly within the category; combos touching known cards are skipped.
    pub fn equity_vs_range(
        &mut self,
        hero: &[Card],
        board: &[Card],
        range: &Range,
        iterations: usize,
    ) -> f64 {
        let known = match known_cards(hero, board) {
            Ok(mask) => mask,
            Err(err) => {
                log::warn!("range equity fallback on malformed input: {err}");
                return NEUTRAL_EQUITY;
            }
        };
        let (combos, weights) = weighted_combos(range, known);
        if combos.is_empty() || iterations == 0 {
            return NEUTRAL_EQUITY;
        }
        let picker = match WeightedIndex::new(&weights) {
            Ok(picker) => picker,
            Err(err) => {
                log::warn!("range equity fallback on degenerate weights: {err}");
                return NEUTRAL_EQUITY;
            }
        };

        let mut pool = known.complement();
        let runout = 5 - board.len();
        let mut full_board = Vec::with_capacity(5);
        let mut tally = Tally::default();
        for _ in 0..iterations {
            let villain = combos[picker.sample(&mut self.rng)];
            full_board.clear();
            full_board.extend_from_slice(board);
            if runout > 0 {
                // two spare draws cover the villain's cards landing in the sample
                let take = (runout + 2).min(pool.len());
                let (drawn, _) = pool.partial_shuffle(&mut self.rng, take);
                let live = drawn.iter().copied().filter(|c| !villain.contains(*c));
                full_board.extend(live.take(runout));
                if full_board.len() < 5 {
                    continue;
                }
            }
            self.showdown(hero, &villain.as_array(), &full_board, &mut tally);
        }
        tally.equity()
    }

    fn showdown(&self, hero: &[Card], villain: &[Card], board: &[Card], tally: &mut Tally) {
        let scores = (self.ranker.evaluate(board, hero), self.ranker.evaluate(board, villain));
        match scores {
            (Ok(h), Ok(v)) => tally.record(h, v),
            (Err(err), _) | (_, Err(err)) => log::debug!("skipping trial: {err}"),
        }
    }
}

/// Expand a range into live concrete combos, each weighted by its category's
/// mass split evenly over the category's live combos.
fn weighted_combos(range: &Range, dead: CardMask) -> (Vec<HoleCards>, Vec<f64>) {
    let mut combos = Vec::new();
    let mut weights = Vec::new();
    for (category, mass) in range.iter() {
        if mass <= 0.0 {
            continue;
        }
        let live = HandCategory::live_combos(category, dead);
        if live.is_empty() {
            continue;
        }
        let each = mass / live.len() as f64;
        for hole in live {
            combos.push(hole);
            weights.push(each);
        }
    }
    (combos, weights)
}
