//! The 169 canonical starting-hand categories and probability ranges over them.

use crate::cards::{Card, Rank, Suit};
use crate::hand::{CardMask, HoleCards};
use std::fmt;
use std::ops::Index;

/// Number of canonical starting-hand categories (13 pairs, 78 suited, 78 offsuit).
pub const CATEGORY_COUNT: usize = 169;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Pair,
    Suited,
    Offsuit,
}

/// Coarse strength tier used by the heads-up prior and the preflop strength lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Pairs and two broadway cards.
    Premium,
    /// Any ace, suited connectors and one-gappers.
    Middle,
    /// Everything else.
    Junk,
}

/// A starting-hand category such as `AKs`, `T9o` or `77`.
///
/// `high >= low` always; for pairs they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandCategory {
    high: Rank,
    low: Rank,
    shape: Shape,
}

impl HandCategory {
    pub fn new(a: Rank, b: Rank, suited: bool) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let shape = if high == low {
            Shape::Pair
        } else if suited {
            Shape::Suited
        } else {
            Shape::Offsuit
        };
        Self { high, low, shape }
    }

    /// The category a concrete hand belongs to.
    pub fn of(hole: &HoleCards) -> Self {
        let (a, b) = (hole.first(), hole.second());
        Self::new(a.rank(), b.rank(), a.suit() == b.suit())
    }

    pub fn high(self) -> Rank {
        self.high
    }

    pub fn low(self) -> Rank {
        self.low
    }

    pub fn shape(self) -> Shape {
        self.shape
    }

    /// Dense index in `0..169`: pairs first, then suited, then offsuit.
    pub fn index(self) -> usize {
        let (h, l) = (self.high.index(), self.low.index());
        // non-pairs: every (high, low) with a smaller high rank comes first
        let offset = h * h.saturating_sub(1) / 2 + l;
        match self.shape {
            Shape::Pair => h,
            Shape::Suited => 13 + offset,
            Shape::Offsuit => 13 + 78 + offset,
        }
    }

    /// All 169 categories in [`HandCategory::index`] order.
    pub fn all() -> Vec<HandCategory> {
        let mut out = Vec::with_capacity(CATEGORY_COUNT);
        for &r in &Rank::ALL {
            out.push(HandCategory::new(r, r, false));
        }
        for suited in [true, false] {
            for (h, &high) in Rank::ALL.iter().enumerate() {
                for &low in &Rank::ALL[..h] {
                    out.push(HandCategory::new(high, low, suited));
                }
            }
        }
        out
    }

    pub fn tier(self) -> Tier {
        let gap = self.high.value() - self.low.value();
        let broadway = self.low >= Rank::Ten;
        match self.shape {
            Shape::Pair => Tier::Premium,
            _ if broadway => Tier::Premium,
            _ if self.high == Rank::Ace => Tier::Middle,
            Shape::Suited if gap <= 2 => Tier::Middle,
            _ => Tier::Junk,
        }
    }

    /// Every concrete two-card hand in this category (6 pairs, 4 suited, 12 offsuit).
    pub fn combos(self) -> Vec<HoleCards> {
        let mut out = Vec::with_capacity(12);
        match self.shape {
            Shape::Pair => {
                for (i, &s1) in Suit::ALL.iter().enumerate() {
                    for &s2 in &Suit::ALL[i + 1..] {
                        push_combo(&mut out, Card::new(self.high, s1), Card::new(self.low, s2));
                    }
                }
            }
            Shape::Suited => {
                for &s in &Suit::ALL {
                    push_combo(&mut out, Card::new(self.high, s), Card::new(self.low, s));
                }
            }
            Shape::Offsuit => {
                for &s1 in &Suit::ALL {
                    for &s2 in Suit::ALL.iter().filter(|&&s| s != s1) {
                        push_combo(&mut out, Card::new(self.high, s1), Card::new(self.low, s2));
                    }
                }
            }
        }
        out
    }

    /// Concrete combos that use none of the `dead` cards.
    pub fn live_combos(self, dead: CardMask) -> Vec<HoleCards> {
        self.combos()
            .into_iter()
            .filter(|h| !dead.contains(h.first()) && !dead.contains(h.second()))
            .collect()
    }
}

fn push_combo(out: &mut Vec<HoleCards>, a: Card, b: Card) {
    if let Ok(hole) = HoleCards::try_new(a, b) {
        out.push(hole);
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Pair => write!(f, "{}{}", self.high, self.low),
            Shape::Suited => write!(f, "{}{}s", self.high, self.low),
            Shape::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

/// A probability mass over the 169 categories. Masses are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    mass: Vec<f64>,
}

impl Range {
    /// Equal mass on every category.
    pub fn uniform() -> Self {
        Self { mass: vec![1.0 / CATEGORY_COUNT as f64; CATEGORY_COUNT] }
    }

    /// Build a normalized range from per-category weights in index order.
    /// Returns `None` if the weights are not 169 finite, non-negative values with a positive sum.
    pub fn from_weights(weights: Vec<f64>) -> Option<Self> {
        if weights.len() != CATEGORY_COUNT || weights.iter().any(|w| !w.is_finite() || *w < 0.0)
        {
            return None;
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(Self { mass: weights.into_iter().map(|w| w / total).collect() })
    }

    /// A wide heads-up range weighted by [`Tier`].
    pub fn heads_up_prior(premium: f64, middle: f64, junk: f64) -> Self {
        let weights = HandCategory::all()
            .into_iter()
            .map(|c| match c.tier() {
                Tier::Premium => premium,
                Tier::Middle => middle,
                Tier::Junk => junk,
            })
            .collect();
        Self::from_weights(weights).unwrap_or_else(Self::uniform)
    }

    pub fn mass(&self, category: HandCategory) -> f64 {
        self.mass[category.index()]
    }

    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    pub fn total(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Categories with their mass, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, f64)> + '_ {
        HandCategory::all().into_iter().zip(self.mass.iter().copied())
    }

    /// Mass-weighted mean of `f` over categories.
    pub fn expectation<F: Fn(HandCategory) -> f64>(&self, f: F) -> f64 {
        self.iter().map(|(c, m)| m * f(c)).sum()
    }
}

impl Index<usize> for Range {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.mass[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn there_are_169_categories_with_dense_indices() {
        let all = HandCategory::all();
        assert_eq!(all.len(), CATEGORY_COUNT);
        for (i, c) in all.iter().enumerate() {
            assert_eq!(c.index(), i, "{c}");
        }
        let labels: HashSet<String> = all.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels.len(), CATEGORY_COUNT);
    }

    #[test]
    fn combo_counts_total_1326() {
        let total: usize = HandCategory::all().iter().map(|c| c.combos().len()).sum();
        assert_eq!(total, 1326);
        let aks = HandCategory::new(Rank::Ace, Rank::King, true);
        assert_eq!(aks.to_string(), "AKs");
        assert_eq!(aks.combos().len(), 4);
    }

    #[test]
    fn live_combos_skip_dead_cards() {
        let mut dead = CardMask::EMPTY;
        dead.insert(Card::new(Rank::Ace, Suit::Spades));
        let aa = HandCategory::new(Rank::Ace, Rank::Ace, false);
        assert_eq!(aa.live_combos(dead).len(), 3);
    }

    #[test]
    fn category_of_concrete_hand() {
        let hole: HoleCards = "Td 9d".parse().unwrap();
        assert_eq!(HandCategory::of(&hole).to_string(), "T9s");
        let hole: HoleCards = "2c Ah".parse().unwrap();
        assert_eq!(HandCategory::of(&hole).to_string(), "A2o");
    }

    #[test]
    fn tiers_follow_heads_up_intuition() {
        assert_eq!(HandCategory::new(Rank::Two, Rank::Two, false).tier(), Tier::Premium);
        assert_eq!(HandCategory::new(Rank::King, Rank::Jack, false).tier(), Tier::Premium);
        assert_eq!(HandCategory::new(Rank::Ace, Rank::Two, false).tier(), Tier::Middle);
        assert_eq!(HandCategory::new(Rank::Eight, Rank::Seven, true).tier(), Tier::Middle);
        assert_eq!(HandCategory::new(Rank::Eight, Rank::Two, false).tier(), Tier::Junk);
    }

    #[test]
    fn prior_is_normalized_and_tiered() {
        let prior = Range::heads_up_prior(3.0, 2.0, 1.0);
        assert!((prior.total() - 1.0).abs() < 1e-12);
        let aa = HandCategory::new(Rank::Ace, Rank::Ace, false);
        let trash = HandCategory::new(Rank::Seven, Rank::Two, false);
        assert!(prior.mass(aa) > prior.mass(trash));
    }

    #[test]
    fn from_weights_rejects_bad_input() {
        assert!(Range::from_weights(vec![0.0; CATEGORY_COUNT]).is_none());
        assert!(Range::from_weights(vec![1.0; 3]).is_none());
        let mut w = vec![1.0; CATEGORY_COUNT];
        w[0] = -1.0;
        assert!(Range::from_weights(w).is_none());
    }
}
