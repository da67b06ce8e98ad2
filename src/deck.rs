use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested}, remaining {remaining}")]
    Exhausted { requested: usize, remaining: usize },
}

/// What `draw` does when fewer cards remain than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Fail with [`DeckError::Exhausted`].
    Fail,
    /// Rebuild all 52 cards, reshuffle, and retry once.
    #[default]
    Reshuffle,
}

/// A standard 52-card deck that owns its shuffling RNG.
///
/// Cards are drawn from the end of the internal vector, so each draw is O(1).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
    policy: ExhaustionPolicy,
}

impl Deck {
    /// All 52 cards in canonical order (suit-major, ranks ascending), unshuffled.
    ///
    /// ```
    /// use bayes_holdem::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }

    /// A canonical-order deck whose later shuffles are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            cards: canonical_cards(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            policy: ExhaustionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still in the deck, bottom first.
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Uniformly permute the cards still in the deck.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Restore all 52 cards and shuffle them.
    pub fn reset(&mut self) {
        self.cards = canonical_cards();
        self.shuffle();
    }

    /// Draw `n` cards from the top of the deck.
    ///
    /// Under [`ExhaustionPolicy::Reshuffle`] a short deck is reset once before
    /// failing, so a card is never handed out twice from the same pass.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            if self.policy == ExhaustionPolicy::Fail {
                return Err(DeckError::Exhausted { requested: n, remaining: self.cards.len() });
            }
            log::debug!("deck short ({} < {n}), resetting", self.cards.len());
            self.reset();
            if self.cards.len() < n {
                return Err(DeckError::Exhausted { requested: n, remaining: self.cards.len() });
            }
        }
        let at = self.cards.len() - n;
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        Ok(drawn)
    }

    /// Draw a single card.
    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        let mut drawn = self.draw(1)?;
        drawn.pop().ok_or(DeckError::Exhausted { requested: 1, remaining: 0 })
    }

    /// Discard the top card.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw_one().map(|_| ())
    }
}

fn canonical_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for &s in &Suit::ALL {
        for &r in &Rank::ALL {
            cards.push(Card::new(r, s));
        }
    }
    cards
}
