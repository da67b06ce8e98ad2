use crate::cards::{Card, Rank};
use core::cmp::Ordering;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Best-five-card evaluation. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub category: Category,
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl HandValue {
    const CAT_SHIFT: u32 = 20;
    const RANK_STRIDE: u32 = 4;

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Pack a category and up to five rank tiebreakers, most significant first.
    /// Rank values 2..=14 fit four bits; absent tiebreakers stay zero.
    fn from_parts(category: Category, ranks_desc: &[u8]) -> Self {
        let mut v = (category as u32) << Self::CAT_SHIFT;
        for (i, &r) in ranks_desc.iter().take(5).enumerate() {
            v |= (r as u32) << (Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1));
        }
        HandValue(v)
    }

    pub fn category(self) -> Category {
        match self.0 >> Self::CAT_SHIFT {
            0 => Category::HighCard,
            1 => Category::Pair,
            2 => Category::TwoPair,
            3 => Category::ThreeOfAKind,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOfAKind,
            _ => Category::StraightFlush,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("need 5 to 7 cards to evaluate, got {0}")]
    CardCount(usize),
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    // Distinct ranks ordered by multiplicity, then rank, both descending.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let ranks: Vec<u8> = groups.iter().map(|&(_, r)| r).collect();

    let straight_top = if ranks.len() == 5 {
        if ranks[0] - ranks[4] == 4 {
            Some(ranks[0])
        } else if ranks == [14, 5, 4, 3, 2] {
            Some(5)
        } else {
            None
        }
    } else {
        None
    };

    let category = match (straight_top, is_flush, groups[0].0, groups.get(1).map(|g| g.0)) {
        (Some(_), true, _, _) => Category::StraightFlush,
        (_, _, 4, _) => Category::FourOfAKind,
        (_, _, 3, Some(2)) => Category::FullHouse,
        (_, true, _, _) => Category::Flush,
        (Some(_), false, _, _) => Category::Straight,
        (_, _, 3, _) => Category::ThreeOfAKind,
        (_, _, 2, Some(2)) => Category::TwoPair,
        (_, _, 2, _) => Category::Pair,
        _ => Category::HighCard,
    };

    let value = match (category, straight_top) {
        (Category::StraightFlush | Category::Straight, Some(top)) => {
            HandValue::from_parts(category, &[top])
        }
        _ => HandValue::from_parts(category, &ranks),
    };
    Evaluation { category, value }
}

/// Evaluate the best five-card hand among 5 to 7 cards.
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::CardCount(n));
    }
    let mut best: Option<Evaluation> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let ev = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.map_or(true, |cur| ev > cur) {
                            best = Some(ev);
                        }
                    }
                }
            }
        }
    }
    best.ok_or(EvalError::CardCount(n))
}

/// Every distinct five-card hand value, strongest first. There are 7462 of them.
pub(crate) fn all_hand_values() -> Vec<HandValue> {
    use crate::cards::Suit;
    const OFFSUIT: [Suit; 5] =
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    let mut values = Vec::with_capacity(7462 + 64);
    let ranks = Rank::ALL;
    for a in 0..13 {
        for b in a..13 {
            for c in b..13 {
                for d in c..13 {
                    for e in d..13 {
                        let idx = [a, b, c, d, e];
                        // five of a rank cannot exist
                        if a == e {
                            continue;
                        }
                        // consecutive equal ranks get distinct suits from the cycle
                        let mixed: [Card; 5] =
                            core::array::from_fn(|i| Card::new(ranks[idx[i]], OFFSUIT[i]));
                        values.push(evaluate_five(&mixed).value);
                        let distinct = idx.windows(2).all(|w| w[0] != w[1]);
                        if distinct {
                            let suited: [Card; 5] =
                                core::array::from_fn(|i| Card::new(ranks[idx[i]], Suit::Hearts));
                            values.push(evaluate_five(&suited).value);
                        }
                    }
                }
            }
        }
    }
    values.sort_unstable_by(|x, y| y.cmp(x));
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn evaluate_five_categories() {
        let cases = [
            ("As Ks Qs Js Ts", Category::StraightFlush),
            ("Kc Kd Kh Ks 2s", Category::FourOfAKind),
            ("Tc Td Th 2s 2h", Category::FullHouse),
            ("Ah 9h 7h 3h 2h", Category::Flush),
            ("Ac 2d 3h 4s 5c", Category::Straight),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s", Category::TwoPair),
            ("Ah Ad Ts 9c 2d", Category::Pair),
            ("Ah Kd 7s 5c 2d", Category::HighCard),
        ];
        for (cards, cat) in cases {
            assert_eq!(evaluate_five(&five(cards)).category, cat, "{cards}");
        }
    }

    #[test]
    fn wheel_is_the_lowest_straight() {
        let wheel = evaluate_five(&five("Ac 2d 3h 4s 5c"));
        let six_high = evaluate_five(&five("6c 2d 3h 4s 5c"));
        assert!(six_high > wheel);
    }

    #[test]
    fn kickers_break_ties() {
        let a = evaluate_five(&five("Kc Kd As 9c 2d"));
        let b = evaluate_five(&five("Kh Ks Qs 9d 2c"));
        assert!(a > b);
        let c = evaluate_five(&five("Kh Ks Ad 9h 2h"));
        assert_eq!(a, c);
    }

    #[test]
    fn best_of_seven_finds_hidden_flush() {
        let cards = parse_cards("2h 7h Kh 9h Ah Kd Ks").unwrap();
        let ev = evaluate_best(&cards).unwrap();
        assert_eq!(ev.category, Category::Flush);
    }

    #[test]
    fn best_rejects_wrong_card_counts() {
        let cards = vec![Card::new(Rank::Ace, Suit::Spades); 4];
        assert_eq!(evaluate_best(&cards).unwrap_err(), EvalError::CardCount(4));
    }

    #[test]
    fn there_are_7462_distinct_hands() {
        let values = all_hand_values();
        assert_eq!(values.len(), 7462);
        assert_eq!(values[0].category(), Category::StraightFlush);
        assert_eq!(values[7461].category(), Category::HighCard);
    }
}
