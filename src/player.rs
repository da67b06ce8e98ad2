use crate::hand::HoleCards;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChipError {
    #[error("invalid amount: {amount} (stack {stack})")]
    InvalidAmount { amount: u64, stack: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    /// Busted: no chips left at the start of a hand. Never left again.
    Out,
}

/// Seat state carried across hands; only the stack survives `reset_hand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: usize,
    name: String,
    stack: u64,
    hole: Option<HoleCards>,
    round_bet: u64,
    contributed: u64,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, stack: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: None,
            round_bet: 0,
            contributed: 0,
            status: if stack == 0 { PlayerStatus::Out } else { PlayerStatus::Active },
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Chips committed on the current street.
    pub fn round_bet(&self) -> u64 {
        self.round_bet
    }

    /// Chips committed this hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Can still be asked for a decision.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Clear per-hand state. Busted players stay out.
    pub fn reset_hand(&mut self) {
        self.hole = None;
        self.round_bet = 0;
        self.contributed = 0;
        if self.stack == 0 || self.status == PlayerStatus::Out {
            self.status = PlayerStatus::Out;
        } else {
            self.status = PlayerStatus::Active;
        }
    }

    pub fn receive_cards(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_bet = 0;
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    /// Move `amount` chips from the stack into the pot. Committing the last
    /// chip makes the player all-in.
    pub fn commit(&mut self, amount: u64) -> Result<u64, ChipError> {
        if amount > self.stack {
            return Err(ChipError::InvalidAmount { amount, stack: self.stack });
        }
        self.stack -= amount;
        self.round_bet += amount;
        self.contributed += amount;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        Ok(amount)
    }

    /// Post a forced bet, capped at the stack.
    pub fn post_blind(&mut self, blind: u64) -> u64 {
        let amount = blind.min(self.stack);
        self.commit(amount).unwrap_or(0)
    }

    pub(crate) fn award(&mut self, amount: u64) {
        self.stack += amount;
    }

    /// Return an uncalled excess from the pot.
    pub(crate) fn refund(&mut self, amount: u64) {
        let amount = amount.min(self.contributed);
        self.contributed -= amount;
        self.round_bet = self.round_bet.saturating_sub(amount);
        self.stack += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_chips_and_goes_all_in() {
        let mut p = Player::new(0, "hero", 100);
        assert_eq!(p.commit(40), Ok(40));
        assert_eq!((p.stack(), p.round_bet(), p.contributed()), (60, 40, 40));
        assert_eq!(p.status(), PlayerStatus::Active);
        p.commit(60).unwrap();
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn over_commit_is_rejected_not_clamped() {
        let mut p = Player::new(0, "hero", 10);
        assert_eq!(p.commit(11), Err(ChipError::InvalidAmount { amount: 11, stack: 10 }));
        assert_eq!(p.stack(), 10);
    }

    #[test]
    fn short_blind_is_capped() {
        let mut p = Player::new(1, "villain", 3);
        assert_eq!(p.post_blind(10), 3);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn busted_players_stay_out() {
        let mut p = Player::new(0, "hero", 5);
        p.commit(5).unwrap();
        p.reset_hand();
        assert_eq!(p.status(), PlayerStatus::Out);
        p.award(50);
        p.reset_hand();
        assert_eq!(p.status(), PlayerStatus::Out);
    }

    #[test]
    fn players_never_share_hands() {
        let mut a = Player::new(0, "a", 100);
        let b = Player::new(1, "b", 100);
        a.receive_cards("As Kd".parse().unwrap());
        assert!(a.hole().is_some());
        assert!(b.hole().is_none());
    }

    #[test]
    fn refund_returns_uncalled_chips() {
        let mut p = Player::new(0, "hero", 100);
        p.commit(80).unwrap();
        p.refund(30);
        assert_eq!((p.stack(), p.contributed()), (50, 50));
    }
}
