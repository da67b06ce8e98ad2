//! Hand orchestration: blinds, deal, four betting streets, showdown and payout.
//!
//! The pot holds every committed chip as soon as it is committed, so
//! `sum(stacks) + pot` is constant for the whole hand and drops the pot to
//! zero only at payout.

use crate::action::{Action, ActionKind};
use crate::agents::{Agent, SeatView, TurnContext};
use crate::cards::Card;
use crate::deck::{Deck, DeckError, ExhaustionPolicy};
use crate::hand::{Board, HandError, HoleCards};
use crate::oracle::{HandRanker, RankError, StandardRanker};
use crate::player::{ChipError, Player, PlayerStatus};
use core::fmt;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Street {
    Idle,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Community cards dealt when entering this street.
    fn cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    AllIn,
    Refund,
    Win,
    Split,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::SmallBlind => "SB",
            HistoryVerb::BigBlind => "BB",
            HistoryVerb::Fold => "Fold",
            HistoryVerb::Check => "Check",
            HistoryVerb::Call => "Call",
            HistoryVerb::RaiseTo => "Raise to",
            HistoryVerb::AllIn => "All-in",
            HistoryVerb::Refund => "Uncalled",
            HistoryVerb::Win => "Win",
            HistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seat: usize,
    pub street: Street,
    pub verb: HistoryVerb,
    pub amount: Option<u64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("need at least two players with chips, have {0}")]
    NotEnoughPlayers(usize),
    #[error("seat {seat} chose {action}: {reason}")]
    IllegalAction { seat: usize, action: Action, reason: &'static str },
    #[error(transparent)]
    Chips(#[from] ChipError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("bad deal: {0}")]
    Deal(#[from] HandError),
    #[error("showdown evaluation failed: {0}")]
    Rank(#[from] RankError),
}

/// Table stakes and randomness.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    /// Stack given to seats added with [`Game::add_player`].
    pub starting_stack: u64,
    /// Deck seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { small_blind: 10, big_blind: 20, starting_stack: 1000, seed: None }
    }
}

impl TableConfig {
    pub fn with_blinds(mut self, small_blind: u64, big_blind: u64) -> Self {
        self.small_blind = small_blind;
        self.big_blind = big_blind;
        self
    }

    pub fn with_starting_stack(mut self, stack: u64) -> Self {
        self.starting_stack = stack;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownHand {
    pub seat: usize,
    pub hole: HoleCards,
    pub score: u16,
    pub class: &'static str,
}

/// Outcome of one [`Game::start_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSummary {
    /// Seats that received chips, in seat order.
    pub winners: Vec<usize>,
    /// Chips received per seat, refunds excluded.
    pub payouts: Vec<u64>,
    /// Empty when the hand ended on a fold.
    pub showdown: Vec<ShownHand>,
    pub board: Vec<Card>,
}

/// A table of seated agents playing no-limit hold'em, one hand per call to
/// [`Game::start_hand`].
pub struct Game {
    config: TableConfig,
    ranker: StandardRanker,
    deck: Deck,
    board: Board,
    players: Vec<Player>,
    agents: Vec<Box<dyn Agent>>,
    pot: u64,
    dealer: usize,
    street: Street,
    current_bet: u64,
    history: Vec<HistoryEntry>,
    hands_played: u64,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("players", &self.players)
            .field("pot", &self.pot)
            .field("dealer", &self.dealer)
            .field("street", &self.street)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(config: TableConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            ranker: StandardRanker,
            // a reshuffle mid-hand could deal a card twice
            deck: Deck::seeded(seed).with_policy(ExhaustionPolicy::Fail),
            board: Board::new(Vec::new()),
            players: Vec::new(),
            agents: Vec::new(),
            pot: 0,
            dealer: 0,
            street: Street::Idle,
            current_bet: 0,
            history: Vec::new(),
            hands_played: 0,
            config,
        }
    }

    /// Seat `agent` with the configured starting stack; returns its seat index.
    pub fn add_player(&mut self, agent: Box<dyn Agent>) -> usize {
        let stack = self.config.starting_stack;
        self.add_player_with_stack(agent, stack)
    }

    pub fn add_player_with_stack(&mut self, agent: Box<dyn Agent>, stack: u64) -> usize {
        let seat = self.players.len();
        self.players.push(Player::new(seat, agent.name(), stack));
        self.agents.push(agent);
        seat
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn stack(&self, seat: usize) -> Option<u64> {
        self.players.get(seat).map(Player::stack)
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Button for the next hand.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn street(&self) -> Street {
        self.street
    }

    /// Actions of the last (or current) hand.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Sum of all stacks plus the pot.
    pub fn chips_in_play(&self) -> u64 {
        self.players.iter().map(Player::stack).sum::<u64>() + self.pot
    }

    /// Seats that are not busted.
    pub fn seated(&self) -> usize {
        self.players.iter().filter(|p| p.status() != PlayerStatus::Out && p.stack() > 0).count()
    }

    /// Smallest legal raise target given the street's current bet.
    pub fn min_raise(&self) -> u64 {
        (self.current_bet + self.config.big_blind).max(2 * self.current_bet)
    }

    /// Play one hand to completion.
    ///
    /// Fails without touching any stack when fewer than two seats have chips.
    /// Any other error, such as [`GameError::IllegalAction`], voids the hand:
    /// every contribution goes back to its player and the button stays put.
    pub fn start_hand(&mut self) -> Result<HandSummary, GameError> {
        let seated = self.seated();
        if seated < 2 {
            return Err(GameError::NotEnoughPlayers(seated));
        }
        self.reset_hand();
        self.play_hand(seated).map_err(|err| {
            self.void_hand(&err);
            err
        })
    }

    fn play_hand(&mut self, seated: usize) -> Result<HandSummary, GameError> {
        let (sb, bb) = self.post_blinds(seated == 2);
        self.deal_hole_cards()?;

        let mut first = if seated == 2 { sb } else { self.next_seat(bb) };
        for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
            if self.contenders() < 2 {
                break;
            }
            if street != Street::Preflop {
                self.deal_street(street)?;
                first = self.next_seat(self.dealer);
            }
            self.street = street;
            self.betting_round(first)?;
        }

        let summary = if self.contenders() >= 2 { self.showdown()? } else { self.fold_out() };
        log::info!(
            "hand {} over: winners {:?}, payouts {:?}, board [{}]",
            self.hands_played,
            summary.winners,
            summary.payouts,
            self.board.as_slice().iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        );
        self.hands_played += 1;
        self.rotate_dealer();
        Ok(summary)
    }

    fn void_hand(&mut self, err: &GameError) {
        log::warn!("hand {} voided: {err}", self.hands_played);
        for p in &mut self.players {
            let contributed = p.contributed();
            p.refund(contributed);
        }
        self.pot = 0;
        self.current_bet = 0;
        self.street = Street::Idle;
    }

    fn reset_hand(&mut self) {
        for p in &mut self.players {
            p.reset_hand();
        }
        self.deck.reset();
        self.board.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.history.clear();
        self.street = Street::Preflop;
        if self.players[self.dealer].status() == PlayerStatus::Out {
            self.dealer = self.next_seat(self.dealer);
        }
    }

    /// Heads-up the button posts the small blind.
    fn post_blinds(&mut self, heads_up: bool) -> (usize, usize) {
        let sb = if heads_up { self.dealer } else { self.next_seat(self.dealer) };
        let bb = self.next_seat(sb);
        let sb_paid = self.players[sb].post_blind(self.config.small_blind);
        self.record(sb, HistoryVerb::SmallBlind, Some(sb_paid));
        let bb_paid = self.players[bb].post_blind(self.config.big_blind);
        self.record(bb, HistoryVerb::BigBlind, Some(bb_paid));
        self.pot += sb_paid + bb_paid;
        self.current_bet = sb_paid.max(bb_paid);
        log::debug!("blinds: seat {sb} posts {sb_paid}, seat {bb} posts {bb_paid}");
        (sb, bb)
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        for seat in 0..self.players.len() {
            if !self.players[seat].in_hand() {
                continue;
            }
            let cards = self.deck.draw(2)?;
            let hole = HoleCards::from_slice(&cards)?;
            self.players[seat].receive_cards(hole);
            self.agents[seat].receive_cards(seat, hole);
        }
        Ok(())
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        self.deck.burn()?;
        let cards = self.deck.draw(street.cards_dealt())?;
        self.board.extend(cards);
        self.current_bet = 0;
        for p in &mut self.players {
            p.reset_round();
        }
        log::debug!("{street:?}: board {:?}", self.board.as_slice());
        Ok(())
    }

    /// Run one street. Every turn either commits chips, folds a player, or
    /// marks an active player as having acted, so the loop is bounded.
    fn betting_round(&mut self, first: usize) -> Result<(), GameError> {
        let n = self.players.len();
        let mut acted = vec![false; n];
        let mut seat = first;
        while !self.round_settled(&acted) {
            let player = &self.players[seat];
            if player.is_active() && (!acted[seat] || player.round_bet() < self.current_bet) {
                let action = self.ask(seat);
                let (applied, reopened) = self.apply(seat, action)?;
                if reopened {
                    acted.fill(false);
                }
                acted[seat] = true;
                self.broadcast(seat, &applied);
            }
            seat = (seat + 1) % n;
        }
        Ok(())
    }

    fn round_settled(&self, acted: &[bool]) -> bool {
        if self.contenders() < 2 {
            return true;
        }
        let active: Vec<usize> =
            (0..self.players.len()).filter(|&i| self.players[i].is_active()).collect();
        let matched = |i: usize| self.players[i].round_bet() >= self.current_bet;
        match active.as_slice() {
            [] => true,
            // everyone else is all-in: nobody left to bet against
            [only] => matched(*only),
            seats => seats.iter().all(|&i| acted[i] && matched(i)),
        }
    }

    fn ask(&mut self, seat: usize) -> Action {
        let player = &self.players[seat];
        let ctx = TurnContext {
            current_bet: self.current_bet,
            min_raise: self.min_raise(),
            pot: self.pot,
            big_blind: self.config.big_blind,
            board: self.board.as_slice(),
            seat: SeatView {
                seat,
                stack: player.stack(),
                round_bet: player.round_bet(),
                hole: player.hole(),
            },
        };
        self.agents[seat].get_action(&ctx)
    }

    /// Apply `action` for `seat`; returns the action as recorded and whether
    /// it raised the street's bet.
    fn apply(&mut self, seat: usize, action: Action) -> Result<(Action, bool), GameError> {
        let illegal = |reason| GameError::IllegalAction { seat, action, reason };
        let round_bet = self.players[seat].round_bet();
        let stack = self.players[seat].stack();
        let to_call = self.current_bet.saturating_sub(round_bet);
        let mut reopened = false;
        let mut applied = action;
        match action {
            Action::Fold => {
                self.players[seat].fold();
                self.record(seat, HistoryVerb::Fold, None);
            }
            Action::Check => {
                if to_call > 0 {
                    return Err(illegal("cannot check facing a bet"));
                }
                self.record(seat, HistoryVerb::Check, None);
            }
            Action::Call if to_call == 0 => {
                applied = Action::Check;
                self.record(seat, HistoryVerb::Check, None);
            }
            Action::Call => {
                let paid = self.commit(seat, to_call.min(stack))?;
                self.record(seat, HistoryVerb::Call, Some(paid));
            }
            Action::Raise(target) => {
                let max_total = round_bet + stack;
                if target <= self.current_bet {
                    return Err(illegal("raise must exceed the current bet"));
                }
                if target > max_total {
                    return Err(illegal("raise exceeds the player's chips"));
                }
                if target < self.min_raise() && target < max_total {
                    return Err(illegal("raise below the minimum"));
                }
                self.commit(seat, target - round_bet)?;
                self.current_bet = target;
                reopened = true;
                self.record(seat, HistoryVerb::RaiseTo, Some(target));
            }
            Action::AllIn => {
                self.commit(seat, stack)?;
                let total = self.players[seat].round_bet();
                if total > self.current_bet {
                    self.current_bet = total;
                    reopened = true;
                }
                self.record(seat, HistoryVerb::AllIn, Some(total));
            }
        }
        log::debug!(
            "{:?} seat {seat} {applied}: pot {}, current bet {}",
            self.street,
            self.pot,
            self.current_bet
        );
        Ok((applied, reopened))
    }

    fn commit(&mut self, seat: usize, amount: u64) -> Result<u64, GameError> {
        let paid = self.players[seat].commit(amount)?;
        self.pot += paid;
        Ok(paid)
    }

    fn broadcast(&mut self, actor: usize, action: &Action) {
        let board = self.board.as_slice();
        for agent in &mut self.agents {
            agent.observe_action(actor, action, board);
        }
    }

    fn contenders(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    fn next_seat(&self, from: usize) -> usize {
        let n = self.players.len();
        let mut i = (from + 1) % n;
        for _ in 0..n {
            if self.players[i].status() != PlayerStatus::Out {
                return i;
            }
            i = (i + 1) % n;
        }
        from % n
    }

    fn rotate_dealer(&mut self) {
        self.dealer = self.next_seat(self.dealer);
        self.street = Street::Idle;
    }

    /// Everyone else folded: the last contender takes the pot unseen.
    fn fold_out(&mut self) -> HandSummary {
        let mut payouts = vec![0; self.players.len()];
        let mut winners = Vec::new();
        if let Some(seat) = self.players.iter().position(Player::in_hand) {
            let amount = self.pot;
            self.players[seat].award(amount);
            self.record(seat, HistoryVerb::Win, Some(amount));
            payouts[seat] = amount;
            winners.push(seat);
        }
        self.pot = 0;
        self.street = Street::Showdown;
        let board = self.board.as_slice().to_vec();
        HandSummary { winners, payouts, showdown: Vec::new(), board }
    }

    fn showdown(&mut self) -> Result<HandSummary, GameError> {
        self.street = Street::Showdown;
        self.refund_uncalled();

        let mut shown = Vec::new();
        for (seat, p) in self.players.iter().enumerate() {
            if let (true, Some(hole)) = (p.in_hand(), p.hole()) {
                let score = self.ranker.evaluate(self.board.as_slice(), &hole.as_array())?;
                shown.push(ShownHand { seat, hole, score, class: self.ranker.class_name(score) });
            }
        }
        let best = shown.iter().map(|h| h.score).min().unwrap_or(u16::MAX);
        let winners: Vec<usize> =
            shown.iter().filter(|h| h.score == best).map(|h| h.seat).collect();

        let mut payouts = vec![0; self.players.len()];
        if !winners.is_empty() {
            let count = winners.len() as u64;
            let share = self.pot / count;
            let remainder = self.pot % count;
            let verb = if winners.len() > 1 { HistoryVerb::Split } else { HistoryVerb::Win };
            for (i, &seat) in winners.iter().enumerate() {
                let amount = if i == 0 { share + remainder } else { share };
                self.players[seat].award(amount);
                self.record(seat, verb, Some(amount));
                payouts[seat] = amount;
            }
            self.pot = 0;
        }

        self.showdown_feedback(&shown);
        Ok(HandSummary { winners, payouts, showdown: shown, board: self.board.as_slice().to_vec() })
    }

    /// Return chips nobody matched to the single biggest contributor.
    fn refund_uncalled(&mut self) {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.players[i].contributed()));
        let (top, runner_up) = match order.as_slice() {
            [top, second, ..] => (*top, self.players[*second].contributed()),
            _ => return,
        };
        let excess = self.players[top].contributed().saturating_sub(runner_up);
        if excess > 0 {
            self.players[top].refund(excess);
            self.pot -= excess;
            self.record(top, HistoryVerb::Refund, Some(excess));
        }
    }

    /// Show each agent every other revealed hand, labelled by how much it put in.
    fn showdown_feedback(&mut self, shown: &[ShownHand]) {
        let board = self.board.as_slice();
        for (seat, agent) in self.agents.iter_mut().enumerate() {
            for hand in shown.iter().filter(|h| h.seat != seat) {
                let label = classify(self.players[hand.seat].contributed(), self.config.big_blind);
                agent.analyze_showdown(&hand.hole, board, label);
            }
        }
    }

    fn record(&mut self, seat: usize, verb: HistoryVerb, amount: Option<u64>) {
        self.history.push(HistoryEntry { seat, street: self.street, verb, amount });
    }
}

/// Coarse label for how a hand was played, from its total commitment.
pub fn classify(contributed: u64, big_blind: u64) -> ActionKind {
    if contributed <= big_blind {
        ActionKind::Check
    } else if contributed <= 3 * big_blind {
        ActionKind::Call
    } else {
        ActionKind::Raise
    }
}
