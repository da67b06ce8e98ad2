#![allow(dead_code)]

use bayes_holdem::action::Action;
use bayes_holdem::agents::{Agent, TurnContext};
use bayes_holdem::cards::Card;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What an agent saw when asked to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seen {
    pub seat: usize,
    pub current_bet: u64,
    pub min_raise: u64,
    pub pot: u64,
    pub to_call: u64,
    pub board_len: usize,
}

pub type Log<T> = Rc<RefCell<Vec<T>>>;

/// Plays queued actions, then falls back to `default`, or check/fold when unset.
/// Every decision and observation is recorded into shared logs.
pub struct ScriptedAgent {
    name: String,
    moves: VecDeque<Action>,
    default: Option<Action>,
    pub decisions: Log<Seen>,
    pub observed: Log<(usize, Action)>,
}

impl ScriptedAgent {
    pub fn new(name: &str, moves: &[Action]) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.iter().copied().collect(),
            default: None,
            decisions: Rc::default(),
            observed: Rc::default(),
        }
    }

    /// Always answer with `action` once the script runs out.
    pub fn always(name: &str, action: Action) -> Self {
        let mut agent = Self::new(name, &[]);
        agent.default = Some(action);
        agent
    }

    /// Check when free, otherwise call.
    pub fn caller(name: &str) -> Self {
        Self::always(name, Action::Call)
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(&mut self, ctx: &TurnContext<'_>) -> Action {
        self.decisions.borrow_mut().push(Seen {
            seat: ctx.seat.seat,
            current_bet: ctx.current_bet,
            min_raise: ctx.min_raise,
            pot: ctx.pot,
            to_call: ctx.to_call(),
            board_len: ctx.board.len(),
        });
        self.moves.pop_front().or(self.default).unwrap_or_else(|| ctx.passive())
    }

    fn observe_action(&mut self, actor: usize, action: &Action, _board: &[Card]) {
        self.observed.borrow_mut().push((actor, *action));
    }
}
