use crate::action::{Action, ActionKind};
use crate::cards::Card;
use crate::hand::HoleCards;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use super::{Agent, TurnContext};

const MAX_ATTEMPTS: usize = 3;

/// Console player speaking a one-line protocol:
/// `f` fold, `k` check, `c` call, `r <amount>` raise to, `a` all-in.
///
/// End of input or repeated bad input degrades to check/fold.
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
    seat: Option<usize>,
}

impl HumanAgent<StdinLock<'static>, Stdout> {
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self { name: name.into(), input, output, seat: None }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, ctx: &TurnContext<'_>) -> io::Result<()> {
        let hole = ctx.seat.hole.map(|h| format!("{} {}", h.first(), h.second()));
        writeln!(
            self.output,
            "board [{}] hole [{}] pot {} stack {} to call {} min raise {}",
            join(ctx.board),
            hole.unwrap_or_default(),
            ctx.pot,
            ctx.seat.stack,
            ctx.to_call(),
            ctx.min_raise,
        )?;
        write!(self.output, "{}> ", self.name)?;
        self.output.flush()
    }

    fn read_command(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_ascii_lowercase()),
        }
    }

    fn say(&mut self, message: &str) {
        // a closed terminal only loses the echo
        let _ = writeln!(self.output, "{message}");
    }
}

fn join(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Parse one command line into an action.
pub(crate) fn parse_command(line: &str) -> Option<Action> {
    let mut parts = line.split_whitespace();
    let action = match parts.next()? {
        "f" | "fold" => Action::Fold,
        "k" | "check" => Action::Check,
        "c" | "call" => Action::Call,
        "a" | "allin" | "all-in" => Action::AllIn,
        "r" | "raise" => Action::Raise(parts.next()?.parse().ok()?),
        _ => return None,
    };
    parts.next().is_none().then_some(action)
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_cards(&mut self, seat: usize, hole: HoleCards) {
        self.seat = Some(seat);
        self.say(&format!("new hand: seat {seat}, dealt {} {}", hole.first(), hole.second()));
    }

    fn get_action(&mut self, ctx: &TurnContext<'_>) -> Action {
        for _ in 0..MAX_ATTEMPTS {
            if self.prompt(ctx).is_err() {
                break;
            }
            let Some(line) = self.read_command() else {
                break;
            };
            match parse_command(&line) {
                Some(Action::Raise(target)) if target >= ctx.max_total() => return Action::AllIn,
                Some(action) if ctx.is_legal(action) => return action,
                Some(action) => self.say(&format!("{action} is not legal here")),
                None => self.say("commands: f, k, c, r <amount>, a"),
            }
        }
        ctx.passive()
    }

    fn observe_action(&mut self, actor: usize, action: &Action, board: &[Card]) {
        if self.seat == Some(actor) {
            return;
        }
        self.say(&format!("seat {actor}: {action} [{}]", join(board)));
    }

    fn analyze_showdown(&mut self, opponent: &HoleCards, board: &[Card], final_action: ActionKind) {
        self.say(&format!(
            "showdown: opponent shows {} {} on [{}] after {final_action:?}",
            opponent.first(),
            opponent.second(),
            join(board)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SeatView;
    use std::io::Cursor;

    fn ctx(current_bet: u64) -> TurnContext<'static> {
        TurnContext {
            current_bet,
            min_raise: (current_bet + 20).max(2 * current_bet),
            pot: 60,
            big_blind: 20,
            board: &[],
            seat: SeatView { seat: 0, stack: 500, round_bet: 0, hole: None },
        }
    }

    fn human(script: &str) -> HumanAgent<Cursor<Vec<u8>>, Vec<u8>> {
        HumanAgent::new("you", Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parses_the_protocol() {
        assert_eq!(parse_command("f"), Some(Action::Fold));
        assert_eq!(parse_command("r 120"), Some(Action::Raise(120)));
        assert_eq!(parse_command("a"), Some(Action::AllIn));
        assert_eq!(parse_command("r"), None);
        assert_eq!(parse_command("r -5"), None);
        assert_eq!(parse_command("c now"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn reads_a_legal_raise() {
        assert_eq!(human("r 80\n").get_action(&ctx(40)), Action::Raise(80));
    }

    #[test]
    fn oversized_raise_becomes_all_in() {
        assert_eq!(human("r 9000\n").get_action(&ctx(40)), Action::AllIn);
    }

    #[test]
    fn illegal_check_is_reprompted() {
        let mut agent = human("k\nc\n");
        assert_eq!(agent.get_action(&ctx(40)), Action::Call);
        let out = String::from_utf8(agent.into_output()).unwrap();
        assert!(out.contains("CHECK is not legal here"));
    }

    #[test]
    fn eof_and_garbage_degrade_to_check_or_fold() {
        assert_eq!(human("").get_action(&ctx(40)), Action::Fold);
        assert_eq!(human("").get_action(&ctx(0)), Action::Check);
        assert_eq!(human("x\ny\nz\nc\n").get_action(&ctx(40)), Action::Fold);
    }
}
