mod common;

use bayes_holdem::action::Action;
use bayes_holdem::agents::{Agent, BayesianAgent, BayesianProfile, HumanAgent};
use bayes_holdem::cards::parse_cards;
use bayes_holdem::game::{Game, HistoryVerb, TableConfig};
use bayes_holdem::hand::HoleCards;
use bayes_holdem::range::Tier;
use common::ScriptedAgent;
use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

/// Writer whose bytes stay readable after the agent is boxed into a table.
#[derive(Clone, Default)]
struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn human(script: &str, out: &Transcript) -> HumanAgent<Cursor<Vec<u8>>, Transcript> {
    HumanAgent::new("you", Cursor::new(script.as_bytes().to_vec()), out.clone())
}

#[test]
fn human_plays_a_hand_to_showdown() {
    let out = Transcript::default();
    let mut game = Game::new(TableConfig::default().with_seed(17));
    game.add_player(Box::new(human("c\nk\nk\nk\n", &out)));
    game.add_player(Box::new(ScriptedAgent::caller("bot")));

    let summary = game.start_hand().unwrap();
    assert_eq!(summary.board.len(), 5);
    assert_eq!(summary.showdown.len(), 2);
    assert_eq!(game.chips_in_play(), 2000);

    let text = out.text();
    assert!(text.contains("new hand: seat 0"));
    assert!(text.contains("you> "));
    assert!(text.contains("showdown: opponent shows"));
}

#[test]
fn silent_human_folds_the_small_blind() {
    let out = Transcript::default();
    let mut game = Game::new(TableConfig::default().with_seed(3));
    game.add_player(Box::new(human("", &out)));
    game.add_player(Box::new(ScriptedAgent::caller("bot")));

    let summary = game.start_hand().unwrap();
    assert_eq!(summary.winners, vec![1]);
    assert_eq!(game.stack(0), Some(990));
    assert_eq!(game.stack(1), Some(1010));
    assert_eq!(game.history()[2].verb, HistoryVerb::Fold);
}

#[test]
fn human_reprompts_after_an_illegal_check() {
    let out = Transcript::default();
    let mut game = Game::new(TableConfig::default().with_seed(8));
    game.add_player(Box::new(human("k\nf\n", &out)));
    game.add_player(Box::new(ScriptedAgent::caller("bot")));

    game.start_hand().unwrap();
    assert!(out.text().contains("CHECK is not legal here"));
    assert_eq!(game.history()[2].verb, HistoryVerb::Fold);
}

fn premium_mass(agent: &BayesianAgent) -> f64 {
    agent
        .belief()
        .posterior()
        .iter()
        .filter(|(c, _)| c.tier() == Tier::Premium)
        .map(|(_, m)| m)
        .sum()
}

#[test]
fn bayesian_reads_a_raiser_as_strong() {
    let mut agent = BayesianAgent::new("bayes", BayesianProfile::default().with_seed(1));
    let hole = HoleCards::from_slice(&parse_cards("9c 8c").unwrap()).unwrap();
    agent.receive_cards(0, hole);
    let before = premium_mass(&agent);

    agent.observe_action(1, &Action::Raise(60), &[]);
    agent.observe_action(1, &Action::Raise(180), &[]);
    assert!(premium_mass(&agent) > before);

    // a new deal starts from the prior again
    agent.receive_cards(0, hole);
    assert_eq!(agent.belief().posterior(), agent.belief().prior());
}

#[test]
fn bayesian_survives_a_table_of_raisers() {
    let profile = BayesianProfile::default().with_seed(4).with_iterations(60);
    let mut game = Game::new(TableConfig::default().with_seed(4));
    game.add_player(Box::new(BayesianAgent::new("bayes", profile)));
    game.add_player(Box::new(ScriptedAgent::always("maniac", Action::AllIn)));

    for _ in 0..5 {
        if game.seated() < 2 {
            break;
        }
        game.start_hand().unwrap();
        assert_eq!(game.chips_in_play(), 2000);
    }
}
