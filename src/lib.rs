//! bayes-holdem: heads-up no-limit hold'em with a Bayesian opponent model
//!
//! Goals:
//! - A deterministic, seedable betting engine that runs one hand per call
//! - Monte Carlo equity against a random hand or a weighted range
//! - An opponent model that updates a 169-category posterior from observed actions
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: equity of pocket aces
//! ```
//! use bayes_holdem::cards::parse_cards;
//! use bayes_holdem::equity::EquityEstimator;
//!
//! let hero = parse_cards("As Ah").unwrap();
//! let mut estimator = EquityEstimator::seeded(42);
//! let equity = estimator.equity_vs_random(&hero, &[], 500);
//! assert!(equity > 0.75);
//! ```
//!
//! ## Playing a hand
//! ```
//! use bayes_holdem::agents::{BaselineAgent, BaselineProfile, BayesianAgent, BayesianProfile};
//! use bayes_holdem::game::{Game, TableConfig};
//!
//! let mut game = Game::new(TableConfig::default().with_seed(1));
//! game.add_player(Box::new(BaselineAgent::new(
//!     "baseline",
//!     BaselineProfile::default().with_seed(2).with_iterations(50),
//! )));
//! game.add_player(Box::new(BayesianAgent::new(
//!     "bayesian",
//!     BayesianProfile::default().with_seed(3).with_iterations(50),
//! )));
//! game.start_hand().unwrap();
//! assert_eq!(game.chips_in_play(), 2000);
//! ```
//!
//! ## Simulation
//! Run a heads-up match between the two bots with:
//! ```sh
//! RUST_LOG=info cargo run --bin heads-up -- 200 1000 7
//! ```

pub mod action;
pub mod agents;
pub mod belief;
pub mod cards;
pub mod deck;
pub mod equity;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod oracle;
pub mod player;
pub mod range;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
