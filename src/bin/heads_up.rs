use bayes_holdem::agents::{BaselineAgent, BaselineProfile, BayesianAgent, BayesianProfile};
use bayes_holdem::game::{Game, TableConfig};
use std::process::ExitCode;

const USAGE: &str = "usage: heads-up [hands] [stack] [seed]";

#[derive(Debug)]
struct Args {
    hands: u64,
    stack: u64,
    seed: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut number = |name: &str| -> Result<Option<u64>, String> {
        args.next()
            .map(|s| s.parse().map_err(|_| format!("{name} must be a number, got {s:?}")))
            .transpose()
    };
    let hands = number("hands")?.unwrap_or(100);
    let stack = number("stack")?.unwrap_or(1000);
    let seed = number("seed")?;
    Ok(Args { hands, stack, seed })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut config = TableConfig::default().with_starting_stack(args.stack);
    let mut baseline = BaselineProfile::default();
    let mut bayesian = BayesianProfile::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
        baseline = baseline.with_seed(seed.wrapping_add(1));
        bayesian = bayesian.with_seed(seed.wrapping_add(2));
    }

    let mut game = Game::new(config);
    game.add_player(Box::new(BaselineAgent::new("baseline", baseline)));
    game.add_player(Box::new(BayesianAgent::new("bayesian", bayesian)));

    for _ in 0..args.hands {
        if game.seated() < 2 {
            break;
        }
        if let Err(err) = game.start_hand() {
            log::error!("hand {} aborted: {err}", game.hands_played());
            return ExitCode::FAILURE;
        }
    }

    println!("after {} hands:", game.hands_played());
    for p in game.players() {
        println!("  {:<10} {:>6}", p.name(), p.stack());
    }
    ExitCode::SUCCESS
}
