use std::hint::black_box;

use bayes_holdem::belief::BeliefConfig;
use bayes_holdem::cards::parse_cards;
use bayes_holdem::equity::EquityEstimator;
use bayes_holdem::oracle::{HandRanker, StandardRanker};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_oracle(c: &mut Criterion) {
    let hole = parse_cards("As Ah").unwrap();
    let board = parse_cards("Ks Qs Js 7d 2c").unwrap();
    // build the class table outside the measurement
    let _ = StandardRanker.evaluate(&board, &hole);
    c.bench_function("oracle_seven_cards", |b| {
        b.iter(|| StandardRanker.evaluate(black_box(&board), black_box(&hole)))
    });
}

fn bench_equity(c: &mut Criterion) {
    let hero = parse_cards("Ts 9s").unwrap();
    let mut g = c.benchmark_group("equity_vs_random");
    for (label, board) in [("preflop", ""), ("flop", "2s 3s Kh"), ("river", "2s 3s Kh 8d 4c")] {
        let board = parse_cards(board).unwrap();
        g.bench_with_input(BenchmarkId::new("T9s", label), &board, |b, board| {
            let mut estimator = EquityEstimator::seeded(1);
            b.iter(|| estimator.equity_vs_random(black_box(&hero), black_box(board), 200))
        });
    }
    g.finish();

    let prior = BeliefConfig::default().prior();
    let flop = parse_cards("2s 3s Kh").unwrap();
    c.bench_function("equity_vs_prior_range", |b| {
        let mut estimator = EquityEstimator::seeded(2);
        b.iter(|| estimator.equity_vs_range(black_box(&hero), black_box(&flop), &prior, 200))
    });
}

criterion_group!(benches, bench_oracle, bench_equity);
criterion_main!(benches);
