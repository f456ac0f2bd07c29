use criterion::{black_box, criterion_group, criterion_main, Criterion};

use token_core::testing::{alice, bob, carly, token};
use token_core::{normalizer, verify, Command, LedgerTransaction, TokenCommand};

fn two_issuer_split() -> LedgerTransaction {
    LedgerTransaction {
        inputs: vec![
            token(&alice(), &bob(), 10),
            token(&alice(), &bob(), 20),
            token(&carly(), &carly(), 40),
        ],
        outputs: vec![
            token(&alice(), &alice(), 5),
            token(&alice(), &bob(), 5),
            token(&alice(), &carly(), 20),
            token(&carly(), &alice(), 20),
            token(&carly(), &bob(), 20),
        ],
        commands: vec![Command::new([bob(), carly()], TokenCommand::Move)],
    }
}

fn wide_move(n: usize) -> LedgerTransaction {
    let inputs: Vec<_> = (0..n).map(|_| token(&alice(), &bob(), 3)).collect();
    let outputs: Vec<_> = (0..n).map(|_| token(&alice(), &carly(), 3)).collect();
    LedgerTransaction {
        inputs,
        outputs,
        commands: vec![Command::new([bob()], TokenCommand::Move)],
    }
}

fn bench_verify(c: &mut Criterion) {
    let split = two_issuer_split();
    c.bench_function("verify_two_issuer_split", |b| {
        b.iter(|| verify(black_box(&split)))
    });

    let wide = wide_move(1_000);
    c.bench_function("verify_move_1000_states", |b| {
        b.iter(|| verify(black_box(&wide)))
    });
}

fn bench_transaction_id(c: &mut Criterion) {
    let split = two_issuer_split();
    c.bench_function("transaction_id", |b| {
        b.iter(|| normalizer::compute_transaction_id(black_box(&split)))
    });
}

criterion_group!(benches, bench_verify, bench_transaction_id);
criterion_main!(benches);
