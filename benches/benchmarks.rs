// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use artemis::attacks;
use artemis::{best_move, Color, MoveGenerator, MoveVec, Position, Square};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("square attacked kiwipete e1", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| {
            attacks::is_square_attacked(black_box(&pos), black_box(Square::E1), Color::Black)
        })
    });

    c.bench_function("position clone", |b| {
        let pos = Position::from_start_position();
        b.iter(|| black_box(&pos).clone())
    });

    c.bench_function("generate moves start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| {
            let mut vec = MoveVec::default();
            let gen = MoveGenerator::new();
            gen.generate_moves(black_box(&pos), &mut vec);
        });
    });

    c.bench_function("legal moves kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| black_box(&pos).legal_moves().unwrap())
    });

    c.bench_function("best move start depth 2", |b| {
        let pos = Position::from_start_position();
        b.iter(|| best_move(black_box(&pos), 2).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
