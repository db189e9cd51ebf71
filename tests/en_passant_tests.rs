// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use artemis::notation::parse_move;
use artemis::{new_game, PieceKind, Position, Square};

fn play(pos: &Position, moves: &[&str]) -> Position {
    let mut pos = pos.clone();
    for text in moves {
        let (origin, destination, promotion) = parse_move(text).unwrap();
        pos = pos.play(origin, destination, promotion).unwrap();
    }

    pos
}

#[test]
fn white_captures_en_passant() {
    let pos = play(&new_game(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(Some(4), pos.en_passant_file());
    assert!(pos
        .legal_destinations(Square::E5)
        .unwrap()
        .contains(&Square::D6));

    let pos = play(&pos, &["e5d6"]);
    assert!(pos.piece_at(Square::D5).is_none());
    assert!(pos.piece_at(Square::E5).is_none());
    assert_eq!(PieceKind::Pawn, pos.piece_at(Square::D6).unwrap().kind);
    assert_eq!(31, pos.piece_count());
    assert_eq!(0, pos.halfmove_clock());
}

#[test]
fn black_captures_en_passant() {
    let pos = Position::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
    let pos = play(&pos, &["e2e4"]);
    assert!(pos
        .legal_destinations(Square::D4)
        .unwrap()
        .contains(&Square::E3));

    let pos = play(&pos, &["d4e3"]);
    assert!(pos.piece_at(Square::E4).is_none());
    assert_eq!(PieceKind::Pawn, pos.piece_at(Square::E3).unwrap().kind);
}

#[test]
fn only_immediately_after_the_push() {
    let pos = play(
        &new_game(),
        &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"],
    );
    assert_eq!(None, pos.en_passant_file());
    assert!(!pos
        .legal_destinations(Square::E5)
        .unwrap()
        .contains(&Square::D6));
}

#[test]
fn single_push_does_not_allow_it() {
    let pos = play(&new_game(), &["e2e4", "d7d6", "e4e5", "d6d5"]);
    assert!(!pos
        .legal_destinations(Square::E5)
        .unwrap()
        .contains(&Square::D6));
}

#[test]
fn not_when_it_exposes_the_king() {
    // both pawns leave the fifth rank, which opens it to the rook on h5.
    let pos = Position::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").unwrap();
    let dests = pos.legal_destinations(Square::B5).unwrap();
    assert!(!dests.contains(&Square::C6));
    assert!(dests.contains(&Square::B6));
}
