// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use artemis::eval::{MaterialEvaluator, Score};
use artemis::search::{AlphaBetaSearcher, MinimaxSearcher, NullDataRecorder, SearchError, Searcher};
use artemis::{best_move, new_game, Position, Square};

#[test]
fn mate_in_one_for_white() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let mov = best_move(&pos, 2).unwrap().unwrap();
    assert_eq!(Square::A1, mov.origin());
    assert_eq!(Square::A8, mov.destination());
}

#[test]
fn mate_in_one_for_black() {
    let pos = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let mov = best_move(&pos, 2).unwrap().unwrap();
    assert_eq!(Square::A8, mov.origin());
    assert_eq!(Square::A1, mov.destination());
}

#[test]
fn mate_beats_material() {
    // the bishop could win the knight on b3, but the rook mates.
    let fen = "6k1/5ppp/8/8/8/1n6/8/R2B2K1 w - - 0 1";
    let pos = Position::from_fen(fen).unwrap();
    let plain = MinimaxSearcher::<MaterialEvaluator>::new()
        .search(&pos, 2, &NullDataRecorder)
        .unwrap();
    let pruned = AlphaBetaSearcher::<MaterialEvaluator>::new()
        .search(&pos, 2, &NullDataRecorder)
        .unwrap();

    for result in &[plain, pruned] {
        let mov = result.best_move.unwrap();
        assert_eq!(Square::A1, mov.origin());
        assert_eq!(Square::A8, mov.destination());
        assert_eq!(Score::Win, result.score);
    }
}

#[test]
fn odd_depths_are_rejected() {
    let pos = new_game();
    assert_eq!(Err(SearchError::InvalidDepth(3)), best_move(&pos, 3));
    assert_eq!(Err(SearchError::InvalidDepth(0)), best_move(&pos, 0));
}

#[test]
fn checkmated_side_has_no_best_move() {
    let pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert_eq!(Ok(None), best_move(&pos, 2));
}

#[test]
fn start_position_has_a_move() {
    let pos = new_game();
    let mov = best_move(&pos, 2).unwrap().unwrap();
    assert!(pos
        .legal_destinations(mov.origin())
        .unwrap()
        .contains(&mov.destination()));
}
