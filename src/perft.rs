// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::{InvariantViolation, Position};
use crate::types::PieceKind;

/// Every piece a pawn may promote to. Perft counts each choice as a separate move so that totals
/// line up with published tables.
const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Counts the leaf nodes of the legal move tree rooted at `pos`, `depth` plies deep.
pub fn perft(pos: &Position, depth: u32) -> Result<u64, InvariantViolation> {
    pos.check_playable()?;
    count(pos, depth)
}

fn count(pos: &Position, depth: u32) -> Result<u64, InvariantViolation> {
    if depth == 0 {
        return Ok(1);
    }

    let mut moves = MoveVec::default();
    let movegen = MoveGenerator::new();
    movegen.generate_moves(pos, &mut moves);
    moves
        .par_iter()
        .map(|&mov| -> Result<u64, InvariantViolation> {
            if !pos.is_legal_given_pseudolegal(mov)? {
                return Ok(0);
            }

            if mov.is_promotion() {
                PROMOTION_KINDS
                    .iter()
                    .map(|&kind| count_child(pos, mov.with_promotion(kind), depth))
                    .sum()
            } else {
                count_child(pos, mov, depth)
            }
        })
        .sum()
}

fn count_child(pos: &Position, mov: Move, depth: u32) -> Result<u64, InvariantViolation> {
    count(&pos.apply_move(mov), depth - 1)
}
