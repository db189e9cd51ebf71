// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, Score};
use crate::position::{InvariantViolation, Position};
use crate::types::{Color, Piece, PieceKind, Square};

const QUEEN_WEIGHT: f32 = 9f32;
const ROOK_WEIGHT: f32 = 5f32;
const BISHOP_WEIGHT: f32 = 3f32;
const KNIGHT_WEIGHT: f32 = 3f32;
const PAWN_WEIGHT: f32 = 1f32;

const KING_EXPOSED_PENALTY: f32 = -0.2;
const CENTER_BONUS: f32 = 0.2;
const NEAR_CENTER_BONUS: f32 = 0.1;

/// Central occupation only counts for this many full moves.
const OPENING_MOVES: u32 = 10;

/// Scores a position by material, plus a small bonus for keeping the king out of the middle of
/// the board and for occupying the center early on.
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl Default for MaterialEvaluator {
    fn default() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position, perspective: Color) -> Result<Score, InvariantViolation> {
        // Check out mobility first - it's possible that the side to move has been checkmated.
        // Stalemates fall through and are scored like any other position.
        let side = pos.side_to_move();
        if !pos.has_legal_move()? && pos.is_check(side)? {
            if side == perspective {
                return Ok(Score::Loss);
            }

            return Ok(Score::Win);
        }

        let ours = points(pos, perspective);
        let theirs = points(pos, perspective.toggle());
        Ok(Score::Evaluated(ours - theirs))
    }
}

fn weight(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::King => 0f32,
        PieceKind::Queen => QUEEN_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Bishop => BISHOP_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Pawn => PAWN_WEIGHT,
    }
}

fn points(pos: &Position, color: Color) -> f32 {
    let in_opening = pos.fullmove_clock() <= OPENING_MOVES;
    pos.pieces(color)
        .map(|(sq, piece)| weight(piece.kind) + positional_bonus(sq, piece, in_opening))
        .sum()
}

fn within(sq: Square, low: i32, high: i32) -> bool {
    let in_band = |c: i32| c >= low && c <= high;
    in_band(sq.file()) && in_band(sq.rank())
}

fn positional_bonus(sq: Square, piece: Piece, in_opening: bool) -> f32 {
    if piece.kind == PieceKind::King {
        if within(sq, 2, 7) {
            return KING_EXPOSED_PENALTY;
        }

        return 0f32;
    }

    if in_opening {
        if within(sq, 4, 5) {
            return CENTER_BONUS;
        }

        if within(sq, 3, 6) {
            return NEAR_CENTER_BONUS;
        }
    }

    0f32
}

#[cfg(test)]
mod tests {
    use super::MaterialEvaluator;
    use crate::eval::{BoardEvaluator, Score};
    use crate::position::Position;
    use crate::types::{Color, Square};

    fn evaluated(score: Score) -> f32 {
        match score {
            Score::Evaluated(value) => value,
            other => panic!("expected an evaluated score, got {:?}", other),
        }
    }

    fn assert_close(expected: f32, actual: f32) {
        assert!(
            (expected - actual).abs() < 1e-4,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn start_position_is_even() {
        let pos = Position::from_start_position();
        let eval = MaterialEvaluator::new();
        assert_close(0.0, evaluated(eval.evaluate(&pos, Color::White).unwrap()));
        assert_close(0.0, evaluated(eval.evaluate(&pos, Color::Black).unwrap()));
    }

    #[test]
    fn center_pawn_bonus() {
        let pos = Position::from_start_position()
            .play(Square::E2, Square::E4, None)
            .unwrap();
        let eval = MaterialEvaluator::new();
        assert_close(0.2, evaluated(eval.evaluate(&pos, Color::White).unwrap()));
        assert_close(-0.2, evaluated(eval.evaluate(&pos, Color::Black).unwrap()));

        let pos = pos.play(Square::C7, Square::C6, None).unwrap();
        // c6 is near the center, e4 is in it
        assert_close(-0.1, evaluated(eval.evaluate(&pos, Color::Black).unwrap()));
    }

    #[test]
    fn center_bonus_ends_after_opening() {
        let pos = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 11").unwrap();
        let eval = MaterialEvaluator::new();
        assert_close(9.0, evaluated(eval.evaluate(&pos, Color::White).unwrap()));

        let pos = Position::from_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 10").unwrap();
        assert_close(9.2, evaluated(eval.evaluate(&pos, Color::White).unwrap()));
    }

    #[test]
    fn exposed_king_penalty() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4K3/8 w - - 0 30").unwrap();
        let eval = MaterialEvaluator::new();
        assert_close(-0.2, evaluated(eval.evaluate(&pos, Color::White).unwrap()));
    }

    #[test]
    fn material_counts() {
        let pos = Position::from_fen("rn2k3/8/8/8/8/8/8/1B2K2Q w - - 0 40").unwrap();
        let eval = MaterialEvaluator::new();
        // 3 + 9 against 5 + 3
        assert_close(4.0, evaluated(eval.evaluate(&pos, Color::White).unwrap()));
    }

    #[test]
    fn checkmate_is_infinite() {
        // fool's mate, white to move and mated
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let eval = MaterialEvaluator::new();
        assert_eq!(Score::Loss, eval.evaluate(&pos, Color::White).unwrap());
        assert_eq!(Score::Win, eval.evaluate(&pos, Color::Black).unwrap());
    }

    #[test]
    fn stalemate_scores_material() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 40").unwrap();
        let eval = MaterialEvaluator::new();
        // the white king on g6 gives back a little
        assert_close(-8.8, evaluated(eval.evaluate(&pos, Color::Black).unwrap()));
    }
}
