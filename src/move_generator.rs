// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Moves produced here are geometrically valid for the moving piece
//! but may leave the mover's own king in check; `Position::legal_moves_from` filters those out.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Piece, PieceKind, Square, TableIndex};

pub type MoveVec = ArrayVec<[Move; 256]>;

/// A move generation strategy for a single piece standing on a square.
type Strategy = fn(&Position, Square, Piece, &mut MoveVec);

/// Strategies indexed by `PieceKind`. The set of piece kinds is closed, so a table of plain
/// functions is all the dispatch this needs.
static STRATEGIES: [Strategy; 6] = [
    pawn_moves,
    knight_moves,
    sliding_moves,
    sliding_moves,
    sliding_moves,
    king_moves,
];

pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates pseudo-legal moves for every piece belonging to the side to move.
    pub fn generate_moves(&self, pos: &Position, moves: &mut MoveVec) {
        let side = pos.side_to_move();
        for (square, piece) in pos.pieces(side) {
            strategy(piece.kind)(pos, square, piece, moves);
        }
    }

    /// Generates pseudo-legal moves for the piece on `square`, whichever color it is. Empty
    /// squares produce no moves.
    pub fn generate_moves_from(&self, pos: &Position, square: Square, moves: &mut MoveVec) {
        if let Some(piece) = pos.piece_at(square) {
            strategy(piece.kind)(pos, square, piece, moves);
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

pub fn strategy(kind: PieceKind) -> Strategy {
    STRATEGIES[kind.as_index()]
}

/// Adds a move to `target` if it is empty or holds an opposing piece.
fn push_step(pos: &Position, origin: Square, piece: Piece, target: Square, moves: &mut MoveVec) {
    match pos.piece_at(target) {
        None => moves.push(Move::quiet(origin, target, piece)),
        Some(other) if other.color != piece.color => {
            moves.push(Move::capture(origin, target, piece))
        }
        Some(_) => {}
    }
}

fn sliding_moves(pos: &Position, origin: Square, piece: Piece, moves: &mut MoveVec) {
    for &dir in piece.kind.rays() {
        let mut current = origin;
        while let Some(next) = current.offset(dir) {
            match pos.piece_at(next) {
                None => moves.push(Move::quiet(origin, next, piece)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::capture(origin, next, piece));
                    }

                    break;
                }
            }

            current = next;
        }
    }
}

fn knight_moves(pos: &Position, origin: Square, piece: Piece, moves: &mut MoveVec) {
    for &target in attacks::knight_leaps(origin) {
        push_step(pos, origin, piece, target, moves);
    }
}

fn king_moves(pos: &Position, origin: Square, piece: Piece, moves: &mut MoveVec) {
    for &target in attacks::king_steps(origin) {
        push_step(pos, origin, piece, target, moves);
    }

    for &side in &[CastleSide::King, CastleSide::Queen] {
        if let Some(landing) = castle_target(pos, origin, piece, side) {
            moves.push(Move::castle(origin, landing, piece));
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// File of the rook that castles on this side.
    pub fn rook_file(self) -> i32 {
        match self {
            CastleSide::King => 8,
            CastleSide::Queen => 1,
        }
    }

    /// File the rook lands on after castling.
    pub fn rook_landing_file(self) -> i32 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 4,
        }
    }

    /// File the king lands on after castling.
    pub fn king_landing_file(self) -> i32 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 3,
        }
    }

    /// Files strictly between the king and the rook. All of them must be empty.
    pub fn between_files(self) -> &'static [i32] {
        match self {
            CastleSide::King => &[6, 7],
            CastleSide::Queen => &[2, 3, 4],
        }
    }

    /// Files the king stands on, passes over, and lands on. None of them may be attacked.
    pub fn king_path_files(self) -> &'static [i32] {
        match self {
            CastleSide::King => &[5, 6, 7],
            CastleSide::Queen => &[5, 4, 3],
        }
    }
}

const KING_START_FILE: i32 = 5;

/// Returns the square the king lands on if castling towards `side` is currently permitted.
///
/// The king and the rook must both be on their original squares and never have moved, every
/// square between them must be empty, and none of the squares the king starts on, crosses, or
/// lands on may be attacked by the opponent.
pub fn castle_target(
    pos: &Position,
    origin: Square,
    king: Piece,
    side: CastleSide,
) -> Option<Square> {
    let rank = king.color.back_rank();
    if king.kind != PieceKind::King
        || king.has_moved
        || origin.file() != KING_START_FILE
        || origin.rank() != rank
    {
        return None;
    }

    let rook_square = Square::new(side.rook_file(), rank).ok()?;
    match pos.piece_at(rook_square) {
        Some(rook)
            if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return None,
    }

    for &file in side.between_files() {
        if pos.piece_at(Square::new(file, rank).ok()?).is_some() {
            return None;
        }
    }

    let them = king.color.toggle();
    for &file in side.king_path_files() {
        if attacks::is_square_attacked(pos, Square::new(file, rank).ok()?, them) {
            return None;
        }
    }

    Square::new(side.king_landing_file(), rank).ok()
}

fn pawn_moves(pos: &Position, origin: Square, piece: Piece, moves: &mut MoveVec) {
    let color = piece.color;
    let forward = color.forward();
    let promotion_rank = color.promotion_rank();

    // A pawn can never stand on its own promotion rank, so one step forward is always on the
    // board for anything a legal position contains.
    if let Some(one) = origin.offset((0, forward)) {
        if pos.piece_at(one).is_none() {
            if one.rank() == promotion_rank {
                moves.push(Move::promotion(origin, one, piece));
            } else {
                moves.push(Move::quiet(origin, one, piece));
            }

            if origin.rank() == color.pawn_rank() {
                if let Some(two) = one.offset((0, forward)) {
                    if pos.piece_at(two).is_none() {
                        moves.push(Move::double_pawn_push(origin, two, piece));
                    }
                }
            }
        }
    }

    for &file_delta in &[-1, 1] {
        let target = match origin.offset((file_delta, forward)) {
            Some(target) => target,
            None => continue,
        };

        match pos.piece_at(target) {
            Some(other) if other.color != color => {
                if target.rank() == promotion_rank {
                    moves.push(Move::promotion_capture(origin, target, piece));
                } else {
                    moves.push(Move::capture(origin, target, piece));
                }
            }
            Some(_) => {}
            None => {
                if is_en_passant_target(pos, origin, piece, target) {
                    moves.push(Move::en_passant(origin, target, piece));
                }
            }
        }
    }
}

/// En passant is only available to the side to move, against a pawn that advanced two squares on
/// the immediately preceding ply and now stands beside the capturing pawn.
fn is_en_passant_target(pos: &Position, origin: Square, piece: Piece, target: Square) -> bool {
    if pos.side_to_move() != piece.color
        || origin.rank() != piece.color.en_passant_rank()
        || pos.en_passant_file() != Some(target.file())
    {
        return false;
    }

    let passed = match Square::new(target.file(), origin.rank()) {
        Ok(sq) => sq,
        Err(_) => return false,
    };

    match pos.piece_at(passed) {
        Some(victim) => victim.kind == PieceKind::Pawn && victim.color != piece.color,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{castle_target, CastleSide, MoveGenerator, MoveVec};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn moves_from(pos: &Position, sq: Square) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves_from(pos, sq, &mut moves);
        moves
    }

    fn destinations(pos: &Position, sq: Square) -> Vec<Square> {
        let mut dests: Vec<_> = moves_from(pos, sq).iter().map(|m| m.destination()).collect();
        dests.sort();
        dests
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let pos = Position::from_start_position();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&pos, &mut moves);
        assert_eq!(20, moves.len());
    }

    #[test]
    fn rook_stops_at_blockers() {
        let mut pos = Position::new();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        pos.place(rook, Square::D4);
        pos.place(Piece::new(PieceKind::Pawn, Color::White), Square::D6);
        pos.place(Piece::new(PieceKind::Pawn, Color::Black), Square::F4);

        let moves = moves_from(&pos, Square::D4);
        assert!(moves.contains(&Move::quiet(Square::D4, Square::D5, rook)));
        assert!(!moves.iter().any(|m| m.destination() == Square::D6));
        assert!(moves.contains(&Move::capture(Square::D4, Square::F4, rook)));
        assert!(!moves.iter().any(|m| m.destination() == Square::G4));
        // 1 up, 3 down, 3 left, 2 right
        assert_eq!(9, moves.len());
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let mut pos = Position::new();
        pos.place(Piece::new(PieceKind::Queen, Color::Black), Square::D4);
        assert_eq!(27, moves_from(&pos, Square::D4).len());
    }

    #[test]
    fn knight_from_corner() {
        let mut pos = Position::new();
        pos.place(Piece::new(PieceKind::Knight, Color::White), Square::A1);
        pos.place(Piece::new(PieceKind::Pawn, Color::White), Square::C2);
        assert_eq!(vec![Square::B3], destinations(&pos, Square::A1));
    }

    #[test]
    fn pawn_double_push_needs_both_squares() {
        let mut pos = Position::from_start_position();
        assert_eq!(vec![Square::E3, Square::E4], destinations(&pos, Square::E2));

        pos.place(Piece::new(PieceKind::Knight, Color::Black), Square::E4);
        assert_eq!(vec![Square::E3], destinations(&pos, Square::E2));

        pos.place(Piece::new(PieceKind::Knight, Color::Black), Square::E3);
        assert!(destinations(&pos, Square::E2).is_empty());
    }

    #[test]
    fn pawn_promotion_is_flagged() {
        let mut pos = Position::new();
        pos.place(Piece::new(PieceKind::Pawn, Color::White), Square::B7);
        pos.place(Piece::new(PieceKind::Rook, Color::Black), Square::A8);
        let moves = moves_from(&pos, Square::B7);
        assert_eq!(2, moves.len());
        assert!(moves.iter().all(|m| m.is_promotion()));
        assert!(moves.iter().any(|m| m.destination() == Square::A8 && m.is_capture()));
    }

    #[test]
    fn black_pawns_move_down() {
        let mut pos = Position::new();
        pos.set_side_to_move(Color::Black);
        pos.place(Piece::new(PieceKind::Pawn, Color::Black), Square::C7);
        pos.place(Piece::new(PieceKind::Pawn, Color::White), Square::D6);
        assert_eq!(
            vec![Square::C5, Square::C6, Square::D6],
            destinations(&pos, Square::C7)
        );
    }

    #[test]
    fn castle_gates() {
        let mut pos = Position::new();
        let king = Piece::new(PieceKind::King, Color::White);
        pos.place(king, Square::E1);
        pos.place(Piece::new(PieceKind::Rook, Color::White), Square::H1);
        pos.place(Piece::new(PieceKind::Rook, Color::White), Square::A1);
        assert_eq!(
            Some(Square::G1),
            castle_target(&pos, Square::E1, king, CastleSide::King)
        );
        assert_eq!(
            Some(Square::C1),
            castle_target(&pos, Square::E1, king, CastleSide::Queen)
        );

        // a moved king can't castle at all
        assert_eq!(
            None,
            castle_target(&pos, Square::E1, king.moved(), CastleSide::King)
        );

        // a knight on b1 blocks the queenside, even though the king never crosses it
        pos.place(Piece::new(PieceKind::Knight, Color::White), Square::B1);
        assert_eq!(
            None,
            castle_target(&pos, Square::E1, king, CastleSide::Queen)
        );

        // a bishop eyeing f1 stops kingside castling
        pos.place(Piece::new(PieceKind::Bishop, Color::Black), Square::A6);
        assert_eq!(
            None,
            castle_target(&pos, Square::E1, king, CastleSide::King)
        );
    }
}
