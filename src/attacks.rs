// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection. Everything here works directly off the position's grid and never consults
//! the move generator or the legality filter, so both of those can lean on it freely.
use arrayvec::ArrayVec;

use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square, DIAGONAL, KING_STEPS, KNIGHT_LEAPS, STRAIGHT};

/// Precomputed on-board neighbors of every square for a fixed set of offsets.
struct NeighborTable {
    table: Vec<ArrayVec<[Square; 8]>>,
}

impl NeighborTable {
    pub fn new(offsets: &[(i32, i32)]) -> NeighborTable {
        let table = Square::all()
            .map(|sq| offsets.iter().filter_map(|&off| sq.offset(off)).collect())
            .collect();
        NeighborTable { table }
    }

    pub fn neighbors(&self, sq: Square) -> &[Square] {
        &self.table[sq.as_index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: NeighborTable = NeighborTable::new(&KNIGHT_LEAPS);
    static ref KING_TABLE: NeighborTable = NeighborTable::new(&KING_STEPS);
}

/// Squares a knight on `sq` could leap to.
pub fn knight_leaps(sq: Square) -> &'static [Square] {
    KNIGHT_TABLE.neighbors(sq)
}

/// Squares adjacent to `sq`.
pub fn king_steps(sq: Square) -> &'static [Square] {
    KING_TABLE.neighbors(sq)
}

/// Walks from `from` in direction `dir` and returns the first piece encountered, if any.
pub fn first_occupant(pos: &Position, from: Square, dir: (i32, i32)) -> Option<Piece> {
    let mut current = from;
    while let Some(next) = current.offset(dir) {
        if let Some(piece) = pos.piece_at(next) {
            return Some(piece);
        }

        current = next;
    }

    None
}

fn is_piece_of(piece: Piece, color: Color, kinds: &[PieceKind]) -> bool {
    piece.color == color && kinds.contains(&piece.kind)
}

/// Returns whether or not any piece of color `by` attacks `target`. Whose turn it is does not
/// matter, and neither does whether or not the attacking piece is pinned.
pub fn is_square_attacked(pos: &Position, target: Square, by: Color) -> bool {
    // Pretend that there's a "super-piece" at the target square and look along each ray for the
    // first thing it runs into.
    for &dir in STRAIGHT.iter() {
        match first_occupant(pos, target, dir) {
            Some(piece) if is_piece_of(piece, by, &[PieceKind::Rook, PieceKind::Queen]) => {
                return true
            }
            _ => {}
        }
    }

    for &dir in DIAGONAL.iter() {
        match first_occupant(pos, target, dir) {
            Some(piece) if is_piece_of(piece, by, &[PieceKind::Bishop, PieceKind::Queen]) => {
                return true
            }
            _ => {}
        }
    }

    // Knight leaps are symmetric, so a knight attacks us iff we could leap to it.
    let knight_attack = knight_leaps(target)
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .any(|piece| is_piece_of(piece, by, &[PieceKind::Knight]));
    if knight_attack {
        return true;
    }

    // A pawn attacks diagonally forward, so an attacking pawn stands one rank "behind" the target
    // from its own point of view.
    let behind = -by.forward();
    for &file_delta in &[-1, 1] {
        if let Some(sq) = target.offset((file_delta, behind)) {
            if let Some(piece) = pos.piece_at(sq) {
                if is_piece_of(piece, by, &[PieceKind::Pawn]) {
                    return true;
                }
            }
        }
    }

    king_steps(target)
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .any(|piece| is_piece_of(piece, by, &[PieceKind::King]))
}

#[cfg(test)]
mod tests {
    use super::{is_square_attacked, king_steps, knight_leaps};
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn position_with(pieces: &[(Square, PieceKind, Color)]) -> Position {
        let mut pos = Position::new();
        for &(sq, kind, color) in pieces {
            assert!(pos.place(Piece::new(kind, color), sq));
        }

        pos
    }

    #[test]
    fn knight_table_corners() {
        assert_eq!(2, knight_leaps(Square::A1).len());
        assert_eq!(8, knight_leaps(Square::D4).len());
        assert!(knight_leaps(Square::A1).contains(&Square::B3));
        assert!(knight_leaps(Square::A1).contains(&Square::C2));
    }

    #[test]
    fn king_table_edges() {
        assert_eq!(3, king_steps(Square::H8).len());
        assert_eq!(5, king_steps(Square::E1).len());
        assert_eq!(8, king_steps(Square::E4).len());
    }

    #[test]
    fn rook_attacks_until_blocked() {
        let pos = position_with(&[
            (Square::A1, PieceKind::Rook, Color::White),
            (Square::A4, PieceKind::Pawn, Color::Black),
        ]);
        assert!(is_square_attacked(&pos, Square::A3, Color::White));
        assert!(is_square_attacked(&pos, Square::A4, Color::White));
        assert!(!is_square_attacked(&pos, Square::A5, Color::White));
        assert!(is_square_attacked(&pos, Square::H1, Color::White));
        assert!(!is_square_attacked(&pos, Square::B2, Color::White));
    }

    #[test]
    fn bishop_and_queen_diagonals() {
        let pos = position_with(&[
            (Square::C1, PieceKind::Bishop, Color::Black),
            (Square::H8, PieceKind::Queen, Color::Black),
        ]);
        assert!(is_square_attacked(&pos, Square::F4, Color::Black));
        assert!(is_square_attacked(&pos, Square::A8, Color::Black));
        assert!(is_square_attacked(&pos, Square::A1, Color::Black));
        assert!(!is_square_attacked(&pos, Square::C2, Color::Black));
        assert!(!is_square_attacked(&pos, Square::F4, Color::White));
    }

    #[test]
    fn pawn_attacks_are_directional() {
        let pos = position_with(&[
            (Square::E4, PieceKind::Pawn, Color::White),
            (Square::D5, PieceKind::Pawn, Color::Black),
        ]);

        // white pawn on e4 hits d5 and f5, but not d3
        assert!(is_square_attacked(&pos, Square::F5, Color::White));
        assert!(is_square_attacked(&pos, Square::D5, Color::White));
        assert!(!is_square_attacked(&pos, Square::D3, Color::White));
        assert!(!is_square_attacked(&pos, Square::E5, Color::White));

        // black pawn on d5 hits c4 and e4
        assert!(is_square_attacked(&pos, Square::E4, Color::Black));
        assert!(is_square_attacked(&pos, Square::C4, Color::Black));
        assert!(!is_square_attacked(&pos, Square::C6, Color::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let pos = position_with(&[
            (Square::G1, PieceKind::Knight, Color::White),
            (Square::E8, PieceKind::King, Color::Black),
        ]);
        assert!(is_square_attacked(&pos, Square::F3, Color::White));
        assert!(is_square_attacked(&pos, Square::E2, Color::White));
        assert!(!is_square_attacked(&pos, Square::G3, Color::White));
        assert!(is_square_attacked(&pos, Square::D7, Color::Black));
        assert!(!is_square_attacked(&pos, Square::E6, Color::Black));
    }
}
