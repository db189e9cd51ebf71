// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::attacks;
use crate::move_generator::{CastleSide, MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square, COLORS};

/// Errors raised when game logic is asked to reason about a position that does not hold exactly
/// one king of each color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    MissingKing(Color),
    ExtraKing(Color),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvariantViolation::MissingKing(color) => write!(f, "no {:?} king on the board", color),
            InvariantViolation::ExtraKing(color) => {
                write!(f, "more than one {:?} king on the board", color)
            }
        }
    }
}

impl Error for InvariantViolation {}

/// Recoverable failures from `Position::play`. None of these leave anything modified, so an
/// interactive caller can simply ask for another move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    EmptyOrigin(Square),
    WrongColor(Square),
    OwnPieceAtDestination(Square),
    IllegalMove(Square, Square),
    InvalidPromotion(PieceKind),
    GameOver,
    NotPlayable(InvariantViolation),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::EmptyOrigin(sq) => {
                write!(f, "no piece at ({}, {})", sq.file(), sq.rank())
            }
            MoveError::WrongColor(sq) => write!(
                f,
                "piece at ({}, {}) does not belong to the side to move",
                sq.file(),
                sq.rank()
            ),
            MoveError::OwnPieceAtDestination(sq) => write!(
                f,
                "destination ({}, {}) is occupied by a friendly piece",
                sq.file(),
                sq.rank()
            ),
            MoveError::IllegalMove(from, to) => write!(
                f,
                "moving from ({}, {}) to ({}, {}) is not legal",
                from.file(),
                from.rank(),
                to.file(),
                to.rank()
            ),
            MoveError::InvalidPromotion(kind) => write!(f, "can't promote to {:?}", kind),
            MoveError::GameOver => write!(f, "the game is already over"),
            MoveError::NotPlayable(violation) => {
                write!(f, "position is not playable: {}", violation)
            }
        }
    }
}

impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::NotPlayable(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<InvariantViolation> for MoveError {
    fn from(violation: InvariantViolation) -> MoveError {
        MoveError::NotPlayable(violation)
    }
}

/// A chess position. The position exclusively owns its pieces: the grid is a flat array indexed
/// by square, and nothing inside it points back at the position. Cloning a position therefore
/// copies every piece, and positions derived from a common ancestor never share state.
#[derive(Clone, Debug)]
pub struct Position {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    halfmove_clock: u32,
    fullmove_clock: u32,
    en_passant_file: Option<i32>,
}

//
// Board state getters
//

impl Position {
    /// An empty board with White to move.
    pub const fn new() -> Position {
        Position {
            squares: [None; 64],
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_clock: 1,
            en_passant_file: None,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    /// The file of a pawn that advanced two squares on the previous ply, if any.
    pub fn en_passant_file(&self) -> Option<i32> {
        self.en_passant_file
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// All pieces of the given color, along with the squares they stand on.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Every piece on the board, a1 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// Returns the square of `color`'s king, failing if there isn't exactly one.
    pub fn king_square(&self, color: Color) -> Result<Square, InvariantViolation> {
        let mut kings = self
            .pieces(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq);
        match (kings.next(), kings.next()) {
            (Some(sq), None) => Ok(sq),
            (None, _) => Err(InvariantViolation::MissingKing(color)),
            (Some(_), Some(_)) => Err(InvariantViolation::ExtraKing(color)),
        }
    }

    /// A position is playable if it holds exactly one king of each color.
    pub fn check_playable(&self) -> Result<(), InvariantViolation> {
        for &color in COLORS.iter() {
            self.king_square(color)?;
        }

        Ok(())
    }

    pub fn is_playable(&self) -> bool {
        self.check_playable().is_ok()
    }

    /// Compares piece placement by kind and color only.
    pub fn placement_eq(&self, other: &Position) -> bool {
        self.squares
            .iter()
            .zip(other.squares.iter())
            .all(|pair| match pair {
                (Some(a), Some(b)) => a.same_as(*b),
                (None, None) => true,
                _ => false,
            })
    }
}

//
// Board manipulation and move application
//

impl Position {
    /// The standard 32-piece starting arrangement, White to move.
    pub fn from_start_position() -> Position {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pos = Position::new();
        for &color in COLORS.iter() {
            for (file, &kind) in (1..=8).zip(BACK_RANK.iter()) {
                pos.put(Piece::new(kind, color), file, color.back_rank());
                pos.put(Piece::new(PieceKind::Pawn, color), file, color.pawn_rank());
            }
        }

        pos
    }

    fn put(&mut self, piece: Piece, file: i32, rank: i32) {
        if let Ok(sq) = Square::new(file, rank) {
            self.squares[sq.as_index()] = Some(piece);
        }
    }

    /// Places a piece on an empty square. Returns false, and leaves the board alone, if the
    /// square is already occupied.
    pub fn place(&mut self, piece: Piece, square: Square) -> bool {
        let slot = &mut self.squares[square.as_index()];
        if slot.is_some() {
            return false;
        }

        *slot = Some(piece);
        true
    }

    /// Clears a square. Returns false if it was already empty.
    pub fn remove(&mut self, square: Square) -> bool {
        self.squares[square.as_index()].take().is_some()
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_clock(&mut self, clock: u32) {
        self.fullmove_clock = clock;
    }

    pub(crate) fn set_en_passant_file(&mut self, file: Option<i32>) {
        self.en_passant_file = file;
    }

    /// Produces the position that results from making `mov`. The receiver is never modified.
    ///
    /// No legality checking is done here; `mov` is assumed to have come from the move generator
    /// for this position.
    pub fn apply_move(&self, mov: Move) -> Position {
        let mut next = self.clone();
        next.make_move(mov);
        next
    }

    fn make_move(&mut self, mov: Move) {
        let origin = mov.origin();
        let dest = mov.destination();
        let moving = self.squares[origin.as_index()]
            .take()
            .unwrap_or_else(|| mov.piece());

        // An en-passant capture lands behind the pawn it takes.
        let mut captured = self.squares[dest.as_index()].take().is_some();
        if mov.is_en_passant() {
            if let Some(passed) = dest.offset((0, -moving.color.forward())) {
                captured |= self.squares[passed.as_index()].take().is_some();
            }
        }

        if mov.is_castle() {
            let side = if mov.is_kingside_castle() {
                CastleSide::King
            } else {
                CastleSide::Queen
            };

            let rank = origin.rank();
            if let (Ok(from), Ok(to)) = (
                Square::new(side.rook_file(), rank),
                Square::new(side.rook_landing_file(), rank),
            ) {
                if let Some(rook) = self.squares[from.as_index()].take() {
                    self.squares[to.as_index()] = Some(rook.moved());
                }
            }
        }

        let landing = if mov.is_promotion() {
            Piece::new(mov.promotion_piece(), moving.color).moved()
        } else {
            moving.moved()
        };
        self.squares[dest.as_index()] = Some(landing);

        self.en_passant_file = if mov.is_double_pawn_push() {
            Some(origin.file())
        } else {
            None
        };

        if moving.kind == PieceKind::Pawn || captured {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.side_to_move == Color::Black {
            self.fullmove_clock += 1;
        }

        self.side_to_move = self.side_to_move.toggle();
    }
}

//
// Board analysis (check detection and legality)
//

impl Position {
    /// Returns whether `color`'s king is attacked. Fails if `color` doesn't have exactly one king.
    pub fn is_check(&self, color: Color) -> Result<bool, InvariantViolation> {
        let king = self.king_square(color)?;
        Ok(attacks::is_square_attacked(self, king, color.toggle()))
    }

    /// Given a pseudo-legal move, determines whether or not it leaves the mover's king safe.
    pub fn is_legal_given_pseudolegal(&self, mov: Move) -> Result<bool, InvariantViolation> {
        let color = mov.piece().color;
        if mov.is_castle() {
            // The generator already refuses castles out of or through check; this re-verifies it
            // for moves constructed elsewhere.
            let them = color.toggle();
            let step = if mov.is_kingside_castle() { 1 } else { -1 };
            if attacks::is_square_attacked(self, mov.origin(), them) {
                return Ok(false);
            }

            if let Some(transit) = mov.origin().offset((step, 0)) {
                if attacks::is_square_attacked(self, transit, them) {
                    return Ok(false);
                }
            }
        }

        let next = self.apply_move(mov);
        Ok(!next.is_check(color)?)
    }

    /// Every legal move for the piece on `square`, judged from that piece's own point of view.
    /// An empty square has no moves.
    pub fn legal_moves_from(&self, square: Square) -> Result<MoveVec, InvariantViolation> {
        self.check_playable()?;
        let mut pseudolegal = MoveVec::new();
        MoveGenerator::new().generate_moves_from(self, square, &mut pseudolegal);
        self.filter_legal(pseudolegal)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Result<MoveVec, InvariantViolation> {
        self.check_playable()?;
        let mut pseudolegal = MoveVec::new();
        MoveGenerator::new().generate_moves(self, &mut pseudolegal);
        self.filter_legal(pseudolegal)
    }

    fn filter_legal(&self, pseudolegal: MoveVec) -> Result<MoveVec, InvariantViolation> {
        let mut legal = MoveVec::new();
        for mov in pseudolegal {
            if self.is_legal_given_pseudolegal(mov)? {
                legal.push(mov);
            }
        }

        Ok(legal)
    }

    /// The squares the piece on `square` may legally move to.
    pub fn legal_destinations(&self, square: Square) -> Result<Vec<Square>, InvariantViolation> {
        Ok(self
            .legal_moves_from(square)?
            .iter()
            .map(|mov| mov.destination())
            .collect())
    }

    /// Whether the side to move has any legal move at all. Stops at the first one found.
    pub fn has_legal_move(&self) -> Result<bool, InvariantViolation> {
        self.check_playable()?;
        let gen = MoveGenerator::new();
        for (square, _) in self.pieces(self.side_to_move) {
            let mut pseudolegal = MoveVec::new();
            gen.generate_moves_from(self, square, &mut pseudolegal);
            for mov in pseudolegal {
                if self.is_legal_given_pseudolegal(mov)? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Moves the side to move's piece from `origin` to `destination`, validating the request
    /// first. A promoting pawn becomes `promotion`, or a queen if none is given.
    pub fn play(
        &self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Position, MoveError> {
        let piece = self
            .piece_at(origin)
            .ok_or(MoveError::EmptyOrigin(origin))?;
        if piece.color != self.side_to_move {
            return Err(MoveError::WrongColor(origin));
        }

        if let Some(occupant) = self.piece_at(destination) {
            if occupant.color == piece.color {
                return Err(MoveError::OwnPieceAtDestination(destination));
            }
        }

        let mov = self
            .legal_moves_from(origin)?
            .iter()
            .find(|mov| mov.destination() == destination)
            .cloned()
            .ok_or(MoveError::IllegalMove(origin, destination))?;
        let mov = match promotion {
            Some(kind) if mov.is_promotion() => {
                if kind == PieceKind::King || kind == PieceKind::Pawn {
                    return Err(MoveError::InvalidPromotion(kind));
                }

                mov.with_promotion(kind)
            }
            _ => mov,
        };

        debug!("playing {:?}", mov);
        Ok(self.apply_move(mov))
    }
}

//
// Trait implementations
//

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
