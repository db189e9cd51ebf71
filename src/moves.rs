// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move`.
//!
//! A move records where it starts, where it lands, a snapshot of the piece making it, and a small
//! set of flags describing anything special about it. Castles are encoded as a king move of two
//! squares; the rook's relocation is implied. En-passant captures land on the passed-over square,
//! and the captured pawn sits beside the origin, not on the destination.
use crate::types::{Piece, PieceKind, Square};

bitflags! {
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const DOUBLE_PAWN_PUSH = 0b0000_0010;
        const EN_PASSANT = 0b0000_0100;
        const CASTLE = 0b0000_1000;
        const PROMOTION = 0b0001_0000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    origin: Square,
    destination: Square,
    piece: Piece,
    flags: MoveFlags,
    promotion: Option<PieceKind>,
}

impl Move {
    fn new(origin: Square, destination: Square, piece: Piece, flags: MoveFlags) -> Move {
        Move {
            origin,
            destination,
            piece,
            flags,
            promotion: None,
        }
    }

    pub fn quiet(origin: Square, destination: Square, piece: Piece) -> Move {
        Move::new(origin, destination, piece, MoveFlags::QUIET)
    }

    pub fn capture(origin: Square, destination: Square, piece: Piece) -> Move {
        Move::new(origin, destination, piece, MoveFlags::CAPTURE)
    }

    pub fn double_pawn_push(origin: Square, destination: Square, piece: Piece) -> Move {
        Move::new(origin, destination, piece, MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub fn en_passant(origin: Square, destination: Square, piece: Piece) -> Move {
        Move::new(
            origin,
            destination,
            piece,
            MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
        )
    }

    pub fn castle(origin: Square, destination: Square, king: Piece) -> Move {
        Move::new(origin, destination, king, MoveFlags::CASTLE)
    }

    /// A pawn move onto the far rank. The promotion piece is left unchosen; see `with_promotion`.
    pub fn promotion(origin: Square, destination: Square, pawn: Piece) -> Move {
        Move::new(origin, destination, pawn, MoveFlags::PROMOTION)
    }

    pub fn promotion_capture(origin: Square, destination: Square, pawn: Piece) -> Move {
        Move::new(
            origin,
            destination,
            pawn,
            MoveFlags::PROMOTION | MoveFlags::CAPTURE,
        )
    }

    /// Records the piece a promoting pawn becomes. Has no effect on moves that do not promote.
    pub fn with_promotion(self, kind: PieceKind) -> Move {
        if !self.is_promotion() {
            return self;
        }

        Move {
            promotion: Some(kind),
            ..self
        }
    }

    pub fn origin(&self) -> Square {
        self.origin
    }

    pub fn destination(&self) -> Square {
        self.destination
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    pub fn is_quiet(&self) -> bool {
        self.flags == MoveFlags::QUIET
    }

    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    pub fn is_kingside_castle(&self) -> bool {
        self.is_castle() && self.destination.file() > self.origin.file()
    }

    pub fn is_queenside_castle(&self) -> bool {
        self.is_castle() && self.destination.file() < self.origin.file()
    }

    pub fn is_promotion(&self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    /// The promotion explicitly requested for this move, if any.
    pub fn requested_promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// The piece a promoting pawn turns into. Defaults to a queen when no choice was made.
    pub fn promotion_piece(&self) -> PieceKind {
        self.promotion.unwrap_or(PieceKind::Queen)
    }
}
