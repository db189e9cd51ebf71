// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::error::Error;
use std::fmt;

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Straight-line offsets, as (file, rank) deltas. Rooks and queens slide along these.
pub const STRAIGHT: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Diagonal offsets. Bishops and queens slide along these.
pub const DIAGONAL: [(i32, i32); 4] = [(1, -1), (-1, 1), (1, 1), (-1, -1)];

/// The union of `STRAIGHT` and `DIAGONAL`: one king step, or one queen ray, in every direction.
pub const KING_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
];

pub const KNIGHT_LEAPS: [(i32, i32); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// Error produced when a (file, rank) pair does not name a square on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangeError {
    pub file: i32,
    pub rank: i32,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "coordinates ({}, {}) are off the board; files and ranks run from 1 to 8",
            self.file, self.rank
        )
    }
}

impl Error for RangeError {}

/// A square on the board. Files and ranks both run from 1 to 8; file 1 is the a-file and rank 1
/// is White's back rank. A `Square` can only be constructed for a valid pair, so any function
/// taking a `Square` never has to range-check it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub fn new(file: i32, rank: i32) -> Result<Square, RangeError> {
        if in_range(file) && in_range(rank) {
            Ok(Square::at(file as u8, rank as u8))
        } else {
            Err(RangeError { file, rank })
        }
    }

    const fn at(file: u8, rank: u8) -> Square {
        Square((rank - 1) * 8 + (file - 1))
    }

    pub fn file(self) -> i32 {
        i32::from(self.0 & 7) + 1
    }

    pub fn rank(self) -> i32 {
        i32::from(self.0 >> 3) + 1
    }

    /// Returns the square reached by moving `(files, ranks)` away from this one, or `None` if
    /// that walks off the board.
    pub fn offset(self, (files, ranks): (i32, i32)) -> Option<Square> {
        Square::new(self.file() + files, self.rank() + ranks).ok()
    }

    /// Light squares are those where file + rank is odd; a1 is dark.
    pub fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

pub fn in_range(coordinate: i32) -> bool {
    coordinate >= 1 && coordinate <= 8
}

macro_rules! square_constants {
    ($($name:ident = ($file:expr, $rank:expr)),* $(,)*) => {
        impl Square {
            $(pub const $name: Square = Square::at($file, $rank);)*
        }
    };
}

square_constants! {
    A1 = (1, 1), B1 = (2, 1), C1 = (3, 1), D1 = (4, 1),
    E1 = (5, 1), F1 = (6, 1), G1 = (7, 1), H1 = (8, 1),
    A2 = (1, 2), B2 = (2, 2), C2 = (3, 2), D2 = (4, 2),
    E2 = (5, 2), F2 = (6, 2), G2 = (7, 2), H2 = (8, 2),
    A3 = (1, 3), B3 = (2, 3), C3 = (3, 3), D3 = (4, 3),
    E3 = (5, 3), F3 = (6, 3), G3 = (7, 3), H3 = (8, 3),
    A4 = (1, 4), B4 = (2, 4), C4 = (3, 4), D4 = (4, 4),
    E4 = (5, 4), F4 = (6, 4), G4 = (7, 4), H4 = (8, 4),
    A5 = (1, 5), B5 = (2, 5), C5 = (3, 5), D5 = (4, 5),
    E5 = (5, 5), F5 = (6, 5), G5 = (7, 5), H5 = (8, 5),
    A6 = (1, 6), B6 = (2, 6), C6 = (3, 6), D6 = (4, 6),
    E6 = (5, 6), F6 = (6, 6), G6 = (7, 6), H6 = (8, 6),
    A7 = (1, 7), B7 = (2, 7), C7 = (3, 7), D7 = (4, 7),
    E7 = (5, 7), F7 = (6, 7), G7 = (7, 7), H7 = (8, 7),
    A8 = (1, 8), B8 = (2, 8), C8 = (3, 8), D8 = (4, 8),
    E8 = (5, 8), F8 = (6, 8), G8 = (7, 8), H8 = (8, 8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The rank delta of a single pawn step for this color.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    pub fn pawn_rank(self) -> i32 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    pub fn promotion_rank(self) -> i32 {
        self.toggle().back_rank()
    }

    /// The rank a pawn of this color must stand on to capture en passant.
    pub fn en_passant_rank(self) -> i32 {
        match self {
            Color::White => 5,
            Color::Black => 4,
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The directions this kind slides along. Empty for pieces that do not slide.
    pub fn rays(self) -> &'static [(i32, i32)] {
        match self {
            PieceKind::Rook => &STRAIGHT,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Queen => &KING_STEPS,
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
        }
    }

    pub fn is_minor(self) -> bool {
        match self {
            PieceKind::Bishop | PieceKind::Knight => true,
            _ => false,
        }
    }
}

/// A piece record, owned by value by the position that holds it. Pieces know nothing about where
/// they stand; the position's grid is the only source of that.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,

    /// Whether this piece has ever moved. Only consulted for kings and rooks, to decide castling
    /// eligibility.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    /// Compares kind and color only, ignoring movement history.
    pub fn same_as(self, other: Piece) -> bool {
        self.kind == other.kind && self.color == other.color
    }
}
