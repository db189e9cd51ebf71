// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Human-readable notation: algebraic square names, piece letters, coordinate moves and FEN.
//!
//! This is the boundary between text and the board model. Nothing else in the crate parses or
//! produces notation; callers convert at the edges and hand `Square`s and `Position`s inward.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square counts must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling rights"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant square"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

/// Error returned when a string doesn't name a square, such as "e9" or "z1".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSquareError(String);

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a square", self.0)
    }
}

impl Error for ParseSquareError {}

/// Error returned when a coordinate move such as "e2e4" or "e7e8q" can't be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMoveError(String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a coordinate move", self.0)
    }
}

impl Error for ParseMoveError {}

fn file_from_char(c: char) -> Option<i32> {
    match c {
        'a'..='h' => Some(c as i32 - 'a' as i32 + 1),
        _ => None,
    }
}

fn rank_from_char(c: char) -> Option<i32> {
    match c {
        '1'..='8' => Some(c as i32 - '1' as i32 + 1),
        _ => None,
    }
}

fn file_to_char(file: i32) -> char {
    (b'a' + (file - 1) as u8) as char
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let err = || ParseSquareError(s.to_owned());
        let mut chars = s.chars();
        let file = chars.next().and_then(file_from_char).ok_or_else(err)?;
        let rank = chars.next().and_then(rank_from_char).ok_or_else(err)?;
        if chars.next().is_some() {
            return Err(err());
        }

        Square::new(file, rank).map_err(|_| err())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", file_to_char(self.file()), self.rank())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(kind)
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

/// White pieces are uppercase, black pieces lowercase.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lower = self.kind.to_string();
        match self.color {
            Color::White => write!(f, "{}", lower.to_ascii_uppercase()),
            Color::Black => write!(f, "{}", lower),
        }
    }
}

/// Moves print in coordinate form: origin, destination, and a promotion letter if one applies.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.destination())?;
        if self.is_promotion() {
            write!(f, "{}", self.promotion_piece())?;
        }

        Ok(())
    }
}

/// Parses a coordinate move like "e2e4" or "e7e8n" into its origin, destination, and optional
/// promotion piece.
pub fn parse_move(s: &str) -> Result<(Square, Square, Option<PieceKind>), ParseMoveError> {
    let err = || ParseMoveError(s.to_owned());
    if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
        return Err(err());
    }

    let origin = s[0..2].parse::<Square>().map_err(|_| err())?;
    let destination = s[2..4].parse::<Square>().map_err(|_| err())?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(PieceKind::try_from(c).map_err(|_| err())?),
        None => None,
    };

    Ok((origin, destination, promotion))
}

//
// FEN parsing and generation.
//
// FEN has no notion of whether a piece has moved; it records castling rights instead. On the way
// in, a king or rook is treated as unmoved only if a castling right refers to it. On the way out,
// a right is written whenever the king and the matching rook are both unmoved on their original
// squares.
//

const CASTLE_RIGHTS: [(char, Color, i32); 4] = [
    ('K', Color::White, 8),
    ('Q', Color::White, 1),
    ('k', Color::Black, 8),
    ('q', Color::Black, 1),
];

const KING_FILE: i32 = 5;

fn unmoved_at(pos: &Position, kind: PieceKind, color: Color, file: i32) -> bool {
    match Square::new(file, color.back_rank()).map(|sq| pos.piece_at(sq)) {
        Ok(Some(piece)) => piece.kind == kind && piece.color == color && !piece.has_moved,
        _ => false,
    }
}

fn mark_unmoved(pos: &mut Position, kind: PieceKind, color: Color, file: i32) {
    if let Ok(sq) = Square::new(file, color.back_rank()) {
        match pos.piece_at(sq) {
            Some(piece) if piece.kind == kind && piece.color == color => {
                pos.remove(sq);
                pos.place(Piece::new(kind, color), sq);
            }
            _ => {}
        }
    }
}

impl Position {
    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            iter.next();
            Ok(side)
        }

        fn eat_castle_rights(iter: &mut Stream) -> Result<Vec<char>, FenParseError> {
            if peek(iter)? == '-' {
                iter.next();
                return Ok(vec![]);
            }

            let mut rights = vec![];
            while let Some(&c) = iter.peek() {
                if c == ' ' {
                    break;
                }

                if !CASTLE_RIGHTS.iter().any(|&(right, _, _)| right == c) || rights.contains(&c) {
                    return Err(FenParseError::InvalidCastle);
                }

                rights.push(c);
                iter.next();
            }

            if rights.is_empty() {
                return Err(FenParseError::InvalidCastle);
            }

            Ok(rights)
        }

        fn eat_en_passant(iter: &mut Stream) -> Result<Option<i32>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                iter.next();
                return Ok(None);
            }

            let file = file_from_char(c).ok_or(FenParseError::InvalidEnPassant)?;
            iter.next();
            match peek(iter)? {
                '3' | '6' => {
                    iter.next();
                    Ok(Some(file))
                }
                _ => Err(FenParseError::InvalidEnPassant),
            }
        }

        fn eat_number(
            iter: &mut Stream,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                iter.next();
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let mut pos = Position::new();
        let iter = &mut fen.as_ref().chars().peekable();
        for rank in (1..=8).rev() {
            let mut file = 1;
            while file <= 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += c as i32 - '0' as i32;
                    if file > 9 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                let square =
                    Square::new(file, rank).map_err(|_| FenParseError::FileDoesNotSumToEight)?;

                // Kings and rooks only count as unmoved if a castling right says so.
                let piece = match piece.kind {
                    PieceKind::King | PieceKind::Rook => piece.moved(),
                    _ => piece,
                };
                pos.place(piece, square);
                iter.next();
                file += 1;
            }

            if rank != 1 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        pos.set_side_to_move(eat_side_to_move(iter)?);
        eat(iter, ' ')?;
        for right in eat_castle_rights(iter)? {
            for &(c, color, rook_file) in CASTLE_RIGHTS.iter() {
                if c == right && king_on_home_square(&pos, color) {
                    mark_unmoved(&mut pos, PieceKind::King, color, KING_FILE);
                    mark_unmoved(&mut pos, PieceKind::Rook, color, rook_file);
                }
            }
        }
        eat(iter, ' ')?;
        pos.set_en_passant_file(eat_en_passant(iter)?);
        eat(iter, ' ')?;
        pos.set_halfmove_clock(eat_number(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?);
        eat(iter, ' ')?;
        pos.set_fullmove_clock(eat_number(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?);
        if let Some(c) = iter.next() {
            return Err(FenParseError::UnexpectedChar(c));
        }

        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for rank in (1..=8).rev() {
            let mut empty_squares = 0;
            for file in 1..=8 {
                let piece = Square::new(file, rank)
                    .ok()
                    .and_then(|sq| self.piece_at(sq));
                if let Some(piece) = piece {
                    if empty_squares != 0 {
                        let _ = write!(&mut buf, "{}", empty_squares);
                    }
                    let _ = write!(&mut buf, "{}", piece);
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                let _ = write!(&mut buf, "{}", empty_squares);
            }

            if rank != 1 {
                buf.push('/');
            }
        }

        let _ = write!(&mut buf, " {} ", self.side_to_move());
        let mut any_rights = false;
        for &(c, color, rook_file) in CASTLE_RIGHTS.iter() {
            if unmoved_at(self, PieceKind::King, color, KING_FILE)
                && unmoved_at(self, PieceKind::Rook, color, rook_file)
            {
                buf.push(c);
                any_rights = true;
            }
        }
        if !any_rights {
            buf.push('-');
        }

        buf.push(' ');
        match self.en_passant_file() {
            // The target square is the one the double-pushing pawn passed over.
            Some(file) => {
                let rank = match self.side_to_move() {
                    Color::White => 6,
                    Color::Black => 3,
                };
                let _ = write!(&mut buf, "{}{}", file_to_char(file), rank);
            }
            None => buf.push('-'),
        }

        let _ = write!(
            &mut buf,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_clock()
        );
        buf
    }
}

/// A castling right only makes sense when the king sits on its home square.
fn king_on_home_square(pos: &Position, color: Color) -> bool {
    match Square::new(KING_FILE, color.back_rank()).map(|sq| pos.piece_at(sq)) {
        Ok(Some(piece)) => piece.kind == PieceKind::King && piece.color == color,
        _ => false,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (1..=8).rev() {
            for file in 1..=8 {
                match Square::new(file, rank).ok().and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in 1..=8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in 1..=8 {
            write!(f, " {} ", file_to_char(file))?;
        }

        writeln!(f)?;
        Ok(())
    }
}
