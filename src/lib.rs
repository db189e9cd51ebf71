// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! artemis is a chess rules engine: legal move generation, check and game-termination
//! detection, and a fixed-depth minimax search that recommends a move.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
pub mod eval;
pub mod game;
mod move_generator;
mod moves;
pub mod notation;
mod perft;
mod position;
pub mod search;
mod types;

pub use game::{Game, GameState, RulesConfig};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveFlags};
pub use notation::FenParseError;
pub use perft::perft;
pub use position::{InvariantViolation, MoveError, Position};
pub use types::{Color, Piece, PieceKind, RangeError, Square};

use crate::eval::MaterialEvaluator;
use crate::search::{MinimaxSearcher, NullDataRecorder, SearchError, Searcher};

/// A position with the standard starting arrangement.
pub fn new_game() -> Position {
    Position::from_start_position()
}

/// Recommends a move for the side to move by searching `depth` plies with plain minimax over
/// material. Returns `None` only when the side to move has no legal moves.
pub fn best_move(pos: &Position, depth: u32) -> Result<Option<Move>, SearchError> {
    let mut searcher = MinimaxSearcher::<MaterialEvaluator>::new();
    let result = searcher.search(pos, depth, &NullDataRecorder)?;
    Ok(result.best_move)
}
