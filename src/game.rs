// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game record and the game-state state machine layered on top of it.
//!
//! A `Game` owns every position reached so far, one per ply, and classifies the game after each
//! move. Once a terminal state is reached the game refuses further moves.
use hashbrown::HashMap;

use crate::position::{InvariantViolation, MoveError, Position};
use crate::types::{Color, PieceKind, Square};

/// Where a game stands. `InProgress` is the only non-terminal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    /// White has checkmated Black.
    CheckmateWhite,
    /// Black has checkmated White.
    CheckmateBlack,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }

    pub fn is_checkmate(self) -> bool {
        match self {
            GameState::CheckmateWhite | GameState::CheckmateBlack => true,
            _ => false,
        }
    }

    pub fn is_draw(self) -> bool {
        self.is_over() && !self.is_checkmate()
    }

    /// The side that delivered checkmate, if anyone did.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::CheckmateWhite => Some(Color::White),
            GameState::CheckmateBlack => Some(Color::Black),
            _ => None,
        }
    }

    fn checkmate_by(color: Color) -> GameState {
        match color {
            Color::White => GameState::CheckmateWhite,
            Color::Black => GameState::CheckmateBlack,
        }
    }
}

/// Tunable rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RulesConfig {
    /// Plies without a pawn move or capture after which the game is drawn. Counted per ply, so
    /// the default of 50 is reached after 25 moves by each side.
    pub fifty_move_threshold: u32,
}

impl Default for RulesConfig {
    fn default() -> RulesConfig {
        RulesConfig {
            fifty_move_threshold: 50,
        }
    }
}

/// The identity of a position for repetition purposes: what stands where, whose turn it is, and
/// every legal move available to every piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    placement: Vec<Option<(PieceKind, Color)>>,
    side_to_move: Color,
    moves: Vec<(Square, Square)>,
}

impl RepetitionKey {
    pub fn new(pos: &Position) -> Result<RepetitionKey, InvariantViolation> {
        let placement = Square::all()
            .map(|sq| pos.piece_at(sq).map(|piece| (piece.kind, piece.color)))
            .collect();
        let mut moves = vec![];
        for (square, _) in pos.occupied() {
            for mov in pos.legal_moves_from(square)? {
                moves.push((mov.origin(), mov.destination()));
            }
        }

        moves.sort();
        Ok(RepetitionKey {
            placement,
            side_to_move: pos.side_to_move(),
            moves,
        })
    }
}

/// Whether neither side could possibly deliver checkmate with what is left on the board.
///
/// That is the case with bare kings, with kings and a single bishop or knight, or with kings and
/// one bishop per side where the two bishops are of opposite colors and stand on squares of
/// opposite colors. Any pawn, rook, or queen rules it out.
pub fn is_insufficient_material(pos: &Position) -> bool {
    let others: Vec<_> = pos
        .occupied()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .collect();
    match others.as_slice() {
        [] => true,
        [(_, piece)] => piece.kind.is_minor(),
        [(sq_a, a), (sq_b, b)] => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.color != b.color
                && sq_a.is_light() != sq_b.is_light()
        }
        _ => false,
    }
}

/// An append-only record of the positions in a game, and the state it is in.
pub struct Game {
    positions: Vec<Position>,
    occurrences: HashMap<RepetitionKey, usize>,
    state: GameState,
    config: RulesConfig,
}

impl Game {
    /// A new game from the standard starting position, with default rules.
    pub fn new() -> Game {
        Game::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Game {
        let mut occurrences = HashMap::new();
        let start = Position::from_start_position();
        if let Ok(key) = RepetitionKey::new(&start) {
            occurrences.insert(key, 1);
        }

        Game {
            positions: vec![start],
            occurrences,
            state: GameState::InProgress,
            config,
        }
    }

    /// A game starting from an arbitrary position. The position must be playable; it may
    /// already be terminal, in which case the game starts out over.
    pub fn from_position(start: Position, config: RulesConfig) -> Result<Game, InvariantViolation> {
        start.check_playable()?;
        let mut game = Game {
            positions: vec![],
            occurrences: HashMap::new(),
            state: GameState::InProgress,
            config,
        };

        game.record(start)?;
        game.state = game.evaluate()?;
        Ok(game)
    }

    pub fn current(&self) -> &Position {
        // the record always holds at least the starting position.
        &self.positions[self.positions.len() - 1]
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Plies played since the start of the record.
    pub fn ply_count(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> RulesConfig {
        self.config
    }

    /// How many times `pos`, by repetition identity, has occurred in this game.
    pub fn occurrences(&self, pos: &Position) -> Result<usize, InvariantViolation> {
        let key = RepetitionKey::new(pos)?;
        Ok(self.occurrences.get(&key).cloned().unwrap_or(0))
    }

    /// Plays a move for the side to move and returns the resulting state of the game.
    pub fn play(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameState, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }

        let next = self.current().play(origin, destination, promotion)?;
        self.record(next)?;
        self.state = self.evaluate()?;
        if self.state.is_over() {
            info!(
                "game over after {} plies: {:?}",
                self.ply_count(),
                self.state
            );
        }

        Ok(self.state)
    }

    fn record(&mut self, pos: Position) -> Result<(), InvariantViolation> {
        let key = RepetitionKey::new(&pos)?;
        *self.occurrences.entry(key).or_insert(0) += 1;
        self.positions.push(pos);
        Ok(())
    }

    /// Classifies the current position. The first matching condition wins, in the order
    /// checkmate/stalemate, insufficient material, repetition, fifty-move rule.
    pub fn evaluate(&self) -> Result<GameState, InvariantViolation> {
        let pos = self.current();
        let side = pos.side_to_move();
        if !pos.has_legal_move()? {
            if pos.is_check(side)? {
                return Ok(GameState::checkmate_by(side.toggle()));
            }

            return Ok(GameState::Stalemate);
        }

        if is_insufficient_material(pos) {
            return Ok(GameState::InsufficientMaterial);
        }

        if self.occurrences(pos)? >= 3 {
            return Ok(GameState::ThreefoldRepetition);
        }

        if pos.halfmove_clock() >= self.config.fifty_move_threshold {
            return Ok(GameState::FiftyMoveRule);
        }

        Ok(GameState::InProgress)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
