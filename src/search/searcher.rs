// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::eval::{BoardEvaluator, Score};
use crate::moves::Move;
use crate::position::{InvariantViolation, Position};
use crate::search::{DataRecorder, Record};
use crate::types::Color;

pub struct SearchResult {
    /// The move leading to the best child of the root, or `None` if the root has no legal moves.
    pub best_move: Option<Move>,
    pub nodes_searched: u64,
    /// The root's value, from the root side to move's point of view.
    pub score: Score,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Search depth must be even and at least 2.
    InvalidDepth(u32),
    NotPlayable(InvariantViolation),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::InvalidDepth(depth) => write!(
                f,
                "invalid search depth {}: depth must be even and at least 2",
                depth
            ),
            SearchError::NotPlayable(violation) => {
                write!(f, "can't search an unplayable position: {}", violation)
            }
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SearchError::NotPlayable(violation) => Some(violation),
            SearchError::InvalidDepth(_) => None,
        }
    }
}

impl From<InvariantViolation> for SearchError {
    fn from(violation: InvariantViolation) -> SearchError {
        SearchError::NotPlayable(violation)
    }
}

pub trait Searcher {
    fn search(
        &mut self,
        pos: &Position,
        depth: u32,
        recorder: &dyn DataRecorder,
    ) -> Result<SearchResult, SearchError>;
}

pub(crate) fn validate_depth(depth: u32) -> Result<(), SearchError> {
    if depth < 2 || depth % 2 != 0 {
        return Err(SearchError::InvalidDepth(depth));
    }

    Ok(())
}

/// Scores a leaf from the root's perspective and counts it.
pub(crate) fn score_leaf<E: BoardEvaluator>(
    evaluator: &E,
    pos: &Position,
    root_side: Color,
    stats: &mut Record,
) -> Result<Score, InvariantViolation> {
    stats.leaves += 1;
    let score = evaluator.evaluate(pos, root_side)?;
    if score.is_mate() {
        stats.mates += 1;
    }

    Ok(score)
}

pub(crate) fn finish_search(
    pos: &Position,
    best_move: Option<Move>,
    score: Score,
    stats: Record,
    recorder: &dyn DataRecorder,
) -> SearchResult {
    info!(
        "searched {} nodes ({} leaves, {} mates) to depth {}",
        stats.nodes, stats.leaves, stats.mates, stats.depth
    );
    if let Err(err) = recorder.record(pos, &stats) {
        warn!("failed to record search statistics: {}", err);
    }

    SearchResult {
        best_move,
        nodes_searched: stats.nodes,
        score,
    }
}

/// Plain fixed-depth minimax. Every node is expanded, and a node takes the best value among its
/// children for the root's side when the root's side is to move there, and the worst otherwise.
pub struct MinimaxSearcher<E> {
    evaluator: E,
}

impl<E: BoardEvaluator> MinimaxSearcher<E> {
    pub fn new() -> MinimaxSearcher<E> {
        MinimaxSearcher {
            evaluator: Default::default(),
        }
    }
}

impl<E: BoardEvaluator> Default for MinimaxSearcher<E> {
    fn default() -> MinimaxSearcher<E> {
        MinimaxSearcher::new()
    }
}

impl<E: BoardEvaluator> Searcher for MinimaxSearcher<E> {
    fn search(
        &mut self,
        pos: &Position,
        depth: u32,
        recorder: &dyn DataRecorder,
    ) -> Result<SearchResult, SearchError> {
        validate_depth(depth)?;
        pos.check_playable()?;
        let mut search = MinimaxSearch {
            evaluator: &self.evaluator,
            root_side: pos.side_to_move(),
            stats: Record {
                depth,
                ..Default::default()
            },
        };

        let (best_move, score) = search.root(pos, depth)?;
        Ok(finish_search(pos, best_move, score, search.stats, recorder))
    }
}

struct MinimaxSearch<'a, E> {
    evaluator: &'a E,
    root_side: Color,
    stats: Record,
}

impl<'a, E: BoardEvaluator> MinimaxSearch<'a, E> {
    fn root(&mut self, pos: &Position, depth: u32) -> Result<(Option<Move>, Score), SearchError> {
        self.stats.nodes += 1;
        let moves = pos.legal_moves()?;
        if moves.is_empty() {
            let score = score_leaf(self.evaluator, pos, self.root_side, &mut self.stats)?;
            return Ok((None, score));
        }

        let mut best: Option<(Move, Score)> = None;
        for mov in moves {
            let score = self.minimax(&pos.apply_move(mov), depth - 1)?;
            debug!("root move {:?}: {}", mov, score);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mov, score)),
            }
        }

        Ok(match best {
            Some((mov, score)) => (Some(mov), score),
            None => (None, Score::Loss),
        })
    }

    fn minimax(&mut self, pos: &Position, depth: u32) -> Result<Score, InvariantViolation> {
        self.stats.nodes += 1;
        if depth == 0 {
            return score_leaf(self.evaluator, pos, self.root_side, &mut self.stats);
        }

        let moves = pos.legal_moves()?;
        if moves.is_empty() {
            return score_leaf(self.evaluator, pos, self.root_side, &mut self.stats);
        }

        let maximizing = pos.side_to_move() == self.root_side;
        let mut value = if maximizing { Score::Loss } else { Score::Win };
        for mov in moves {
            let score = self.minimax(&pos.apply_move(mov), depth - 1)?;
            if (maximizing && score > value) || (!maximizing && score < value) {
                value = score;
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_depth, MinimaxSearcher, SearchError, Searcher};
    use crate::eval::{MaterialEvaluator, Score};
    use crate::position::{InvariantViolation, Position};
    use crate::search::NullDataRecorder;
    use crate::types::{Color, Square};

    fn searcher() -> MinimaxSearcher<MaterialEvaluator> {
        MinimaxSearcher::new()
    }

    #[test]
    fn depth_must_be_even() {
        assert!(validate_depth(2).is_ok());
        assert!(validate_depth(4).is_ok());
        assert_eq!(Err(SearchError::InvalidDepth(0)), validate_depth(0));
        assert_eq!(Err(SearchError::InvalidDepth(3)), validate_depth(3));

        let pos = Position::from_start_position();
        assert_eq!(
            Some(SearchError::InvalidDepth(1)),
            searcher().search(&pos, 1, &NullDataRecorder).err()
        );
    }

    #[test]
    fn unplayable_positions_are_rejected() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            Some(SearchError::NotPlayable(InvariantViolation::MissingKing(
                Color::Black
            ))),
            searcher().search(&pos, 2, &NullDataRecorder).err()
        );
    }

    #[test]
    fn finds_back_rank_mate() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let result = searcher().search(&pos, 2, &NullDataRecorder).unwrap();
        let best = result.best_move.unwrap();
        assert_eq!(Square::A1, best.origin());
        assert_eq!(Square::A8, best.destination());
        assert_eq!(Score::Win, result.score);
    }

    #[test]
    fn takes_free_material() {
        // the queen on d5 is hanging to the knight on c3
        let pos = Position::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 30").unwrap();
        let result = searcher().search(&pos, 2, &NullDataRecorder).unwrap();
        let best = result.best_move.unwrap();
        assert_eq!(Square::C3, best.origin());
        assert_eq!(Square::D5, best.destination());
    }

    #[test]
    fn no_moves_means_no_best_move() {
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let result = searcher().search(&pos, 2, &NullDataRecorder).unwrap();
        assert!(result.best_move.is_none());
        assert_eq!(Score::Loss, result.score);
        assert_eq!(1, result.nodes_searched);
    }
}
