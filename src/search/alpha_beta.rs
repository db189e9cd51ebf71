// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp;

use crate::eval::{BoardEvaluator, Score};
use crate::moves::Move;
use crate::position::{InvariantViolation, Position};
use crate::search::searcher::{finish_search, score_leaf, validate_depth};
use crate::search::{DataRecorder, Record, SearchError, SearchResult, Searcher};
use crate::types::Color;

/// Minimax with alpha-beta pruning. Picks the same move as `MinimaxSearcher` while visiting fewer
/// nodes.
///
/// Bounds are kept from the root's point of view rather than negated at every ply, since the
/// evaluator always scores for the root's side.
pub struct AlphaBetaSearcher<E> {
    evaluator: E,
}

impl<E: BoardEvaluator> AlphaBetaSearcher<E> {
    pub fn new() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher {
            evaluator: Default::default(),
        }
    }
}

impl<E: BoardEvaluator> Default for AlphaBetaSearcher<E> {
    fn default() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher::new()
    }
}

impl<E: BoardEvaluator> Searcher for AlphaBetaSearcher<E> {
    fn search(
        &mut self,
        pos: &Position,
        depth: u32,
        recorder: &dyn DataRecorder,
    ) -> Result<SearchResult, SearchError> {
        validate_depth(depth)?;
        pos.check_playable()?;
        let mut search = AlphaBetaSearch {
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

struct AlphaBetaSearch<'a, E> {
    evaluator: &'a E,
    root_side: Color,
    stats: Record,
}

impl<'a, E: BoardEvaluator> AlphaBetaSearch<'a, E> {
    fn root(&mut self, pos: &Position, depth: u32) -> Result<(Option<Move>, Score), SearchError> {
        self.stats.nodes += 1;
        let moves = pos.legal_moves()?;
        if moves.is_empty() {
            let score = score_leaf(self.evaluator, pos, self.root_side, &mut self.stats)?;
            return Ok((None, score));
        }

        let mut alpha = Score::Loss;
        let beta = Score::Win;
        let mut best: Option<(Move, Score)> = None;
        for mov in moves {
            // A child that fails low returns an upper bound no better than alpha, which is never
            // strictly better than the current best, so ties still go to the earliest move.
            let score = self.alpha_beta(&pos.apply_move(mov), depth - 1, alpha, beta)?;
            debug!("root move {:?}: {}", mov, score);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mov, score)),
            }

            alpha = cmp::max(alpha, score);
        }

        Ok(match best {
            Some((mov, score)) => (Some(mov), score),
            None => (None, Score::Loss),
        })
    }

    fn alpha_beta(
        &mut self,
        pos: &Position,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, InvariantViolation> {
        self.stats.nodes += 1;
        if depth == 0 {
            return score_leaf(self.evaluator, pos, self.root_side, &mut self.stats);
        }

        let moves = pos.legal_moves()?;
        if moves.is_empty() {
            return score_leaf(self.evaluator, pos, self.root_side, &mut self.stats);
        }

        if pos.side_to_move() == self.root_side {
            let mut value = Score::Loss;
            for mov in moves {
                value = cmp::max(
                    value,
                    self.alpha_beta(&pos.apply_move(mov), depth - 1, alpha, beta)?,
                );
                if value >= beta {
                    break;
                }

                alpha = cmp::max(alpha, value);
            }

            Ok(value)
        } else {
            let mut value = Score::Win;
            for mov in moves {
                value = cmp::min(
                    value,
                    self.alpha_beta(&pos.apply_move(mov), depth - 1, alpha, beta)?,
                );
                if value <= alpha {
                    break;
                }

                beta = cmp::min(beta, value);
            }

            Ok(value)
        }
    }
}
