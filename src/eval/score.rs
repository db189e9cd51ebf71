// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Score is the output of a board evaluation function. Board evaluators can return one of three
/// variants, depending on the board position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Score {
    /// The position is checkmate in favor of the player the score was computed for.
    Win,

    /// The position is checkmate against the player the score was computed for.
    Loss,

    /// The board position is not decided and the board evaluator has assigned the given score to
    /// this position, relative to the player the score was computed for.
    Evaluated(f32),
}

impl Score {
    pub fn is_mate(self) -> bool {
        match self {
            Score::Win | Score::Loss => true,
            Score::Evaluated(_) => false,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Score::Win => write!(f, "+inf"),
            Score::Loss => write!(f, "-inf"),
            Score::Evaluated(score) => write!(f, "{}", score),
        }
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Score) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Score) -> Ordering {
        // A win is better than everything that isn't a win, and a loss is worse than everything
        // that isn't a loss. Two evaluated scores compare like any other number.
        match (self, other) {
            (Score::Win, Score::Win) | (Score::Loss, Score::Loss) => Ordering::Equal,
            (Score::Win, _) => Ordering::Greater,
            (_, Score::Win) => Ordering::Less,
            (Score::Loss, _) => Ordering::Less,
            (_, Score::Loss) => Ordering::Greater,
            (Score::Evaluated(self_score), Score::Evaluated(other_score)) => self_score
                .partial_cmp(other_score)
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Win => Score::Loss,
            Score::Loss => Score::Win,
            Score::Evaluated(score) => Score::Evaluated(-score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn win_cmp() {
        assert!(Score::Win == Score::Win);
        assert!(Score::Win > Score::Evaluated(9999999f32));
        assert!(Score::Win > Score::Loss);
    }

    #[test]
    fn loss_cmp() {
        assert!(Score::Loss == Score::Loss);
        assert!(Score::Evaluated(-42f32) > Score::Loss);
        assert!(Score::Loss < Score::Win);
    }

    #[test]
    fn eval_cmp() {
        assert!(Score::Evaluated(1f32) < Score::Evaluated(2f32));
        assert!(Score::Evaluated(3f32) > Score::Evaluated(2f32));
        assert_eq!(
            Score::Evaluated(3f32),
            std::cmp::max(Score::Evaluated(3f32), Score::Evaluated(-1f32))
        );
    }

    #[test]
    fn neg() {
        assert_eq!(-Score::Win, Score::Loss);
        assert_eq!(-Score::Loss, Score::Win);
        assert_eq!(-Score::Evaluated(1f32), Score::Evaluated(-1f32));
    }

    #[test]
    fn display() {
        assert_eq!("+inf", Score::Win.to_string());
        assert_eq!("-inf", Score::Loss.to_string());
        assert_eq!("1.5", Score::Evaluated(1.5).to_string());
    }
}
