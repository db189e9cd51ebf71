// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::position::{InvariantViolation, Position};
use crate::types::Color;

mod material_evaluator;
mod score;

pub use material_evaluator::MaterialEvaluator;
pub use score::Score;

/// A static evaluation function. Scores are always given from `perspective`'s point of view, so
/// that a search can keep comparing leaves against the same player no matter whose turn it is.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, pos: &Position, perspective: Color) -> Result<Score, InvariantViolation>;
}
