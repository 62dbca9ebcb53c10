//! Points awarded for a correct answer, by the hint level it was given at.

use crate::hints::MAX_HINT_LEVEL;

pub const HINT_SCORES: [u32; 6] = [10, 8, 6, 4, 2, 1];

/// Best possible award for a single question.
pub const MAX_POINTS_PER_QUESTION: u32 = HINT_SCORES[0];

pub fn points_for_hint_level(hint_level: u8) -> u32 {
  HINT_SCORES[usize::from(hint_level.min(MAX_HINT_LEVEL))]
}
