//! Question pool construction.
//!
//! A pool is a shuffled selection of countries. When the previous session's
//! countries are known, the draw prefers countries the player has not just seen:
//! each pick comes from the unseen partition with probability
//! [`NEW_COUNTRY_PROBABILITY`] while both partitions still have candidates.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Country;

pub const NEW_COUNTRY_PROBABILITY: f64 = 0.9;

/// Ordered list of countries presented during one session.
pub type QuestionPool = Vec<&'static Country>;

/// Country codes shown in the immediately preceding session.
/// Owned by whoever spans several sessions; replaced at every session start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriorSessionMemory {
  codes: HashSet<&'static str>,
}

impl PriorSessionMemory {
  pub fn new() -> Self { Self::default() }

  /// Memory for the session that is about to play `pool`.
  pub fn from_pool(pool: &[&'static Country]) -> Self {
    Self { codes: pool.iter().map(|c| c.code).collect() }
  }

  pub fn contains(&self, code: &str) -> bool { self.codes.contains(code) }
  pub fn is_empty(&self) -> bool { self.codes.is_empty() }
  pub fn len(&self) -> usize { self.codes.len() }
}

/// Uniform random permutation of a copy of `items`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
  let mut out = items.to_vec();
  out.shuffle(rng);
  out
}

/// Build a pool of at most `limit` countries from `source`.
///
/// With no memory, or when the whole source is requested, this is a plain
/// shuffle truncated to `limit`. Otherwise unseen and seen countries are drawn
/// from independently shuffled partitions and the result is shuffled again so
/// the draw order does not leak which partition a country came from.
pub fn build_pool<R: Rng + ?Sized>(
  source: &[&'static Country],
  limit: usize,
  previous: &PriorSessionMemory,
  rng: &mut R,
) -> QuestionPool {
  if previous.is_empty() || limit >= source.len() {
    let mut pool = shuffled(source, rng);
    pool.truncate(limit);
    return pool;
  }

  let (unseen, seen) = source
    .iter()
    .copied()
    .partition::<Vec<&'static Country>, _>(|c| !previous.contains(c.code));
  let mut unseen = shuffled(&unseen, rng).into_iter();
  let mut seen = shuffled(&seen, rng).into_iter();

  let mut pool = Vec::with_capacity(limit);
  while pool.len() < limit {
    let unseen_left = unseen.len() > 0;
    let seen_left = seen.len() > 0;
    let next = match (unseen_left, seen_left) {
      (false, false) => break,
      (true, false) => unseen.next(),
      (false, true) => seen.next(),
      (true, true) => {
        if rng.gen_bool(NEW_COUNTRY_PROBABILITY) { unseen.next() } else { seen.next() }
      }
    };
    pool.extend(next);
  }

  pool.shuffle(rng);
  pool
}
