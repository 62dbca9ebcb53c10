//! Progressive letter disclosure.
//!
//! Level 0 is free-text entry, level 1 switches to letter boxes without
//! revealing anything, and every level above that discloses one more letter.
//! Disclosure only grows within a question. The first letter is held back
//! until every other letter is showing.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Country;

pub const MAX_HINT_LEVEL: u8 = 5;

/// Number of letters shown at `hint_level`.
pub fn target_reveal_count(hint_level: u8) -> usize {
  usize::from(hint_level.saturating_sub(1))
}

/// Char positions of `name` that can ever be revealed (everything but spaces).
pub fn letter_positions(name: &str) -> Vec<usize> {
  name
    .chars()
    .enumerate()
    .filter(|(_, ch)| *ch != ' ')
    .map(|(i, _)| i)
    .collect()
}

/// Revealed positions for `country` at `hint_level`, extending `previous`.
///
/// The result is always a superset of `previous` unless `hint_level <= 1`,
/// which clears disclosure. New positions are drawn uniformly from the
/// unrevealed non-first letters; the first letter comes last.
pub fn revealed_indices<R: Rng + ?Sized>(
  country: &Country,
  hint_level: u8,
  previous: &BTreeSet<usize>,
  rng: &mut R,
) -> BTreeSet<usize> {
  if hint_level <= 1 {
    return BTreeSet::new();
  }

  let target = target_reveal_count(hint_level);
  let mut revealed = previous.clone();
  if revealed.len() >= target {
    return revealed;
  }

  let positions = letter_positions(country.name);
  let first = positions.first().copied().filter(|p| *p == 0);

  let mut candidates: Vec<usize> = positions
    .iter()
    .copied()
    .filter(|p| Some(*p) != first && !revealed.contains(p))
    .collect();
  candidates.shuffle(rng);

  for p in candidates {
    if revealed.len() >= target {
      break;
    }
    revealed.insert(p);
  }

  if revealed.len() < target {
    if let Some(p) = first {
      revealed.insert(p);
    }
  }

  revealed
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{find_by_code, list_all};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn levels_zero_and_one_reveal_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let chad = find_by_code("td").unwrap();
    let previous: BTreeSet<usize> = [1, 2].into_iter().collect();
    assert!(revealed_indices(chad, 0, &previous, &mut rng).is_empty());
    assert!(revealed_indices(chad, 1, &previous, &mut rng).is_empty());
  }

  #[test]
  fn chad_level_two_reveals_one_non_first_letter() {
    let chad = find_by_code("td").unwrap();
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let revealed = revealed_indices(chad, 2, &BTreeSet::new(), &mut rng);
      assert_eq!(revealed.len(), 1);
      let p = *revealed.iter().next().unwrap();
      assert!((1..=3).contains(&p), "revealed {p}");
    }
  }

  #[test]
  fn disclosure_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(99);
    for country in list_all() {
      let mut revealed = BTreeSet::new();
      for level in 2..=MAX_HINT_LEVEL {
        let next = revealed_indices(country, level, &revealed, &mut rng);
        assert!(revealed.is_subset(&next), "{} shrank at level {level}", country.name);
        revealed = next;
      }
    }
  }

  #[test]
  fn spaces_never_revealed() {
    let mut rng = StdRng::seed_from_u64(5);
    let cv = find_by_code("cv").unwrap();
    let mut revealed = BTreeSet::new();
    for level in 2..=12 {
      revealed = revealed_indices(cv, level, &revealed, &mut rng);
    }
    let chars: Vec<char> = cv.name.chars().collect();
    assert!(revealed.iter().all(|i| chars[*i] != ' '));
    assert_eq!(revealed.len(), letter_positions(cv.name).len());
  }

  #[test]
  fn first_letter_held_back_until_others_shown() {
    let mut rng = StdRng::seed_from_u64(17);
    for country in list_all() {
      let non_first = letter_positions(country.name).len() - 1;
      let mut revealed = BTreeSet::new();
      for level in 2..=MAX_HINT_LEVEL {
        revealed = revealed_indices(country, level, &revealed, &mut rng);
        if target_reveal_count(level) <= non_first {
          assert!(!revealed.contains(&0), "{} leaked its first letter", country.name);
        }
      }
    }
  }

  #[test]
  fn short_name_eventually_reveals_first_letter() {
    let mut rng = StdRng::seed_from_u64(23);
    // "Oman": three non-first letters, level 5 targets four.
    let oman = find_by_code("om").unwrap();
    let mut revealed = BTreeSet::new();
    for level in 2..=MAX_HINT_LEVEL {
      revealed = revealed_indices(oman, level, &revealed, &mut rng);
    }
    assert_eq!(revealed, (0..4).collect::<BTreeSet<usize>>());
  }

  #[test]
  fn satisfied_previous_set_is_returned_unchanged() {
    let mut rng = StdRng::seed_from_u64(2);
    let chad = find_by_code("td").unwrap();
    let previous: BTreeSet<usize> = [2, 3].into_iter().collect();
    assert_eq!(revealed_indices(chad, 3, &previous, &mut rng), previous);
  }
}
