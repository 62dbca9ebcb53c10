//! Answer checking: normalization against canonical and alternate names, and
//! assembly of letter-box answers with revealed cells force-filled.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Country;

/// What the player typed. Free text while no hint is active, per-letter cells
/// (aligned with the country name, spaces included) once letter boxes show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerInput {
  Text(String),
  Letters(Vec<String>),
}

impl Default for PlayerInput {
  fn default() -> Self { PlayerInput::Text(String::new()) }
}

impl PlayerInput {
  /// Empty buffer of the right shape for a question at `hint_level`.
  pub fn blank_for(country: &Country, hint_level: u8) -> Self {
    if hint_level == 0 {
      PlayerInput::Text(String::new())
    } else {
      PlayerInput::Letters(vec![String::new(); country.name.chars().count()])
    }
  }

  /// Positional view of the input, one slot per character.
  /// Text is read one char per cell; a letter cell keeps its first non-blank char.
  pub fn cells(&self) -> Vec<Option<char>> {
    match self {
      PlayerInput::Text(s) => s.chars().map(|c| if c == ' ' { None } else { Some(c) }).collect(),
      PlayerInput::Letters(cells) => cells.iter().map(|cell| cell.chars().find(|c| !c.is_whitespace())).collect(),
    }
  }

  /// Flattened text, used for free-text answers.
  pub fn as_text(&self) -> String {
    match self {
      PlayerInput::Text(s) => s.clone(),
      PlayerInput::Letters(_) => self.cells().into_iter().flatten().collect(),
    }
  }

  pub fn is_blank(&self) -> bool {
    match self {
      PlayerInput::Text(s) => s.trim().is_empty(),
      PlayerInput::Letters(cells) => cells.iter().all(|c| c.trim().is_empty()),
    }
  }
}

/// Case and surrounding-whitespace insensitive match against the canonical
/// name or any alternate name. Empty input never matches.
pub fn is_correct(country: &Country, raw_input: &str) -> bool {
  let answer = raw_input.trim().to_lowercase();
  if answer.is_empty() {
    return false;
  }
  if country.name.to_lowercase() == answer {
    return true;
  }
  country
    .alternate_names
    .iter()
    .any(|alt| alt.to_lowercase() == answer)
}

/// Letter-box answer: spaces come from the name, revealed positions from the
/// name, everything else from the player's cells (missing cells contribute nothing).
pub fn build_letter_box_answer(country: &Country, revealed: &BTreeSet<usize>, cells: &[Option<char>]) -> String {
  country
    .name
    .chars()
    .enumerate()
    .filter_map(|(i, ch)| {
      if ch == ' ' {
        Some(' ')
      } else if revealed.contains(&i) {
        Some(ch)
      } else {
        cells.get(i).copied().flatten()
      }
    })
    .collect()
}

/// The string actually judged on submit: raw text at hint level 0, otherwise
/// the letter boxes with every revealed cell taken from the canonical name.
pub fn effective_answer(country: &Country, hint_level: u8, revealed: &BTreeSet<usize>, input: &PlayerInput) -> String {
  if hint_level == 0 {
    input.as_text()
  } else {
    build_letter_box_answer(country, revealed, &input.cells())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::find_by_code;

  fn chad() -> &'static Country { find_by_code("td").unwrap() }

  #[test]
  fn case_and_whitespace_insensitive() {
    assert!(is_correct(chad(), "chad"));
    assert!(is_correct(chad(), "  CHAD \t"));
    assert!(!is_correct(chad(), "chod"));
  }

  #[test]
  fn empty_input_is_wrong() {
    assert!(!is_correct(chad(), ""));
    assert!(!is_correct(chad(), "   "));
  }

  #[test]
  fn alternate_names_are_accepted() {
    let uk = find_by_code("gb").unwrap();
    assert!(is_correct(uk, "UK"));
    assert!(is_correct(uk, "great britain"));
    let de = find_by_code("de").unwrap();
    assert!(!is_correct(de, "Deutschland"));
  }

  #[test]
  fn revealed_cells_override_player_cells() {
    let revealed: BTreeSet<usize> = [1, 3].into_iter().collect();
    // Player typed garbage into revealed cells; the canonical letters win.
    let cells = vec![Some('C'), Some('x'), Some('a'), Some('x')];
    assert_eq!(build_letter_box_answer(chad(), &revealed, &cells), "Chad");
  }

  #[test]
  fn spaces_are_always_emitted() {
    let nz = find_by_code("nz").unwrap();
    let input = PlayerInput::Letters(
      "new zealand".chars().map(|c| if c == ' ' { String::new() } else { c.to_string() }).collect(),
    );
    let answer = effective_answer(nz, 1, &BTreeSet::new(), &input);
    assert_eq!(answer, "new zealand");
    assert!(is_correct(nz, &answer));
  }

  #[test]
  fn missing_cells_shorten_the_answer() {
    let revealed: BTreeSet<usize> = [2].into_iter().collect();
    let answer = build_letter_box_answer(chad(), &revealed, &[Some('C')]);
    assert_eq!(answer, "Ca");
  }

  #[test]
  fn text_at_level_zero_is_used_verbatim() {
    let input = PlayerInput::Text(" chad ".into());
    assert_eq!(effective_answer(chad(), 0, &BTreeSet::new(), &input), " chad ");
  }

  #[test]
  fn blank_buffer_matches_name_length() {
    let nz = find_by_code("nz").unwrap();
    assert_eq!(PlayerInput::blank_for(nz, 0), PlayerInput::Text(String::new()));
    match PlayerInput::blank_for(nz, 2) {
      PlayerInput::Letters(cells) => assert_eq!(cells.len(), "New Zealand".len()),
      other => panic!("unexpected buffer {other:?}"),
    }
  }
}
