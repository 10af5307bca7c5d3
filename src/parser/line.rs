use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Placement;

// Leading `.*` is greedy, so the last `#n (r,c)` group on a line wins.
const REGEX_PLACEMENT: &str = r"^.*#([0-9]+)\s*\(([0-9]+),([0-9]+)\)";

static PLACEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(REGEX_PLACEMENT).unwrap());

#[derive(Debug, Eq, PartialEq)]
pub enum LineMatch {
  Matched(Placement),
  Unmatched,
}

/// Tries to read a `#<size> (<row>,<column>)` placement out of a log line.
pub fn match_placement(line: &str) -> LineMatch {
  let capture = match PLACEMENT.captures(line) {
    Some(c) => c,
    None => return LineMatch::Unmatched,
  };

  let field = |idx: usize| capture.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
  match (field(1), field(2), field(3)) {
    // the far edges must still fit so the extent can cover them
    (Some(size), Some(row), Some(column))
      if size > 0 && row.checked_add(size).is_some() && column.checked_add(size).is_some() => {
      LineMatch::Matched(Placement::new(size, row, column))
    }
    _ => {
      warn!("placement out of range: {}", line.trim_end());
      LineMatch::Unmatched
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn matched(size: u32, row: u32, column: u32) -> LineMatch {
    LineMatch::Matched(Placement::new(size, row, column))
  }

  #[test]
  fn test_plain_line() {
    assert_eq!(match_placement("#3 (0,0)"), matched(3, 0, 0));
  }

  #[test]
  fn test_no_space_before_paren() {
    assert_eq!(match_placement("#2(1,3)"), matched(2, 1, 3));
  }

  #[test]
  fn test_leading_text_and_wide_gap() {
    assert_eq!(match_placement("  square #12 \t (40,7) placed"), matched(12, 40, 7));
  }

  #[test]
  fn test_last_group_wins() {
    assert_eq!(match_placement("#1 (0,0) then #4 (2,2)"), matched(4, 2, 2));
  }

  #[test]
  fn test_non_placement_lines() {
    assert_eq!(match_placement(""), LineMatch::Unmatched);
    assert_eq!(match_placement("done"), LineMatch::Unmatched);
    assert_eq!(match_placement("#3 (0, 0)"), LineMatch::Unmatched);
    assert_eq!(match_placement("3 (0,0)"), LineMatch::Unmatched);
    assert_eq!(match_placement("#a (0,0)"), LineMatch::Unmatched);
  }

  #[test]
  fn test_zero_size_is_rejected() {
    assert_eq!(match_placement("#0 (1,1)"), LineMatch::Unmatched);
  }

  #[test]
  fn test_far_edge_overflow_is_rejected() {
    assert_eq!(match_placement("#5 (4294967295,0)"), LineMatch::Unmatched);
    assert_eq!(match_placement("#1 (0,4294967295)"), LineMatch::Unmatched);
    assert_eq!(match_placement("#1 (4294967294,0)"), matched(1, 4294967294, 0));
  }

  #[test]
  fn test_overflowing_number_is_rejected() {
    assert_eq!(match_placement("#1 (99999999999,0)"), LineMatch::Unmatched);
  }
}
