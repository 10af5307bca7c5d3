use crate::models::Placement;

/// Which of the two solver output layouts a log used.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogFormat {
  /// `Found ...` followed by `Solution:` / `(end solution)` blocks.
  Delimited,
  /// `Puzzle can be solved: ...` followed by one bare run of placements.
  Implicit,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Solution {
  pub placements: Vec<Placement>,
}

impl Solution {
  pub fn new() -> Solution {
    Solution::default()
  }

  pub fn push(&mut self, placement: Placement) {
    self.placements.push(placement);
  }

  pub fn len(&self) -> usize {
    self.placements.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
    self.placements.iter()
  }
}

/// Canvas dimension needed to show every placement seen so far. Never below 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Extent(u32);

impl Extent {
  pub const MIN: Extent = Extent(1);

  pub fn new() -> Extent {
    Extent::MIN
  }

  pub fn include(&mut self, placement: &Placement) {
    self.0 = self.0.max(placement.reach());
  }

  pub fn get(&self) -> u32 {
    self.0
  }
}

impl Default for Extent {
  fn default() -> Extent {
    Extent::MIN
  }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolutionSet {
  pub extent: Extent,
  pub format: LogFormat,
  pub solutions: Vec<Solution>,
  /// Delimited solutions that were opened but never closed and so were dropped.
  pub discarded: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extent_starts_at_one() {
    assert_eq!(Extent::new().get(), 1);
  }

  #[test]
  fn test_extent_never_shrinks() {
    let mut extent = Extent::new();
    extent.include(&Placement::new(3, 2, 0));
    assert_eq!(extent.get(), 5);
    extent.include(&Placement::new(1, 0, 0));
    assert_eq!(extent.get(), 5);
  }
}
