use std::fmt;

/// One square of side `size` whose lower-left corner sits at (`row`, `column`).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Placement {
  pub size: u32,
  pub row: u32,
  pub column: u32,
}

impl Placement {
  pub fn new(size: u32, row: u32, column: u32) -> Placement {
    Placement { size, row, column }
  }

  /// Smallest extent that holds this square on both axes.
  pub fn reach(&self) -> u32 {
    self.row.saturating_add(self.size)
      .max(self.column.saturating_add(self.size))
  }
}

impl fmt::Display for Placement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{} ({},{})", self.size, self.row, self.column)
  }
}
