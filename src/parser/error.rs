use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FormatError {
  /// Neither a `Found` nor a `Puzzle can be solved:` line appeared.
  StartMarkerMissing,
}

impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FormatError::StartMarkerMissing => write!(f, "start token not found"),
    }
  }
}

impl Error for FormatError {}
