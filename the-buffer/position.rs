//! Addressing into a document: raw character offsets or line/column pairs.

use std::fmt;

/// A single point in a text buffer as a line/column pair.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineCol {
  pub line:   usize,
  pub column: usize,
}

impl LineCol {
  pub fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }

  pub const fn zero() -> Self {
    Self { line: 0, column: 0 }
  }

  pub const fn is_zero(&self) -> bool {
    self.line == 0 && self.column == 0
  }
}

impl From<(usize, usize)> for LineCol {
  fn from(value: (usize, usize)) -> Self {
    LineCol::new(value.0, value.1)
  }
}

impl fmt::Display for LineCol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

/// Where a document operation applies: either an absolute character offset or
/// a zero-based [`LineCol`] pair resolved against the document's current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
  Offset(usize),
  Coords(LineCol),
}

impl From<usize> for Position {
  fn from(offset: usize) -> Self {
    Position::Offset(offset)
  }
}

impl From<LineCol> for Position {
  fn from(coords: LineCol) -> Self {
    Position::Coords(coords)
  }
}

impl From<(usize, usize)> for Position {
  fn from(coords: (usize, usize)) -> Self {
    Position::Coords(coords.into())
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Position::Offset(offset) => write!(f, "offset {offset}"),
      Position::Coords(coords) => write!(f, "{coords}"),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn conversions() {
    assert_eq!(Position::from(3), Position::Offset(3));
    assert_eq!(Position::from((1, 5)), Position::Coords(LineCol::new(1, 5)));
    assert!(LineCol::zero().is_zero());
    assert!(!LineCol::new(0, 1).is_zero());
  }

  #[test]
  fn display() {
    assert_eq!(Position::from(3).to_string(), "offset 3");
    assert_eq!(Position::from((1, 5)).to_string(), "1:5");
  }
}
