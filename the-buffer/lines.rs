//! Lazy line iteration over a frozen text snapshot.
//!
//! [`Lines`] walks a point-in-time render of the document, yielding each
//! `\n`-delimited line (without the delimiter) together with its zero-based
//! line number. The tail after the last `\n` — even when empty — counts as one
//! final line, so `"a\nb\n"` has three lines: `"a"`, `"b"`, `""`. The iterator
//! owns its snapshot and is therefore immune to document mutation while it
//! runs, but it does not reflect later edits either; create a fresh iterator
//! after any write.

use std::{
  ops::Range,
  sync::Arc,
};

use regex::Regex;

use crate::Tendril;

pub struct Lines {
  text: Arc<str>,
  /// Byte position of the next unread character.
  pos:  usize,
  line: usize,
  eof:  bool,
}

impl Lines {
  pub(crate) fn new(text: Arc<str>, start: usize) -> Self {
    let mut lines = Self {
      text,
      pos: 0,
      line: 0,
      eof: false,
    };
    for _ in 0..start {
      if lines.next().is_none() {
        break;
      }
    }
    lines
  }
}

impl Iterator for Lines {
  type Item = (Tendril, usize);

  fn next(&mut self) -> Option<(Tendril, usize)> {
    if self.eof {
      return None;
    }

    let rest = &self.text[self.pos..];
    let (line, advance) = match rest.find('\n') {
      Some(idx) => (&rest[..idx], idx + 1),
      None => {
        self.eof = true;
        (rest, rest.len())
      },
    };
    self.pos += advance;

    let number = self.line;
    self.line += 1;
    Some((Tendril::from(line), number))
  }
}

/// A line matched by a pattern, with the match range inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
  /// Byte range of the match within `line`.
  pub range:  Range<usize>,
  pub line:   Tendril,
  pub number: usize,
}

impl LineMatch {
  pub fn matched(&self) -> &str {
    &self.line[self.range.clone()]
  }
}

/// Filters a [`Lines`] iterator down to the lines matching a pattern,
/// preserving the original line numbers.
pub struct MatchingLines {
  base:    Lines,
  pattern: Regex,
}

impl MatchingLines {
  pub(crate) fn new(base: Lines, pattern: Regex) -> Self {
    Self { base, pattern }
  }
}

impl Iterator for MatchingLines {
  type Item = LineMatch;

  fn next(&mut self) -> Option<LineMatch> {
    for (line, number) in self.base.by_ref() {
      if let Some(found) = self.pattern.find(&line) {
        let range = found.range();
        return Some(LineMatch { range, line, number });
      }
    }
    None
  }
}
