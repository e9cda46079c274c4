//! Span selection and transformation over a frozen view of a document.
//!
//! A [`Selection`] captures the document's rendered text and version counter
//! at creation time. Matching ([`select_first`], the `expand_*` family) runs
//! against that snapshot; [`delete`] and [`replace`] hand the computed span
//! back to the engine as delete/insert calls.
//!
//! # Staleness
//!
//! Every operation takes the document as a parameter and first compares the
//! captured version against the live one. Any intervening mutation — including
//! the selection's own `delete`/`replace` — makes further calls fail with
//! [`SelectionError::Stale`]; selections never auto-refresh. Capture a new one
//! after every write:
//!
//! ```ignore
//! let mut doc = Document::new("Hello World.");
//! let mut selection = doc.create_selection();
//! if selection.select_first(&doc, "World")? {
//!   selection.replace(&mut doc, "Piece Buffer")?;
//! }
//! // `selection` is now stale; `doc.create_selection()` for the next edit.
//! ```
//!
//! # Offsets
//!
//! The selected span is an `Option<usize>` offset plus a length, both in
//! characters. Offset 0 is a present, valid value like any other — a match at
//! the very start of the document selects it, and a selection can expand back
//! to the start.
//!
//! [`select_first`]: Selection::select_first
//! [`delete`]: Selection::delete
//! [`replace`]: Selection::replace

use std::{
  ops::Range,
  sync::Arc,
};

use regex::Regex;
use thiserror::Error;

use crate::{
  chars::{
    char_len,
    char_to_byte,
  },
  document::{
    Document,
    DocumentError,
  },
  position::Position,
};

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
  #[error(
    "document modified since the selection was captured \
     (selection version {selection}, document version {document})"
  )]
  Stale { selection: u64, document: u64 },
  #[error("no current selection")]
  NoSelection,
  #[error(transparent)]
  Document(#[from] DocumentError),
}

/// Something that can locate its first occurrence in a haystack.
///
/// Implemented for string literals (plain substring search), single
/// characters, and compiled [`Regex`] patterns, so selection APIs accept
/// either without ceremony.
pub trait Matcher {
  /// Byte range of the first match in `hay`, or `None`.
  fn find_in(&self, hay: &str) -> Option<Range<usize>>;
}

impl Matcher for &str {
  fn find_in(&self, hay: &str) -> Option<Range<usize>> {
    hay.find(self).map(|start| start..start + self.len())
  }
}

impl Matcher for String {
  fn find_in(&self, hay: &str) -> Option<Range<usize>> {
    self.as_str().find_in(hay)
  }
}

impl Matcher for char {
  fn find_in(&self, hay: &str) -> Option<Range<usize>> {
    hay.find(*self).map(|start| start..start + self.len_utf8())
  }
}

impl Matcher for Regex {
  fn find_in(&self, hay: &str) -> Option<Range<usize>> {
    self.find(hay).map(|found| found.range())
  }
}

impl Matcher for &Regex {
  fn find_in(&self, hay: &str) -> Option<Range<usize>> {
    self.find(hay).map(|found| found.range())
  }
}

#[derive(Debug, Clone)]
pub struct Selection {
  text:    Arc<str>,
  version: u64,
  /// Start of the selected span in characters; `None` until something has
  /// been selected.
  offset:  Option<usize>,
  /// Span length in characters.
  length:  usize,
}

impl Selection {
  pub(crate) fn capture(doc: &Document) -> Self {
    Self {
      text:    doc.text(),
      version: doc.version(),
      offset:  None,
      length:  0,
    }
  }

  /// The snapshot this selection matches against.
  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn offset(&self) -> Option<usize> {
    self.offset
  }

  pub fn length(&self) -> usize {
    self.length
  }

  /// The selected character span, if anything is selected.
  pub fn span(&self) -> Option<Range<usize>> {
    self.offset.map(|offset| offset..offset + self.length)
  }

  fn check_version(&self, doc: &Document) -> Result<()> {
    if self.version != doc.version() {
      return Err(SelectionError::Stale {
        selection: self.version,
        document:  doc.version(),
      });
    }
    Ok(())
  }

  fn current_offset(&self) -> Result<usize> {
    self.offset.ok_or(SelectionError::NoSelection)
  }

  /// Directly selects `length` characters at `pos`, discarding any previous
  /// selection.
  pub fn select(&mut self, doc: &Document, pos: impl Into<Position>, length: usize) -> Result<()> {
    self.check_version(doc)?;
    let pos = pos.into();
    let offset = doc.to_offset(pos).ok_or(DocumentError::OutOfBounds {
      pos,
      len: Some(length),
      doc_len: doc.len(),
    })?;
    self.offset = Some(offset);
    self.length = length;
    Ok(())
  }

  /// Selects the first match of `pattern` in the snapshot. Returns whether a
  /// match was found. A match at index 0, or of zero width, is a valid
  /// selection.
  pub fn select_first(&mut self, doc: &Document, pattern: impl Matcher) -> Result<bool> {
    self.check_version(doc)?;
    let Some(found) = pattern.find_in(&self.text) else {
      return Ok(false);
    };
    self.offset = Some(char_len(&self.text[..found.start]));
    self.length = char_len(&self.text[found]);
    Ok(true)
  }

  /// Grows the selection backwards or forwards to include `pos`. Positions
  /// already inside the span leave it unchanged.
  pub fn expand(&mut self, doc: &Document, pos: impl Into<Position>) -> Result<()> {
    self.check_version(doc)?;
    let offset = self.current_offset()?;
    let pos = pos.into();
    let target = doc.to_offset(pos).ok_or(DocumentError::OutOfBounds {
      pos,
      len: None,
      doc_len: doc.len(),
    })?;

    if target < offset {
      self.length += offset - target;
      self.offset = Some(target);
    } else if target > offset + self.length {
      self.length = target - offset;
    }
    Ok(())
  }

  /// Extends the selection forward through the end of the next match of
  /// `pattern` after the current span. Returns whether a match was found.
  pub fn expand_forward(&mut self, doc: &Document, pattern: impl Matcher) -> Result<bool> {
    self.expand_to_match(doc, pattern, |found| found.end)
  }

  /// Extends the selection forward up to — but not including — the next
  /// match of `pattern`. Returns whether a match was found.
  pub fn expand_until(&mut self, doc: &Document, pattern: impl Matcher) -> Result<bool> {
    self.expand_to_match(doc, pattern, |found| found.start)
  }

  fn expand_to_match(
    &mut self,
    doc: &Document,
    pattern: impl Matcher,
    boundary: impl Fn(&Range<usize>) -> usize,
  ) -> Result<bool> {
    self.check_version(doc)?;
    let offset = self.current_offset()?;

    let search_start = char_to_byte(&self.text, offset + self.length);
    let Some(found) = pattern.find_in(&self.text[search_start..]) else {
      return Ok(false);
    };
    let boundary_byte = search_start + boundary(&found);
    self.length += char_len(&self.text[search_start..boundary_byte]);
    Ok(true)
  }

  /// Extends the selection to the end of the document.
  pub fn expand_to_end(&mut self, doc: &Document) -> Result<()> {
    self.check_version(doc)?;
    let offset = self.current_offset()?;
    self.length += doc.len().saturating_sub(offset + self.length);
    Ok(())
  }

  /// Deletes the selected span from the document. The resulting version bump
  /// invalidates this selection for further use.
  pub fn delete(&self, doc: &mut Document) -> Result<()> {
    self.check_version(doc)?;
    if let Some(offset) = self.offset {
      if self.length > 0 {
        doc.delete(offset, self.length)?;
      }
    }
    Ok(())
  }

  /// Replaces the selected span with `text` (delete, then insert at the old
  /// span start). Invalidates this selection like [`delete`](Self::delete).
  pub fn replace(&self, doc: &mut Document, text: &str) -> Result<()> {
    self.check_version(doc)?;
    if let Some(offset) = self.offset {
      if self.length > 0 {
        doc.delete(offset, self.length)?;
      }
      doc.insert(offset, text)?;
    }
    Ok(())
  }
}
