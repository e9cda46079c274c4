//! The piece-table engine.
//!
//! A [`Document`] never copies or mutates the text it was constructed with.
//! Edits are described by an ordered list of [`Piece`]s, each referencing a
//! contiguous slice of exactly one of two backing buffers: the immutable
//! `original` text, or the append-only `added` buffer that collects every
//! inserted run. Concatenating the referenced slices in list order yields the
//! current text.
//!
//! # Addressing
//!
//! The public API is character addressed: offsets and lengths count `char`s,
//! and positions may also be given as zero-based [`LineCol`] pairs. Pieces
//! internally store byte ranges (plus a cached char count) so buffer slicing
//! stays cheap. Line/column resolution is a linear scan over the pieces —
//! simplicity over an incremental line index, which is fine for batch-style
//! editing but not for per-keystroke use on large documents.
//!
//! # Versioning
//!
//! `version` increments exactly once per completed mutation. No-op calls
//! (inserting `""`, deleting zero characters) do not bump it; failed calls
//! validate before touching any state, so they don't either. [`Selection`]s
//! capture the counter and refuse to operate once it moves on.

use std::{
  cell::RefCell,
  sync::Arc,
};

use regex::Regex;
use thiserror::Error;

use crate::{
  chars::{
    char_len,
    char_to_byte,
  },
  lines::{
    Lines,
    MatchingLines,
  },
  list::{
    NodeId,
    NodeList,
  },
  position::{
    LineCol,
    Position,
  },
  selection::Selection,
};

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
  /// The requested position (or the end of the requested range) cannot be
  /// resolved within the document. Positions are never clamped.
  #[error("position {pos} out of bounds in document of length {doc_len}")]
  OutOfBounds {
    pos:     Position,
    /// Requested span length, for range operations.
    len:     Option<usize>,
    doc_len: usize,
  },
}

/// Which backing buffer a [`Piece`] references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSource {
  Original,
  Added,
}

/// Descriptor for one contiguous slice of a backing buffer. A piece never
/// spans both buffers and is never kept around with zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
  pub source: PieceSource,
  /// Byte offset into the backing buffer.
  pub start:  usize,
  /// Slice length in bytes.
  pub bytes:  usize,
  /// Slice length in characters.
  pub chars:  usize,
}

/// Memoized full-text render, cleared at the start of every mutation and
/// recomputed lazily on the next read.
#[derive(Debug, Default)]
struct SnapshotCache {
  text: Option<Arc<str>>,
}

/// The piece node containing an absolute offset, and the offset local to it.
#[derive(Debug, Clone, Copy)]
struct PieceLocation {
  node:  NodeId,
  local: usize,
}

#[derive(Debug)]
pub struct Document {
  original: Arc<str>,
  added:    String,
  pieces:   NodeList<Piece>,
  version:  u64,
  /// Total length in characters, maintained incrementally.
  len:      usize,
  cache:    RefCell<SnapshotCache>,
}

impl Document {
  pub fn new(text: impl Into<Arc<str>>) -> Self {
    let original: Arc<str> = text.into();
    let mut pieces = NodeList::new();
    if !original.is_empty() {
      pieces.push_back(Piece {
        source: PieceSource::Original,
        start:  0,
        bytes:  original.len(),
        chars:  char_len(&original),
      });
    }
    let len = char_len(&original);

    Self {
      original,
      added: String::new(),
      pieces,
      version: 0,
      len,
      cache: RefCell::default(),
    }
  }

  /// Total length in characters.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  /// True once the current text differs from the text the document was
  /// constructed with.
  pub fn is_dirty(&self) -> bool {
    *self.text() != *self.original
  }

  /// The current text. Memoized between mutations, so repeated reads are
  /// cheap and selections/iterators can share the render.
  pub fn text(&self) -> Arc<str> {
    {
      let cache = self.cache.borrow();
      if let Some(text) = &cache.text {
        return Arc::clone(text);
      }
    }

    let mut rendered = String::with_capacity(self.original.len() + self.added.len());
    for piece in self.pieces.iter() {
      rendered.push_str(self.piece_text(*piece));
    }
    let text: Arc<str> = rendered.into();
    self.cache.borrow_mut().text = Some(Arc::clone(&text));
    text
  }

  /// Appends `text` at the end of the document. Always records an operation
  /// (the version moves even for `""`). Returns the character delta.
  pub fn append(&mut self, text: &str) -> usize {
    self.begin_write();
    let delta = if text.is_empty() {
      // Still an operation, but an empty piece must not persist.
      0
    } else {
      let piece = self.push_added(text);
      let tail = self.pieces.tail();
      self.pieces.insert_after(tail, piece);
      self.len += piece.chars;
      piece.chars
    };
    tracing::trace!(version = self.version, chars = delta, "append");
    delta
  }

  /// Inserts `text` at `pos`. Returns the character delta.
  ///
  /// A line/column position with `column == 0` addressing one past the last
  /// existing line is accepted and appends `"\n"` followed by `text` — the
  /// sanctioned way to start typing on a line that does not exist yet. Any
  /// other unresolvable position is [`DocumentError::OutOfBounds`].
  pub fn insert(&mut self, pos: impl Into<Position>, text: &str) -> Result<usize> {
    let pos = pos.into();
    if text.is_empty() {
      return Ok(0);
    }

    let offset = self.to_offset(pos);
    let located = offset.and_then(|offset| self.locate_offset(offset));
    let Some(location) = located else {
      // The empty document has no piece to split; inserting at its start is
      // an append.
      if offset == Some(0) && self.pieces.is_empty() {
        return Ok(self.append(text));
      }

      if let Position::Coords(coords) = pos {
        if coords.column == 0 && coords.line == self.line_count() {
          let mut appended = String::with_capacity(text.len() + 1);
          appended.push('\n');
          appended.push_str(text);
          return Ok(self.append(&appended));
        }
      }

      return Err(DocumentError::OutOfBounds {
        pos,
        len: None,
        doc_len: self.len,
      });
    };

    self.begin_write();
    let piece = self.push_added(text);
    let (before, _) = self.split(location.node, location.local);
    self.pieces.insert_after(before, piece);
    self.len += piece.chars;
    tracing::trace!(version = self.version, chars = piece.chars, "insert");
    Ok(piece.chars)
  }

  /// Deletes `len` characters starting at `pos`. Deleting zero characters is
  /// a no-op. The whole range must resolve within the document before
  /// anything is mutated.
  pub fn delete(&mut self, pos: impl Into<Position>, len: usize) -> Result<()> {
    let pos = pos.into();
    if len == 0 {
      return Ok(());
    }

    let oob = |doc_len| DocumentError::OutOfBounds {
      pos,
      len: Some(len),
      doc_len,
    };
    let start = self.to_offset(pos).ok_or_else(|| oob(self.len))?;
    let end = start
      .checked_add(len)
      .filter(|&end| end <= self.len)
      .ok_or_else(|| oob(self.len))?;
    let start_location = self.locate_offset(start).ok_or_else(|| oob(self.len))?;

    self.begin_write();

    // Split at the start for a clean boundary. When the start falls exactly
    // on a piece boundary the split yields no after-half; the deletion then
    // begins at the successor node.
    let (before_start, after_start) = self.split(start_location.node, start_location.local);
    let removal_start =
      after_start.or_else(|| before_start.and_then(|node| self.pieces.next(node)));

    // The end split keeps the before-half as the inclusive end of the
    // removal. `end <= self.len` was validated above, so this resolves.
    let (removal_end, _) = match self.locate_offset(end) {
      Some(location) => self.split(location.node, location.local),
      None => (None, None),
    };

    if removal_start.is_some() {
      self.pieces.remove_range(removal_start, removal_end);
    }
    self.len -= len;
    tracing::trace!(version = self.version, chars = len, "delete");
    Ok(())
  }

  /// Resolves a position to an absolute character offset. Numeric offsets
  /// pass through unchanged (offset 0 included); line/column pairs are
  /// resolved by scanning, and fail when they address past the end of text.
  pub fn to_offset(&self, pos: impl Into<Position>) -> Option<usize> {
    match pos.into() {
      Position::Offset(offset) => Some(offset),
      Position::Coords(coords) => self.coords_to_offset(coords),
    }
  }

  pub fn line_count(&self) -> usize {
    self.lines().count()
  }

  /// Lazy line iteration over a frozen snapshot of the current text.
  pub fn lines(&self) -> Lines {
    Lines::new(self.text(), 0)
  }

  /// As [`lines`](Self::lines), skipping the first `start` lines.
  pub fn lines_from(&self, start: usize) -> Lines {
    Lines::new(self.text(), start)
  }

  /// Lines matching `pattern`, with their original line numbers.
  pub fn lines_matching(&self, pattern: Regex) -> MatchingLines {
    MatchingLines::new(self.lines(), pattern)
  }

  pub fn lines_matching_from(&self, pattern: Regex, start: usize) -> MatchingLines {
    MatchingLines::new(self.lines_from(start), pattern)
  }

  /// Captures a [`Selection`] over the current text and version.
  pub fn create_selection(&self) -> Selection {
    Selection::capture(self)
  }

  /// Starts a mutation: drops the memoized snapshot and moves the version.
  /// Callers validate positions first so a bumped version always corresponds
  /// to a completed operation.
  fn begin_write(&mut self) {
    self.cache.get_mut().text = None;
    self.version += 1;
  }

  /// Appends `text` to the add buffer and returns a piece referencing it.
  fn push_added(&mut self, text: &str) -> Piece {
    let start = self.added.len();
    self.added.push_str(text);
    Piece {
      source: PieceSource::Added,
      start,
      bytes: text.len(),
      chars: char_len(text),
    }
  }

  fn piece_text(&self, piece: Piece) -> &str {
    let buffer = match piece.source {
      PieceSource::Original => &*self.original,
      PieceSource::Added => self.added.as_str(),
    };
    &buffer[piece.start..piece.start + piece.bytes]
  }

  /// Splits the piece held by `node` at the local character offset `local`,
  /// returning the (possibly absent) before and after nodes. A split that
  /// would leave an empty piece prunes it instead.
  fn split(&mut self, node: NodeId, local: usize) -> (Option<NodeId>, Option<NodeId>) {
    let piece = self.pieces[node];
    let split_byte = char_to_byte(self.piece_text(piece), local);
    let after_chars = piece.chars - local;

    let after = (after_chars > 0).then(|| {
      self.pieces.insert_after(Some(node), Piece {
        source: piece.source,
        start:  piece.start + split_byte,
        bytes:  piece.bytes - split_byte,
        chars:  after_chars,
      })
    });

    let before = if local == 0 {
      self.pieces.remove(node);
      None
    } else {
      let piece = &mut self.pieces[node];
      piece.bytes = split_byte;
      piece.chars = local;
      Some(node)
    };

    (before, after)
  }

  /// Finds the piece containing the absolute character offset: the first
  /// piece whose inclusive `[start, start + chars]` range covers it.
  fn locate_offset(&self, offset: usize) -> Option<PieceLocation> {
    let mut doc_offset = 0;
    let mut cur = self.pieces.head();
    while let Some(node) = cur {
      let end = doc_offset + self.pieces[node].chars;
      if offset >= doc_offset && offset <= end {
        return Some(PieceLocation {
          node,
          local: offset - doc_offset,
        });
      }
      doc_offset = end;
      cur = self.pieces.next(node);
    }
    None
  }

  /// Character-by-character scan translating a line/column pair to an
  /// absolute offset. The position exactly at end-of-text resolves to the
  /// total length; anything past that fails.
  fn coords_to_offset(&self, target: LineCol) -> Option<usize> {
    if target.is_zero() {
      return Some(0);
    }

    let mut line = 0;
    let mut column = 0;
    let mut offset = 0;
    for piece in self.pieces.iter() {
      for ch in self.piece_text(*piece).chars() {
        if line == target.line && column == target.column {
          return Some(offset);
        }
        if ch == '\n' {
          line += 1;
          column = 0;
        } else {
          column += 1;
        }
        offset += 1;
      }
    }

    (line == target.line && column == target.column).then_some(offset)
  }
}
