//! Conversions between character counts and byte offsets.
//!
//! The public buffer API is character addressed while the backing buffers are
//! UTF-8 `str`s, so piece slicing and match ranges need to hop between the two
//! unit systems.

/// Byte offset of the `chars`-th character of `text`.
///
/// Saturates to `text.len()` when `chars` is past the last character.
pub(crate) fn char_to_byte(text: &str, chars: usize) -> usize {
  text
    .char_indices()
    .nth(chars)
    .map(|(idx, _)| idx)
    .unwrap_or(text.len())
}

/// Number of characters in `text`.
pub(crate) fn char_len(text: &str) -> usize {
  text.chars().count()
}
