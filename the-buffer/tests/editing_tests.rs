//! End-to-end editing flows through the public API.

use regex::Regex;
use the_buffer::document::Document;

#[test]
fn fresh_document_round_trips_its_text() {
  let doc = Document::new("Hello World!");
  assert_eq!(&*doc.text(), "Hello World!");
  assert!(!doc.is_dirty());
}

#[test]
fn count_lines() {
  let text = "One\n  Two\n  Three\n  Four\n  Five";
  let doc = Document::new(text);
  assert_eq!(doc.line_count(), 5);
}

#[test]
fn insert_on_the_missing_last_line() {
  let mut doc = Document::new("One\nPotato\nTwo Potatoes");
  doc.insert((3, 0), "Moar things").unwrap();
  assert!(doc.text().contains("Two Potatoes\nMoar things"));
}

#[test]
fn insert_on_the_missing_last_line_twice() {
  let mut doc = Document::new("One\nPotato\nTwo Potatoes");
  doc.insert((3, 0), "Moar things").unwrap();
  doc.insert((4, 0), "Even Moar things").unwrap();
  assert!(
    doc
      .text()
      .contains("Two Potatoes\nMoar things\nEven Moar things")
  );
}

#[test]
fn simple_selection_replace() {
  let mut doc = Document::new("One\nPotato\nTwo Potatoes");
  let mut selection = doc.create_selection();
  assert!(selection.select_first(&doc, "Potato").unwrap());
  selection.replace(&mut doc, "Tomato").unwrap();
  assert_eq!(&*doc.text(), "One\nTomato\nTwo Potatoes");
}

#[test]
fn insert_then_append() {
  let mut doc = Document::new("Hello World.");
  doc.insert(6, "Cool ").unwrap();
  doc.append(" Goodbye!");
  assert_eq!(&*doc.text(), "Hello Cool World. Goodbye!");
}

#[test]
fn insert_at_line_and_column() {
  let mut doc = Document::new("Hello\nPiece\nBuffer\n");
  doc.insert((1, 5), "meal").unwrap();
  assert_eq!(&*doc.text(), "Hello\nPiecemeal\nBuffer\n");
}

#[test]
fn iterate_lines() {
  let doc = Document::new("Hello\nPiece\nBuffer\n");
  let lines: Vec<String> = doc.lines().map(|(line, _)| line.to_string()).collect();
  assert_eq!(lines, vec!["Hello", "Piece", "Buffer", ""]);
}

#[test]
fn iterate_matching_lines() {
  let doc = Document::new("Hello\nPiece\nBuffer\n");
  let pattern = Regex::new("^P").unwrap();
  let summaries: Vec<String> = doc
    .lines_matching(pattern)
    .map(|found| {
      format!(
        "Line {} ({}) matched: {}",
        found.number,
        found.line,
        found.matched()
      )
    })
    .collect();
  assert_eq!(summaries, vec!["Line 1 (Piece) matched: P"]);
}

#[test]
fn lines_are_a_frozen_snapshot() {
  let mut doc = Document::new("a\nb");
  let lines = doc.lines();
  doc.append("\nc");
  // The iterator still sees the text from before the append.
  assert_eq!(lines.count(), 2);
  assert_eq!(doc.lines().count(), 3);
}

#[test]
fn interleaved_edits_keep_length_consistent() {
  let mut doc = Document::new("The quick brown fox");
  doc.insert(4, "very ").unwrap();
  doc.delete(0, 4).unwrap();
  doc.append(" jumps");
  doc.insert((0, 0), ">> ").unwrap();
  assert_eq!(&*doc.text(), ">> very quick brown fox jumps");
  assert_eq!(doc.text().chars().count(), doc.len());
}
