//! Editing through a selection: match a span, then replace it.

use the_buffer::{
  document::Document,
  selection,
};

fn main() -> Result<(), selection::SelectionError> {
  let mut doc = Document::new("Hello World.");
  let mut selection = doc.create_selection();
  if selection.select_first(&doc, "World")? {
    selection.replace(&mut doc, "Piece Buffer")?;
  }

  // Prints "Hello Piece Buffer."
  println!("{}", doc.text());
  Ok(())
}
