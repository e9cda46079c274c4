//! Minimal piece-table editing: insert into the middle, append at the end.

use the_buffer::document::Document;

fn main() -> Result<(), the_buffer::document::DocumentError> {
  let mut doc = Document::new("Hello World.");
  doc.insert(6, "Cool ")?;
  doc.append(" Goodbye!");

  // Prints "Hello Cool World. Goodbye!"
  println!("{}", doc.text());
  Ok(())
}
