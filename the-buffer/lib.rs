use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod document;
pub mod lines;
pub mod list;
pub mod position;
pub mod selection;

mod chars;

pub type Tendril = SmartString<LazyCompact>;
