//! Labeled workflow examples and corpus loading

mod corpus;
mod entity;

pub use corpus::{load_examples, parse_examples};
pub use entity::Example;
