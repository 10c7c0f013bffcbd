//! TF-IDF retrieval over the example corpus

mod index;
mod tokenizer;

pub use index::TfidfIndex;
pub use tokenizer::tokenize;
