pub mod tokenizer;

pub use tokenizer::{ArgTokens, Marker, tokenize};
