//! HTML tokenizer module.

/// Token types emitted by the tokenizer.
pub mod token;
/// The tokenizer itself.
pub mod tokenizer;

pub use token::{Attribute, Token};
pub use tokenizer::HtmlTokenizer;
