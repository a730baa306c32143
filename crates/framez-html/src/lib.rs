//! HTML tokenizer and tree builder for the Framez engine.
//!
//! # Scope
//!
//! This crate implements enough of
//! [WHATWG § 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html)
//! to build host documents and frame content documents from markup:
//!
//! - Start/end tags with quoted, unquoted, and valueless attributes
//! - Text, comments, and DOCTYPE (recorded, not interpreted)
//! - Void elements ([§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#void-elements))
//! - Raw text for `script` and `style`
//! - Implicit `html`/`head`/`body` synthesis so fragments like
//!   `<p>new</p>` parse into a well-formed document
//! - The five predefined character references
//!
//! # Not Yet Implemented
//!
//! - Insertion modes beyond the head/body split
//! - Named and numeric character references beyond the predefined five
//! - Table parsing, foster parenting, the adoption agency algorithm
//! - Foreign content (SVG, MathML)
//!
//! Parse errors never abort: the tree builder recovers and records a
//! [`ParseIssue`] per [§ 13.2.2](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//! ("The handling of parse errors is well-defined.").

/// HTML tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HtmlParser, ParseIssue, parse_document};
pub use tokenizer::{Attribute, HtmlTokenizer, Token};
