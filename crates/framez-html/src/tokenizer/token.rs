//! Token types produced by tokenization.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! "The output of the tokenization step is a series of zero or more of the
//! following tokens: DOCTYPE, start tag, end tag, comment, character,
//! end-of-file."

use strum_macros::Display;

/// A name/value pair on a start tag.
///
/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// "Attributes have a name and a value." Valueless attributes get the empty
/// string, per the spec's empty attribute syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, lowercased during tokenization.
    pub name: String,
    /// Attribute value with predefined character references resolved.
    pub value: String,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// A token emitted by the tokenizer. Character tokens are coalesced into
/// runs of text rather than emitted one code point at a time.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Token {
    /// A DOCTYPE token. The declaration body is kept verbatim but not
    /// interpreted (quirks mode is out of scope).
    Doctype(String),
    /// A start tag token with its attributes.
    StartTag {
        /// Tag name, lowercased.
        name: String,
        /// Attributes in source order; duplicates keep the first value.
        attrs: Vec<Attribute>,
        /// Whether the tag used self-closing syntax (`<br/>`).
        self_closing: bool,
    },
    /// An end tag token.
    EndTag {
        /// Tag name, lowercased.
        name: String,
    },
    /// A run of character tokens.
    Text(String),
    /// A comment token (without the `<!--`/`-->` delimiters).
    Comment(String),
    /// The end-of-file token.
    Eof,
}
