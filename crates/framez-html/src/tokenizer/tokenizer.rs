//! The HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! "Implementations must act as if they used the following state machine to
//! tokenize HTML."
//!
//! This implementation collapses the spec's states into a handful of
//! scanning routines; the observable token stream is the same for well-formed
//! input, and malformed markup degrades by treating stray `<` as text, in the
//! spirit of the spec's error recovery.

use super::token::{Attribute, Token};

/// [§ 13.2.5.2 RCDATA/RAWTEXT](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
///
/// Elements whose content is consumed as raw text up to the matching end tag.
const RAWTEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Tokenizes HTML input into a stream of [`Token`]s.
pub struct HtmlTokenizer {
    input: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl HtmlTokenizer {
    /// Create a tokenizer over the given input.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Run the tokenizer to completion. The final token is always
    /// [`Token::Eof`].
    pub fn run(&mut self) {
        while self.pos < self.input.len() {
            if self.peek() == Some('<') {
                self.consume_markup();
            } else {
                self.consume_text();
            }
        }
        self.tokens.push(Token::Eof);
    }

    /// Consume the tokenizer and return the token stream.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Case-insensitive lookahead match at the current position.
    fn lookahead_eq(&self, expected: &str) -> bool {
        expected.chars().enumerate().all(|(i, e)| {
            self.peek_at(i)
                .is_some_and(|c| c.eq_ignore_ascii_case(&e))
        })
    }

    fn advance(&mut self, count: usize) {
        self.pos += count;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance(1);
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    ///
    /// Consume a run of characters up to the next `<`, resolving the
    /// predefined character references, and emit one coalesced text token.
    fn consume_text(&mut self) {
        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if c == '<' {
                break;
            }
            raw.push(c);
            self.advance(1);
        }
        if !raw.is_empty() {
            self.tokens.push(Token::Text(decode_entities(&raw)));
        }
    }

    /// Dispatch on what follows `<`.
    fn consume_markup(&mut self) {
        if self.lookahead_eq("<!--") {
            self.consume_comment();
        } else if self.lookahead_eq("<!") {
            self.consume_declaration();
        } else if self.peek_at(1) == Some('/') && self.peek_at(2).is_some_and(|c| c.is_ascii_alphabetic()) {
            self.consume_end_tag();
        } else if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) {
            self.consume_start_tag();
        } else {
            // [§ 13.2.5.6] "<" followed by anything else is a parse error;
            // the spec reprocesses it as character data.
            self.tokens.push(Token::Text("<".to_string()));
            self.advance(1);
        }
    }

    /// [§ 13.2.5.43 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn consume_comment(&mut self) {
        self.advance(4); // "<!--"
        let mut text = String::new();
        while self.pos < self.input.len() && !self.lookahead_eq("-->") {
            text.push(self.input[self.pos]);
            self.advance(1);
        }
        self.advance(3); // "-->" (no-op at EOF)
        self.tokens.push(Token::Comment(text));
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// `<!doctype ...>` becomes a DOCTYPE token; any other `<!...>` is a
    /// bogus comment per [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state).
    fn consume_declaration(&mut self) {
        self.advance(2); // "<!"
        let mut body = String::new();
        while let Some(c) = self.peek() {
            if c == '>' {
                break;
            }
            body.push(c);
            self.advance(1);
        }
        self.advance(1); // '>'
        if body.get(..7).is_some_and(|s| s.eq_ignore_ascii_case("doctype")) {
            self.tokens.push(Token::Doctype(body[7..].trim().to_string()));
        } else {
            self.tokens.push(Token::Comment(body));
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn consume_tag_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                name.push(c.to_ascii_lowercase());
                self.advance(1);
            } else {
                break;
            }
        }
        name
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn consume_end_tag(&mut self) {
        self.advance(2); // "</"
        let name = self.consume_tag_name();
        // Anything between the name and '>' is discarded
        // ([§ 13.2.5.8]: "attributes in end tags are a parse error")
        while self.peek().is_some_and(|c| c != '>') {
            self.advance(1);
        }
        self.advance(1); // '>'
        self.tokens.push(Token::EndTag { name });
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn consume_start_tag(&mut self) {
        self.advance(1); // '<'
        let name = self.consume_tag_name();
        let mut attrs: Vec<Attribute> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.advance(1);
                    break;
                }
                Some('/') => {
                    self.advance(1);
                    if self.peek() == Some('>') {
                        self.advance(1);
                        self_closing = true;
                        break;
                    }
                    // Stray '/': parse error, ignored.
                }
                Some(_) => {
                    if let Some(attr) = self.consume_attribute() {
                        // [§ 13.2.5.33] "if there is already an attribute on
                        // the token with the exact same name... the new
                        // attribute must be removed"
                        if !attrs.iter().any(|a| a.name == attr.name) {
                            attrs.push(attr);
                        }
                    }
                }
            }
        }

        let rawtext = RAWTEXT_ELEMENTS.contains(&name.as_str()) && !self_closing;
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            attrs,
            self_closing,
        });
        if rawtext {
            self.consume_rawtext(&name);
        }
    }

    /// [§ 13.2.5.32 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn consume_attribute(&mut self) -> Option<Attribute> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/') {
                break;
            }
            name.push(c.to_ascii_lowercase());
            self.advance(1);
        }
        if name.is_empty() {
            // Unparseable garbage; skip one char to guarantee progress
            self.advance(1);
            return None;
        }

        self.skip_whitespace();
        if self.peek() != Some('=') {
            // [§ 13.1.2.3] Empty attribute syntax: value is the empty string
            return Some(Attribute {
                name,
                value: String::new(),
            });
        }
        self.advance(1); // '='
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance(1);
                let mut value = String::new();
                while let Some(c) = self.peek() {
                    if c == quote {
                        break;
                    }
                    value.push(c);
                    self.advance(1);
                }
                self.advance(1); // closing quote
                value
            }
            _ => {
                // [§ 13.2.5.37 Attribute value (unquoted) state]
                let mut value = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_whitespace() || c == '>' {
                        break;
                    }
                    value.push(c);
                    self.advance(1);
                }
                value
            }
        };

        Some(Attribute {
            name,
            value: decode_entities(&value),
        })
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Consume everything up to the matching end tag as literal text (no
    /// character reference resolution).
    fn consume_rawtext(&mut self, name: &str) {
        let close = format!("</{name}");
        let mut raw = String::new();
        while self.pos < self.input.len() && !self.lookahead_eq(&close) {
            raw.push(self.input[self.pos]);
            self.advance(1);
        }
        if !raw.is_empty() {
            self.tokens.push(Token::Text(raw));
        }
        // The end tag itself is tokenized by the main loop.
    }
}

/// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
///
/// Resolve the predefined character references (`&amp;` `&lt;` `&gt;`
/// `&quot;` `&apos;` and the decimal `&#39;`). Anything else is left
/// verbatim, which the spec treats as character data when no reference
/// matches.
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("amp;", '&'),
        ("lt;", '<'),
        ("gt;", '>'),
        ("quot;", '"'),
        ("apos;", '\''),
        ("#39;", '\''),
    ];

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 1..];
        let mut matched = false;
        for &(entity, replacement) in ENTITIES {
            if rest
                .get(..entity.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(entity))
            {
                out.push(replacement);
                rest = &rest[entity.len()..];
                matched = true;
                break;
            }
        }
        if !matched {
            out.push('&');
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        let mut tokenizer = HtmlTokenizer::new(input.to_string());
        tokenizer.run();
        tokenizer.into_tokens()
    }

    #[test]
    fn test_simple_tag_pair() {
        let tokens = tokenize("<p>hi</p>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "p".to_string(),
                    attrs: vec![],
                    self_closing: false,
                },
                Token::Text("hi".to_string()),
                Token::EndTag {
                    name: "p".to_string()
                },
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_attributes_quoted_unquoted_valueless() {
        let tokens = tokenize(r#"<div id="main" class=row hidden>"#);
        let Token::StartTag { name, attrs, .. } = &tokens[0] else {
            panic!("expected start tag, got {:?}", tokens[0]);
        };
        assert_eq!(name, "div");
        assert_eq!(
            attrs,
            &vec![
                Attribute {
                    name: "id".to_string(),
                    value: "main".to_string()
                },
                Attribute {
                    name: "class".to_string(),
                    value: "row".to_string()
                },
                Attribute {
                    name: "hidden".to_string(),
                    value: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_comment_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- note -->");
        assert_eq!(tokens[0], Token::Doctype("html".to_string()));
        assert_eq!(tokens[1], Token::Comment(" note ".to_string()));
    }

    #[test]
    fn test_rawtext_script() {
        let tokens = tokenize("<script>if (a < b) { x(); }</script>");
        assert_eq!(tokens[1], Token::Text("if (a < b) { x(); }".to_string()));
        assert_eq!(
            tokens[2],
            Token::EndTag {
                name: "script".to_string()
            }
        );
    }

    #[test]
    fn test_stray_lt_is_text() {
        let tokens = tokenize("1 < 2");
        assert_eq!(
            tokens,
            vec![
                Token::Text("1 ".to_string()),
                Token::Text("<".to_string()),
                Token::Text(" 2".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_entity_decoding() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#39;d&#39;"), "a & b <c> 'd'");
        assert_eq!(decode_entities("50&cent;"), "50&cent;");
    }

    #[test]
    fn test_self_closing() {
        let tokens = tokenize("<br/>");
        assert_eq!(
            tokens[0],
            Token::StartTag {
                name: "br".to_string(),
                attrs: vec![],
                self_closing: true,
            }
        );
    }
}
