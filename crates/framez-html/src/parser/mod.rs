//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! "The input to the tree construction stage is a sequence of tokens from
//! the tokenization stage."
//!
//! This builder keeps the spec's stack of open elements but collapses the
//! insertion modes down to the head/body split: metadata elements seen
//! before any body content go into `head`, everything else forces `body`
//! open. That is enough for host pages and frame content documents, where
//! fragments like `<p>new</p><p>more</p>` must end up as body children.

use std::collections::HashMap;

use framez_common::warning::warn_once;
use framez_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{Attribute, HtmlTokenizer, Token};

/// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// [§ 4.2 Document metadata](https://html.spec.whatwg.org/multipage/semantics.html#document-metadata)
///
/// Elements that belong in `head` when seen before body content.
const HEAD_ELEMENTS: &[&str] = &["base", "link", "meta", "noscript", "script", "style", "title"];

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "Parse errors are only errors with the content... The handling of parse
/// errors is well-defined." Issues are recorded and warned, never fatal.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of the parse error.
    pub message: String,
    /// Index into the token stream where this error was encountered.
    pub token_index: usize,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a [`DomTree`] from a token stream.
pub struct HtmlParser {
    tokens: Vec<Token>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena; the bottom entry is `body` once it
    /// has been opened.
    stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    html_element: Option<NodeId>,
    head_element: Option<NodeId>,
    body_element: Option<NodeId>,

    tree: DomTree,
    issues: Vec<ParseIssue>,
}

impl HtmlParser {
    /// Create a parser over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            stack_of_open_elements: Vec::new(),
            html_element: None,
            head_element: None,
            body_element: None,
            tree: DomTree::new(),
            issues: Vec::new(),
        }
    }

    /// Run tree construction and return the finished tree along with any
    /// parse issues encountered.
    #[must_use]
    pub fn run(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.process_token(index, token);
        }
        // Documents always end up with html/head/body, even when empty
        let _ = self.ensure_body();
        (self.tree, self.issues)
    }

    fn issue(&mut self, token_index: usize, message: String) {
        self.issues.push(ParseIssue {
            message,
            token_index,
        });
    }

    fn alloc_element(&mut self, name: &str, attrs: Vec<Attribute>) -> NodeId {
        let attrs: HashMap<String, String> =
            attrs.into_iter().map(|a| (a.name, a.value)).collect();
        self.tree.alloc(NodeType::Element(ElementData {
            tag_name: name.to_string(),
            attrs,
        }))
    }

    /// The `html` element, created on demand.
    fn ensure_html(&mut self) -> NodeId {
        if let Some(id) = self.html_element {
            return id;
        }
        let id = self.alloc_element("html", Vec::new());
        self.tree.append_child(NodeId::ROOT, id);
        self.html_element = Some(id);
        id
    }

    /// The `head` element, created on demand.
    fn ensure_head(&mut self) -> NodeId {
        if let Some(id) = self.head_element {
            return id;
        }
        let html = self.ensure_html();
        let id = self.alloc_element("head", Vec::new());
        self.tree.append_child(html, id);
        self.head_element = Some(id);
        id
    }

    /// The `body` element, created on demand. Opening the body closes the
    /// head phase: from here on, new elements insert at the stack top.
    fn ensure_body(&mut self) -> NodeId {
        if let Some(id) = self.body_element {
            return id;
        }
        let _ = self.ensure_head();
        let html = self.ensure_html();
        let id = self.alloc_element("body", Vec::new());
        self.tree.append_child(html, id);
        self.body_element = Some(id);
        self.stack_of_open_elements.push(id);
        id
    }

    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    fn insertion_parent(&mut self) -> NodeId {
        match self.stack_of_open_elements.last() {
            Some(&id) => id,
            None => self.ensure_body(),
        }
    }

    fn process_token(&mut self, index: usize, token: Token) {
        match token {
            // Quirks mode is out of scope; the DOCTYPE is acknowledged and
            // dropped.
            Token::Doctype(_) | Token::Eof => {}

            Token::Comment(text) => {
                // Comments before <html> belong to the document itself.
                let parent = match self.stack_of_open_elements.last() {
                    Some(&id) => id,
                    None => self.body_element.unwrap_or(NodeId::ROOT),
                };
                let comment = self.tree.alloc(NodeType::Comment(text));
                self.tree.append_child(parent, comment);
            }

            Token::Text(text) => {
                // [§ 13.2.6.4.4] Whitespace between metadata elements is not
                // content; anything else forces the body open.
                if self.body_element.is_none() && text.trim().is_empty() {
                    return;
                }
                let parent = self.insertion_parent();
                let node = self.tree.alloc(NodeType::Text(text));
                self.tree.append_child(parent, node);
            }

            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => self.process_start_tag(index, &name, attrs, self_closing),

            Token::EndTag { name } => self.process_end_tag(index, &name),
        }
    }

    fn process_start_tag(
        &mut self,
        index: usize,
        name: &str,
        attrs: Vec<Attribute>,
        self_closing: bool,
    ) {
        match name {
            // The structural elements are singletons; repeats merge nothing
            // and are recorded as issues.
            "html" => {
                if self.html_element.is_some() {
                    self.issue(index, "unexpected repeated <html> start tag".to_string());
                } else {
                    let id = self.alloc_element("html", attrs);
                    self.tree.append_child(NodeId::ROOT, id);
                    self.html_element = Some(id);
                }
            }
            "head" => {
                if self.head_element.is_some() {
                    self.issue(index, "unexpected repeated <head> start tag".to_string());
                } else {
                    let html = self.ensure_html();
                    let id = self.alloc_element("head", attrs);
                    self.tree.append_child(html, id);
                    self.head_element = Some(id);
                }
            }
            "body" => {
                if self.body_element.is_some() {
                    self.issue(index, "unexpected repeated <body> start tag".to_string());
                } else {
                    let _ = self.ensure_head();
                    let html = self.ensure_html();
                    let id = self.alloc_element("body", attrs);
                    self.tree.append_child(html, id);
                    self.body_element = Some(id);
                    self.stack_of_open_elements.push(id);
                }
            }
            _ => {
                // [§ 13.2.6.4.4 The "in head" insertion mode]
                // Metadata elements before body content go into head.
                let parent = if self.body_element.is_none() && HEAD_ELEMENTS.contains(&name) {
                    self.ensure_head()
                } else {
                    self.insertion_parent()
                };
                let id = self.alloc_element(name, attrs);
                self.tree.append_child(parent, id);

                let void = VOID_ELEMENTS.contains(&name);
                if void && self_closing {
                    // Self-closing syntax on void elements is tolerated.
                } else if self_closing && !void {
                    // [§ 13.1.2] Self-closing syntax on a non-void HTML
                    // element has no effect; the spec treats the element as
                    // open. We honor the author's evident intent instead and
                    // leave it off the stack, recording the issue.
                    self.issue(
                        index,
                        format!("self-closing syntax on non-void element <{name}>"),
                    );
                }
                if !void && !self_closing {
                    self.stack_of_open_elements.push(id);
                }
            }
        }
    }

    fn process_end_tag(&mut self, index: usize, name: &str) {
        match name {
            // Closing the structural elements never pops content elements.
            "html" | "head" => {}
            "body" => {
                // Pop everything back down to the body.
                while self.stack_of_open_elements.len() > 1 {
                    let _ = self.stack_of_open_elements.pop();
                }
            }
            _ => {
                // [§ 13.2.6.4.7] "run these steps: ... pop elements from the
                // stack of open elements until an element with the same tag
                // name has been popped" — but only if one is on the stack;
                // a stray end tag is an issue and is otherwise ignored.
                let position = self
                    .stack_of_open_elements
                    .iter()
                    .rposition(|&id| {
                        self.tree
                            .as_element(id)
                            .is_some_and(|e| e.tag_name == name)
                    })
                    .filter(|&pos| {
                        // Never pop the body via a mismatched end tag
                        Some(self.stack_of_open_elements[pos]) != self.body_element
                    });

                match position {
                    Some(pos) => self.stack_of_open_elements.truncate(pos),
                    None => self.issue(index, format!("unmatched end tag </{name}>")),
                }
            }
        }
    }
}

/// Parse a complete document (or bare fragment) into a [`DomTree`].
///
/// Fragments without `html`/`head`/`body` get them synthesized, so the
/// markup's top-level content always ends up as body children. Parse issues
/// are reported through the deduplicated warning system.
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    let mut tokenizer = HtmlTokenizer::new(html.to_string());
    tokenizer.run();
    let parser = HtmlParser::new(tokenizer.into_tokens());
    let (tree, issues) = parser.run();
    for item in &issues {
        warn_once(
            "HTML",
            &format!("{} (token {})", item.message, item.token_index),
        );
    }
    tree
}
