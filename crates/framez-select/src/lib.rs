//! Selector parsing and matching for fragment lookup.
//!
//! This crate implements the slice of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) that frame URL
//! fragments actually use: simple selectors (type, class, ID, universal),
//! compound selectors, and the descendant/child combinators, together with
//! `querySelector`-style first-match lookup in tree order.
//!
//! # Not Yet Implemented
//!
//! - Attribute selectors
//! - Pseudo-classes and pseudo-elements
//! - Sibling combinators (`+`, `~`)
//! - Selector lists (`a, b`)
//! - Backtracking in combinator matching: the walk up the tree takes the
//!   nearest matching ancestor at each step, so a mixed chain like
//!   `a > b c` can miss a match that full CSS finds when a closer `b`
//!   shadows the one that is the child of `a`
//!
//! Unsupported syntax makes [`parse_selector`] return `None`; callers treat
//! that the same as a selector that matches nothing.

use framez_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Class and ID selectors](https://www.w3.org/TR/selectors-4/#class-html)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type..."
    ///
    /// Examples: `div`, `p`, `tbody`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.row`, `.swap-target`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the ID
    /// value, which is an identifier."
    ///
    /// Examples: `#target`, `#main`
    ///
    /// This is the overwhelmingly common shape for frame fragments, since
    /// the fragment of `http://x/page#target` is the selector `#target`.
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*)..."
    Universal,
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class_name) => element.classes().contains(class_name.as_str()),
            Self::Id(id) => element.id().is_some_and(|el_id| el_id == id),
            Self::Universal => true,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn matches(&self, element: &ElementData) -> bool {
        self.simple_selectors.iter().all(|s| s.matches(element))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// `A B`: B is an arbitrary descendant of A.
    Descendant,
    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// `A > B`: B is a direct child of A.
    Child,
}

/// A parsed selector ready for matching against a [`DomTree`].
///
/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "The elements represented by a complex selector are the elements matched
/// by the last compound selector in the complex selector."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The rightmost compound selector (the subject of the selector).
    pub subject: CompoundSelector,
    /// Chain of (combinator, compound) pairs in right-to-left order, so
    /// matching walks up from the subject. Empty for plain compounds.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

impl Selector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Match this selector against the element at `node_id`, walking the
    /// combinator chain up through the tree.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node_id: NodeId) -> bool {
        let Some(element) = tree.as_element(node_id) else {
            return false;
        };
        if !self.subject.matches(element) {
            return false;
        }

        let mut current = node_id;
        for (combinator, compound) in &self.combinators {
            let matched = match combinator {
                // `A B`: any ancestor of the current element may match A.
                Combinator::Descendant => tree
                    .ancestors(current)
                    .find(|&id| tree.as_element(id).is_some_and(|e| compound.matches(e))),
                // `A > B`: the immediate parent must match A.
                Combinator::Child => tree
                    .parent(current)
                    .filter(|&id| tree.as_element(id).is_some_and(|e| compound.matches(e))),
            };
            match matched {
                Some(id) => current = id,
                None => return false,
            }
        }
        true
    }
}

/// [§ 4.2.6 querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
///
/// "Returns the first element that is a descendant of node that matches
/// selectors."
///
/// Searches the descendants of `root` in tree order and returns the first
/// matching element, or `None`.
#[must_use]
pub fn query_selector(tree: &DomTree, root: NodeId, selector: &Selector) -> Option<NodeId> {
    tree.descendants(root).find(|&id| selector.matches(tree, id))
}

/// [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
///
/// "Returns all element descendants of node that match selectors."
#[must_use]
pub fn query_selector_all(tree: &DomTree, root: NodeId, selector: &Selector) -> Vec<NodeId> {
    tree.descendants(root)
        .filter(|&id| selector.matches(tree, id))
        .collect()
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Parse one compound selector such as `div.row#target` or `*`.
fn parse_compound(raw: &str) -> Option<CompoundSelector> {
    let mut simple_selectors = Vec::new();
    let mut chars = raw.chars().peekable();

    /// Consume an identifier from the stream; `None` if the first character
    /// cannot start one.
    fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
        let mut ident = String::new();
        match chars.peek() {
            Some(&c) if is_ident_start_char(c) || c == '-' => {
                ident.push(c);
                let _ = chars.next();
            }
            _ => return None,
        }
        while chars.peek().is_some_and(|&c| is_ident_char(c)) {
            ident.push(chars.next()?);
        }
        Some(ident)
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                let _ = chars.next();
                simple_selectors.push(SimpleSelector::Id(take_ident(&mut chars)?));
            }
            '.' => {
                let _ = chars.next();
                simple_selectors.push(SimpleSelector::Class(take_ident(&mut chars)?));
            }
            '*' => {
                let _ = chars.next();
                simple_selectors.push(SimpleSelector::Universal);
            }
            _ => {
                simple_selectors.push(SimpleSelector::Type(take_ident(&mut chars)?));
            }
        }
    }

    if simple_selectors.is_empty() {
        None
    } else {
        Some(CompoundSelector { simple_selectors })
    }
}

/// Parse a raw selector string into a [`Selector`].
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Supports type/class/ID/universal simple selectors, compounds of them,
/// and the descendant and child combinators. Returns `None` for anything
/// else (attribute selectors, pseudo-classes, sibling combinators, selector
/// lists); callers treat unparseable selectors as matching nothing.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<Selector> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Split into compound selector segments and the combinators between
    // them. Whitespace is the descendant combinator unless it surrounds an
    // explicit '>'. Normalizing '>' with spaces first lets one pass handle
    // both "a > b" and "a>b".
    let normalized = trimmed.replace('>', " > ");

    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in normalized.split_whitespace() {
        if token == ">" {
            // '>' with no left-hand side, or doubled ("a >> b"), is invalid
            if compounds.is_empty() || pending.is_some() {
                return None;
            }
            pending = Some(Combinator::Child);
        } else {
            let compound = parse_compound(token)?;
            if !compounds.is_empty() {
                combinators.push(pending.take().unwrap_or(Combinator::Descendant));
            }
            compounds.push(compound);
        }
    }

    // A dangling combinator ("a >") is invalid
    if pending.is_some() || compounds.is_empty() {
        return None;
    }

    let subject = compounds.pop()?;
    let mut chain = Vec::new();
    for (compound, combinator) in compounds.into_iter().zip(combinators).rev() {
        chain.push((combinator, compound));
    }

    Some(Selector {
        subject,
        combinators: chain,
    })
}
