//! The host page: document, frame registry, swap and recycle operations.

use framez_common::warning::{clear_warnings, warn_once};
use framez_common::Address;
use framez_dom::{DomTree, ElementData, NodeId, NodeType};
use framez_select::{parse_selector, query_selector};

/// A type-safe index into a page's frame registry.
///
/// Like [`NodeId`], a `FrameId` is an arena index: frames are registered
/// once and never deregistered, so the id stays valid for the page's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub usize);

/// One registered embedded navigable context.
///
/// [§ 7.3 Infrastructure for sequences of documents](https://html.spec.whatwg.org/multipage/document-sequences.html)
///
/// Tracks the frame's element node in the host tree, the address its
/// content has committed, and the loaded content document.
#[derive(Debug)]
struct FrameState {
    /// The frame's element node in the host document. Updated whenever the
    /// frame is recycled.
    element: NodeId,
    /// The committed address; starts at the blank sentinel.
    address: Address,
    /// The loaded content document; starts empty.
    content: DomTree,
}

/// A host page: the document tree plus its registered frames.
///
/// The page is the single mutable state of the engine. All mutation happens
/// on the caller's thread through `&mut Page`; there is no interior
/// mutability and no locking.
#[derive(Debug)]
pub struct Page {
    document: DomTree,
    frames: Vec<FrameState>,
}

impl Page {
    /// Create a page around a host document.
    ///
    /// Clears the deduplicated warning set, since warnings are scoped to a
    /// page load.
    #[must_use]
    pub fn new(document: DomTree) -> Self {
        clear_warnings();
        Self {
            document,
            frames: Vec::new(),
        }
    }

    /// The host document.
    #[must_use]
    pub fn document(&self) -> &DomTree {
        &self.document
    }

    /// Register an element node of the host document as a frame.
    ///
    /// The frame starts at the blank sentinel address with an empty content
    /// document, like a freshly created browsing context.
    pub fn insert_frame(&mut self, element: NodeId) -> FrameId {
        debug_assert!(
            self.document.as_element(element).is_some(),
            "frame must be registered on an element node"
        );
        let id = FrameId(self.frames.len());
        self.frames.push(FrameState {
            element,
            address: Address::blank(),
            content: DomTree::new(),
        });
        id
    }

    /// The frame's element node in the host document, if the frame exists.
    #[must_use]
    pub fn frame_element(&self, id: FrameId) -> Option<NodeId> {
        self.frames.get(id.0).map(|f| f.element)
    }

    /// The frame's committed address, if the frame exists.
    #[must_use]
    pub fn frame_address(&self, id: FrameId) -> Option<&Address> {
        self.frames.get(id.0).map(|f| &f.address)
    }

    /// The frame's loaded content document, if the frame exists.
    #[must_use]
    pub fn frame_content(&self, id: FrameId) -> Option<&DomTree> {
        self.frames.get(id.0).map(|f| &f.content)
    }

    /// Commit a finished navigation: the frame now holds `content` loaded
    /// from `address`. The host calls this before dispatching the load
    /// event ([`handle_frame_load`](crate::handle_frame_load)).
    pub fn commit_navigation(&mut self, id: FrameId, address: Address, content: DomTree) {
        if let Some(frame) = self.frames.get_mut(id.0) {
            frame.address = address;
            frame.content = content;
        }
    }

    /// Perform the content swap for a loaded frame.
    ///
    /// Runs as a deferred task; see [`handle_frame_load`](crate::handle_frame_load)
    /// for the behavior contract. Every failure mode short of a missing
    /// frame degrades to "skip the replacement"; the frame is recycled
    /// regardless.
    pub(crate) fn swap_loaded_content(&mut self, id: FrameId) {
        if self.frames.get(id.0).is_none() {
            return;
        }

        // location.hash is used verbatim as the lookup selector; no
        // fragment means no lookup.
        let fragment = self.frames[id.0].address.fragment().map(str::to_string);
        if let Some(fragment) = fragment {
            match parse_selector(&fragment) {
                Some(selector) => self.replace_target(id, &selector),
                // Unparseable fragments fold into the no-match tolerance:
                // skip the swap, but say so once.
                None => warn_once(
                    "Page",
                    &format!("ignoring malformed fragment selector '{fragment}'"),
                ),
            }
        }

        self.recycle_frame(id);
    }

    /// Replace the first element matching `selector` with the frame's
    /// loaded body children, in order. No match is a silent no-op.
    fn replace_target(&mut self, id: FrameId, selector: &framez_select::Selector) {
        let Some(target) = query_selector(&self.document, NodeId::ROOT, selector) else {
            return;
        };

        let frame = &mut self.frames[id.0];
        // A content document without a body contributes no nodes, which
        // makes the replacement remove the target (replaceWith with an
        // empty sequence).
        let adopted = match frame.content.body() {
            Some(body) => self.document.adopt_children(&mut frame.content, body),
            None => Vec::new(),
        };
        self.document.replace_with(target, &adopted);
    }

    /// Reset the frame's slot in the session history by recreating its
    /// element node.
    ///
    /// In a real browser, removing an iframe and immediately appending it
    /// back to the body forces its browsing context to be recreated, which
    /// drops the context's session history entries. Here the recreation is
    /// literal: the old node is detached and a fresh node carrying the same
    /// element data is appended as the last child of the body. Reattaching
    /// the same node keeps its children, so the fresh node inherits them
    /// (fallback content survives recycling).
    fn recycle_frame(&mut self, id: FrameId) {
        let old = self.frames[id.0].element;
        // Falls back to a bare iframe if the registered node was not an
        // element; insert_frame debug-asserts against that.
        let data = self
            .document
            .as_element(old)
            .cloned()
            .unwrap_or_else(|| ElementData::new("iframe"));

        self.document.detach(old);
        let fresh = self.document.alloc(NodeType::Element(data));
        self.document.move_children(old, fresh);
        let parent = self.document.body().unwrap_or(NodeId::ROOT);
        self.document.append_child(parent, fresh);
        self.frames[id.0].element = fresh;
    }
}
