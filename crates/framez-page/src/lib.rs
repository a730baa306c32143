//! Host page and frame-swapping engine for Framez.
//!
//! Hypermedia over iframes: the host document embeds hidden navigable
//! frames; links and forms target a frame, and when the frame finishes
//! loading, the element in the host document named by the frame URL's
//! fragment is replaced with the frame's loaded body content. The frame
//! element is then recycled so per-frame navigation never accumulates in
//! the outer session history.
//!
//! # Model
//!
//! The browser environment is modeled explicitly so the logic is testable
//! without a rendering engine:
//!
//! - [`Page`] owns the host [`DomTree`](framez_dom::DomTree) and the
//!   registered frames (element node, committed address, content document).
//! - [`TaskQueue`] is the macrotask queue; the swap runs as a deferred task,
//!   never synchronously inside the load event.
//! - [`handle_frame_load`] is the load-completion callback itself.

pub mod page;
pub mod swap;
pub mod task;

pub use page::{FrameId, Page};
pub use swap::handle_frame_load;
pub use task::TaskQueue;
