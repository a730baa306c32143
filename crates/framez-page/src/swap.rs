//! The frame load-completion callback.

use crate::page::{FrameId, Page};
use crate::task::TaskQueue;

/// Handle a frame finishing a navigation.
///
/// Wired by the host as the load-event handler on embedded frame elements.
/// The whole update path is fire-and-forget: nothing is returned and no
/// failure is surfaced, because the load event has no way to act on one.
///
/// # Behavior
///
/// - If the frame is still at the blank sentinel address (an uninitialized
///   or freshly recycled context firing its initial load), nothing happens
///   and no task is scheduled.
/// - Otherwise one task is posted to `tasks`. When the host drains the
///   queue, the task:
///   1. reads the frame address's fragment and uses it verbatim as a
///      selector (no fragment: no lookup);
///   2. finds the first matching element in the host document in tree
///      order (no match or malformed selector: skip the replacement);
///   3. replaces the match with the frame's loaded body children, moved
///      out of the content document in order;
///   4. unconditionally recycles the frame element — detach, then fresh
///      attachment at the end of the host body — so the embedded context's
///      history entries are discarded.
///
/// The deferral guarantees the swap runs only after the browser has
/// finished committing the frame's document; it is the only ordering
/// guarantee the design needs.
pub fn handle_frame_load(page: &Page, frame: FrameId, tasks: &mut TaskQueue) {
    let Some(address) = page.frame_address(frame) else {
        // Unknown frame: nothing to do, in keeping with the
        // fire-and-forget posture.
        return;
    };
    if address.is_blank() {
        return;
    }

    tasks.post(move |page: &mut Page| page.swap_loaded_content(frame));
}
