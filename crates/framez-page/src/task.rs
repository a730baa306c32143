//! The deferred task queue.
//!
//! [§ 8.1.7 Event loops](https://html.spec.whatwg.org/multipage/webappapis.html#event-loops)
//!
//! "To coordinate events, user interaction, scripts, rendering, networking,
//! and so forth, user agents must use event loops."
//!
//! The swap must not run synchronously inside the frame's load event: the
//! loaded document has to be fully committed first. Modeling the macrotask
//! queue as an explicit value keeps that ordering guarantee testable — the
//! host drains the queue after event dispatch, and tests drain it whenever
//! they choose.

use std::collections::VecDeque;

use crate::page::Page;

/// A unit of deferred work against the host page.
pub type Task = Box<dyn FnOnce(&mut Page)>;

/// A FIFO macrotask queue.
///
/// Once posted, a task always runs when the queue is drained; there is no
/// cancellation and no timeout.
#[derive(Default)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether there is no pending work.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the queue is empty. Alias of [`Self::is_idle`] for iterator-
    /// style callers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Enqueue a task to run on the next drain.
    pub fn post(&mut self, task: impl FnOnce(&mut Page) + 'static) {
        self.tasks.push_back(Box::new(task));
    }

    /// Drain the queue in FIFO order, running every task against `page`.
    pub fn run_until_idle(&mut self, page: &mut Page) {
        while let Some(task) = self.tasks.pop_front() {
            task(page);
        }
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.tasks.len())
            .finish()
    }
}
