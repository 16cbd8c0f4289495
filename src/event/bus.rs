use std::cell::RefCell;
use std::collections::VecDeque;

use crate::event::{EditorEvent, EventHandler};

/// A queue between the pickers and the canvas.
///
/// Widgets only hold a shared reference and `emit`; the app drains the
/// queue into the canvas once per frame, so the widgets never see the
/// editing state.
pub struct EventBus {
    queue: RefCell<VecDeque<EditorEvent>>,
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        // When cloning, create a new empty event bus
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &format!("<{} pending>", self.queue.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue an event for the next dispatch
    pub fn emit(&self, event: EditorEvent) {
        log::trace!("Event emitted: {event:?}");
        self.queue.borrow_mut().push_back(event);
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Deliver all queued events, in emission order. Returns how many were delivered.
    pub fn dispatch(&self, handler: &mut dyn EventHandler) -> usize {
        let mut delivered = 0;
        // Pop one at a time so a handler may emit follow-up events.
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            handler.handle_event(&event);
            delivered += 1;
        }
        delivered
    }
}
