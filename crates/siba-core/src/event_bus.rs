//! Hand-off point between a spawned reply turn and the frame loop.
//!
//! The responder runs inside `spawn_local` and cannot touch the UI state,
//! so it publishes here; the app checks `has_pending` every frame and only
//! then drains and repaints. Everything lives on the browser's single
//! thread, hence `Rc<RefCell<..>>`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use siba_types::event::ChatEvent;

#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        log::trace!("turn {}: queued {:?}", event.turn_id(), event);
        self.queue.borrow_mut().push_back(event);
    }

    /// Everything published since the last drain, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Cheap per-frame check; the frame loop repaints only when true.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}
