//! Gesture consumers.

use std::cell::RefCell;
use std::rc::Rc;

use tactile_touch_model::gesture::{GesturePhase, PanGestureEvent};

/// Receives pan gestures synchronously from the recognizer.
///
/// Implementations must not block and must not feed events back into the
/// recognizer that is calling them.
pub trait PanGestureHandler {
    fn handle_pan_gesture(&mut self, gesture: &PanGestureEvent);
}

impl<F> PanGestureHandler for F
where
    F: FnMut(&PanGestureEvent),
{
    fn handle_pan_gesture(&mut self, gesture: &PanGestureEvent) {
        self(gesture)
    }
}

/// A handler that records every gesture it receives.
///
/// Clones share the same log, so one clone can be registered with a
/// recognizer while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct GestureLog {
    events: Rc<RefCell<Vec<PanGestureEvent>>>,
}

impl GestureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the gestures received so far.
    pub fn events(&self) -> Vec<PanGestureEvent> {
        self.events.borrow().clone()
    }

    pub fn phases(&self) -> Vec<GesturePhase> {
        self.events.borrow().iter().map(|g| g.phase).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Remove and return everything logged so far.
    pub fn take(&self) -> Vec<PanGestureEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl PanGestureHandler for GestureLog {
    fn handle_pan_gesture(&mut self, gesture: &PanGestureEvent) {
        self.events.borrow_mut().push(*gesture);
    }
}
