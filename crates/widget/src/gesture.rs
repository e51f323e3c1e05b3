//! Pointer-drag sessions.
use std::rc::Rc;

use crate::host::{EventHandler, Host, HostEvent, ListenerId};

/// A live thumb drag.
///
/// Created on drag start, the session owns the document-level listener
/// registrations and the selection suppression it set up; dropping it — on
/// drag end or on unmount mid-drag — tears both down symmetrically, so no
/// global listener can outlive its overlay.
pub struct GestureSession<H: Host> {
    host: Rc<H>,
    pointer_move: ListenerId,
    pointer_up: ListenerId,
}

impl<H: Host> GestureSession<H> {
    /// Begins a drag: disables text selection and attaches the
    /// document-level move/up listeners.
    pub fn begin(host: Rc<H>, on_move: EventHandler, on_up: EventHandler) -> Self {
        host.set_selection_enabled(false);

        let pointer_move = host.add_listener(HostEvent::PointerMove, on_move);
        let pointer_up = host.add_listener(HostEvent::PointerUp, on_up);

        Self {
            host,
            pointer_move,
            pointer_up,
        }
    }
}

impl<H: Host> Drop for GestureSession<H> {
    fn drop(&mut self) {
        self.host.remove_listener(self.pointer_move);
        self.host.remove_listener(self.pointer_up);
        self.host.set_selection_enabled(true);
    }
}
