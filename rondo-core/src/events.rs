//! Notification side channel towards observers of the input.

use crossbeam_channel::{Receiver, Sender};
use rondo_types::InputEvent;

/// Sending half of the input event stream. Cloning shares the channel.
#[derive(Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<InputEvent>>,
}

impl EventSink {
    /// A sink plus the receiver observers read from.
    pub fn channel() -> (Self, Receiver<InputEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: InputEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                log::debug!(target: "control", "no observer for {:?}", event);
            }
        }
    }
}
