use std::sync::mpsc::{self, Receiver, Sender};

use crate::animation::UiEvent;

/// Everything that mutates the animation state, in one stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// A frame was presented
    Frame,
    /// The blink interval elapsed
    BlinkTick,
    Ui(UiEvent),
}

/// Producer handle onto an `EventQueue`. Clone one per event source.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<SceneEvent>,
}

impl EventSender {
    /// Enqueue an event. Events sent after the queue is gone are dropped.
    pub fn send(&self, event: SceneEvent) {
        if self.sender.send(event).is_err() {
            log::debug!("Dropped {event:?}: scene event queue closed");
        }
    }
}

/// Single-consumer FIFO of scene events
#[derive(Debug)]
pub struct EventQueue {
    sender: Sender<SceneEvent>,
    receiver: Receiver<SceneEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Everything queued right now, oldest first. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.receiver.try_iter()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
