//! Event system for session notifications.
//!
//! Renderers learn about changes by subscribing instead of polling the
//! buffer. Events are plain values sent over a `tokio::sync::broadcast`
//! channel: sending never blocks, and a slow subscriber only loses its own
//! oldest events.

use quill_buffer::Position;
use std::path::PathBuf;
use tokio::sync::broadcast;

/// Events a session emits after a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The buffer content changed
    DocumentChanged,
    /// The document was written to disk
    DocumentSaved(PathBuf),
    /// The cursor moved to a new position
    CursorMoved(Position),
    /// The selection bounds changed; `None` when it became inactive
    SelectionChanged(Option<(Position, Position)>),
    /// The clipboard register was replaced
    ClipboardChanged,
}

/// Event bus for broadcasting editor events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Creates an event bus buffering up to 256 events per subscriber.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates an event bus with a custom per-subscriber buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to all future events.
    pub fn subscribe(&self) -> EventHandler {
        EventHandler::new(self.sender.subscribe())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of the event bus.
pub struct EventHandler {
    receiver: broadcast::Receiver<EditorEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<EditorEvent>) -> Self {
        Self { receiver }
    }

    /// Returns every event queued so far without waiting.
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                }
                Err(_) => return events,
            }
        }
    }
}
