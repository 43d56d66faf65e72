//! Event System
//!
//! Pub/sub event bus so a widget layer can observe controller activity
//! without the controller knowing about widgets.

use std::path::PathBuf;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use tracing::debug;

/// Events emitted by the interactive surface.
#[derive(Debug, Clone)]
pub enum Event {
    /// Stored session loaded and its files reopened
    SessionRestored { tabs: usize },
    /// Stored session discarded after corruption was detected
    SessionDiscarded,
    /// New file created and opened
    FileCreated(PathBuf),
    /// Existing file opened in a new tab
    FileOpened(PathBuf),
    /// Tab content written to its backing file
    FileSaved(PathBuf),
    /// Tab removed; carries its path binding if it had one
    TabClosed(Option<PathBuf>),
    /// Editor font size changed
    EditorFontChanged(u32),
    /// Terminal font size changed
    TerminalFontChanged(u32),
    /// C acc library build dispatched
    CompileStarted,
    /// Interpreter run dispatched
    RunStarted { with_library: bool },
    /// Free-form shell command dispatched
    ShellCommand(String),
    /// Application shutdown
    Shutdown,
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<Event>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<Event, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<Event, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Get an iterator over events
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.iter()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<Event>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: Event) -> usize {
        let subscribers = self.subscribers.read();
        let mut delivered = 0;

        for sender in subscribers.iter() {
            if sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }

        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
