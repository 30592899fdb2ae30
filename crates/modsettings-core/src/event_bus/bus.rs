//! Change notifier implementation.
//!
//! Provides the `ChangeNotifier` used by the settings service to announce
//! store readiness and value changes to registered subscribers.

use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EventKind, SettingsEvent};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event kinds
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these kinds.
    Kinds(Vec<EventKind>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &SettingsEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kinds(kinds) => kinds.contains(&event.kind()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(SettingsEvent) + Send + Sync>;

/// Synchronous publish/subscribe for settings events.
///
/// Subscribers run on the publishing thread, in registration order. A
/// panicking subscriber is caught and logged; the remaining subscribers
/// still run and the emitting call keeps its already-committed state.
pub struct ChangeNotifier {
    /// Broadcast channel sender for async receivers
    sender: broadcast::Sender<SettingsEvent>,
    /// Registered synchronous handlers. A Vec, not a map: delivery order
    /// is registration order and is part of the contract.
    handlers: Arc<RwLock<Vec<(SubscriptionId, EventFilter, EventHandler)>>>,
}

impl ChangeNotifier {
    /// Create a new change notifier
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self {
            sender,
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of handlers that ran to completion.
    pub fn publish(&self, event: SettingsEvent) -> usize {
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (id, filter, handler) in handlers.iter() {
            if filter.matches(&event) {
                let payload = event.clone();
                match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                    Ok(()) => delivered += 1,
                    Err(_) => {
                        tracing::error!(
                            "Subscriber {} panicked handling {} event",
                            id,
                            event.kind()
                        );
                    }
                }
            }
        }

        // Async receivers are a best-effort tap; no receivers is fine.
        let _ = self.sender.send(event);

        delivered
    }

    /// Subscribe to events with a synchronous handler.
    ///
    /// The handler is called on the publishing thread, so it should return
    /// quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(SettingsEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.push((id, filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for manual event polling.
    ///
    /// Useful for async contexts that want to receive events in a task.
    pub fn receiver(&self) -> broadcast::Receiver<SettingsEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub_id, _, _)| *sub_id != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
