//! Event fan-out from the player thread to subscribed views
//!
//! Each subscriber gets its own unbounded channel, so events reach every
//! subscriber in emission order. A subscription is a guard: dropping it (or
//! calling `release`) removes the subscriber, and releasing twice is harmless.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::events::{PlayerEvent, PlayerEventReceiver, PlayerEventSender, player_event_channel};

/// Identifies one subscription for routing and unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<(SubscriptionId, PlayerEventSender)>>,
    next_id: AtomicU64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a new subscriber
    pub fn subscribe(self: &Arc<Self>) -> EventSubscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = player_event_channel();
        self.subscribers.lock().push((id, tx));
        tracing::debug!("Player event subscription {} registered", id);

        EventSubscription {
            id,
            bus: Arc::downgrade(self),
            receiver: Some(rx),
            released: false,
        }
    }

    /// Remove a subscriber; unknown ids are logged and ignored
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        if subscribers.len() == before {
            tracing::warn!("Unsubscribe for unknown player subscription {}", id);
        } else {
            tracing::debug!("Player event subscription {} released", id);
        }
    }

    /// Deliver an event to every subscriber
    ///
    /// Subscribers whose receiving end is gone are pruned.
    pub fn emit(&self, event: PlayerEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|(id, tx)| {
            let delivered = tx.send(event.clone()).is_ok();
            if !delivered {
                tracing::debug!("Dropping closed player subscription {}", id);
            }
            delivered
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// Scoped subscription to player events
///
/// The receiver is taken by whoever forwards events to the UI loop; the guard
/// itself stays with the view and unsubscribes when dropped.
pub struct EventSubscription {
    id: SubscriptionId,
    bus: Weak<EventBus>,
    receiver: Option<PlayerEventReceiver>,
    released: bool,
}

impl fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("id", &self.id)
            .field("released", &self.released)
            .finish()
    }
}

impl EventSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take the event receiver; `None` after the first call
    pub fn take_receiver(&mut self) -> Option<PlayerEventReceiver> {
        self.receiver.take()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Stop receiving events; safe to call more than once
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
