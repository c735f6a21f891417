//! Removal notification bus.
//!
//! Objects that hold handles to other objects subscribe here and are told,
//! in subscription order, whenever any object is about to be released.
//! Every subscription must be cancelled before its subscriber is released;
//! the universe asserts this.

use hecs::Entity;

/// Handle returned by `subscribe`, used to cancel the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy)]
struct Subscription {
    id: SubscriptionId,
    subscriber: Entity,
}

/// Ordered list of removal subscribers.
#[derive(Debug, Default)]
pub struct NotificationBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `subscriber` for removal notifications.
    pub fn subscribe(&mut self, subscriber: Entity) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, subscriber });
        id
    }

    /// Cancel a subscription. Returns false if it was already cancelled.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscriptions.iter().position(|s| s.id == id) {
            Some(index) => {
                self.subscriptions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of current subscribers in subscription order.
    ///
    /// Dispatch iterates this copy, so callbacks may subscribe and
    /// unsubscribe freely.
    pub fn subscribers(&self) -> Vec<Entity> {
        self.subscriptions.iter().map(|s| s.subscriber).collect()
    }

    pub fn is_subscribed(&self, subscriber: Entity) -> bool {
        self.subscriptions.iter().any(|s| s.subscriber == subscriber)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
