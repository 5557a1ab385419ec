//! Change notification for storage consumers.
//!
//! Callbacks take no arguments: they only learn that *something* in the
//! namespace changed and re-read what they care about.
//!
//! `notify` snapshots the callback list before calling out, so a callback
//! may subscribe or unsubscribe (itself or others) without deadlocking.
//! Changes made during a notification take effect from the next one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// A change callback.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

type Slots = Mutex<BTreeMap<u64, Callback>>;

/// Ordered set of callbacks, keyed by registration order.
#[derive(Default)]
pub struct SubscriberList {
    slots: Arc<Slots>,
    next_id: AtomicU64,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; the returned handle removes it again.
    pub fn subscribe(&self, callback: Callback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().insert(id, callback);
        Subscription {
            id,
            slots: Arc::downgrade(&self.slots),
        }
    }

    /// Call every callback once, in registration order.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self.slots.lock().values().cloned().collect();
        for callback in snapshot {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does *not* unsubscribe; call `unsubscribe`.
/// Unsubscribing twice, or after the storage is gone, is a no-op.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    slots: Weak<Slots>,
}

impl Subscription {
    /// Remove the callback. Returns `true` only the first time.
    pub fn unsubscribe(&self) -> bool {
        match self.slots.upgrade() {
            Some(slots) => slots.lock().remove(&self.id).is_some(),
            None => false,
        }
    }
}
