/// Synchronous listener registration and dispatch
///
/// Every mutable entity in the model owns a [`Notifier`] parameterized by its
/// own type. Listeners implement [`Listener`] for the source types they care
/// about and are held weakly, so the notification graph never keeps a model
/// object alive on its own.
///
/// Dispatch rules:
/// - Listeners run in registration order on the calling thread.
/// - Registering the same listener twice is a no-op that returns the
///   original [`SubscriptionId`].
/// - A notifier that is already dispatching ignores nested `notify` calls on
///   itself. Cycles in the observer graph therefore terminate after one lap.
/// - Chaining across notifiers is explicit: a listener re-triggers its own
///   notifier when its visible state changed.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives synchronous updates from a [`Notifier<S>`]
pub trait Listener<S: ?Sized> {
    fn update(&self, source: &S);
}

/// Handle returned by [`Notifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription<S: ?Sized + 'static> {
    id: SubscriptionId,
    listener: Weak<dyn Listener<S>>,
}

/// Ordered set of weakly held listeners for one source
pub struct Notifier<S: ?Sized + 'static> {
    subscriptions: RefCell<Vec<Subscription<S>>>,
    next_id: Cell<u64>,
    dispatching: Cell<bool>,
}

impl<S: ?Sized + 'static> Notifier<S> {
    pub fn new() -> Self {
        Self {
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            dispatching: Cell::new(false),
        }
    }

    /// Register a listener. Re-registering the same instance returns its
    /// existing id.
    pub fn subscribe(&self, listener: Weak<dyn Listener<S>>) -> SubscriptionId {
        let mut subscriptions = self.subscriptions.borrow_mut();
        if let Some(existing) = subscriptions
            .iter()
            .find(|s| Weak::ptr_eq(&s.listener, &listener))
        {
            return existing.id;
        }

        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        subscriptions.push(Subscription { id, listener });
        id
    }

    /// Convenience wrapper around [`subscribe`](Self::subscribe) for a strong handle
    pub fn subscribe_rc<L>(&self, listener: &Rc<L>) -> SubscriptionId
    where
        L: Listener<S> + 'static,
    {
        let weak: Weak<L> = Rc::downgrade(listener);
        self.subscribe(weak)
    }

    /// Remove a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().iter().any(|s| s.id == id)
    }

    /// Number of registered listeners that are still alive
    pub fn listener_count(&self) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.listener.strong_count() > 0)
            .count()
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// Call `update(source)` on every live listener, returning how many ran
    pub fn notify(&self, source: &S) -> usize {
        if self.dispatching.replace(true) {
            tracing::warn!("nested notification suppressed");
            return 0;
        }
        let _guard = DispatchGuard(&self.dispatching);

        // Snapshot so listeners may subscribe or unsubscribe while we iterate
        let snapshot: Vec<(SubscriptionId, Weak<dyn Listener<S>>)> = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            subscriptions.retain(|s| s.listener.strong_count() > 0);
            subscriptions
                .iter()
                .map(|s| (s.id, s.listener.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (id, weak) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            if let Some(listener) = weak.upgrade() {
                listener.update(source);
                delivered += 1;
            }
        }

        tracing::trace!(delivered, "notification dispatched");
        delivered
    }
}

impl<S: ?Sized + 'static> Default for Notifier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + 'static> fmt::Debug for Notifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listener_count())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

/// Clears the dispatching flag even if a listener panics
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
