use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_listener_id: u64,
}

struct Shared<T> {
    inner: Mutex<Inner<T>>,
    /// Held while listeners run, so fan-out and replay never interleave.
    delivery: Mutex<()>,
}

/// A "latest value + listener list" cell.
///
/// - [`Broadcast::publish`] replaces the value and synchronously calls every
///   registered listener with it, in registration order.
/// - [`Broadcast::subscribe`] registers a listener and immediately replays
///   the current value to it, so late subscribers never miss the latest state.
///
/// Listeners run outside the value lock: they may call [`Broadcast::get`]
/// or drop a [`Subscription`], but must not publish or subscribe.
pub struct Broadcast<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    value: initial,
                    listeners: Vec::new(),
                    next_listener_id: 0,
                }),
                delivery: Mutex::new(()),
            }),
        }
    }

    /// Clone of the latest published value.
    pub fn get(&self) -> T {
        self.inner().value.clone()
    }

    /// Replace the value and fan it out to all listeners.
    pub fn publish(&self, value: T) {
        let _delivery = self.delivery();
        let listeners: Vec<Listener<T>> = {
            let mut inner = self.inner();
            inner.value = value.clone();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(&value);
        }
    }

    /// Register `listener` and replay the current value to it.
    /// The returned handle unregisters the listener when released or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _delivery = self.delivery();
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut inner = self.inner();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.value.clone())
        };
        listener(&current);

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared
                        .inner
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .listeners
                        .retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner().listeners.len()
    }

    fn inner(&self) -> MutexGuard<'_, Inner<T>> {
        self.shared.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delivery(&self) -> MutexGuard<'_, ()> {
        self.shared.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`Broadcast::subscribe`].
///
/// Dropping it stops further notifications; call [`Subscription::detach`]
/// to keep the listener registered for the lifetime of the source instead.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    /// Keep the listener registered forever.
    pub fn detach(mut self) {
        self.release = None;
    }

    /// Wrap several subscriptions into one handle that releases them together.
    pub fn merge(subscriptions: Vec<Subscription>) -> Subscription {
        Subscription {
            release: Some(Box::new(move || drop(subscriptions))),
        }
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
