//! Subscription disposers
//!
//! Registering a listener yields a [`Subscription`]; dropping it (or calling
//! [`Subscription::dispose`]) runs the teardown exactly once. Widgets keep
//! their subscriptions in a [`SubscriptionSet`] so a whole widget can be
//! torn down at once.

use std::fmt;

/// Teardown handle for a registered callback
#[must_use = "dropping a Subscription immediately unregisters it"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription with nothing to tear down
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Unregister now
    pub fn dispose(mut self) {
        self.run();
    }

    /// Keep the registration for the rest of the page's life
    ///
    /// The teardown is leaked, not dropped: it usually owns the callback
    /// the registration points at.
    pub fn forget(mut self) {
        if let Some(teardown) = self.teardown.take() {
            std::mem::forget(teardown);
        }
    }

    pub fn is_active(&self) -> bool {
        self.teardown.is_some()
    }

    fn run(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// A group of subscriptions disposed together
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Dispose every subscription, in registration order
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<T: IntoIterator<Item = Subscription>>(&mut self, iter: T) {
        self.subscriptions.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting() -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Subscription::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn test_dispose_runs_once() {
        let (count, sub) = counting();
        sub.dispose();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_disposes() {
        let (count, sub) = counting();
        drop(sub);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_forget_skips_teardown() {
        let (count, sub) = counting();
        sub.forget();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_forget_keeps_captured_state_alive() {
        struct Guard(Rc<Cell<bool>>);
        impl Drop for Guard {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let guard = Guard(Rc::clone(&dropped));
        let sub = Subscription::new(move || drop(guard));
        sub.forget();
        assert!(!dropped.get());
    }

    #[test]
    fn test_set_disposes_all() {
        let mut set = SubscriptionSet::new();
        let (a, sub_a) = counting();
        let (b, sub_b) = counting();
        set.push(sub_a);
        set.extend([sub_b, Subscription::empty()]);
        assert_eq!(set.len(), 3);

        set.dispose();
        assert!(set.is_empty());
        assert_eq!((a.get(), b.get()), (1, 1));
    }
}
