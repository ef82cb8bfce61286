// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Single-slot event listeners.
//!
//! Registering a callback replaces whatever was registered before;
//! registering [`Listener::Clear`] leaves the slot empty.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// What to register for an event.
pub enum Listener<T> {
    Callback(Box<dyn Fn(&T) + Send + Sync>),
    /// Drop the current listener.
    Clear,
}

impl<T> Listener<T> {
    pub fn new(callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Listener::Callback(Box::new(callback))
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Callback(_) => f.write_str("Listener::Callback(..)"),
            Listener::Clear => f.write_str("Listener::Clear"),
        }
    }
}

/// Holds at most one listener for an event.
pub struct ListenerSlot<T> {
    slot: Mutex<Option<Callback<T>>>,
}

impl<T> Default for ListenerSlot<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<T> ListenerSlot<T> {
    pub fn register(&self, listener: Listener<T>) {
        *lock(&self.slot) = match listener {
            Listener::Callback(callback) => Some(Arc::from(callback)),
            Listener::Clear => None,
        };
    }

    pub fn is_active(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Invoke the current listener, if any. The slot lock is released first
    /// so callbacks may re-register.
    pub fn notify(&self, value: &T) {
        let callback = lock(&self.slot).clone();
        if let Some(callback) = callback {
            callback(value);
        }
    }
}

impl<T> fmt::Debug for ListenerSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Lock, recovering the data if a callback panicked while it was held.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Listener<u32>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let listener = Listener::new(move |_: &u32| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn second_registration_replaces_first() {
        let slot = ListenerSlot::default();
        let (a, listener_a) = counter();
        let (b, listener_b) = counter();

        slot.register(listener_a);
        slot.register(listener_b);
        slot.notify(&1);

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_leaves_no_listener() {
        let slot = ListenerSlot::default();
        let (a, listener_a) = counter();

        slot.register(listener_a);
        assert!(slot.is_active());
        slot.register(Listener::Clear);
        assert!(!slot.is_active());

        slot.notify(&1);
        assert_eq!(a.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_may_clear_its_own_slot() {
        let slot = Arc::new(ListenerSlot::<u32>::default());
        let inner = slot.clone();
        slot.register(Listener::new(move |_| inner.register(Listener::Clear)));

        slot.notify(&7);
        assert!(!slot.is_active());
    }
}
