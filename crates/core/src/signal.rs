//! Settle-once completion signals with callback subscription.
//!
//! The transition pipeline completes transitions asynchronously, but this
//! workspace does not commit to any particular concurrency primitive: a
//! signal settles exactly once and runs its subscribers synchronously, in
//! subscription order, on the settling call stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::reject::Rejection;

type Callback<T> = Box<dyn FnOnce(&T)>;

struct Inner<T> {
    value: Option<Rc<T>>,
    waiters: Vec<Callback<T>>,
}

/// A single-threaded, settle-once signal.
///
/// Clones share the same underlying cell. Subscribers registered after the
/// signal settles run immediately.
pub struct Deferred<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Deferred<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: None,
                waiters: Vec::new(),
            })),
        }
    }

    /// A signal that is already settled with `value`.
    pub fn settled(value: T) -> Self {
        let deferred = Self::new();
        deferred.settle(value);
        deferred
    }

    pub fn is_settled(&self) -> bool {
        self.inner.borrow().value.is_some()
    }

    /// Settle the signal, running all pending subscribers. Returns `false`
    /// (and does nothing) if the signal was already settled.
    pub fn settle(&self, value: T) -> bool {
        let (value, waiters) = {
            let mut inner = self.inner.borrow_mut();
            if inner.value.is_some() {
                return false;
            }
            let value = Rc::new(value);
            inner.value = Some(Rc::clone(&value));
            (value, std::mem::take(&mut inner.waiters))
        };
        // Subscribers run outside the borrow so they may subscribe or settle
        // other signals reentrantly.
        for waiter in waiters {
            waiter(&value);
        }
        true
    }

    /// Run `callback` once the signal settles; immediately if it already
    /// has.
    pub fn subscribe(&self, callback: impl FnOnce(&T) + 'static) {
        let already = self.inner.borrow().value.clone();
        match already {
            Some(value) => callback(&value),
            None => self.inner.borrow_mut().waiters.push(Box::new(callback)),
        }
    }

    /// Derive a signal that settles with `f(&value)` when this one settles.
    pub fn map<U: 'static>(&self, f: impl FnOnce(&T) -> U + 'static) -> Deferred<U> {
        let out = Deferred::new();
        let chained = out.clone();
        self.subscribe(move |value| {
            chained.settle(f(value));
        });
        out
    }
}

impl<T: 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Deferred")
            .field("settled", &inner.value.is_some())
            .field("waiters", &inner.waiters.len())
            .finish()
    }
}

/// Outcome of a completed transition.
pub type TransitionOutcome = Result<(), Rejection>;

/// Completion signal of a transition: resolves on success, rejects with a
/// typed [`Rejection`] on failure.
#[derive(Clone, Debug, Default)]
pub struct CompletionSignal {
    signal: Deferred<TransitionOutcome>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_settled(&self) -> bool {
        self.signal.is_settled()
    }

    /// Mark the transition successful. At most one settling call wins.
    pub fn resolve(&self) -> bool {
        self.signal.settle(Ok(()))
    }

    /// Mark the transition failed. At most one settling call wins.
    pub fn reject(&self, rejection: Rejection) -> bool {
        self.signal.settle(Err(rejection))
    }

    /// Fires only if the transition succeeds.
    pub fn on_success(&self, callback: impl FnOnce() + 'static) {
        self.signal.subscribe(move |outcome| {
            if outcome.is_ok() {
                callback();
            }
        });
    }

    /// Fires only if the transition fails, with the typed reason.
    pub fn on_failure(&self, callback: impl FnOnce(&Rejection) + 'static) {
        self.signal.subscribe(move |outcome| {
            if let Err(rejection) = outcome {
                callback(rejection);
            }
        });
    }
}
