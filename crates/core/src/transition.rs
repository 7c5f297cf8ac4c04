//! The read-only transition handle consumed by hooks.

use crate::params::StateParams;
use crate::reject::Rejection;
use crate::signal::CompletionSignal;
use crate::state::{StateDescriptor, TransitionOptions};

/// One attempted navigation between two application states.
///
/// Hooks only read the handle and subscribe to its completion signal; the
/// transition pipeline owns creation and completion. The handle's identity
/// is immutable for its lifetime.
#[derive(Debug)]
pub struct Transition {
    from: StateDescriptor,
    from_params: StateParams,
    to: StateDescriptor,
    to_params: StateParams,
    options: TransitionOptions,
    completion: CompletionSignal,
}

impl Transition {
    pub fn new(
        from: StateDescriptor,
        from_params: StateParams,
        to: StateDescriptor,
        to_params: StateParams,
        options: TransitionOptions,
    ) -> Self {
        Self {
            from,
            from_params,
            to,
            to_params,
            options,
            completion: CompletionSignal::new(),
        }
    }

    /// The destination state.
    pub fn to(&self) -> &StateDescriptor {
        &self.to
    }

    /// The state the navigation started from.
    #[allow(clippy::should_implement_trait)]
    pub fn from(&self) -> &StateDescriptor {
        &self.from
    }

    pub fn to_params(&self) -> &StateParams {
        &self.to_params
    }

    pub fn from_params(&self) -> &StateParams {
        &self.from_params
    }

    pub fn options(&self) -> &TransitionOptions {
        &self.options
    }

    /// Completion signal; resolves on success, rejects with a typed reason.
    pub fn completion(&self) -> &CompletionSignal {
        &self.completion
    }

    /// Mark the transition successful. Driven by the pipeline.
    pub fn resolve(&self) -> bool {
        self.completion.resolve()
    }

    /// Mark the transition failed. Driven by the pipeline.
    pub fn reject(&self, rejection: Rejection) -> bool {
        self.completion.reject(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample() -> Transition {
        let mut to_params = StateParams::new();
        to_params.insert("id", json!(7));
        Transition::new(
            StateDescriptor::new("app.list"),
            StateParams::new(),
            StateDescriptor::new("app.detail"),
            to_params,
            TransitionOptions::default(),
        )
    }

    #[test]
    fn exposes_both_endpoints() {
        let transition = sample();
        assert_eq!(transition.from().name(), "app.list");
        assert_eq!(transition.to().name(), "app.detail");
        assert_eq!(transition.to_params().get("id"), Some(&json!(7)));
        assert!(transition.from_params().is_empty());
        assert!(transition.options().notify);
    }

    #[test]
    fn completion_settles_once() {
        let transition = sample();
        let successes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&successes);
        transition.completion().on_success(move || sink.set(sink.get() + 1));

        assert!(transition.resolve());
        assert!(!transition.reject(Rejection::aborted()));
        assert_eq!(successes.get(), 1);
    }
}
