//! Collaborator contracts for state lookup and URL synchronization.

use crate::params::StateParams;
use crate::state::{StateDescriptor, TargetState, TransitionOptions};

/// Lookup of registered state definitions and construction of targets.
pub trait StateRegistry {
    /// The definition registered under `name`, if any.
    fn get(&self, name: &str) -> Option<StateDescriptor>;

    /// Build a target for `name`, resolved against the current registry
    /// contents.
    fn target_state(
        &self,
        name: &str,
        params: StateParams,
        options: TransitionOptions,
    ) -> TargetState;
}

/// Requests that the externally visible navigation address be brought back
/// in line with actual application state. Idempotent, fire-and-forget.
pub trait UrlSync {
    fn reconcile(&self);
}
