//! State identity, transition options, and unresolved navigation targets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::StateParams;

/// Identity of a registered application state, as carried in event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDescriptor {
    name: String,
}

impl StateDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Per-transition behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionOptions {
    /// Legacy event opt-out; `false` silences every legacy broadcast for the
    /// transition regardless of the toggle registry.
    pub notify: bool,
    /// Inherit parameters from the current state when building a target.
    pub inherit: bool,
    /// Re-enter the destination state even if it is already current.
    pub reload: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            notify: true,
            inherit: true,
            reload: false,
        }
    }
}

/// A candidate destination that may or may not resolve to a registered
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetState {
    name: String,
    params: StateParams,
    options: TransitionOptions,
    definition: Option<StateDescriptor>,
}

impl TargetState {
    /// Target for a state name that did not resolve against the registry.
    pub fn unresolved(
        name: impl Into<String>,
        params: StateParams,
        options: TransitionOptions,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            options,
            definition: None,
        }
    }

    /// Target whose name resolved to a registered state definition.
    pub fn resolved(
        definition: StateDescriptor,
        params: StateParams,
        options: TransitionOptions,
    ) -> Self {
        Self {
            name: definition.name().to_string(),
            params,
            options,
            definition: Some(definition),
        }
    }

    /// The requested state name.
    pub fn identifier(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &StateParams {
        &self.params
    }

    pub fn options(&self) -> &TransitionOptions {
        &self.options
    }

    /// The resolved state definition, when one exists. On an origin target
    /// this is the state the navigation started from.
    pub fn state(&self) -> Option<&StateDescriptor> {
        self.definition.as_ref()
    }

    /// Whether the name resolved to a registered state.
    pub fn exists(&self) -> bool {
        self.definition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_notifying() {
        let options = TransitionOptions::default();
        assert!(options.notify);
        assert!(options.inherit);
        assert!(!options.reload);
    }

    #[test]
    fn unresolved_targets_have_no_definition() {
        let target = TargetState::unresolved(
            "missing.state",
            StateParams::new(),
            TransitionOptions::default(),
        );
        assert_eq!(target.identifier(), "missing.state");
        assert!(!target.exists());
        assert!(target.state().is_none());
    }

    #[test]
    fn resolved_targets_expose_their_definition() {
        let target = TargetState::resolved(
            StateDescriptor::new("app.home"),
            StateParams::new(),
            TransitionOptions::default(),
        );
        assert_eq!(target.identifier(), "app.home");
        assert!(target.exists());
        assert_eq!(target.state().unwrap().name(), "app.home");
    }
}
