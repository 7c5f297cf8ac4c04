//! Classification of why a transition's completion signal rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why a transition stopped short of success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectKind {
    /// A newer transition preempted this one.
    Superseded,
    /// The transition was cancelled outright, for example by a vetoing hook.
    Aborted,
    /// The target state or its parameters were invalid.
    Invalid,
    /// The transition was a no-op (same state, same parameters) and was
    /// dropped.
    Ignored,
    /// A hook or resolution step failed.
    Error,
}

impl RejectKind {
    /// Superseded and aborted transitions are routine navigation churn, not
    /// user-visible failures.
    pub fn is_preemption(self) -> bool {
        matches!(self, RejectKind::Superseded | RejectKind::Aborted)
    }
}

/// The typed reason carried by a rejected completion signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    kind: RejectKind,
    message: String,
    detail: Option<Value>,
}

impl Rejection {
    pub fn new(kind: RejectKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn superseded() -> Self {
        Self::new(RejectKind::Superseded, "transition superseded")
    }

    pub fn aborted() -> Self {
        Self::new(RejectKind::Aborted, "transition aborted")
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(RejectKind::Invalid, message)
    }

    pub fn ignored() -> Self {
        Self::new(RejectKind::Ignored, "transition ignored")
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(RejectKind::Error, message)
    }

    /// Attach a structured detail payload (for example the failing hook's
    /// own error) for listeners that inspect it.
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn kind(&self) -> RejectKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    pub fn is_preemption(&self) -> bool {
        self.kind.is_preemption()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_superseded_and_aborted_are_preemption() {
        assert!(Rejection::superseded().is_preemption());
        assert!(Rejection::aborted().is_preemption());
        assert!(!Rejection::invalid("no such state").is_preemption());
        assert!(!Rejection::ignored().is_preemption());
        assert!(!Rejection::failed("resolve failed").is_preemption());
    }

    #[test]
    fn detail_rides_along() {
        let rejection =
            Rejection::failed("resolve failed").with_detail(json!({ "hook": "loadUser" }));
        assert_eq!(rejection.kind(), RejectKind::Error);
        assert_eq!(rejection.detail(), Some(&json!({ "hook": "loadUser" })));
        assert_eq!(rejection.to_string(), "resolve failed");
    }
}
