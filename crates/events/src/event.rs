//! Legacy event vocabulary: names, payloads, and broadcast outcomes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wayfarer_core::{
    Deferred, Error, Rejection, StateDescriptor, StateParams, Transition, TransitionOptions,
};

/// The recognized legacy event names.
///
/// The four members of [`LegacyEventKind::DEFAULT_SET`] are what a
/// no-argument enable/disable toggles; `Cancel` is recognized but must be
/// named explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyEventKind {
    #[serde(rename = "$stateChangeStart")]
    Start,
    #[serde(rename = "$stateNotFound")]
    NotFound,
    #[serde(rename = "$stateChangeSuccess")]
    Success,
    #[serde(rename = "$stateChangeError")]
    Error,
    #[serde(rename = "$stateChangeCancel")]
    Cancel,
}

impl LegacyEventKind {
    /// The four events toggled by a no-argument enable/disable.
    pub const DEFAULT_SET: [LegacyEventKind; 4] = [
        LegacyEventKind::Start,
        LegacyEventKind::NotFound,
        LegacyEventKind::Success,
        LegacyEventKind::Error,
    ];

    /// The broadcast name listeners subscribe to.
    pub fn name(self) -> &'static str {
        match self {
            LegacyEventKind::Start => "$stateChangeStart",
            LegacyEventKind::NotFound => "$stateNotFound",
            LegacyEventKind::Success => "$stateChangeSuccess",
            LegacyEventKind::Error => "$stateChangeError",
            LegacyEventKind::Cancel => "$stateChangeCancel",
        }
    }
}

impl fmt::Display for LegacyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegacyEventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$stateChangeStart" | "start" => Ok(LegacyEventKind::Start),
            "$stateNotFound" | "notFound" => Ok(LegacyEventKind::NotFound),
            "$stateChangeSuccess" | "success" => Ok(LegacyEventKind::Success),
            "$stateChangeError" | "error" => Ok(LegacyEventKind::Error),
            "$stateChangeCancel" | "cancel" => Ok(LegacyEventKind::Cancel),
            other => Err(Error::UnknownEvent {
                name: other.to_string(),
            }),
        }
    }
}

/// The mutable redirect offer carried by a `$stateNotFound` broadcast.
///
/// Listeners may rewrite any field during the broadcast; the bridge re-reads
/// the descriptor afterwards, so post-broadcast values win.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectDescriptor {
    pub to: String,
    pub params: StateParams,
    pub options: TransitionOptions,
}

/// Shared handle to a redirect descriptor while a broadcast is in flight.
pub type SharedRedirect = Rc<RefCell<RedirectDescriptor>>;

/// A legacy broadcast with its fixed payload shape.
#[derive(Debug, Clone)]
pub enum StateChangeEvent {
    /// Fired when a transition begins; cancellable by listeners.
    Start {
        to: StateDescriptor,
        to_params: StateParams,
        from: StateDescriptor,
        from_params: StateParams,
        transition: Rc<Transition>,
    },
    /// Informational companion to a prevented start; its outcome is ignored.
    Cancel {
        to: StateDescriptor,
        to_params: StateParams,
        from: StateDescriptor,
        from_params: StateParams,
        transition: Rc<Transition>,
    },
    /// Fired once a transition completes successfully.
    Success {
        to: StateDescriptor,
        to_params: StateParams,
        from: StateDescriptor,
        from_params: StateParams,
    },
    /// Fired when a transition fails for a non-preemption reason.
    Error {
        to: StateDescriptor,
        to_params: StateParams,
        from: StateDescriptor,
        from_params: StateParams,
        reason: Rejection,
    },
    /// Fired when a requested state name cannot be resolved.
    NotFound {
        redirect: SharedRedirect,
        from: Option<StateDescriptor>,
        from_params: StateParams,
    },
}

impl StateChangeEvent {
    pub fn kind(&self) -> LegacyEventKind {
        match self {
            StateChangeEvent::Start { .. } => LegacyEventKind::Start,
            StateChangeEvent::Cancel { .. } => LegacyEventKind::Cancel,
            StateChangeEvent::Success { .. } => LegacyEventKind::Success,
            StateChangeEvent::Error { .. } => LegacyEventKind::Error,
            StateChangeEvent::NotFound { .. } => LegacyEventKind::NotFound,
        }
    }

    /// The broadcast name of this event.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// How a listener answered a `$stateNotFound` broadcast.
#[derive(Debug, Clone)]
pub enum RetryValue {
    /// Retry with the (possibly rewritten) redirect descriptor right away.
    Ready,
    /// Retry once this signal settles.
    Deferred(Deferred<()>),
}

/// Combined outcome of one synchronous broadcast.
#[derive(Debug, Clone, Default)]
pub struct EventOutcome {
    /// Some listener asked to cancel the default follow-up action.
    pub prevented: bool,
    /// A listener supplied a retry answer (`$stateNotFound` only).
    pub retry: Option<RetryValue>,
}

impl EventOutcome {
    /// No listener prevented or answered.
    pub fn passed() -> Self {
        Self::default()
    }

    /// A listener requested prevention.
    pub fn prevented() -> Self {
        Self {
            prevented: true,
            retry: None,
        }
    }

    /// Attach a retry answer.
    pub fn with_retry(mut self, retry: RetryValue) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn has_retry(&self) -> bool {
        self.retry.is_some()
    }
}

/// Synchronous fan-out broadcast collaborator.
///
/// All listeners run to completion, in registration order, before the
/// combined outcome is returned.
pub trait EventSink {
    fn broadcast(&self, event: StateChangeEvent) -> EventOutcome;
}
