//! Legacy broadcast-event bridge over the wayfarer transition pipeline.
//!
//! Consumers that still observe routing through the named `$stateChange*`
//! broadcasts configure [`StateEvents`] during startup, freeze it when the
//! runtime phase begins, and keep listening exactly as before; the bridges
//! translate transition lifecycles and unresolved targets into those
//! broadcasts without altering how transitions themselves run.
//!
//! ## Key Components
//!
//! - **`toggles`**: The [`StateEvents`] registry gating which legacy events
//!   are active, locked once the runtime phase begins.
//! - **`start`**: The per-transition bridge converting a transition's
//!   lifecycle into `$stateChangeStart`/`Success`/`Error` (and, alongside a
//!   prevented start, `$stateChangeCancel`) broadcasts.
//! - **`not_found`**: The bridge converting an unresolvable target state
//!   into the `$stateNotFound` redirect/retry negotiation.
//! - **`event`**: Event names, payload shapes, and broadcast outcomes.
//! - **`testing`**: Recording test doubles for the external collaborators.

pub mod event;
pub mod not_found;
pub mod start;
pub mod testing;
pub mod toggles;

pub use self::{
    event::{
        EventOutcome, EventSink, LegacyEventKind, RedirectDescriptor, RetryValue, SharedRedirect,
        StateChangeEvent,
    },
    not_found::NotFoundBridge,
    start::{StartBridge, LEGACY_START_HOOK_PRIORITY},
    toggles::{EventToggles, StateEvents},
};
