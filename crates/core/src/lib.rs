//! Core domain types, errors, and collaborator contracts for `wayfarer`.
//!
//! This crate establishes the foundational data structures shared by the
//! rest of the workspace and the trait seams the surrounding system plugs
//! into.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`params`**, **`state`**, **`reject`**: Domain data — parameter maps,
//!   state identity, navigation targets, and rejection reasons.
//! - **`signal`**, **`transition`**: Settle-once completion signals and the
//!   read-only transition handle hooks consume.
//! - **`pipeline`**, **`registry`**: The contracts of the external
//!   collaborators (transition pipeline, state registry, URL
//!   synchronization) this workspace talks to but does not implement.

pub mod errors;
pub mod params;
pub mod pipeline;
pub mod registry;
pub mod reject;
pub mod signal;
pub mod state;
pub mod transition;

pub use self::{
    errors::{Error, Result},
    params::StateParams,
    pipeline::{
        HookOutcome, InvalidTargetHook, NotFoundOutcome, TransitionHook, TransitionPipeline,
    },
    registry::{StateRegistry, UrlSync},
    reject::{RejectKind, Rejection},
    signal::{CompletionSignal, Deferred, TransitionOutcome},
    state::{StateDescriptor, TargetState, TransitionOptions},
    transition::Transition,
};
