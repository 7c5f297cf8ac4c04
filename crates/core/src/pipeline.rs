//! Hook seams into the transition pipeline.

use std::rc::Rc;

use crate::signal::Deferred;
use crate::state::TargetState;
use crate::transition::Transition;

/// What a before-transition hook tells the pipeline to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Let the transition proceed.
    Continue,
    /// Cancel the transition; the pipeline rejects it as aborted.
    Veto,
}

/// Resolution of an unresolvable target state.
#[derive(Debug)]
pub enum NotFoundOutcome {
    /// No opinion; the pipeline's own default not-found handling applies.
    Unhandled,
    /// Stop: do not proceed and do not retry.
    Cancel,
    /// Retry immediately with this corrected target.
    Redirect(TargetState),
    /// Retry once the deferred target settles.
    Pending(Deferred<TargetState>),
}

/// Runs before every transition, at its registered priority.
pub trait TransitionHook {
    fn on_before(&self, transition: &Rc<Transition>) -> HookOutcome;
}

/// Invoked when a requested target state name cannot be resolved.
pub trait InvalidTargetHook {
    fn on_invalid(&self, to: &TargetState, from: &TargetState) -> NotFoundOutcome;
}

/// Registration surface of the transition pipeline.
///
/// Hooks with a higher priority run earlier.
pub trait TransitionPipeline {
    fn on_before(&self, priority: i32, hook: Rc<dyn TransitionHook>);
    fn on_invalid(&self, hook: Rc<dyn InvalidTargetHook>);
}
