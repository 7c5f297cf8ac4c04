//! Bridges a transition's lifecycle onto the legacy broadcast events.

use std::rc::Rc;

use tracing::{debug, trace};
use wayfarer_core::{HookOutcome, Transition, TransitionHook, UrlSync};

use crate::event::{EventSink, LegacyEventKind, StateChangeEvent};
use crate::toggles::EventToggles;

/// Registration priority of the start bridge; it must observe a transition
/// before ordinary hooks do.
pub const LEGACY_START_HOOK_PRIORITY: i32 = 1000;

/// Converts one transition's lifecycle (start, then success or error) into
/// legacy broadcasts, honoring the per-transition `notify` opt-out.
pub struct StartBridge {
    toggles: EventToggles,
    sink: Rc<dyn EventSink>,
    url: Rc<dyn UrlSync>,
}

impl StartBridge {
    pub fn new(toggles: EventToggles, sink: Rc<dyn EventSink>, url: Rc<dyn UrlSync>) -> Self {
        Self { toggles, sink, url }
    }
}

impl TransitionHook for StartBridge {
    fn on_before(&self, transition: &Rc<Transition>) -> HookOutcome {
        if !transition.options().notify {
            trace!("transition opted out of notification; skipping legacy events");
            return HookOutcome::Continue;
        }

        let to = transition.to().clone();
        let from = transition.from().clone();
        let to_params = transition.to_params().clone();
        let from_params = transition.from_params().clone();

        if self.toggles.is_enabled(LegacyEventKind::Start) {
            let outcome = self.sink.broadcast(StateChangeEvent::Start {
                to: to.clone(),
                to_params: to_params.clone(),
                from: from.clone(),
                from_params: from_params.clone(),
                transition: Rc::clone(transition),
            });
            if outcome.prevented {
                if self.toggles.is_enabled(LegacyEventKind::Cancel) {
                    self.sink.broadcast(StateChangeEvent::Cancel {
                        to: to.clone(),
                        to_params: to_params.clone(),
                        from: from.clone(),
                        from_params: from_params.clone(),
                        transition: Rc::clone(transition),
                    });
                }
                debug!(to = %to, from = %from, "legacy start event prevented; vetoing transition");
                self.url.reconcile();
                return HookOutcome::Veto;
            }
        }

        // Continuations are registered only after (and conditioned on) the
        // start broadcast, so no success or error event can ever precede a
        // start, or follow a prevented one.
        if self.toggles.is_enabled(LegacyEventKind::Success) {
            let sink = Rc::clone(&self.sink);
            let to = to.clone();
            let from = from.clone();
            let to_params = to_params.clone();
            let from_params = from_params.clone();
            transition.completion().on_success(move || {
                sink.broadcast(StateChangeEvent::Success {
                    to,
                    to_params: to_params.normalized(),
                    from,
                    from_params: from_params.normalized(),
                });
            });
        }

        if self.toggles.is_enabled(LegacyEventKind::Error) {
            let sink = Rc::clone(&self.sink);
            let url = Rc::clone(&self.url);
            transition.completion().on_failure(move |rejection| {
                if rejection.is_preemption() {
                    trace!(
                        kind = ?rejection.kind(),
                        "suppressing legacy error event for routine preemption"
                    );
                    return;
                }
                let outcome = sink.broadcast(StateChangeEvent::Error {
                    to,
                    to_params: to_params.normalized(),
                    from,
                    from_params: from_params.normalized(),
                    reason: rejection.clone(),
                });
                if !outcome.prevented {
                    url.reconcile();
                }
            });
        }

        HookOutcome::Continue
    }
}
