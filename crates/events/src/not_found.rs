//! Bridges unresolvable target states onto the legacy not-found
//! negotiation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wayfarer_core::{
    InvalidTargetHook, NotFoundOutcome, StateRegistry, TargetState, UrlSync,
};

use crate::event::{EventSink, RedirectDescriptor, RetryValue, StateChangeEvent};

/// Gives listeners one synchronous chance to correct an unresolvable
/// target, then translates their answer into a pipeline decision.
pub struct NotFoundBridge {
    registry: Rc<dyn StateRegistry>,
    sink: Rc<dyn EventSink>,
    url: Rc<dyn UrlSync>,
}

impl NotFoundBridge {
    pub fn new(
        registry: Rc<dyn StateRegistry>,
        sink: Rc<dyn EventSink>,
        url: Rc<dyn UrlSync>,
    ) -> Self {
        Self {
            registry,
            sink,
            url,
        }
    }
}

impl InvalidTargetHook for NotFoundBridge {
    fn on_invalid(&self, to: &TargetState, from: &TargetState) -> NotFoundOutcome {
        let redirect = Rc::new(RefCell::new(RedirectDescriptor {
            to: to.identifier().to_string(),
            params: to.params().clone(),
            options: to.options().clone(),
        }));

        let outcome = self.sink.broadcast(StateChangeEvent::NotFound {
            redirect: Rc::clone(&redirect),
            from: from.state().cloned(),
            from_params: from.params().clone(),
        });

        if outcome.prevented || outcome.has_retry() {
            self.url.reconcile();
        }

        // Resolution reads the descriptor's contents at resolution time, not
        // a snapshot taken before the broadcast; listeners rewrite it in
        // place.
        let registry = Rc::clone(&self.registry);
        let resolve = {
            let redirect = Rc::clone(&redirect);
            let registry = Rc::clone(&registry);
            move || {
                let redirect = redirect.borrow();
                registry.target_state(
                    &redirect.to,
                    redirect.params.clone(),
                    redirect.options.clone(),
                )
            }
        };

        let prevented = outcome.prevented;
        match outcome.retry {
            None if prevented => {
                debug!("legacy not-found event prevented; cancelling transition");
                NotFoundOutcome::Cancel
            }
            Some(RetryValue::Deferred(signal)) => {
                NotFoundOutcome::Pending(signal.map(move |_| resolve()))
            }
            Some(RetryValue::Ready) => NotFoundOutcome::Redirect(resolve()),
            None => {
                if registry.get(&redirect.borrow().to).is_some() {
                    NotFoundOutcome::Redirect(resolve())
                } else {
                    NotFoundOutcome::Unhandled
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventOutcome, LegacyEventKind};
    use crate::testing::{MapRegistry, RecordingUrl, ScriptedSink};
    use wayfarer_core::{StateParams, TransitionOptions};

    fn bridge(
        registry: &Rc<MapRegistry>,
        sink: &Rc<ScriptedSink>,
        url: &Rc<RecordingUrl>,
    ) -> NotFoundBridge {
        NotFoundBridge::new(
            Rc::clone(registry) as Rc<dyn StateRegistry>,
            Rc::clone(sink) as Rc<dyn EventSink>,
            Rc::clone(url) as Rc<dyn UrlSync>,
        )
    }

    fn lazy_target() -> TargetState {
        TargetState::unresolved(
            "lazy.state",
            StateParams::new(),
            TransitionOptions::default(),
        )
    }

    #[test]
    fn ready_retry_resolves_the_rewritten_descriptor() {
        let registry = MapRegistry::with_states(["app.home"]);
        let sink = ScriptedSink::new();
        let url = RecordingUrl::new();
        sink.script(
            LegacyEventKind::NotFound,
            EventOutcome::passed().with_retry(RetryValue::Ready),
        );
        sink.on_broadcast(|event| {
            if let StateChangeEvent::NotFound { redirect, .. } = event {
                redirect.borrow_mut().to = "app.home".to_string();
            }
        });
        let bridge = bridge(&registry, &sink, &url);
        let from = registry.target_state("app.home", StateParams::new(), TransitionOptions::default());

        let outcome = bridge.on_invalid(&lazy_target(), &from);
        match outcome {
            NotFoundOutcome::Redirect(target) => {
                assert_eq!(target.identifier(), "app.home");
                assert!(target.exists());
            }
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(url.reconciles(), 1);
    }

    #[test]
    fn unanswered_broadcast_with_unknown_state_is_unhandled() {
        let registry = MapRegistry::new();
        let sink = ScriptedSink::new();
        let url = RecordingUrl::new();
        let bridge = bridge(&registry, &sink, &url);
        let from = TargetState::unresolved("app.home", StateParams::new(), TransitionOptions::default());

        let outcome = bridge.on_invalid(&lazy_target(), &from);
        assert!(matches!(outcome, NotFoundOutcome::Unhandled));
        assert_eq!(url.reconciles(), 0);
    }
}
