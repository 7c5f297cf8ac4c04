//! Test doubles for exercising the legacy event bridges.
//!
//! Deliberately simple recording fakes rather than a dispatch engine; the
//! real broadcast substrate, registry, and pipeline live outside this
//! workspace.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use wayfarer_core::{
    HookOutcome, InvalidTargetHook, NotFoundOutcome, StateDescriptor, StateParams, StateRegistry,
    TargetState, Transition, TransitionHook, TransitionOptions, TransitionPipeline, UrlSync,
};

use crate::event::{EventOutcome, EventSink, LegacyEventKind, StateChangeEvent};

/// Records every broadcast, runs registered listeners in order, and answers
/// with a scripted outcome per event kind (pass-through by default).
#[derive(Default)]
pub struct ScriptedSink {
    outcomes: RefCell<IndexMap<LegacyEventKind, EventOutcome>>,
    listeners: RefCell<Vec<Box<dyn Fn(&StateChangeEvent)>>>,
    broadcasts: RefCell<Vec<StateChangeEvent>>,
}

impl ScriptedSink {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Answer broadcasts of `kind` with `outcome`.
    pub fn script(&self, kind: LegacyEventKind, outcome: EventOutcome) {
        self.outcomes.borrow_mut().insert(kind, outcome);
    }

    /// Run `listener` during every broadcast, in registration order.
    pub fn on_broadcast(&self, listener: impl Fn(&StateChangeEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Every event broadcast so far, in order.
    pub fn broadcasts(&self) -> Vec<StateChangeEvent> {
        self.broadcasts.borrow().clone()
    }

    /// How many broadcasts of `kind` happened so far.
    pub fn count(&self, kind: LegacyEventKind) -> usize {
        self.broadcasts
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }
}

impl EventSink for ScriptedSink {
    fn broadcast(&self, event: StateChangeEvent) -> EventOutcome {
        for listener in self.listeners.borrow().iter() {
            listener(&event);
        }
        let outcome = self
            .outcomes
            .borrow()
            .get(&event.kind())
            .cloned()
            .unwrap_or_default();
        self.broadcasts.borrow_mut().push(event);
        outcome
    }
}

/// Name-keyed registry fake; states may be registered at any time, including
/// from inside a broadcast listener.
#[derive(Default)]
pub struct MapRegistry {
    states: RefCell<IndexMap<String, StateDescriptor>>,
}

impl MapRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_states<I, S>(names: I) -> Rc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::default();
        for name in names {
            let name = name.into();
            registry
                .states
                .borrow_mut()
                .insert(name.clone(), StateDescriptor::new(name));
        }
        Rc::new(registry)
    }

    pub fn register(&self, name: impl Into<String>) {
        let name = name.into();
        self.states
            .borrow_mut()
            .insert(name.clone(), StateDescriptor::new(name));
    }
}

impl StateRegistry for MapRegistry {
    fn get(&self, name: &str) -> Option<StateDescriptor> {
        self.states.borrow().get(name).cloned()
    }

    fn target_state(
        &self,
        name: &str,
        params: StateParams,
        options: TransitionOptions,
    ) -> TargetState {
        match self.get(name) {
            Some(definition) => TargetState::resolved(definition, params, options),
            None => TargetState::unresolved(name, params, options),
        }
    }
}

/// Counts reconciliation requests.
#[derive(Default)]
pub struct RecordingUrl {
    reconciles: Cell<usize>,
}

impl RecordingUrl {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reconciles(&self) -> usize {
        self.reconciles.get()
    }
}

impl UrlSync for RecordingUrl {
    fn reconcile(&self) {
        self.reconciles.set(self.reconciles.get() + 1);
    }
}

/// Captures hook registrations and drives them the way the pipeline would.
#[derive(Default)]
pub struct RecordingPipeline {
    before: RefCell<Vec<(i32, Rc<dyn TransitionHook>)>>,
    invalid: RefCell<Vec<Rc<dyn InvalidTargetHook>>>,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_hooks(&self) -> Vec<(i32, Rc<dyn TransitionHook>)> {
        self.before.borrow().clone()
    }

    pub fn invalid_hooks(&self) -> Vec<Rc<dyn InvalidTargetHook>> {
        self.invalid.borrow().clone()
    }

    /// Run every registered before-hook against `transition`, highest
    /// priority first, stopping at the first veto.
    pub fn run_before(&self, transition: &Rc<Transition>) -> HookOutcome {
        let mut hooks = self.before.borrow().clone();
        hooks.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, hook) in hooks {
            if let HookOutcome::Veto = hook.on_before(transition) {
                return HookOutcome::Veto;
            }
        }
        HookOutcome::Continue
    }

    /// Run the first registered invalid-target hook, if any.
    pub fn run_invalid(&self, to: &TargetState, from: &TargetState) -> Option<NotFoundOutcome> {
        let hook = self.invalid.borrow().first().cloned();
        hook.map(|hook| hook.on_invalid(to, from))
    }
}

impl TransitionPipeline for RecordingPipeline {
    fn on_before(&self, priority: i32, hook: Rc<dyn TransitionHook>) {
        self.before.borrow_mut().push((priority, hook));
    }

    fn on_invalid(&self, hook: Rc<dyn InvalidTargetHook>) {
        self.invalid.borrow_mut().push(hook);
    }
}

/// A parameterless transition between two named states.
pub fn transition(from: &str, to: &str, options: TransitionOptions) -> Rc<Transition> {
    Rc::new(Transition::new(
        StateDescriptor::new(from),
        StateParams::new(),
        StateDescriptor::new(to),
        StateParams::new(),
        options,
    ))
}
