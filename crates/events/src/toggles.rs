//! The legacy event toggle registry and its configuration/runtime phases.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::debug;
use wayfarer_core::{Error, Result, StateRegistry, TransitionPipeline, UrlSync};

use crate::event::{EventSink, LegacyEventKind};
use crate::not_found::NotFoundBridge;
use crate::start::{StartBridge, LEGACY_START_HOOK_PRIORITY};

/// The set of legacy events currently enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventToggles {
    enabled: IndexSet<LegacyEventKind>,
}

impl EventToggles {
    pub fn is_enabled(&self, kind: LegacyEventKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = LegacyEventKind> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    fn insert(&mut self, kind: LegacyEventKind) {
        self.enabled.insert(kind);
    }

    fn remove(&mut self, kind: LegacyEventKind) {
        self.enabled.shift_remove(&kind);
    }
}

impl FromIterator<LegacyEventKind> for EventToggles {
    fn from_iter<I: IntoIterator<Item = LegacyEventKind>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

/// Gatekeeper for the deprecated broadcast-style state-change events.
///
/// Configure with [`enable`](Self::enable)/[`disable`](Self::disable) during
/// startup, then [`freeze`](Self::freeze) once the surrounding system enters
/// its runtime phase. Freezing locks the set and registers the bridge
/// handlers for whichever events are enabled.
#[derive(Debug, Default)]
pub struct StateEvents {
    toggles: RefCell<EventToggles>,
    frozen: Cell<bool>,
}

impl StateEvents {
    /// A registry with every legacy event disabled.
    pub fn new() -> Self {
        Self::default()
    }

    fn configurable(&self, operation: &'static str) -> Result<()> {
        if self.frozen.get() {
            return Err(Error::Frozen { operation });
        }
        Ok(())
    }

    /// Enable the given events, or the default four when none are given.
    pub fn enable(&self, events: impl IntoIterator<Item = LegacyEventKind>) -> Result<()> {
        self.configurable("enable")?;
        let mut toggles = self.toggles.borrow_mut();
        let mut any = false;
        for kind in events {
            toggles.insert(kind);
            any = true;
        }
        if !any {
            for kind in LegacyEventKind::DEFAULT_SET {
                toggles.insert(kind);
            }
        }
        Ok(())
    }

    /// Disable the given events, or the default four when none are given.
    pub fn disable(&self, events: impl IntoIterator<Item = LegacyEventKind>) -> Result<()> {
        self.configurable("disable")?;
        let mut toggles = self.toggles.borrow_mut();
        let mut any = false;
        for kind in events {
            toggles.remove(kind);
            any = true;
        }
        if !any {
            for kind in LegacyEventKind::DEFAULT_SET {
                toggles.remove(kind);
            }
        }
        Ok(())
    }

    /// Enable events by wire (or short) name. Every name is validated before
    /// anything is applied, so an unrecognized name leaves the set intact.
    pub fn enable_names<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.enable(Self::parse_names(names)?)
    }

    /// Disable events by wire (or short) name, with the same fail-fast
    /// validation as [`enable_names`](Self::enable_names).
    pub fn disable_names<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disable(Self::parse_names(names)?)
    }

    fn parse_names<I, S>(names: I) -> Result<Vec<LegacyEventKind>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|name| name.as_ref().parse()).collect()
    }

    /// Snapshot of the current toggle set.
    pub fn enabled(&self) -> EventToggles {
        self.toggles.borrow().clone()
    }

    pub fn is_enabled(&self, kind: LegacyEventKind) -> bool {
        self.toggles.borrow().is_enabled(kind)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Enter the runtime phase: lock the toggle set and register the bridge
    /// handlers for whichever events are enabled. One-way and one-time; a
    /// second call fails without registering anything again.
    pub fn freeze(
        &self,
        pipeline: &dyn TransitionPipeline,
        registry: Rc<dyn StateRegistry>,
        sink: Rc<dyn EventSink>,
        url: Rc<dyn UrlSync>,
    ) -> Result<()> {
        if self.frozen.replace(true) {
            return Err(Error::configuration(
                "legacy state events are already frozen",
            ));
        }
        let toggles = self.enabled();
        if toggles.is_enabled(LegacyEventKind::NotFound) {
            debug!(event = %LegacyEventKind::NotFound, "registering legacy not-found bridge");
            pipeline.on_invalid(Rc::new(NotFoundBridge::new(
                registry,
                Rc::clone(&sink),
                Rc::clone(&url),
            )));
        }
        if toggles.is_enabled(LegacyEventKind::Start) {
            debug!(
                event = %LegacyEventKind::Start,
                priority = LEGACY_START_HOOK_PRIORITY,
                "registering legacy start bridge"
            );
            pipeline.on_before(
                LEGACY_START_HOOK_PRIORITY,
                Rc::new(StartBridge::new(toggles, sink, url)),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MapRegistry, RecordingPipeline, RecordingUrl, ScriptedSink};

    #[test]
    fn no_argument_enable_turns_on_the_default_four() {
        let events = StateEvents::new();
        events.enable([]).unwrap();
        for kind in LegacyEventKind::DEFAULT_SET {
            assert!(events.is_enabled(kind));
        }
        assert!(!events.is_enabled(LegacyEventKind::Cancel));
    }

    #[test]
    fn cancel_must_be_named_explicitly() {
        let events = StateEvents::new();
        events.enable([LegacyEventKind::Cancel]).unwrap();
        assert!(events.is_enabled(LegacyEventKind::Cancel));
        assert!(!events.is_enabled(LegacyEventKind::Start));
    }

    #[test]
    fn disable_removes_named_or_default_events() {
        let events = StateEvents::new();
        events.enable([]).unwrap();
        events.disable([LegacyEventKind::Error]).unwrap();
        assert!(!events.is_enabled(LegacyEventKind::Error));
        assert!(events.is_enabled(LegacyEventKind::Start));

        events.disable([]).unwrap();
        assert!(events.enabled().is_empty());
    }

    #[test]
    fn name_surface_is_all_or_nothing() {
        let events = StateEvents::new();
        let err = events
            .enable_names(["$stateChangeStart", "$stateChangeBogus"])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownEvent { .. }));
        assert!(events.enabled().is_empty());

        events.enable_names(["start", "notFound"]).unwrap();
        assert!(events.is_enabled(LegacyEventKind::Start));
        assert!(events.is_enabled(LegacyEventKind::NotFound));
    }

    #[test]
    fn snapshot_is_detached_from_the_registry() {
        let events = StateEvents::new();
        events.enable([LegacyEventKind::Start]).unwrap();
        let snapshot = events.enabled();

        events.enable([LegacyEventKind::Error]).unwrap();
        assert!(!snapshot.is_enabled(LegacyEventKind::Error));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn mutation_after_freeze_is_a_typed_error() {
        let events = StateEvents::new();
        events.enable([LegacyEventKind::Start]).unwrap();
        let pipeline = RecordingPipeline::new();
        events
            .freeze(
                &pipeline,
                MapRegistry::new(),
                ScriptedSink::new(),
                RecordingUrl::new(),
            )
            .unwrap();
        assert!(events.is_frozen());

        assert!(matches!(
            events.enable([LegacyEventKind::Error]),
            Err(Error::Frozen { operation: "enable" })
        ));
        assert!(matches!(
            events.disable([]),
            Err(Error::Frozen {
                operation: "disable"
            })
        ));
        assert!(events.is_enabled(LegacyEventKind::Start));
        assert!(!events.is_enabled(LegacyEventKind::Error));
    }

    #[test]
    fn freeze_is_one_time() {
        let events = StateEvents::new();
        events.enable([]).unwrap();
        let pipeline = RecordingPipeline::new();
        let registry = MapRegistry::new();
        let sink = ScriptedSink::new();
        let url = RecordingUrl::new();
        events
            .freeze(&pipeline, registry.clone(), sink.clone(), url.clone())
            .unwrap();
        assert!(events.freeze(&pipeline, registry, sink, url).is_err());

        assert_eq!(pipeline.before_hooks().len(), 1);
        assert_eq!(pipeline.invalid_hooks().len(), 1);
    }
}
