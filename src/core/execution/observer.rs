use super::simulator::PressOutcome;
use crate::core::types::{ModuleKind, Pulse, PulseEvent};

/// Observer trait for pulse propagation
///
/// Observers see every dispatch as it happens but never touch simulator
/// state. Both hooks default to doing nothing.
pub trait PressObserver {
    /// Called after `event` has been delivered to its target
    ///
    /// `emitted` is the pulse the target sends to all of its destinations,
    /// or `None` if it stayed silent.
    fn on_dispatch(&mut self, _press: u64, _event: &PulseEvent, _kind: ModuleKind, _emitted: Option<Pulse>) {}

    /// Called when a press has drained
    fn on_press_complete(&mut self, _outcome: &PressOutcome) {}
}

/// No-op observer used by plain presses
impl PressObserver for () {}

/// One dispatch as seen by [`PulseTrace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedDispatch {
    pub press: u64,
    pub event: PulseEvent,
    pub kind: ModuleKind,
    pub emitted: Option<Pulse>,
}

/// Records every dispatch in order
#[derive(Debug, Clone, Default)]
pub struct PulseTrace {
    dispatches: Vec<TracedDispatch>,
}

impl PulseTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded dispatches in delivery order
    pub fn dispatches(&self) -> &[TracedDispatch] {
        &self.dispatches
    }

    /// Dispatches that happened during one press
    pub fn for_press(&self, press: u64) -> impl Iterator<Item = &TracedDispatch> {
        self.dispatches.iter().filter(move |d| d.press == press)
    }

    /// Pulses a module emitted, in order
    pub fn emitted_by(&self, module: &str) -> Vec<Pulse> {
        self.dispatches
            .iter()
            .filter(|d| d.event.target == module)
            .filter_map(|d| d.emitted)
            .collect()
    }

    /// Pulses a module received, in order
    pub fn received_by(&self, module: &str) -> Vec<Pulse> {
        self.dispatches
            .iter()
            .filter(|d| d.event.target == module)
            .map(|d| d.event.pulse)
            .collect()
    }

    pub fn clear(&mut self) {
        self.dispatches.clear();
    }
}

impl PressObserver for PulseTrace {
    fn on_dispatch(&mut self, press: u64, event: &PulseEvent, kind: ModuleKind, emitted: Option<Pulse>) {
        self.dispatches.push(TracedDispatch {
            press,
            event: event.clone(),
            kind,
            emitted,
        });
    }
}
