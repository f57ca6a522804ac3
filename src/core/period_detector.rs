//! Press-period detection for the modules feeding a terminal conjunction.
//!
//! A terminal conjunction emits low only on a press where every one of its
//! inputs is high. Simulating up to that press directly is infeasible for
//! real circuits, so each input ("watched module") is observed instead:
//! the press on which it first goes high and the press on which it goes
//! high again give its period, and the least common multiple of all
//! periods is the answer.
//!
//! Two preconditions are assumed and not checked: every watched module is
//! driven by a self-resetting counter, and its first activation lines up
//! with its period.

use crate::core::circuit::Circuit;
use crate::core::errors::{CircuitError, SimulationError};
use crate::core::execution::{PressObserver, PulseSimulator};
use crate::core::math::lcm_all;
use crate::core::types::{ModuleKind, ModuleName, Pulse, PulseEvent};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// First activation and period of one watched module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    first_seen: Option<u64>,
    period: Option<u64>,
}

impl PeriodRecord {
    /// Record an activation on `press`, returns true if this finalized the period
    ///
    /// A repeat on the same press as the first sighting is not a period.
    pub fn observe(&mut self, press: u64) -> bool {
        match (self.first_seen, self.period) {
            (None, _) => {
                self.first_seen = Some(press);
                false
            }
            (Some(first), None) if press > first => {
                self.period = Some(press - first);
                true
            }
            _ => false,
        }
    }

    pub fn first_seen(&self) -> Option<u64> {
        self.first_seen
    }

    pub fn period(&self) -> Option<u64> {
        self.period
    }

    pub fn is_final(&self) -> bool {
        self.period.is_some()
    }
}

/// A finalized period, in watched order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedPeriod {
    pub module: ModuleName,
    pub first_seen: u64,
    pub period: u64,
}

/// Observes a simulator and finds when all watched modules align
#[derive(Debug, Clone)]
pub struct PeriodDetector {
    /// Terminal name, or a description of an explicit watch list
    label: ModuleName,
    watched: Vec<ModuleName>,
    records: HashMap<ModuleName, PeriodRecord>,
}

impl PeriodDetector {
    /// Watch an explicit set of modules
    pub fn with_watched<I, S>(watched: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ModuleName>,
    {
        let mut order: Vec<ModuleName> = Vec::new();
        for name in watched {
            let name = name.into();
            if !order.contains(&name) {
                order.push(name);
            }
        }
        let label = format!("[{}]", order.join(", "));
        Self::from_parts(label, order)
    }

    /// Watch every inbound module of a terminal conjunction
    pub fn for_terminal(circuit: &Circuit, terminal: &str) -> Result<Self, CircuitError> {
        if !circuit.references(terminal) {
            return Err(CircuitError::UnknownTerminal(terminal.to_string()));
        }
        if circuit.kind(terminal) != ModuleKind::Conjunction {
            return Err(CircuitError::NotAConjunction(terminal.to_string()));
        }

        let watched = circuit.conjunction_inputs(terminal).to_vec();
        if watched.is_empty() {
            return Err(CircuitError::NoWatchedModules(terminal.to_string()));
        }

        info!("Watching {} inputs of '{}': {}", watched.len(), terminal, watched.join(", "));
        Ok(Self::from_parts(terminal.to_string(), watched))
    }

    /// Watch the inputs of the conjunction that feeds a sink such as `rx`
    ///
    /// The first feeder in declaration order is taken as the terminal.
    pub fn for_sink(circuit: &Circuit, sink: &str) -> Result<Self, CircuitError> {
        let feeder = circuit
            .predecessors(sink)
            .first()
            .copied()
            .ok_or_else(|| CircuitError::UnknownTerminal(sink.to_string()))?;
        Self::for_terminal(circuit, feeder)
    }

    fn from_parts(label: ModuleName, watched: Vec<ModuleName>) -> Self {
        let records = watched
            .iter()
            .map(|name| (name.clone(), PeriodRecord::default()))
            .collect();
        Self {
            label,
            watched,
            records,
        }
    }

    /// Terminal conjunction name, or the explicit watch list
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn watched(&self) -> &[ModuleName] {
        &self.watched
    }

    pub fn record(&self, module: &str) -> Option<&PeriodRecord> {
        self.records.get(module)
    }

    /// Record an activation of a watched module; other names are ignored
    pub fn observe(&mut self, module: &str, press: u64) {
        if let Some(record) = self.records.get_mut(module) {
            if record.observe(press) {
                info!(
                    "Module '{}' repeats every {} presses (first at {})",
                    module,
                    record.period.unwrap_or_default(),
                    record.first_seen.unwrap_or_default()
                );
            } else {
                debug!("Module '{}' activated on press {}", module, press);
            }
        }
    }

    /// True once every watched module has a period
    pub fn is_complete(&self) -> bool {
        self.records.values().all(PeriodRecord::is_final)
    }

    /// Watched modules still without a period, in watched order
    pub fn unresolved(&self) -> Vec<ModuleName> {
        self.watched
            .iter()
            .filter(|name| !self.records.get(*name).is_some_and(PeriodRecord::is_final))
            .cloned()
            .collect()
    }

    /// Finalized periods in watched order
    pub fn periods(&self) -> Vec<WatchedPeriod> {
        self.watched
            .iter()
            .filter_map(|name| {
                let record = self.records.get(name)?;
                Some(WatchedPeriod {
                    module: name.clone(),
                    first_seen: record.first_seen?,
                    period: record.period?,
                })
            })
            .collect()
    }

    /// Least common multiple of all periods found so far
    pub fn combined_period(&self) -> Result<u64, SimulationError> {
        lcm_all(self.periods().iter().map(|p| p.period)).ok_or(SimulationError::Overflow)
    }

    /// Press until every watched module has a period, then combine them
    ///
    /// # Arguments
    /// * `simulator` - Simulator to press; its state carries over between calls
    /// * `max_presses` - Bound on the simulator's total press count, including
    ///   any presses made before this call
    ///
    /// # Returns
    /// The least common multiple of all periods, `PeriodNotFound` naming the
    /// unresolved modules when the bound is reached, or the first press error
    pub fn run(
        &mut self,
        simulator: &mut PulseSimulator<'_>,
        max_presses: u64,
    ) -> Result<u64, SimulationError> {
        if self.watched.is_empty() {
            return Err(CircuitError::NoWatchedModules(self.label.clone()).into());
        }

        while !self.is_complete() {
            if simulator.presses() >= max_presses {
                return Err(SimulationError::PeriodNotFound {
                    presses: simulator.presses(),
                    unresolved: self.unresolved(),
                });
            }
            simulator.press_observed(&mut *self)?;
        }

        let combined = self.combined_period()?;
        info!(
            "All {} inputs of {} align after {} presses",
            self.watched.len(),
            self.label,
            combined
        );
        Ok(combined)
    }
}

impl PressObserver for PeriodDetector {
    /// A watched module is active when it sends high: a flip-flop turning
    /// on, or a conjunction whose own inputs are not all high.
    fn on_dispatch(&mut self, press: u64, event: &PulseEvent, kind: ModuleKind, emitted: Option<Pulse>) {
        let stateful = matches!(kind, ModuleKind::FlipFlop | ModuleKind::Conjunction);
        if stateful && emitted == Some(Pulse::High) {
            self.observe(&event.target, press);
        }
    }
}
