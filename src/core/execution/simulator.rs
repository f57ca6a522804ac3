use super::config::SimulationConfig;
use super::dispatch::dispatch;
use super::observer::PressObserver;
use crate::core::circuit::Circuit;
use crate::core::errors::SimulationError;
use crate::core::state::CircuitState;
use crate::core::types::{Pulse, PulseEvent};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Running totals of pulses sent, by level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseCounts {
    pub low: u64,
    pub high: u64,
}

impl PulseCounts {
    pub fn record(&mut self, pulse: Pulse) {
        match pulse {
            Pulse::Low => self.low += 1,
            Pulse::High => self.high += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.low + self.high
    }

    /// Low count times high count
    ///
    /// # Returns
    /// `None` when the product does not fit in a `u64`
    pub fn product(&self) -> Option<u64> {
        self.low.checked_mul(self.high)
    }
}

impl AddAssign for PulseCounts {
    fn add_assign(&mut self, other: Self) {
        self.low += other.low;
        self.high += other.high;
    }
}

/// Result of a single button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressOutcome {
    /// 1-based index of this press
    pub press: u64,
    /// Pulses sent during the press, including the one from the button
    pub pulses: PulseCounts,
    /// Propagation depth reached before the press drained
    pub generations: usize,
}

/// Breadth-first pulse propagation over a borrowed circuit
///
/// Each press injects a low pulse at the broadcaster and processes pulses
/// one generation at a time: every pulse at depth k is delivered, with its
/// memory writes, before any pulse at depth k + 1.
pub struct PulseSimulator<'c> {
    circuit: &'c Circuit,
    state: CircuitState,
    presses: u64,
    max_generations: usize,
}

impl<'c> PulseSimulator<'c> {
    /// Create a simulator with default limits
    pub fn new(circuit: &'c Circuit) -> Self {
        Self::with_config(circuit, &SimulationConfig::default())
    }

    /// Create a simulator using the limits in `config`
    ///
    /// # Arguments
    /// * `circuit` - The circuit to press; shared, never modified
    /// * `config` - Source of the per-press generation ceiling
    ///
    /// # Returns
    /// A simulator in the circuit's initial state with no presses made
    pub fn with_config(circuit: &'c Circuit, config: &SimulationConfig) -> Self {
        Self {
            circuit,
            state: circuit.initial_state(),
            presses: 0,
            max_generations: config.max_generations,
        }
    }

    /// Press the button once
    pub fn press(&mut self) -> Result<PressOutcome, SimulationError> {
        self.press_observed(&mut ())
    }

    /// Press the button once, reporting every dispatch to `observer`
    ///
    /// On `NonTerminating` the press counter has already advanced and the
    /// state holds whatever the partial propagation left behind.
    pub fn press_observed(
        &mut self,
        observer: &mut dyn PressObserver,
    ) -> Result<PressOutcome, SimulationError> {
        self.presses += 1;
        let press = self.presses;

        let mut pulses = PulseCounts::default();
        let mut current = vec![PulseEvent::button_press()];
        pulses.record(Pulse::Low);

        let mut generations = 0;
        while !current.is_empty() {
            if generations >= self.max_generations {
                return Err(SimulationError::NonTerminating { press, generations });
            }
            generations += 1;

            let mut next = Vec::new();
            for event in &current {
                let kind = self.circuit.kind(&event.target);
                let emitted = dispatch(kind, &mut self.state, event);
                observer.on_dispatch(press, event, kind, emitted);

                if let Some(pulse) = emitted {
                    for dest in self.circuit.destinations(&event.target) {
                        pulses.record(pulse);
                        next.push(PulseEvent::new(event.target.as_str(), pulse, dest.as_str()));
                    }
                }
            }

            debug!(
                "Press {} generation {}: {} pulses delivered, {} queued",
                press,
                generations,
                current.len(),
                next.len()
            );
            current = next;
        }

        let outcome = PressOutcome {
            press,
            pulses,
            generations,
        };
        observer.on_press_complete(&outcome);
        debug!(
            "=== Press {} done: {} low, {} high ===",
            press, pulses.low, pulses.high
        );

        Ok(outcome)
    }

    /// Press the button `presses` times and total the pulses sent
    ///
    /// # Arguments
    /// * `presses` - Number of presses to make, continuing from the current state
    ///
    /// # Returns
    /// Low and high pulses summed over all presses, or the first press error
    pub fn count_pulses(&mut self, presses: u64) -> Result<PulseCounts, SimulationError> {
        let mut total = PulseCounts::default();
        for _ in 0..presses {
            total += self.press()?.pulses;
        }
        Ok(total)
    }

    /// Number of presses made so far
    pub fn presses(&self) -> u64 {
        self.presses
    }

    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    pub fn circuit(&self) -> &'c Circuit {
        self.circuit
    }
}
