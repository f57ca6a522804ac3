use crate::core::circuit::Circuit;
use crate::core::types::{ModuleKind, ModuleName, Pulse};
use std::collections::HashMap;

/// Mutable memory of every stateful module in a circuit
///
/// Owned by exactly one simulator; the circuit graph itself never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitState {
    /// Flip-flop -> on
    flip_flops: HashMap<ModuleName, bool>,
    /// Conjunction -> inbound source -> last pulse received from it
    conjunctions: HashMap<ModuleName, HashMap<ModuleName, Pulse>>,
}

impl CircuitState {
    /// Initial state: all flip-flops off, all conjunction inputs low
    pub fn new(circuit: &Circuit) -> Self {
        let flip_flops = circuit
            .modules_of_kind(ModuleKind::FlipFlop)
            .map(|name| (name.to_string(), false))
            .collect();

        let conjunctions = circuit
            .modules_of_kind(ModuleKind::Conjunction)
            .map(|name| {
                let memory = circuit
                    .conjunction_inputs(name)
                    .iter()
                    .map(|source| (source.clone(), Pulse::Low))
                    .collect();
                (name.to_string(), memory)
            })
            .collect();

        Self {
            flip_flops,
            conjunctions,
        }
    }

    /// Whether a flip-flop is on; `None` if the name is not a flip-flop
    pub fn is_on(&self, flip_flop: &str) -> Option<bool> {
        self.flip_flops.get(flip_flop).copied()
    }

    /// Flip a flip-flop and return its new state
    pub fn toggle(&mut self, flip_flop: &str) -> Option<bool> {
        let on = self.flip_flops.get_mut(flip_flop)?;
        *on = !*on;
        Some(*on)
    }

    /// Last pulse a conjunction received from one of its inputs
    pub fn remembered(&self, conjunction: &str, source: &str) -> Option<Pulse> {
        self.conjunctions.get(conjunction)?.get(source).copied()
    }

    /// Store a pulse in a conjunction's memory and return the new memory
    pub fn remember(
        &mut self,
        conjunction: &str,
        source: &str,
        pulse: Pulse,
    ) -> Option<&HashMap<ModuleName, Pulse>> {
        let memory = self.conjunctions.get_mut(conjunction)?;
        if let Some(slot) = memory.get_mut(source) {
            *slot = pulse;
        } else {
            memory.insert(source.to_string(), pulse);
        }
        Some(&*memory)
    }

    /// Full memory of one conjunction
    pub fn conjunction_memory(&self, conjunction: &str) -> Option<&HashMap<ModuleName, Pulse>> {
        self.conjunctions.get(conjunction)
    }

    /// Number of flip-flops currently on
    pub fn flip_flops_on(&self) -> usize {
        self.flip_flops.values().filter(|on| **on).count()
    }

    /// True when every flip-flop is off and every remembered input is low
    pub fn is_initial(&self) -> bool {
        self.flip_flops.values().all(|on| !on)
            && self
                .conjunctions
                .values()
                .flat_map(HashMap::values)
                .all(|pulse| *pulse == Pulse::Low)
    }
}
