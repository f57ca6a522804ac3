use super::builder::CircuitBuilder;
use crate::core::errors::CircuitError;
use crate::core::state::CircuitState;
use crate::core::types::{ModuleKind, ModuleName, BROADCASTER};
use std::collections::HashMap;
use std::str::FromStr;

/// Immutable module graph produced by [`CircuitBuilder`]
///
/// Names that only ever appear as destinations are not stored; lookups
/// for them resolve to [`ModuleKind::Sink`] with no destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    /// Declared module names in declaration order
    pub(crate) order: Vec<ModuleName>,
    pub(crate) kinds: HashMap<ModuleName, ModuleKind>,
    /// Module -> ordered destinations
    pub(crate) destinations: HashMap<ModuleName, Vec<ModuleName>>,
    /// Conjunction -> inbound sources in discovery order
    pub(crate) conjunction_inputs: HashMap<ModuleName, Vec<ModuleName>>,
}

impl Circuit {
    /// Kind of a module; undeclared names are sinks
    pub fn kind(&self, name: &str) -> ModuleKind {
        self.kinds.get(name).copied().unwrap_or(ModuleKind::Sink)
    }

    /// Ordered destinations of a module; empty for sinks
    pub fn destinations(&self, name: &str) -> &[ModuleName] {
        self.destinations
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Inbound sources registered for a conjunction
    pub fn conjunction_inputs(&self, name: &str) -> &[ModuleName] {
        self.conjunction_inputs
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every declared module that sends to `name`, in declaration order
    pub fn predecessors(&self, name: &str) -> Vec<&str> {
        self.order
            .iter()
            .filter(|source| self.destinations(source).iter().any(|dest| dest == name))
            .map(String::as_str)
            .collect()
    }

    /// Declared module names in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Declared modules of one kind, in declaration order
    pub fn modules_of_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &str> {
        self.modules().filter(move |name| self.kind(name) == kind)
    }

    /// Destination names with no declaration of their own, sorted
    pub fn sinks(&self) -> Vec<&str> {
        let mut sinks: Vec<&str> = self
            .destinations
            .values()
            .flatten()
            .map(String::as_str)
            .filter(|dest| !self.is_declared(dest))
            .collect();
        sinks.sort_unstable();
        sinks.dedup();
        sinks
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// True if the module is declared or used as a destination
    pub fn references(&self, name: &str) -> bool {
        self.is_declared(name) || self.destinations.values().flatten().any(|dest| dest == name)
    }

    pub fn has_broadcaster(&self) -> bool {
        self.kind(BROADCASTER) == ModuleKind::Broadcaster
    }

    /// Number of declared modules
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fresh state tables: every flip-flop off, every conjunction input low
    pub fn initial_state(&self) -> CircuitState {
        CircuitState::new(self)
    }
}

impl FromStr for Circuit {
    type Err = CircuitError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        CircuitBuilder::parse_str(input)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output\n";

    #[test]
    fn test_lookup_of_declared_and_sink_modules() {
        let circuit: Circuit = SAMPLE.parse().unwrap();

        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.kind("a"), ModuleKind::FlipFlop);
        assert_eq!(circuit.kind("con"), ModuleKind::Conjunction);
        assert_eq!(circuit.kind("output"), ModuleKind::Sink);
        assert_eq!(circuit.kind("nowhere"), ModuleKind::Sink);
        assert!(circuit.destinations("output").is_empty());
        assert_eq!(circuit.destinations("a"), ["inv", "con"]);
        assert_eq!(circuit.sinks(), vec!["output"]);
        assert!(circuit.references("output"));
        assert!(!circuit.references("nowhere"));
        assert!(circuit.has_broadcaster());
    }

    #[test]
    fn test_predecessors_follow_declaration_order() {
        let circuit: Circuit = SAMPLE.parse().unwrap();
        assert_eq!(circuit.predecessors("con"), vec!["a", "b"]);
        assert_eq!(circuit.predecessors("output"), vec!["con"]);
        assert!(circuit.predecessors("broadcaster").is_empty());
    }

    #[test]
    fn test_modules_of_kind() {
        let circuit: Circuit = SAMPLE.parse().unwrap();
        let flip_flops: Vec<&str> = circuit.modules_of_kind(ModuleKind::FlipFlop).collect();
        let conjunctions: Vec<&str> = circuit.modules_of_kind(ModuleKind::Conjunction).collect();
        assert_eq!(flip_flops, vec!["a", "b"]);
        assert_eq!(conjunctions, vec!["inv", "con"]);
    }
}
