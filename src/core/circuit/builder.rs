use super::declaration::Declaration;
use super::graph::Circuit;
use crate::core::errors::CircuitError;
use crate::core::types::ModuleKind;
use log::{info, warn};
use std::collections::HashMap;

/// Collects declarations and resolves them into a [`Circuit`]
///
/// Building is two passes: the first records every module, its kind and
/// its destinations; the second walks every edge again so conjunctions
/// learn about sources declared after them.
#[derive(Debug, Clone, Default)]
pub struct CircuitBuilder {
    declarations: Vec<Declaration>,
}

impl CircuitBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole declaration list, one module per line
    ///
    /// Blank lines are skipped but still count towards line numbers.
    pub fn parse_str(input: &str) -> Result<Self, CircuitError> {
        Self::parse_lines(input.lines())
    }

    /// Parse declarations from an iterator of lines
    pub fn parse_lines<I, S>(lines: I) -> Result<Self, CircuitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            builder.add(Declaration::parse(line, index + 1)?);
        }
        Ok(builder)
    }

    /// Parse and append a single declaration line
    pub fn declare(&mut self, line: &str) -> Result<&mut Self, CircuitError> {
        let line_number = self.declarations.last().map_or(1, |decl| decl.line + 1);
        let declaration = Declaration::parse(line.trim(), line_number)?;
        Ok(self.add(declaration))
    }

    /// Append an already parsed declaration
    pub fn add(&mut self, declaration: Declaration) -> &mut Self {
        self.declarations.push(declaration);
        self
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Resolve the declarations into an immutable circuit
    pub fn build(&self) -> Result<Circuit, CircuitError> {
        let mut order = Vec::with_capacity(self.declarations.len());
        let mut kinds = HashMap::new();
        let mut destinations = HashMap::new();
        let mut conjunction_inputs: HashMap<String, Vec<String>> = HashMap::new();

        // First pass: modules, kinds and edges
        for decl in &self.declarations {
            if kinds.insert(decl.name.clone(), decl.kind).is_some() {
                return Err(CircuitError::DuplicateModule {
                    line: decl.line,
                    name: decl.name.clone(),
                });
            }
            if decl.kind == ModuleKind::Conjunction {
                conjunction_inputs.insert(decl.name.clone(), Vec::new());
            }
            order.push(decl.name.clone());
            destinations.insert(decl.name.clone(), decl.destinations.clone());
        }

        // Second pass: register inbound sources now that every kind is known
        for decl in &self.declarations {
            for dest in &decl.destinations {
                if let Some(inputs) = conjunction_inputs.get_mut(dest) {
                    if !inputs.contains(&decl.name) {
                        inputs.push(decl.name.clone());
                    }
                }
            }
        }

        let circuit = Circuit {
            order,
            kinds,
            destinations,
            conjunction_inputs,
        };

        if !circuit.has_broadcaster() {
            warn!("Circuit has no broadcaster; button presses will reach nothing");
        }
        info!(
            "Built circuit: {} flip-flops, {} conjunctions, {} sinks",
            circuit.modules_of_kind(ModuleKind::FlipFlop).count(),
            circuit.modules_of_kind(ModuleKind::Conjunction).count(),
            circuit.sinks().len()
        );

        Ok(circuit)
    }
}
