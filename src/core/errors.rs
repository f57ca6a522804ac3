use super::types::ModuleName;
use serde::Serialize;

/// Errors raised while building a circuit or selecting modules in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CircuitError {
    /// Declaration has no ` -> ` separator
    MissingArrow { line: usize },
    /// Declaration has nothing after the arrow
    EmptyDestinations { line: usize },
    /// A destination between two commas is blank
    EmptyDestination { line: usize },
    /// Module name is blank once its prefix is removed
    EmptyName { line: usize },
    /// Undecorated module name that is not the broadcaster
    UnknownModuleType { line: usize, name: String },
    /// Same canonical name declared on two lines
    DuplicateModule { line: usize, name: ModuleName },
    /// Named module is not part of the circuit
    UnknownTerminal(ModuleName),
    /// Named module exists but is not a conjunction
    NotAConjunction(ModuleName),
    /// Terminal has no inbound modules to watch
    NoWatchedModules(ModuleName),
}

impl std::fmt::Display for CircuitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitError::MissingArrow { line } => {
                write!(f, "Line {}: missing '->' between module and destinations", line)
            }
            CircuitError::EmptyDestinations { line } => {
                write!(f, "Line {}: empty destination list", line)
            }
            CircuitError::EmptyDestination { line } => {
                write!(f, "Line {}: blank destination name", line)
            }
            CircuitError::EmptyName { line } => write!(f, "Line {}: blank module name", line),
            CircuitError::UnknownModuleType { line, name } => {
                write!(f, "Line {}: module '{}' has no type prefix", line, name)
            }
            CircuitError::DuplicateModule { line, name } => {
                write!(f, "Line {}: module '{}' is already declared", line, name)
            }
            CircuitError::UnknownTerminal(name) => write!(f, "Module '{}' not found", name),
            CircuitError::NotAConjunction(name) => {
                write!(f, "Module '{}' is not a conjunction", name)
            }
            CircuitError::NoWatchedModules(name) => {
                write!(f, "Module '{}' has no inbound modules to watch", name)
            }
        }
    }
}

impl std::error::Error for CircuitError {}

/// Errors raised while pressing the button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimulationError {
    /// A single press did not drain within the generation ceiling
    NonTerminating { press: u64, generations: usize },
    /// Watched modules never repeated within the press ceiling
    PeriodNotFound {
        presses: u64,
        unresolved: Vec<ModuleName>,
    },
    /// Pulse product or least common multiple does not fit in 64 bits
    Overflow,
    /// Circuit could not be used for the requested analysis
    Circuit(CircuitError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::NonTerminating { press, generations } => write!(
                f,
                "Non-terminating circuit: press {} still active after {} generations",
                press, generations
            ),
            SimulationError::PeriodNotFound { presses, unresolved } => write!(
                f,
                "Unsatisfied periodicity precondition: no period for {} after {} presses",
                unresolved.join(", "),
                presses
            ),
            SimulationError::Overflow => write!(f, "Result overflows 64 bits"),
            SimulationError::Circuit(err) => write!(f, "Circuit error: {}", err),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Circuit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CircuitError> for SimulationError {
    fn from(err: CircuitError) -> Self {
        SimulationError::Circuit(err)
    }
}
