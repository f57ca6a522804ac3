pub mod core;

// Re-export commonly used types
pub use crate::core::circuit::{Circuit, CircuitBuilder};
pub use crate::core::errors::{CircuitError, SimulationError};
pub use crate::core::execution::{
    ConcurrencyMode, PressObserver, PressOutcome, PulseCounts, PulseSimulator, PulseTrace,
    SimulationConfig,
};
pub use crate::core::period_detector::{PeriodDetector, PeriodRecord, WatchedPeriod};
pub use crate::core::solver::{PulseTally, Report, Terminal};
pub use crate::core::types::{ModuleKind, ModuleName, Pulse, PulseEvent};
