pub mod config;
pub mod dispatch;
pub mod observer;
pub mod simulator;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use dispatch::dispatch;
pub use observer::{PressObserver, PulseTrace, TracedDispatch};
pub use simulator::{PressOutcome, PulseCounts, PulseSimulator};
