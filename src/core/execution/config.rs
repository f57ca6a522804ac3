//! Configuration for pulse simulation runs
//!
//! This module provides the knobs shared by the simulator, the period
//! detector and the solver: how many presses to count, the ceilings that
//! turn a malformed circuit into an error instead of a hang, and whether
//! independent analyses may run on separate threads.

use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Analyses run one after the other on the calling thread
    Sequential,
    /// Independent analyses run concurrently through `rayon::join`
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Sequential
    }
}

/// Configuration for simulation execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Presses accumulated by the pulse count
    pub button_presses: u64,
    /// Generations a single press may take before it is declared non-terminating
    pub max_generations: usize,
    /// Presses the period search may take before giving up
    pub max_presses: u64,
    /// How the count and the period search are scheduled
    pub concurrency_mode: ConcurrencyMode,
}

impl SimulationConfig {
    pub const DEFAULT_BUTTON_PRESSES: u64 = 1000;
    pub const DEFAULT_MAX_GENERATIONS: usize = 10_000;
    pub const DEFAULT_MAX_PRESSES: u64 = 1_000_000;

    /// Create a new simulation configuration with default values
    pub fn new() -> Self {
        Self {
            button_presses: Self::DEFAULT_BUTTON_PRESSES,
            max_generations: Self::DEFAULT_MAX_GENERATIONS,
            max_presses: Self::DEFAULT_MAX_PRESSES,
            concurrency_mode: ConcurrencyMode::default(),
        }
    }

    /// Set the number of presses the pulse count covers
    ///
    /// # Arguments
    /// * `presses` - Presses accumulated before the low/high product is taken
    ///
    /// # Returns
    /// A new configuration with the specified press count
    pub fn with_button_presses(mut self, presses: u64) -> Self {
        self.button_presses = presses;
        self
    }

    /// Set the per-press generation ceiling
    ///
    /// # Arguments
    /// * `generations` - Depth a single press may reach before it fails as non-terminating
    ///
    /// # Returns
    /// A new configuration with the specified ceiling
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the press ceiling for the period search
    ///
    /// # Arguments
    /// * `presses` - Total presses allowed before the search reports unresolved modules
    ///
    /// # Returns
    /// A new configuration with the specified ceiling
    ///
    /// # Note
    /// This setting does not limit the pulse count, which uses `button_presses`
    pub fn with_max_presses(mut self, presses: u64) -> Self {
        self.max_presses = presses;
        self
    }

    /// Set the concurrency mode for the solver
    ///
    /// # Arguments
    /// * `mode` - The concurrency mode to use
    ///
    /// # Returns
    /// A new configuration with the specified concurrency mode
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.button_presses, 1000);
        assert_eq!(config.max_generations, 10_000);
        assert_eq!(config.max_presses, 1_000_000);
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Sequential);
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_button_presses(4)
            .with_max_generations(16)
            .with_max_presses(64)
            .with_concurrency(ConcurrencyMode::Rayon);

        assert_eq!(config.button_presses, 4);
        assert_eq!(config.max_generations, 16);
        assert_eq!(config.max_presses, 64);
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"button_presses": 10, "concurrency_mode": "Rayon"}"#).unwrap();

        assert_eq!(config.button_presses, 10);
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.max_generations, SimulationConfig::DEFAULT_MAX_GENERATIONS);
        assert_eq!(config.max_presses, SimulationConfig::DEFAULT_MAX_PRESSES);
    }
}
