use crate::core::circuit::Circuit;
use crate::core::errors::SimulationError;
use crate::core::execution::{ConcurrencyMode, PulseCounts, PulseSimulator, SimulationConfig};
use crate::core::period_detector::{PeriodDetector, WatchedPeriod};
use crate::core::types::ModuleName;
use log::{error, info};
use serde::Serialize;

/// Which conjunction's alignment the period search targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Terminal {
    /// A conjunction named directly
    Conjunction(ModuleName),
    /// The conjunction feeding this sink
    Sink(ModuleName),
}

impl Terminal {
    /// Build the detector watching this terminal's inputs
    pub fn detector(&self, circuit: &Circuit) -> Result<PeriodDetector, SimulationError> {
        let detector = match self {
            Terminal::Conjunction(name) => PeriodDetector::for_terminal(circuit, name)?,
            Terminal::Sink(name) => PeriodDetector::for_sink(circuit, name)?,
        };
        Ok(detector)
    }
}

/// Outcome of the terminal alignment search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalAlignment {
    /// Conjunction whose inputs were watched
    pub terminal: ModuleName,
    /// First press on which every watched input is high
    pub first_press: u64,
    pub periods: Vec<WatchedPeriod>,
}

/// Pulse totals of the counting run and their product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PulseTally {
    pub pulses: PulseCounts,
    /// Low pulses times high pulses
    pub pulse_product: u64,
}

impl TryFrom<PulseCounts> for PulseTally {
    type Error = SimulationError;

    fn try_from(pulses: PulseCounts) -> Result<Self, Self::Error> {
        let pulse_product = pulses.product().ok_or(SimulationError::Overflow)?;
        Ok(Self {
            pulses,
            pulse_product,
        })
    }
}

/// Both answers for one circuit
///
/// The count and the alignment search run on separate simulators, so each
/// carries its own outcome: a failure in one leaves the other intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub tally: Result<PulseTally, SimulationError>,
    /// `None` when no terminal was requested
    pub alignment: Option<Result<TerminalAlignment, SimulationError>>,
    pub config: SimulationConfig,
}

impl Report {
    /// First failed analysis, count before alignment
    pub fn first_error(&self) -> Option<&SimulationError> {
        self.tally
            .as_ref()
            .err()
            .or_else(|| self.alignment.as_ref()?.as_ref().err())
    }
}

/// Press `config.button_presses` times on a fresh simulator and total the pulses
pub fn count_pulses(circuit: &Circuit, config: &SimulationConfig) -> Result<PulseTally, SimulationError> {
    let mut simulator = PulseSimulator::with_config(circuit, config);
    let counts = simulator.count_pulses(config.button_presses)?;
    info!(
        "{} presses sent {} low and {} high pulses",
        config.button_presses, counts.low, counts.high
    );
    PulseTally::try_from(counts)
}

/// Find the first press on which `terminal` sees all of its inputs high
pub fn find_alignment(
    circuit: &Circuit,
    terminal: &Terminal,
    config: &SimulationConfig,
) -> Result<TerminalAlignment, SimulationError> {
    let mut detector = terminal.detector(circuit)?;
    let mut simulator = PulseSimulator::with_config(circuit, config);
    let first_press = detector.run(&mut simulator, config.max_presses)?;

    Ok(TerminalAlignment {
        terminal: detector.label().to_string(),
        first_press,
        periods: detector.periods(),
    })
}

/// Run the pulse count and, if a terminal is given, the alignment search
///
/// The two analyses use separate simulators over the same circuit; with
/// [`ConcurrencyMode::Rayon`] they run side by side. Failures are logged
/// and kept in the report next to whatever succeeded.
pub fn solve(circuit: &Circuit, terminal: Option<&Terminal>, config: &SimulationConfig) -> Report {
    let alignment = || terminal.map(|t| find_alignment(circuit, t, config));

    let (tally, alignment) = match config.concurrency_mode {
        ConcurrencyMode::Sequential => (count_pulses(circuit, config), alignment()),
        ConcurrencyMode::Rayon => rayon::join(|| count_pulses(circuit, config), alignment),
    };

    if let Err(err) = &tally {
        error!("Pulse count failed: {}", err);
    }
    if let Some(Err(err)) = &alignment {
        error!("Alignment search failed: {}", err);
    }

    Report {
        tally,
        alignment,
        config: config.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER: &str = "broadcaster -> a\n%a -> b\n%b -> c, hub\n%c -> hub\n&hub -> rx";

    #[test]
    fn test_solve_sequential_and_parallel_agree() {
        let circuit: Circuit = COUNTER.parse().unwrap();
        let terminal = Terminal::Sink("rx".to_string());

        let sequential = solve(&circuit, Some(&terminal), &SimulationConfig::default());
        let parallel = solve(
            &circuit,
            Some(&terminal),
            &SimulationConfig::default().with_concurrency(ConcurrencyMode::Rayon),
        );

        assert_eq!(sequential.tally, parallel.tally);
        assert_eq!(sequential.alignment, parallel.alignment);
        assert!(sequential.first_error().is_none());

        let tally = sequential.tally.unwrap();
        assert_eq!(Some(tally.pulse_product), tally.pulses.product());
    }

    #[test]
    fn test_solve_without_terminal_skips_alignment() {
        let circuit: Circuit = COUNTER.parse().unwrap();
        let config = SimulationConfig::default().with_button_presses(1);
        let report = solve(&circuit, None, &config);

        assert!(report.alignment.is_none());
        assert!(report.tally.is_ok());
        assert_eq!(report.config.button_presses, 1);
    }

    #[test]
    fn test_tally_rejects_overflowing_product() {
        let huge = PulseCounts {
            low: 5_000_000_000,
            high: 4_000_000_000,
        };
        assert_eq!(PulseTally::try_from(huge), Err(SimulationError::Overflow));

        let small = PulseCounts { low: 4, high: 3 };
        assert_eq!(
            PulseTally::try_from(small),
            Ok(PulseTally {
                pulses: small,
                pulse_product: 12
            })
        );
    }

    #[test]
    fn test_failed_alignment_keeps_count() {
        let circuit: Circuit = COUNTER.parse().unwrap();
        let config = SimulationConfig::default()
            .with_max_presses(5)
            .with_concurrency(ConcurrencyMode::Rayon);

        let report = solve(&circuit, Some(&Terminal::Conjunction("hub".to_string())), &config);

        assert_eq!(report.tally, count_pulses(&circuit, &config));
        assert!(report.tally.is_ok());
        assert_eq!(
            report.alignment,
            Some(Err(SimulationError::PeriodNotFound {
                presses: 5,
                unresolved: vec!["b".to_string(), "c".to_string()],
            }))
        );
        assert_eq!(report.first_error(), report.alignment.as_ref().and_then(|a| a.as_ref().err()));
    }

    #[test]
    fn test_report_serializes() {
        let circuit: Circuit = COUNTER.parse().unwrap();
        let report = solve(
            &circuit,
            Some(&Terminal::Conjunction("hub".to_string())),
            &SimulationConfig::default(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["alignment"]["Ok"]["terminal"], "hub");
        assert_eq!(
            json["tally"]["Ok"]["pulse_product"],
            report.tally.as_ref().unwrap().pulse_product
        );
    }
}
