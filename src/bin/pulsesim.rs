use clap::Parser;
use pulsesim::core::solver;
use pulsesim::{Circuit, ConcurrencyMode, SimulationConfig, Terminal};
use std::path::PathBuf;

/// Simulate a pulse circuit and report pulse counts and terminal alignment
#[derive(Debug, Parser)]
#[command(name = "pulsesim", version)]
struct Cli {
    /// File with one `name -> dest, dest` declaration per line
    input: PathBuf,

    /// Button presses to accumulate for the pulse count
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_BUTTON_PRESSES)]
    presses: u64,

    /// Conjunction whose inputs are watched for alignment
    #[arg(long, conflicts_with = "sink")]
    terminal: Option<String>,

    /// Sink whose feeding conjunction is watched when no terminal is given
    #[arg(long, default_value = "rx")]
    sink: String,

    /// Press ceiling for the alignment search
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_MAX_PRESSES)]
    max_presses: u64,

    /// Generation ceiling for a single press
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_MAX_GENERATIONS)]
    max_generations: usize,

    /// Run the count and the alignment search on separate threads
    #[arg(long)]
    parallel: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let input = std::fs::read_to_string(&cli.input)?;
    let circuit: Circuit = input.parse()?;

    let config = SimulationConfig::new()
        .with_button_presses(cli.presses)
        .with_max_presses(cli.max_presses)
        .with_max_generations(cli.max_generations)
        .with_concurrency(if cli.parallel {
            ConcurrencyMode::Rayon
        } else {
            ConcurrencyMode::Sequential
        });

    let terminal = match cli.terminal {
        Some(name) => Some(Terminal::Conjunction(name)),
        None if circuit.references(&cli.sink) => Some(Terminal::Sink(cli.sink)),
        None => {
            log::warn!("Circuit never sends to '{}'; skipping alignment search", cli.sink);
            None
        }
    };

    let report = solver::solve(&circuit, terminal.as_ref(), &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.tally {
            Ok(tally) => println!("Part 1: {}", tally.pulse_product),
            Err(_) => println!("Part 1: n/a"),
        }
        match &report.alignment {
            Some(Ok(alignment)) => println!("Part 2: {}", alignment.first_press),
            _ => println!("Part 2: n/a"),
        }
    }

    match report.first_error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}
