//! MIPS pipeline simulator CLI.
//!
//! This binary provides the entry points for the simulator. It performs:
//! 1. **Run:** Load an assembly program, simulate it cycle by cycle and print the
//!    bit-exact per-cycle reports to stdout.
//! 2. **Predict:** Replay a branch trace through one of the branch predictors and
//!    report its accuracy.
//!
//! Logs go to stderr through `tracing`; set `RUST_LOG` or pass `--trace`.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mipsim_core::common::ExitCode;
use mipsim_core::config::{self, Config};
use mipsim_core::core::units::bru::BranchPredictorWrapper;
use mipsim_core::sim::trace::{parse_trace, replay};
use mipsim_core::sim::{Outcome, Simulator, load_program};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Cycle-stepped five-stage MIPS pipeline simulator",
    long_about = "Simulate a MIPS assembly program on a five-stage pipeline with operand forwarding.\n\nEach cycle prints the 32 registers and the memory words changed that cycle.\n\nExamples:\n  sim run program.asm\n  sim run program.asm --policy predict --predictor combined --stats\n  sim predict branches.trace --predictor history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate an assembly program.
    Run {
        /// Assembly source file.
        file: PathBuf,

        /// JSON configuration file; flags below override it.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Control-hazard policy.
        #[arg(long, value_enum)]
        policy: Option<Policy>,

        /// Branch predictor used by the predict policy.
        #[arg(long, value_enum)]
        predictor: Option<Predictor>,

        /// Initial value of every predictor counter (0..=3).
        #[arg(long)]
        initial: Option<u8>,

        /// Combined predictor table size (1..=65536).
        #[arg(long)]
        table_size: Option<usize>,

        /// Stop after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log every stage of every cycle to stderr.
        #[arg(long)]
        trace: bool,

        /// Print run statistics to stderr at the end.
        #[arg(long)]
        stats: bool,
    },

    /// Replay a branch trace (`<hex pc> <0|1>` per line) through a predictor.
    Predict {
        /// Branch trace file.
        trace: PathBuf,

        /// Predictor to evaluate.
        #[arg(long, value_enum, default_value = "saturating")]
        predictor: Predictor,

        /// Initial counter value (0..=3).
        #[arg(long)]
        initial: Option<u8>,

        /// Combined predictor table size (1..=65536).
        #[arg(long)]
        table_size: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Stall,
    Predict,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Predictor {
    Saturating,
    History,
    Combined,
}

impl From<Policy> for config::ControlPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Stall => Self::Stall,
            Policy::Predict => Self::Predict,
        }
    }
}

impl From<Predictor> for config::BranchPredictor {
    fn from(p: Predictor) -> Self {
        match p {
            Predictor::Saturating => Self::Saturating,
            Predictor::History => Self::History,
            Predictor::Combined => Self::Combined,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            policy,
            predictor,
            initial,
            table_size,
            max_cycles,
            trace,
            stats,
        } => {
            let mut config = load_config(config.as_deref());
            if let Some(p) = policy {
                config.pipeline.control_policy = p.into();
            }
            if let Some(p) = predictor {
                config.pipeline.branch_predictor = p.into();
            }
            if let Some(v) = initial {
                config.pipeline.initial_counter = v;
            }
            if let Some(s) = table_size {
                config.pipeline.combined_table_size = s;
            }
            if max_cycles.is_some() {
                config.general.max_cycles = max_cycles;
            }
            config.general.trace |= trace;
            init_logging(config.general.trace);
            cmd_run(&file, &config, stats);
        }
        Commands::Predict {
            trace,
            predictor,
            initial,
            table_size,
        } => {
            init_logging(false);
            let mut config = Config::default();
            config.pipeline.branch_predictor = predictor.into();
            if let Some(v) = initial {
                config.pipeline.initial_counter = v;
            }
            if let Some(s) = table_size {
                config.pipeline.combined_table_size = s;
            }
            cmd_predict(&trace, &config);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--trace`.
fn init_logging(trace: bool) {
    let fallback = if trace { "mipsim_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads and validates the JSON configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(ExitCode::Host.code());
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error in config {}: {e}", path.display());
        process::exit(ExitCode::Host.code());
    })
}

/// Runs a program, printing one report per cycle to stdout.
///
/// On a simulation error the reports already printed stay on stdout, a blank
/// line follows, the diagnostic goes to stderr and the process exits with the
/// error category's code.
fn cmd_run(file: &Path, config: &Config, show_stats: bool) {
    let program = match load_program(file, config.memory.size_bytes) {
        Ok(program) => program,
        Err(e) => fail(&e.diagnostic(), e.exit_code()),
    };
    let mut sim = match Simulator::new(program, config) {
        Ok(sim) => sim,
        Err(e) => fail(&format!("Error: {e}\n"), ExitCode::Host),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = sim.run(&mut out);
    let _ = writeln!(out);
    let _ = out.flush();

    if show_stats {
        eprint!("{}", sim.stats());
    }

    match result {
        Ok(Outcome::Completed { cycles }) => {
            info!(cycles, "program completed");
        }
        Ok(Outcome::CycleLimit { cycles }) => {
            info!(cycles, "stopped at cycle limit");
        }
        Err(e) => {
            error!("simulation aborted at cycle {}", sim.stats().cycles);
            eprint!("{}", e.diagnostic());
            process::exit(e.exit_code().code());
        }
    }
}

/// Replays a branch trace and prints the prediction summary.
fn cmd_predict(path: &Path, config: &Config) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading trace {}: {e}", path.display());
        process::exit(ExitCode::Host.code());
    });
    let records = parse_trace(&text).unwrap_or_else(|e| {
        eprintln!("Error in trace {}: {e}", path.display());
        process::exit(ExitCode::Host.code());
    });
    let mut predictor = BranchPredictorWrapper::new(&config.pipeline).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(ExitCode::Host.code());
    });

    let summary = replay(&mut predictor, &records);
    println!("predictor   {:?}", config.pipeline.branch_predictor);
    println!("branches    {}", summary.branches);
    println!("correct     {}", summary.correct);
    println!("accuracy    {:.2}%", summary.accuracy() * 100.0);
}

/// Prints a load-time failure and exits; load failures produce no cycle reports.
fn fail(message: &str, code: ExitCode) -> ! {
    println!();
    eprint!("{message}");
    process::exit(code.code())
}
