//! Out-of-order pipeline simulator CLI.
//!
//! This binary is the single entry point for trace-driven simulation. It performs:
//! 1. **Configuration:** individual machine flags (`-r`, `--k0..k2`, `-f`) or a
//!    JSON document via `--config`.
//! 2. **Input:** a trace file, or stdin when the trace argument is `-`.
//! 3. **Output:** stage-transition events on stdout (buffered, flushed before
//!    statistics), the final statistics block after the run, diagnostics on stderr.

use std::error::Error;
use std::fs;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tomsim_core::config::SimConfig;
use tomsim_core::sim::Simulator;
use tomsim_core::trace::{TextTrace, TraceSource};

#[derive(Parser, Debug)]
#[command(
    name = "tomsim",
    version,
    about = "Cycle-accurate out-of-order pipeline simulator",
    long_about = "Run a decoded-instruction trace through a Tomasulo-style superscalar pipeline.\n\nEvents (<cycle>\\t<STAGE>\\t<tag>) are written to stdout, followed by the final statistics. Diagnostics go to stderr (RUST_LOG controls verbosity).\n\nExamples:\n  tomsim traces/gcc.100k.tr\n  tomsim -r 2 --k0 1 --k1 1 --k2 1 -f 4 traces/gcc.100k.tr\n  cat trace.tr | tomsim --json -"
)]
struct Cli {
    /// Result buses: state updates per cycle.
    #[arg(short = 'r', long = "buses", default_value_t = 8)]
    result_buses: usize,

    /// Function units of class 0.
    #[arg(long, default_value_t = 1)]
    k0: usize,

    /// Function units of class 1.
    #[arg(long, default_value_t = 2)]
    k1: usize,

    /// Function units of class 2.
    #[arg(long, default_value_t = 3)]
    k2: usize,

    /// Instructions fetched per cycle.
    #[arg(short = 'f', long = "fetch", default_value_t = 4)]
    fetch_rate: usize,

    /// JSON configuration file; overrides the individual machine flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final statistics as JSON instead of the text block.
    #[arg(long)]
    json: bool,

    /// Trace file, or `-` for stdin.
    trace: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    tracing::debug!(?config, "configuration loaded");

    let result = if cli.trace.as_os_str() == "-" {
        run(&config, TextTrace::new(io::stdin().lock()), cli.json)
    } else {
        let file = File::open(&cli.trace).unwrap_or_else(|err| {
            eprintln!("Error opening trace {}: {err}", cli.trace.display());
            process::exit(1);
        });
        run(&config, TextTrace::new(BufReader::new(file)), cli.json)
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Builds the configuration from `--config` or from the individual flags.
fn load_config(cli: &Cli) -> Result<SimConfig, Box<dyn Error>> {
    match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(SimConfig {
            result_buses: cli.result_buses,
            fu_counts: [cli.k0, cli.k1, cli.k2],
            fetch_rate: cli.fetch_rate,
        }),
    }
}

/// Runs the simulation: events stream to stdout, then the report prints.
fn run<T: TraceSource>(config: &SimConfig, trace: T, json: bool) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let sim = Simulator::new(config, trace, &mut out)?;
    let report = sim.run()?;
    drop(out);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}
