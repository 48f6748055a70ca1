use anyhow::Result;
use clap::Parser;
use corrminer::cli::{Cli, Command, GenerateArgs, MineArgs, OutputFormat, SimStrategy, SimulateArgs};
use corrminer::sequence::Rule;
use corrminer::session::{MiningReport, MiningSession};
use corrminer::simulate::{CMinerStrategy, NonPredictive, QuickMineStrategy, Simulator, Strategy};
use corrminer::trace::{self, DEFAULT_ALPHABET};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// JSON view of a mining run
#[derive(Serialize)]
struct MineOutput<'a> {
    miner: &'static str,
    segments: usize,
    frequent: usize,
    closed: usize,
    elapsed_ms: u128,
    rules: Vec<&'a Rule<String>>,
}

fn print_mining_report(report: &MiningReport<String>, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => {
            let view = MineOutput {
                miner: report.miner,
                segments: report.segments.len(),
                frequent: report.frequent.len(),
                closed: report.closed.len(),
                elapsed_ms: report.elapsed.as_millis(),
                rules: report.rules.sorted(),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}

fn run_mine(args: MineArgs) -> Result<()> {
    let config = args.mining.miner_config()?;
    let sequence = trace::load_trace(
        &args.trace.trace,
        args.trace.format,
        args.trace.strip_prefix.as_deref(),
    )?;

    let report = MiningSession::new(config)?.mine(&sequence)?;
    print_mining_report(&report, args.output)
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    let sequence = trace::load_trace(
        &args.trace.trace,
        args.trace.format,
        args.trace.strip_prefix.as_deref(),
    )?;

    let strategy: Box<dyn Strategy<String>> = match args.strategy {
        SimStrategy::None => Box::new(NonPredictive),
        SimStrategy::Cminer => {
            // Rules come from the very trace being replayed
            let config = args.mining.miner_config()?;
            let max_gap = config.max_gap;
            let report = MiningSession::new(config)?.mine(&sequence)?;
            Box::new(CMinerStrategy::new(Arc::new(report.rules), max_gap))
        }
        SimStrategy::Quickmine => Box::new(QuickMineStrategy::new(args.stream_config()?)?),
    };

    let report = Simulator::new(args.cache_size, strategy)?.run(&sequence);
    match args.output {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let alphabet: Vec<char> = match &args.alphabet {
        Some(symbols) => symbols.chars().filter(|c| !c.is_whitespace()).collect(),
        None => DEFAULT_ALPHABET.to_vec(),
    };
    if alphabet.is_empty() {
        anyhow::bail!("Alphabet must contain at least one symbol");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sequence: String = trace::random_sequence(args.length, &alphabet, &mut rng)
        .into_iter()
        .collect();
    println!("{}", sequence);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Mine(args) => run_mine(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Generate(args) => run_generate(args),
    }
}
