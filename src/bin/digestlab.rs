//! digestlab CLI - checksum and hash algorithm evaluation.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use digestlab::{
    collision, throughput, Evaluator, HarnessBuilder, OutputFormat, Registry, Report, Table,
};

/// digestlab - compare non-cryptographic checksums and hashes
#[derive(Parser)]
#[command(name = "digestlab")]
#[command(author = "Pragmatic AI Labs")]
#[command(version)]
#[command(about = "Error-detection, throughput and collision harness for checksum algorithms")]
#[command(long_about = None)]
struct Cli {
    /// Log evaluator progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the evaluation harness and print a report
    Run(RunArgs),

    /// Digest a literal input with every algorithm
    Digest {
        /// Input text (or hex bytes with --hex)
        #[arg(required = true)]
        input: String,

        /// Treat the input as hex-encoded bytes
        #[arg(long)]
        hex: bool,

        /// Output format: summary, tsv or json
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },

    /// List registered algorithms
    List {
        /// Output format: summary, tsv or json
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Evaluators to run, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    only: Vec<Evaluator>,

    /// Algorithms to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Random buffers for the collision evaluator
    #[arg(long, default_value_t = collision::DEFAULT_TRIALS)]
    trials: usize,

    /// Length of each collision buffer in bytes
    #[arg(long, default_value_t = collision::DEFAULT_BUFFER_LEN)]
    length: usize,

    /// Seed for the collision evaluator (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Throughput buffer size in bytes
    #[arg(long, default_value_t = throughput::DEFAULT_BUFFER_LEN)]
    size: usize,

    /// Timed computations per algorithm for throughput
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Output format: summary, tsv or json
    #[arg(short, long, default_value = "summary")]
    format: OutputFormat,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run(args) => run_harness(args),
        Commands::Digest { input, hex, format } => {
            run_digest(&input, hex, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { format } => {
            run_list(format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_harness(args: RunArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut builder = HarnessBuilder::new()
        .collision_trials(args.trials)
        .collision_buffer_len(args.length)
        .throughput_buffer_len(args.size)
        .throughput_trials(args.repeat);
    if !args.only.is_empty() {
        builder = builder.evaluators(args.only);
    }
    if !args.algorithms.is_empty() {
        builder = builder.algorithms(args.algorithms);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let harness = builder.build()?;
    debug!(config = ?harness.config(), "harness ready");
    let results = harness.run();

    let stdout = io::stdout();
    let mut report = Report::new(stdout.lock(), args.format);
    report.write(&results)?;
    report.into_inner().flush()?;

    if results.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        for (evaluator, error) in results.failures() {
            eprintln!("Error: {evaluator} evaluator failed: {error}");
        }
        Ok(ExitCode::FAILURE)
    }
}

fn run_digest(
    input: &str,
    hex: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = if hex {
        hex::decode(input.trim().trim_start_matches("0x"))?
    } else {
        input.as_bytes().to_vec()
    };

    let registry = Registry::standard();
    let mut table = Table::new(["algorithm", "bits", "digest"]);
    for descriptor in registry.all() {
        table.push_row([
            descriptor.name().to_string(),
            descriptor.width().bits().to_string(),
            descriptor.compute(&bytes).to_string(),
        ]);
    }
    write_table(&table, format)
}

fn run_list(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::standard();
    let mut table = Table::new(["algorithm", "bits", "space"]);
    for descriptor in registry.all() {
        table.push_row([
            descriptor.name().to_string(),
            descriptor.width().bits().to_string(),
            descriptor.width().space().to_string(),
        ]);
    }
    write_table(&table, format)
}

fn write_table(table: &Table, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    table.write(&mut stdout, format)?;
    stdout.flush()?;
    Ok(())
}
