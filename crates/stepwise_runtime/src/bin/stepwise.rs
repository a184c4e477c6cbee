//! Stepwise CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use stepwise_foundation::Result;
use stepwise_runtime::{
    Args, Limits, OPERATION_NAMES, PlaybackConfig, Repl, Session, SessionConfig,
};

/// Step through algorithm traces: dynamic programming and mergeable heaps.
#[derive(Debug, Parser)]
#[command(name = "stepwise", version)]
struct Cli {
    /// Milliseconds between automatic playback steps.
    #[arg(long, default_value_t = 500)]
    interval: u64,

    /// Load operations without playing them; use `play` or `step`.
    #[arg(long)]
    manual: bool,

    /// Largest knapsack capacity.
    #[arg(long)]
    max_capacity: Option<i64>,

    /// Largest coin change amount.
    #[arg(long)]
    max_amount: Option<i64>,

    /// Most elements a heap may hold.
    #[arg(long)]
    max_heap_size: Option<usize>,

    /// Skip the welcome banner.
    #[arg(long)]
    no_banner: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one operation and print every step.
    Run {
        /// Operation name, e.g. `knapsack` or `skew.insert`.
        operation: String,

        /// Arguments as `key=value` pairs.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Write the trace to this file as MessagePack.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List operation names.
    Operations,
}

impl Cli {
    fn config(&self) -> SessionConfig {
        let mut limits = Limits::default();
        if let Some(max) = self.max_capacity {
            limits = limits.with_max_capacity(max);
        }
        if let Some(max) = self.max_amount {
            limits = limits.with_max_amount(max);
        }
        if let Some(max) = self.max_heap_size {
            limits = limits.with_max_heap_size(max);
        }

        let playback = PlaybackConfig::default()
            .with_interval_ms(self.interval)
            .with_autoplay(!self.manual);

        SessionConfig::default()
            .with_playback(playback)
            .with_limits(limits)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();

    match &cli.command {
        Some(Command::Operations) => {
            for name in OPERATION_NAMES {
                println!("{name}");
            }
            Ok(())
        }
        Some(Command::Run {
            operation,
            args,
            export,
        }) => run_once(config, operation, &args.join(" "), export.as_deref()),
        None => {
            let mut repl = Repl::new(config)?;
            if cli.no_banner {
                repl = repl.without_banner();
            }
            repl.run()
        }
    }
}

/// Triggers one operation and prints its trace at the configured pace.
fn run_once(
    config: SessionConfig,
    operation: &str,
    args: &str,
    export: Option<&Path>,
) -> Result<()> {
    let interval = config.playback.interval;
    let mut session = Session::new(config.with_playback(PlaybackConfig::manual()));
    let args = Args::parse(args)?;
    let triggered = session.trigger_named(operation, &args)?;

    if let Some(text) = session.current_snapshot() {
        println!("{text}");
    }
    while let Some(event) = session.step_forward() {
        thread::sleep(interval);
        if let Some(text) = session.current_snapshot() {
            println!("{text}");
        }
        if event.is_completed() {
            break;
        }
    }

    println!("\x1b[1m{}: {}\x1b[0m", triggered.operation, triggered.summary);

    if let Some(path) = export {
        let written = session.export(path)?;
        println!("wrote {written} bytes to {}", path.display());
    }
    Ok(())
}
