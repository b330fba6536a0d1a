use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{self, Context};
use ring_deque::{
    best_profits, profits_from_json,
    replay::{replay, Op},
    RingDeque,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the best profit for a pay period where a day must be worked at least once
    /// every K days
    Profit(ProfitArgs),
    /// Run a sequence of deque operations, printing the slot layout after each one
    Replay(ReplayArgs),
}

#[derive(Args)]
struct ProfitArgs {
    /// The maximum number of days between two worked days.
    #[arg(short = 'k', long)]
    window: usize,
    /// Read the daily profits from a JSON array instead of the command line.
    #[arg(long, conflicts_with = "values")]
    json: Option<PathBuf>,
    /// Print the best profit for every day as a JSON array instead of only the final result.
    #[arg(long)]
    table: bool,
    /// The daily profits, in order.
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,
}

#[derive(Args)]
struct ReplayArgs {
    /// The initial number of slots; must be a power of two of at least 4.
    #[arg(long, default_value_t = 4)]
    capacity: usize,
    /// Print each step as a line of JSON.
    #[arg(long)]
    json: bool,
    /// Operations: push_front:V, push_back:V, pop_front, pop_back.
    #[arg(required = true)]
    ops: Vec<Op>,
}

fn read_profits(args: &ProfitArgs) -> eyre::Result<Vec<i64>> {
    match &args.json {
        Some(path) => {
            let json = fs::read_to_string(path).wrap_err("Failed to read profits file")?;
            profits_from_json(&json).wrap_err("Profits file must be a JSON array of integers")
        }
        None => Ok(args.values.clone()),
    }
}

fn run_profit(args: ProfitArgs) -> eyre::Result<String> {
    let profits = read_profits(&args)?;
    let table = best_profits(&profits, args.window).wrap_err("Failed to compute profits")?;
    let best = table.last().copied().unwrap_or_default();

    log::info!(
        "Best profit over {} days with a window of {}: {}",
        profits.len(),
        args.window,
        best
    );

    if args.table {
        Ok(serde_json::to_string(&table)?)
    } else {
        Ok(best.to_string())
    }
}

fn run_replay(args: ReplayArgs) -> eyre::Result<String> {
    let mut deque = RingDeque::with_capacity(args.capacity).wrap_err("Failed to create deque")?;

    let mut lines = Vec::with_capacity(args.ops.len());
    for step in replay(&mut deque, &args.ops) {
        let line = if args.json {
            serde_json::to_string(&step)?
        } else {
            let popped = step.popped.map(|value| value.to_string()).unwrap_or_default();
            format!("{:<16} {:<8} {}", step.op, popped, step.layout)
        };
        lines.push(line);
    }

    log::info!(
        "Replayed {} operations, {} elements left in {} slots",
        args.ops.len(),
        deque.len(),
        deque.capacity()
    );

    Ok(lines.join("\n"))
}

fn run(cli: Cli) -> eyre::Result<String> {
    match cli.command {
        Command::Profit(args) => run_profit(args),
        Command::Replay(args) => run_replay(args),
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", run(Cli::parse())?);

    Ok(())
}
