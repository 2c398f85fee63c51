//! Command-line surface shared by the binaries.
//!
//! `frequency` and `strategy` take short flags in a fixed order with an
//! exact argument count. The shape is checked first; values are then
//! parsed and range-checked by clap. Any failure prints the usage text to
//! stdout and exits with status 1.

use clap::error::{ContextKind, ContextValue};
use clap::Parser;
use std::path::Path;
use tracing::warn;

use crate::strategy::StrategyKind;
use crate::types::{CapitalMode, Pocket, SimError};

// ---------------------------------------------------------------------------
// Argument structs
// ---------------------------------------------------------------------------

/// Baseline frequency simulator.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "frequency", disable_help_flag = true)]
pub struct FrequencyArgs {
    /// Spins per run
    #[arg(short = 'c', value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub trials: u32,

    /// Number of runs
    #[arg(short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
    pub runs: u32,

    /// Pocket to follow
    #[arg(short = 'e', value_parser = clap::value_parser!(u8).range(0..=36))]
    pub target: Pocket,
}

/// Betting-strategy simulator.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "strategy", disable_help_flag = true)]
pub struct StrategyArgs {
    /// Rounds per run
    #[arg(short = 'c', value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub trials: u32,

    /// Number of runs
    #[arg(short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
    pub runs: u32,

    /// m (Martingala), d (D'Alembert), f (Fibonacci), o (Inverted Martingala)
    #[arg(short = 's', value_parser = parse_strategy)]
    pub strategy: StrategyKind,

    /// f (fixed) or i (unbounded)
    #[arg(short = 'a', value_parser = parse_capital)]
    pub capital: CapitalMode,
}

const FREQUENCY_FLAGS: [&str; 3] = ["-c", "-n", "-e"];
const STRATEGY_FLAGS: [&str; 4] = ["-c", "-n", "-s", "-a"];

fn parse_strategy(s: &str) -> Result<StrategyKind, SimError> {
    // Only the single-letter tags are accepted on the command line.
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == c)
            .ok_or_else(|| SimError::UnknownStrategy(s.to_string())),
        _ => Err(SimError::UnknownStrategy(s.to_string())),
    }
}

fn parse_capital(s: &str) -> Result<CapitalMode, SimError> {
    match s {
        "f" | "i" => s.parse(),
        _ => Err(SimError::UnknownCapitalMode(s.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// `argv` must be the program name followed by each flag, in order, with
/// exactly one value after it.
pub fn check_shape(argv: &[String], flags: &[&str]) -> Result<(), SimError> {
    if argv.len() != 1 + 2 * flags.len() {
        return Err(SimError::MalformedInvocation);
    }
    for (i, flag) in flags.iter().enumerate() {
        if argv[1 + 2 * i] != *flag {
            return Err(SimError::MalformedInvocation);
        }
    }
    Ok(())
}

fn parse_with<P: Parser>(argv: &[String], flags: &[&str]) -> Result<P, SimError> {
    check_shape(argv, flags)?;
    P::try_parse_from(argv).map_err(|e| {
        let flag = match e.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => arg.clone(),
            _ => String::new(),
        };
        let rendered = e.to_string();
        let message = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        SimError::InvalidValue { flag, message }
    })
}

pub fn parse_frequency(argv: &[String]) -> Result<FrequencyArgs, SimError> {
    parse_with(argv, &FREQUENCY_FLAGS)
}

pub fn parse_strategy_args(argv: &[String]) -> Result<StrategyArgs, SimError> {
    parse_with(argv, &STRATEGY_FLAGS)
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

fn program_name(argv: &[String]) -> String {
    argv.first()
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "roulette".to_string())
}

pub fn frequency_usage(argv: &[String]) -> String {
    let prog = program_name(argv);
    format!(
        "Wrong number of arguments or wrong order.\n\n\
         Usage: {prog} -c <trials>[int 1-1000] -n <runs>[int 1-100] -e <target_number>[int 0-36]\n\n\
         Example: {prog} -c 1000 -n 10 -e 8"
    )
}

pub fn strategy_usage(argv: &[String]) -> String {
    let prog = program_name(argv);
    format!(
        "Wrong number of arguments or wrong order.\n\n\
         Usage: {prog} -c <trials>[int 1-1000] -n <runs>[int 1-100] -s <strategy>[m, d, f, o] -a <capital>[f, i]\n\n\
         Strategies: m (Martingala), d (D'Alembert), f (Fibonacci), o (Inverted Martingala)\n\
         Capital: f (fixed) or i (unbounded)\n\
         Example: {prog} -c 1000 -n 10 -s m -a f"
    )
}

/// Print usage to stdout and terminate with status 1.
pub fn exit_with_usage(usage: &str, error: &SimError) -> ! {
    warn!(error = %error, "Invalid invocation");
    println!("{usage}");
    std::process::exit(1)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Initialise the `tracing` subscriber. Logs go to stderr; stdout is kept
/// for usage text and summaries.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roulette_sim=info"));

    let json_logging = std::env::var("ROULETTE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
