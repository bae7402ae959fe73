//! Fair Draw CLI
//!
//! Thin front end over the commit-reveal protocol:
//! `commit` before the draw, `reveal` at the draw, `verify` for anyone.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use fair_draw::{
    config::DrawConfig,
    core::time::display_kst,
    proof::{verify_hex, PublishedCommitment, RevealRecord},
    store, CommitmentHash, DrawError, DrawProtocol, VERSION,
};

const RULE: &str = "======================================================================";

#[derive(Parser, Debug)]
#[command(name = "fair-draw", author, version, about = "Verifiable random draws (commit-reveal)", long_about = None)]
struct Cli {
    /// Commitment file (keep private until the reveal)
    #[arg(long, global = true, value_name = "PATH")]
    commitment_file: Option<PathBuf>,

    /// Reveal record file
    #[arg(long, global = true, value_name = "PATH")]
    reveal_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Before the draw: create a commitment and print the hash to publish
    Commit,

    /// At the draw: reveal the commitment and draw a number
    Reveal {
        /// Lowest possible result (inclusive)
        #[arg(allow_negative_numbers = true, requires = "max")]
        min: Option<i64>,

        /// Highest possible result (inclusive)
        #[arg(allow_negative_numbers = true)]
        max: Option<i64>,

        /// Refuse to draw unless the commitment matches this published hash
        #[arg(long, value_name = "HASH")]
        expect_hash: Option<String>,
    },

    /// Anyone: check published values and recompute the result
    Verify {
        /// Commitment hash published before the draw
        hash: String,

        /// Commitment timestamp published before the draw
        timestamp: String,

        /// Nonce revealed at the draw
        nonce: String,

        /// Range lower bound (defaults to the reveal file, then config)
        #[arg(long, allow_negative_numbers = true, requires = "max")]
        min: Option<i64>,

        /// Range upper bound
        #[arg(long, allow_negative_numbers = true, requires = "min")]
        max: Option<i64>,
    },

    /// Anyone: check every field of a reveal record file
    VerifyFile {
        /// Reveal file (defaults to --reveal-file / config)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Fair Draw v{}", VERSION);

    let mut config = DrawConfig::from_env();
    if let Some(path) = cli.commitment_file {
        config.commitment_path = path;
    }
    if let Some(path) = cli.reveal_file {
        config.reveal_path = path;
    }
    debug!("Config: {:?}", config);

    match cli.command {
        Command::Commit => run_commit(&config),
        Command::Reveal { min, max, expect_hash } => {
            run_reveal(&config, min.zip(max), expect_hash.as_deref())
        }
        Command::Verify { hash, timestamp, nonce, min, max } => {
            run_verify(&config, &hash, &timestamp, &nonce, min.zip(max))
        }
        Command::VerifyFile { path } => {
            run_verify_file(&path.unwrap_or_else(|| config.reveal_path.clone()))
        }
    }
}

/// Logs go to stderr; results go to stdout.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_commit(config: &DrawConfig) -> Result<ExitCode> {
    if config.commitment_path.exists() {
        warn!(
            "Overwriting existing commitment at {}",
            config.commitment_path.display()
        );
    }

    let mut protocol = DrawProtocol::new();
    let (hash, commitment) = protocol.commit().context("Failed to create commitment")?;
    store::save_commitment(&config.commitment_path, &commitment)?;

    let published = PublishedCommitment::from_commitment(&commitment)?;

    println!("{}", RULE);
    println!("STEP 1: COMMITMENT CREATED");
    println!("{}", RULE);
    println!();
    println!("Created at:       {}", display_kst(&published.timestamp));
    println!();
    println!("Publish now:");
    println!("  Commitment hash: {}", hash);
    println!("  Timestamp:       {}", published.timestamp);
    println!();
    println!("Keep secret until the draw:");
    println!("  Nonce is stored in {}", config.commitment_path.display());
    println!("{}", RULE);

    Ok(ExitCode::SUCCESS)
}

fn run_reveal(
    config: &DrawConfig,
    range: Option<(i64, i64)>,
    expect_hash: Option<&str>,
) -> Result<ExitCode> {
    let commitment = store::load_commitment(&config.commitment_path)?;
    let (min, max) = range.unwrap_or_else(|| config.default_range());

    let protocol = DrawProtocol::new();
    let record = match expect_hash {
        Some(raw) => {
            let published: CommitmentHash = raw.parse()?;
            protocol.draw_against(&published, &commitment, min, max)?
        }
        None => protocol.draw(&commitment, min, max)?,
    };

    store::save_reveal(&config.reveal_path, &record)?;
    print_reveal(&record);

    Ok(ExitCode::SUCCESS)
}

fn print_reveal(record: &RevealRecord) {
    println!("{}", RULE);
    println!("STEP 2: DRAW AND REVEAL");
    println!("{}", RULE);
    println!();
    println!("Commitment hash:  {}", record.commitment_hash);
    println!("Timestamp:        {} ({})", record.timestamp, display_kst(&record.timestamp));
    println!();
    println!("Revealed:");
    println!("  Nonce:          {}", record.nonce);
    println!();
    println!("Range:            {} to {}", record.min, record.max);
    println!("Seed:             {}", record.seed_value);
    println!();
    println!("RESULT:           {}", record.result);
    println!("{}", RULE);
    println!("Anyone can reproduce this hash and result from the values above.");
    println!("{}", RULE);
}

fn run_verify(
    config: &DrawConfig,
    hash: &str,
    timestamp: &str,
    nonce: &str,
    range: Option<(i64, i64)>,
) -> Result<ExitCode> {
    let (min, max) = config.resolve_range(range)?;

    let outcome = verify_hex(hash, timestamp, nonce, min, max)?;

    println!("{}", RULE);
    match (outcome.matches, outcome.result, outcome.seed_value) {
        (true, Some(result), Some(seed)) => {
            println!("VERIFIED");
            println!("{}", RULE);
            println!("Published hash:   {}", hash.trim());
            println!("Computed hash:    {}", outcome.computed_hash);
            println!("Timestamp:        {} ({})", timestamp, display_kst(timestamp));
            println!("Seed:             {}", seed);
            println!("Range:            {} to {}", min, max);
            println!("Result:           {}", result);
            println!("{}", RULE);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            println!("VERIFICATION FAILED: hash does not match");
            println!("{}", RULE);
            println!("Published hash:   {}", hash.trim());
            println!("Computed hash:    {}", outcome.computed_hash);
            println!();
            println!("The timestamp or nonce is wrong, or the revealed data was altered.");
            println!("{}", RULE);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_verify_file(path: &Path) -> Result<ExitCode> {
    let record = store::load_reveal(path)?
        .ok_or_else(|| anyhow!("no reveal record at {}", path.display()))?;

    match record.verify() {
        Ok(()) => {
            println!("VERIFIED: {} (result {})", path.display(), record.result);
            Ok(ExitCode::SUCCESS)
        }
        Err(
            e @ (DrawError::HashMismatch { .. }
            | DrawError::SeedMismatch { .. }
            | DrawError::ResultMismatch { .. }),
        ) => {
            println!("VERIFICATION FAILED: {}", e);
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to check {}", path.display())),
    }
}
