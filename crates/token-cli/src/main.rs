use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use token_core::ledger::{Ledger, ReplayError, TransactionProposal};
use token_core::verifier::{self, ErrorReport};
use token_core::{Command, Error, LedgerTransaction, Party, TokenCommand, TokenState};

/// Exit codes: 0 = accepted, 1 = rejected by the contract, 2 = unusable input
const EXIT_OK: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// token-cli — fungible token contract verifier
///
/// Verify, hash and replay token transactions.
#[derive(Parser)]
#[command(name = "token-cli", version, about, long_about = None)]
struct Cli {
    /// Print nothing on success
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a transaction against the token contract
    Verify {
        /// Path to transaction .json file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the transaction id (SHA-256 of the canonical form)
    Hash {
        /// Path to transaction .json file
        file: PathBuf,
    },

    /// Commit a sequence of proposals to a fresh in-memory ledger
    Replay {
        /// Path to .json file holding an array of proposals
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a scaffold Issue transaction
    Init {
        /// Issuing party
        issuer: Option<String>,
        /// Receiving party
        holder: Option<String>,
        /// Quantity to issue
        quantity: Option<i64>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Verify { file, json } => cmd_verify(&file, json, cli.quiet),
        Commands::Hash { file } => cmd_hash(&file),
        Commands::Replay { file, json } => cmd_replay(&file, json, cli.quiet),
        Commands::Init {
            issuer,
            holder,
            quantity,
        } => cmd_init(issuer, holder, quantity),
        Commands::Version => {
            println!(
                "token-cli {} (token-core {})",
                env!("CARGO_PKG_VERSION"),
                token_core::VERSION
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_verify(file: &Path, json: bool, quiet: bool) -> i32 {
    let Some(text) = read_input(file) else {
        return EXIT_ERROR;
    };
    let verdict = match verifier::verify_json(&text) {
        Ok(v) => v,
        Err(e) => return fail(&e),
    };
    debug!(tx_id = %verdict.transaction_id, verified = verdict.verified, "verification finished");

    if json {
        if !print_json(&verdict) {
            return EXIT_ERROR;
        }
    } else if let Some(report) = &verdict.error {
        print_rejection(report);
    } else if !quiet {
        println!(
            "{} transaction {} verifies",
            "✓".green().bold(),
            verdict.transaction_id
        );
    }

    if verdict.verified {
        EXIT_OK
    } else {
        EXIT_REJECTED
    }
}

fn cmd_hash(file: &Path) -> i32 {
    let Some(text) = read_input(file) else {
        return EXIT_ERROR;
    };
    match LedgerTransaction::from_json(&text).and_then(|tx| tx.id()) {
        Ok(id) => {
            println!("{}", id);
            EXIT_OK
        }
        Err(e) => fail(&e),
    }
}

fn cmd_replay(file: &Path, json: bool, quiet: bool) -> i32 {
    let Some(text) = read_input(file) else {
        return EXIT_ERROR;
    };
    let proposals = match TransactionProposal::list_from_json(&text) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let mut ledger = Ledger::new();
    let outcome = ledger.replay(&proposals);
    let committed: Vec<&str> = ledger
        .provenance()
        .iter()
        .map(|e| e.transaction_id.as_str())
        .collect();

    if json {
        let unspent: Vec<serde_json::Value> = ledger
            .unspent()
            .map(|(r, s)| serde_json::json!({ "ref": r, "state": s }))
            .collect();
        let rejected = outcome.as_ref().err().map(|ReplayError { index, error }| {
            serde_json::json!({ "index": index, "error": ErrorReport::from(error) })
        });
        let output = serde_json::json!({
            "committed": committed,
            "unspent": unspent,
            "rejected": rejected,
        });
        if !print_json(&output) {
            return EXIT_ERROR;
        }
    } else {
        if !quiet {
            for (seq, id) in committed.iter().enumerate() {
                println!("{} #{} {}", "committed".green(), seq, id);
            }
            for (r, s) in ledger.unspent() {
                println!("  {} {}", r.to_string().dimmed(), s);
            }
        }
        if let Err(err) = &outcome {
            eprintln!(
                "{} transaction #{} rejected",
                "error:".red().bold(),
                err.index
            );
            print_rejection(&ErrorReport::from(&err.error));
        }
    }

    match outcome {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_REJECTED,
    }
}

fn cmd_init(issuer: Option<String>, holder: Option<String>, quantity: Option<i64>) -> i32 {
    let issuer = Party::new(issuer.unwrap_or_else(|| "Alice".into()));
    let holder = Party::new(holder.unwrap_or_else(|| "Bob".into()));
    let quantity = quantity.unwrap_or(TokenState::DEFAULT_QUANTITY);

    let tx = LedgerTransaction {
        inputs: vec![],
        outputs: vec![TokenState::new(issuer.clone(), holder, quantity)],
        commands: vec![Command::new([issuer], TokenCommand::Issue)],
    };
    if print_json(&tx) {
        EXIT_OK
    } else {
        EXIT_ERROR
    }
}

// ── Helpers ───────────────────────────────────────────────

fn read_input(file: &Path) -> Option<String> {
    match std::fs::read_to_string(file) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!(
                "{} cannot read {}: {}",
                "error:".red().bold(),
                file.display(),
                e
            );
            None
        }
    }
}

fn fail(err: &Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), err);
    EXIT_ERROR
}

fn print_rejection(report: &ErrorReport) {
    eprintln!(
        "{} [{}] {}",
        "rejected".red().bold(),
        report.kind,
        report.message
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            true
        }
        Err(e) => {
            eprintln!("{} Serialization error: {}", "error:".red().bold(), e);
            false
        }
    }
}
