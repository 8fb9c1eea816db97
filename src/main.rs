//! shamir-reconstruct - recover a secret from a file of Shamir shares
//!
//! Usage:
//!   shamir-reconstruct <FILE>           - Recover from the first k valid shares
//!   shamir-reconstruct --strict <FILE>  - Also check the remaining shares agree

use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use shamir_reconstruct::{
    Extraction, RecoveryMode, ShamirError, extract_shares_from_file, recover,
};
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "shamir-reconstruct")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recover a Shamir secret from a threshold set of shares")]
struct Cli {
    /// File containing n, k and the share entries
    file: PathBuf,

    /// Require every share beyond the threshold to agree with the secret
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> RecoveryMode {
        if self.strict {
            RecoveryMode::CrossChecked
        } else {
            RecoveryMode::FirstK
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::ERROR };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set up logging");
    }

    match run(&cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// How a run that got as far as reconstruction ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Recovered,
    NotEnoughShares,
}

impl Outcome {
    fn exit_code(&self) -> i32 {
        match self {
            Outcome::Recovered => 0,
            Outcome::NotEnoughShares => 1,
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let extraction = extract_shares_from_file(&cli.file)
        .with_context(|| format!("Failed to load shares from {}", cli.file.display()))?;
    let name = cli.file.display().to_string();
    report(&name, &extraction, cli.mode(), &mut std::io::stdout().lock())
}

/// Write the per-share diagnostics and the recovered secret to `out`.
fn report(
    name: &str,
    extraction: &Extraction,
    mode: RecoveryMode,
    out: &mut impl Write,
) -> Result<Outcome> {
    for rejected in &extraction.rejected {
        writeln!(out, "{}", rejected)?;
    }

    let secret = match recover(&extraction.shares, extraction.parameters.k, mode) {
        Ok(secret) => secret,
        Err(e @ ShamirError::NotEnoughShares { .. }) => {
            writeln!(out, "{}", e)?;
            return Ok(Outcome::NotEnoughShares);
        }
        Err(e) => return Err(e).context("Failed to reconstruct the secret"),
    };

    writeln!(out, "Secret from {}: {}", name, secret)?;
    Ok(Outcome::Recovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shamir_reconstruct::extract_shares;

    const SHARES: &str = r#"{
    "keys": {
        "n": 3,
        "k": 2
    },
    "1": {
        "base": "10",
        "value": "4"
    },
    "2": {
        "base": "abc",
        "value": "7"
    },
    "3": {
        "base": "2",
        "value": "1010"
    }
}"#;

    fn report_to_string(text: &str, mode: RecoveryMode) -> (Result<Outcome>, String) {
        let extraction = extract_shares(text).unwrap();
        let mut out = Vec::new();
        let outcome = report("shares.json", &extraction, mode, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_report_recovered_secret() {
        // f(x) = 3x + 1
        let (outcome, out) = report_to_string(SHARES, RecoveryMode::FirstK);
        assert_eq!(outcome.unwrap(), Outcome::Recovered);
        assert_eq!(Outcome::Recovered.exit_code(), 0);
        assert_eq!(
            out,
            "Skipping invalid share at x = 2 (value = 7 in base abc): base is not an integer\n\
             Secret from shares.json: 1\n"
        );
    }

    #[test]
    fn test_report_not_enough_shares() {
        let text = SHARES.replace(r#""k": 2"#, r#""k": 3"#);
        let (outcome, out) = report_to_string(&text, RecoveryMode::FirstK);
        let outcome = outcome.unwrap();
        assert_eq!(outcome, Outcome::NotEnoughShares);
        assert_eq!(outcome.exit_code(), 1);
        assert!(out.ends_with(
            "Not enough valid shares to compute the secret (found 2, need 3)\n"
        ));
        assert!(!out.contains("Secret from"));
    }

    #[test]
    fn test_report_reconstruction_failure_is_an_error() {
        // (1, 4) and (3, 11) cross x = 0 at 1/2.
        let text = SHARES.replace(r#""value": "1010""#, r#""value": "1011""#);
        let (outcome, out) = report_to_string(&text, RecoveryMode::FirstK);
        assert!(outcome.is_err());
        assert!(!out.contains("Secret from"));

        let text = SHARES.replace(r#""3": {"#, r#""1": {"#);
        let (outcome, out) = report_to_string(&text, RecoveryMode::FirstK);
        assert!(outcome.is_err());
        assert!(!out.contains("Secret from"));
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["shamir-reconstruct", "--strict", "shares.json"]).unwrap();
        assert_eq!(cli.mode(), RecoveryMode::CrossChecked);
        assert!(Cli::try_parse_from(["shamir-reconstruct"]).is_err());
        assert!(Cli::try_parse_from(["shamir-reconstruct", "a.json", "b.json"]).is_err());
    }
}
