//! citecheck CLI
//!
//! Checks citations in course content against the reference catalog.
//! Exit status: 0 on success or warning, 1 on missing references or I/O failure.

use anyhow::Result;
use citecheck::{run_check, CheckArgs};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "citecheck")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Citation cross-reference checker for documentation corpora")]
#[command(long_about = "Scans content documents for citations and checks them against the reference catalog.\n\nReports:\n  missing   linked citations absent from the catalog (fails the run)\n  unlinked  author/year text without a link (warning)\n  unused    catalog entries never cited (informational)")]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "citecheck=warn",
        1 => "citecheck=info",
        _ => "citecheck=debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = run_check(cli.check)?;
    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
