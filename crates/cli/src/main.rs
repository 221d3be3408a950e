//! Claimrun - run a file-oriented claims lint tool against stdin
//!
//! Reads the whole of standard input as the claims text, runs the bundled
//! claims checker against it entirely in memory, and prints everything the
//! tool wrote to its two output streams. Always exits 0 when the invocation
//! itself succeeds, regardless of the diagnostics the tool printed.

mod claims_checker;

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use claimrun_core::application::ExecutionAdapter;
use claimrun_core::port::clock::SystemClock;
use claimrun_infra_fs::OsFileStore;

use crate::claims_checker::BasicClaimsChecker;

#[derive(Parser)]
#[command(name = "claimrun")]
#[command(about = "Run the claims checker against stdin, touching no files", long_about = None)]
#[command(version)]
struct Cli {
    /// Extra tokens forwarded verbatim to the tool after the simulated
    /// input path, in the order given
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    extra_args: Vec<String>,
}

fn init_logging() {
    let log_format = std::env::var("CLAIMRUN_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("claimrun_core=warn"))
        .expect("Failed to create env filter");

    // Logs go to stderr; stdout carries only the tool's captured output.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut claims_text = String::new();
    std::io::stdin()
        .read_to_string(&mut claims_text)
        .context("Failed to read claims text from stdin")?;

    info!(
        claims_bytes = claims_text.len(),
        extra_args = cli.extra_args.len(),
        "Invoking claims checker"
    );

    let adapter = ExecutionAdapter::new(
        Arc::new(BasicClaimsChecker),
        Arc::new(OsFileStore),
        Arc::new(SystemClock),
    );

    let output = adapter.run(&claims_text, &cli.extra_args)?;
    println!("{}", output);

    Ok(())
}
