//! # switchsim
//!
//! Interactive driver: prompts for a scheduling discipline, runs the
//! simulation to completion and prints the aggregate report.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults (8 ports, 64-packet buffers, 2000 packets)
//! echo 4 | switchsim
//!
//! # Reproducible run from a config file, quiet logs, JSON report
//! echo 1 | RUST_LOG=warn switchsim --config run.toml --seed 42 --json
//! ```

use std::io::Write;

use switchsim::Simulation;
use switchsim::cli;

fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    // ── Parse CLI ───────────────────────────────────────────────
    let args = cli::parse_args(std::env::args().skip(1))?;
    if args.help {
        cli::print_help();
        return Ok(());
    }
    let config = cli::load_config(&args)?;

    // ── Discipline selection ────────────────────────────────────
    let stdin = std::io::stdin();
    let kind = cli::prompt_discipline(&mut stdin.lock(), &mut std::io::stdout())?;

    // ── Run ─────────────────────────────────────────────────────
    let report = Simulation::new(config, kind)?.run();

    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    writeln!(out, "{report}")?;
    if args.json {
        writeln!(out, "{}", report.to_json()?)?;
    }

    Ok(())
}
