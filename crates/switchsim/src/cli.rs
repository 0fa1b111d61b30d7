//! Command-line surface: optional flags plus the interactive discipline menu.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use switchsim_core::{DisciplineKind, SimConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// TOML run configuration; defaults apply when absent.
    pub config: Option<PathBuf>,
    /// Overrides the configured seed.
    pub seed: Option<u64>,
    /// Also print the report as JSON.
    pub json: bool,
    pub help: bool,
}

/// Parses everything after the program name.
pub fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a value"))?;
                out.config = Some(PathBuf::from(val));
            }
            "--seed" | "-s" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a value"))?;
                out.seed = Some(
                    val.parse()
                        .map_err(|e| anyhow::anyhow!("invalid seed '{}': {}", val, e))?,
                );
            }
            "--json" => out.json = true,
            "--help" | "-h" => out.help = true,
            other => {
                anyhow::bail!("unknown argument: {other}\nRun with --help for usage.");
            }
        }
    }

    Ok(out)
}

/// Resolves the run configuration from `args`.
pub fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
            SimConfig::from_toml_str(&text)?
        }
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

pub const MENU: &str = "Select Scheduling Algorithm:
1. Priority
2. Weighted Fair Queuing (WFQ)
3. Round Robin
4. iSLIP
";

/// Prints the menu to `output` and reads one selection line from `input`.
pub fn prompt_discipline(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<DisciplineKind> {
    output.write_all(MENU.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let kind = line.parse::<DisciplineKind>().inspect_err(|e| {
        tracing::error!(error = %e, "no simulation run");
    })?;
    Ok(kind)
}

pub fn print_help() {
    eprintln!(
        r#"switchsim — input-queued switch scheduling simulator

USAGE:
  switchsim [OPTIONS]

The discipline is read interactively from stdin:
  1 = Priority, 2 = Weighted, 3 = Round Robin, 4 = iSLIP

OPTIONS:
  --config, -c <path>   TOML run configuration (num_ports, buffer_size,
                        max_packets, burst_probability, weights, seed)
  --seed, -s <u64>      Seed the traffic generator (overrides config)
  --json                Print the final report as JSON as well
  --help, -h            Show this message

ENVIRONMENT:
  RUST_LOG              Log filter (default: info)"#
    );
}
