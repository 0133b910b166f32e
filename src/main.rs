use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use kicad_hal::{NetList, Translator};

/// Generate a LinuxCNC HAL file from a KiCad netlist
#[derive(Parser, Debug)]
#[command(name = "kicad2hal", version, about, long_about = None)]
struct Cli {
    /// KiCad netlist (.net) exported from Eeschema
    input: PathBuf,

    /// HAL file to write; standard output when omitted
    output: Option<PathBuf>,

    /// Leave out the design metadata comments
    #[arg(long)]
    no_header: bool,

    /// Fail when any net could not be wired cleanly
    #[arg(long)]
    strict: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let netlist = NetList::parse(&input)
        .with_context(|| format!("Failed to parse netlist {}", cli.input.display()))?;
    info!(
        components = netlist.components.len(),
        nets = netlist.nets.len(),
        "netlist loaded"
    );

    let hal = Translator::new()
        .with_header(!cli.no_header)
        .translate(&netlist)
        .with_context(|| format!("Failed to translate {}", cli.input.display()))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, hal.to_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{hal}").context("Failed to write to standard output")?;
        }
    }

    if cli.strict && !hal.warnings().is_empty() {
        bail!("{} net(s) could not be wired cleanly", hal.warnings().len());
    }
    Ok(())
}
