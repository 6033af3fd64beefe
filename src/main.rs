use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use pitch_map_core::machines::load_table;
use pitch_map_core::{builtin_machines, MachineSpec, PitchMap, PitchMapBuilder, DEFAULT_INDENT};

#[derive(Parser, Debug)]
#[command(name = "md-pitch-map")]
#[command(about = "Generate Machinedrum note-to-pitch lookup tables", long_about = None)]
struct Args {
    /// JSON machine table to build from (default: the built-in Machinedrum table)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "md_pitch_map.json")]
    output: PathBuf,

    /// Print output to stdout instead of file
    #[arg(long)]
    stdout: bool,

    /// Only build one machine, given as GROUP/NAME (e.g. TRX/BD)
    #[arg(short, long)]
    machine: Option<String>,

    /// How many spaces to use for indentation in the output
    #[arg(short, long, default_value_t = DEFAULT_INDENT)]
    tab_size: usize,

    /// Suppress informational messages (only warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);
    run(&args)
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let specs = load_specs(args.input.as_deref())?;
    let map = build_map(&specs, args.machine.as_deref())?;

    if args.stdout {
        // Print directly to stdout (clean, no logs)
        println!("{}", map.to_json_string(args.tab_size)?);
    } else {
        map.write_json_file(&args.output, args.tab_size)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        tracing::info!(
            "Wrote {} machines to {}",
            map.len(),
            args.output.display()
        );
    }

    Ok(())
}

fn load_specs(input: Option<&Path>) -> Result<Vec<MachineSpec>> {
    match input {
        Some(path) => {
            tracing::info!("Loading machine table: {}", path.display());
            load_table(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(builtin_machines()),
    }
}

fn build_map(specs: &[MachineSpec], machine: Option<&str>) -> Result<PitchMap> {
    let Some(selector) = machine else {
        return PitchMapBuilder::new()
            .build_machine_pitch_map(specs)
            .context("Failed to build pitch map");
    };

    let Some((group, name)) = selector.split_once('/') else {
        anyhow::bail!("Machine must be given as GROUP/NAME, got '{}'", selector);
    };

    let spec = specs
        .iter()
        .find(|spec| spec.group == group && spec.name == name)
        .with_context(|| format!("No machine {} in table", selector))?;

    PitchMapBuilder::for_machine(spec)
        .with_context(|| format!("Failed to build pitch map for {}", selector))
}
