//! HostFacts CLI - Host Hardware and OS Facts
//!
//! Collects a snapshot of the host and prints it as JSON or text.

use clap::Parser;
use hostfacts::config::{CliArgs, CollectConfig, Commands, OutputFormat};
use hostfacts::core::{Snapshot, COLLECTOR_NAMES};
use hostfacts::cpu::{catalog, CpuIdentity};
use hostfacts::error::{HostFactsError, Result};
use hostfacts::sysfs::parse_int;
use std::fs::File;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = init_logging(&args).and_then(|()| run(&args)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Route logs to stderr or `--log-file`. `RUST_LOG` overrides `-v`/`-q`.
fn init_logging(args: &CliArgs) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(args.log_level()).into())
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (&args.log_file, args.log_json) {
        (Some(path), json) => {
            let file = File::create(path).map_err(|e| HostFactsError::io(path, e))?;
            let builder = builder.with_writer(Mutex::new(file)).with_ansi(false);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        (None, true) => builder.with_writer(std::io::stderr).json().init(),
        (None, false) => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

fn run(args: &CliArgs) -> Result<()> {
    // Handle subcommands
    if let Some(command) = &args.command {
        return handle_command(command);
    }

    let config = CollectConfig::from_cli(args)?;
    tracing::info!(
        "Collecting {} from {}",
        config.selection,
        config.root.prefix().display()
    );

    let snapshot = Snapshot::collect(&config);

    match config.format {
        OutputFormat::Json => println!("{}", snapshot.to_json(config.pretty)?),
        OutputFormat::Text => snapshot.print_summary(),
    }

    Ok(())
}

fn handle_command(command: &Commands) -> Result<()> {
    match command {
        Commands::List => {
            cmd_list();
            Ok(())
        }
        Commands::Lookup { implementer, part } => cmd_lookup(implementer, part),
    }
}

fn cmd_list() {
    for name in COLLECTOR_NAMES {
        println!("{}", name);
    }
}

fn cmd_lookup(implementer: &str, part: &str) -> Result<()> {
    let code = parse_int(implementer)?;
    let part_code = parse_int(part)?;

    let identity = CpuIdentity::resolve(implementer, part)
        .ok_or_else(|| HostFactsError::parse(format!("{} {}", implementer, part), "not a CPU code pair"))?;

    let known_part = catalog::implementer(code).and_then(|hw| hw.part_name(part_code));

    println!("Implementer: {:#x} ({})", code, identity.vendor);
    println!("Part:        {:#x} ({})", part_code, identity.model_name);
    if known_part.is_none() {
        println!("Note: part not in catalog");
    }

    Ok(())
}
