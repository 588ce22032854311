//! Configuration settings for HostFacts
//!
//! Defines the CLI arguments and the collection settings derived from them.

use crate::core::CollectorSelection;
use crate::error::{HostFactsError, Result};
use crate::sysfs::SysRoot;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// HostFacts - Snapshot of host hardware and OS facts
#[derive(Parser, Debug, Clone)]
#[command(name = "hostfacts")]
#[command(author = "HostFacts Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect CPU, memory, platform, filesystem and network facts")]
#[command(long_about = r#"
HostFacts gathers a point-in-time description of the host and prints it as
JSON (or text). On arm64 Linux the CPU topology and cache sizes are
reconstructed from sysfs.

Examples:
  hostfacts                                # All collectors, JSON
  hostfacts --only cpu --pretty            # CPU facts only
  hostfacts --root /mnt/capture --only cpu # Read a captured /proc + /sys
  hostfacts lookup 0x41 0xd0c              # Query the hardware catalog
"#)]
pub struct CliArgs {
    /// Prefix under which /proc and /sys are read
    #[arg(long, env = "HOSTFACTS_ROOT", default_value = "/", value_name = "PATH")]
    pub root: PathBuf,

    /// Run only these collectors (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub only: Vec<String>,

    /// Skip these collectors (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the available collectors
    #[command(name = "list")]
    List,

    /// Look up a CPU implementer and part in the hardware catalog
    #[command(name = "lookup")]
    Lookup {
        /// Implementer code (decimal or 0x-prefixed hex)
        implementer: String,
        /// Part number (decimal or 0x-prefixed hex)
        part: String,
    },
}

/// Output format for the snapshot
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON document keyed by collector
    #[default]
    Json,
    /// Human-readable text
    Text,
}

impl CliArgs {
    /// Log level implied by `-v` / `-q`
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Settings for one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectConfig {
    /// Where `/proc` and `/sys` live
    pub root: SysRoot,
    /// Collectors to run
    pub selection: CollectorSelection,
    /// Output format
    pub format: OutputFormat,
    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            root: SysRoot::default(),
            selection: CollectorSelection::all(),
            format: OutputFormat::Json,
            pretty: false,
        }
    }
}

impl CollectConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let selection = CollectorSelection::new(&args.only, &args.exclude)?;
        if selection.names().is_empty() {
            return Err(HostFactsError::config("--only and --exclude leave no collector to run"));
        }

        Ok(Self {
            root: SysRoot::new(&args.root),
            selection,
            format: args.format,
            pretty: args.pretty,
        })
    }
}
