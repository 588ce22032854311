//! Configuration module for HostFacts
//!
//! Provides the CLI arguments and the per-run collection settings.

mod settings;

pub use settings::*;
