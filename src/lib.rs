//! # HostFacts - Host Hardware and OS Facts
//!
//! HostFacts collects a point-in-time snapshot of the machine it runs on:
//! CPU identity and topology, memory totals, platform identification,
//! mounted filesystems and network interfaces.
//!
//! ## Features
//!
//! - **arm64 CPU Topology**: Cores, packages and logical processors rebuilt
//!   from sysfs, since arm64 `/proc/cpuinfo` carries no counts
//! - **Cache Hierarchy**: L1-L3 totals with shared caches counted once
//! - **Hardware Catalog**: Implementer and part codes resolved to vendor and
//!   core names
//! - **Relocatable Root**: Read `/proc` and `/sys` from a captured tree
//! - **Selectable Collectors**: Run all of them or any subset
//!
//! ## Quick Start
//!
//! ```no_run
//! use hostfacts::config::CollectConfig;
//! use hostfacts::core::Snapshot;
//!
//! let snapshot = Snapshot::collect(&CollectConfig::default());
//! println!("{}", snapshot.to_json(true).unwrap());
//! ```
//!
//! ## CPU Facts from a Captured Tree
//!
//! ```no_run
//! use hostfacts::cpu::{collect_cpu_facts, keys};
//! use hostfacts::sysfs::SysRoot;
//!
//! let facts = collect_cpu_facts(&SysRoot::new("/mnt/capture")).unwrap();
//! println!("{} cores", facts.get(keys::CPU_CORES).unwrap_or("?"));
//! ```
//!
//! ## Hardware Catalog
//!
//! ```
//! use hostfacts::cpu::CpuIdentity;
//!
//! let identity = CpuIdentity::resolve("0x41", "0xd0c").unwrap();
//! assert_eq!(identity.vendor, "ARM");
//! assert_eq!(identity.model_name, "Neoverse-N1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod cpu;
pub mod error;
pub mod sysfs;
pub mod system;

// Re-export commonly used types
pub use config::{CollectConfig, OutputFormat};
pub use core::{Collector, FactRecord, Snapshot};
pub use error::{HostFactsError, Result};
pub use sysfs::SysRoot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use hostfacts::prelude::*;
    //! ```

    pub use crate::config::{CollectConfig, OutputFormat};
    pub use crate::core::{all_collectors, Collector, CollectorSelection, FactRecord, Snapshot};
    pub use crate::cpu::{collect_cpu_facts, CpuCollector, CpuIdentity, CpuInfo};
    pub use crate::error::{HostFactsError, Result};
    pub use crate::sysfs::SysRoot;
    pub use crate::system::{MemoryInfo, MountInfo, NetworkInfo};
}
