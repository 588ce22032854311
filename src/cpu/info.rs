//! Typed view over the CPU fact record

use super::keys;
use crate::core::FactRecord;
use serde::{Deserialize, Serialize};

/// CPU information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Vendor (ARM, Apple, GenuineIntel, ...)
    pub vendor_id: String,
    /// CPU model name
    pub model_name: String,
    /// Family ("none" on ARM)
    pub family: String,
    /// Model (raw part number on ARM)
    pub model: String,
    /// Stepping (`rXpY` on ARM)
    pub stepping: String,
    /// Number of physical cores
    pub cores: u64,
    /// Number of logical processors
    pub logical_processors: u64,
    /// Number of physical packages
    pub packages: u64,
    /// Number of NUMA nodes
    pub numa_nodes: u64,
    /// Levels 1-3 combined, in bytes
    pub cache_size: u64,
    /// L1 cache in bytes
    pub cache_size_l1: u64,
    /// L2 cache in bytes
    pub cache_size_l2: u64,
    /// L3 cache in bytes
    pub cache_size_l3: u64,
    /// Clock frequency in MHz (not exposed on ARM)
    pub mhz: Option<f64>,
}

impl CpuInfo {
    /// Build from a CPU fact record. Numeric facts that do not parse read as 0.
    pub fn from_facts(facts: &FactRecord) -> Self {
        let text = |key: &str| facts.get(key).unwrap_or_default().to_string();
        let number = |key: &str| facts.get_u64(key).unwrap_or(0);

        // cache_size is formatted as "9216 KB"
        let cache_size = facts
            .get(keys::CACHE_SIZE)
            .and_then(|value| value.split(' ').next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| kb.saturating_mul(1024))
            .unwrap_or(0);

        Self {
            vendor_id: text(keys::VENDOR_ID),
            model_name: text(keys::MODEL_NAME),
            family: text(keys::FAMILY),
            model: text(keys::MODEL),
            stepping: text(keys::STEPPING),
            cores: number(keys::CPU_CORES),
            logical_processors: number(keys::CPU_LOGICAL_PROCESSORS),
            packages: number(keys::CPU_PKGS),
            numa_nodes: number(keys::CPU_NUMA_NODES),
            cache_size,
            cache_size_l1: number(keys::CACHE_SIZE_L1),
            cache_size_l2: number(keys::CACHE_SIZE_L2),
            cache_size_l3: number(keys::CACHE_SIZE_L3),
            mhz: facts.get(keys::MHZ).and_then(|v| v.parse().ok()),
        }
    }

    /// Print CPU summary to console
    pub fn print_summary(&self) {
        println!("CPU:");
        println!("  Vendor: {}", self.vendor_id);
        println!("  Model: {} ({})", self.model_name, self.model);
        if !self.stepping.is_empty() {
            println!("  Stepping: {}", self.stepping);
        }
        println!("  Packages: {}", self.packages);
        println!("  Physical cores: {}", self.cores);
        println!("  Logical processors: {}", self.logical_processors);
        println!("  NUMA nodes: {}", self.numa_nodes);
        if let Some(mhz) = self.mhz {
            println!("  Frequency: {:.0} MHz", mhz);
        }
        for (level, size) in [
            ("L1", self.cache_size_l1),
            ("L2", self.cache_size_l2),
            ("L3", self.cache_size_l3),
        ] {
            if size > 0 {
                println!("  {} cache: {}", level, humansize::format_size(size, humansize::BINARY));
            }
        }
    }
}
