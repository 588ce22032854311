//! CPU identity and topology detection
//!
//! Identity (vendor, model, stepping) comes from the first stanza of
//! `/proc/cpuinfo`. Counts and cache sizes are reconstructed from the
//! per-processor attributes under `/sys/devices/system/cpu`, which is the
//! only place arm64 kernels expose them.

pub mod catalog;
mod identity;
mod info;
mod numa;
mod topology;

pub use catalog::{CpuIdentity, HwImplementer, IMPLEMENTERS};
pub use identity::{stepping, IdentityStrategy};
pub use info::CpuInfo;
pub use numa::count_numa_nodes;
pub use topology::{aggregate, counted_by_earlier, CacheLevelTotals, CpuTopology, TopologySets};

use crate::core::{Collector, FactRecord};
use crate::error::Result;
use crate::sysfs::{read_stanzas, SysRoot};

/// Field names of the CPU fact record
pub mod keys {
    #![allow(missing_docs)]

    pub const VENDOR_ID: &str = "vendor_id";
    pub const MODEL_NAME: &str = "model_name";
    pub const FAMILY: &str = "family";
    pub const MODEL: &str = "model";
    pub const STEPPING: &str = "stepping";
    pub const MHZ: &str = "mhz";
    pub const CPU_CORES: &str = "cpu_cores";
    pub const CPU_LOGICAL_PROCESSORS: &str = "cpu_logical_processors";
    pub const CPU_PKGS: &str = "cpu_pkgs";
    pub const CPU_NUMA_NODES: &str = "cpu_numa_nodes";
    pub const CACHE_SIZE: &str = "cache_size";
    pub const CACHE_SIZE_L1: &str = "cache_size_l1";
    pub const CACHE_SIZE_L2: &str = "cache_size_l2";
    pub const CACHE_SIZE_L3: &str = "cache_size_l3";
}

/// Collect the CPU fact record from the stanza file and sysfs tree.
///
/// Fails only when the stanza file is missing, unreadable or empty.
pub fn collect_cpu_facts(root: &SysRoot) -> Result<FactRecord> {
    let stanzas = read_stanzas(root)?;
    let first = &stanzas[0];

    let mut facts = FactRecord::new();
    let strategy = IdentityStrategy::detect(first);
    strategy.apply(first, &mut facts);

    let topology = aggregate(root, &stanzas);
    facts.insert(keys::CPU_PKGS, topology.packages);
    facts.insert(keys::CPU_CORES, topology.cores);
    facts.insert(keys::CPU_LOGICAL_PROCESSORS, topology.logical_processors);
    facts.insert(keys::CACHE_SIZE_L1, topology.caches.level(1));
    facts.insert(keys::CACHE_SIZE_L2, topology.caches.level(2));
    facts.insert(keys::CACHE_SIZE_L3, topology.caches.level(3));

    let stanza_cache = first.get("cache size");
    match (strategy, stanza_cache) {
        (IdentityStrategy::Descriptive, Some(text)) if topology.caches.is_empty() => {
            facts.insert(keys::CACHE_SIZE, text);
        }
        _ => facts.insert(keys::CACHE_SIZE, topology.cache_size_text()),
    }

    facts.insert(keys::CPU_NUMA_NODES, count_numa_nodes(root));

    Ok(facts)
}

/// Identity and counts from `sysinfo`/`num_cpus`, for systems without a
/// stanza file
fn fallback_cpu_facts() -> FactRecord {
    let mut sys = sysinfo::System::new_all();
    sys.refresh_all();

    let mut facts = FactRecord::new();
    if let Some(cpu) = sys.cpus().first() {
        facts.insert(keys::VENDOR_ID, cpu.vendor_id());
        facts.insert(keys::MODEL_NAME, cpu.brand());
        facts.insert(keys::MHZ, cpu.frequency());
    }
    facts.insert(keys::CPU_CORES, num_cpus::get_physical());
    facts.insert(keys::CPU_LOGICAL_PROCESSORS, num_cpus::get());
    facts
}

/// The `cpu` collector
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuCollector;

impl Collector for CpuCollector {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn collect(&self, root: &SysRoot) -> Result<serde_json::Value> {
        let facts = match collect_cpu_facts(root) {
            Ok(facts) => facts,
            Err(e) if e.is_not_found() && !cfg!(target_os = "linux") => {
                tracing::debug!("{}; using sysinfo fallback", e);
                fallback_cpu_facts()
            }
            Err(e) => return Err(e),
        };
        Ok(serde_json::to_value(facts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostFactsError;
    use crate::sysfs::fixture::FakeHost;

    const GRAVITON_CPUINFO: &str = "\
processor\t: 0
BogoMIPS\t: 243.75
Features\t: fp asimd evtstrm aes pmull sha1 sha2 crc32 atomics fphp asimdhp cpuid asimdrdm lrcpc dcpop asimddp ssbs
CPU implementer\t: 0x41
CPU architecture: 8
CPU variant\t: 0x3
CPU part\t: 0xd0c
CPU revision\t: 1

processor\t: 1
BogoMIPS\t: 243.75
Features\t: fp asimd evtstrm aes pmull sha1 sha2 crc32 atomics fphp asimdhp cpuid asimdrdm lrcpc dcpop asimddp ssbs
CPU implementer\t: 0x41
CPU architecture: 8
CPU variant\t: 0x3
CPU part\t: 0xd0c
CPU revision\t: 1
";

    fn graviton_host() -> FakeHost {
        let host = FakeHost::new();
        host.cpuinfo(GRAVITON_CPUINFO);
        for cpu in 0..2 {
            host.topology(cpu, cpu, 0);
            host.cache(cpu, 0, 1, "64K", &cpu.to_string());
            host.cache(cpu, 1, 1, "64K", &cpu.to_string());
            host.cache(cpu, 2, 2, "1024K", &cpu.to_string());
            host.cache(cpu, 3, 3, "32768K", "0-1");
        }
        host.mkdir("sys/devices/system/node/node0");
        host
    }

    #[test]
    fn test_arm64_fact_record() {
        let host = graviton_host();
        let facts = collect_cpu_facts(&host.root()).unwrap();

        assert_eq!(facts.get(keys::VENDOR_ID), Some("ARM"));
        assert_eq!(facts.get(keys::MODEL_NAME), Some("Neoverse-N1"));
        assert_eq!(facts.get(keys::MODEL), Some("0xd0c"));
        assert_eq!(facts.get(keys::FAMILY), Some("none"));
        assert_eq!(facts.get(keys::STEPPING), Some("r3p1"));
        assert_eq!(facts.get(keys::CPU_CORES), Some("2"));
        assert_eq!(facts.get(keys::CPU_LOGICAL_PROCESSORS), Some("2"));
        assert_eq!(facts.get(keys::CPU_PKGS), Some("1"));
        assert_eq!(facts.get(keys::CPU_NUMA_NODES), Some("1"));
        assert_eq!(facts.get(keys::CACHE_SIZE_L1), Some("262144"));
        assert_eq!(facts.get(keys::CACHE_SIZE_L2), Some("2097152"));
        assert_eq!(facts.get(keys::CACHE_SIZE_L3), Some("33554432"));
        // 256K + 2M + 32M
        assert_eq!(facts.get(keys::CACHE_SIZE), Some("35072 KB"));
        assert!(!facts.contains(keys::MHZ));
    }

    #[test]
    fn test_two_logical_processors_sharing_one_core() {
        let host = FakeHost::new();
        host.cpuinfo("processor : 0\nCPU implementer : 0x41\nCPU part : 0xd08\n\nprocessor : 1\nCPU implementer : 0x41\nCPU part : 0xd08\n");
        host.topology(0, 0, 0).topology(1, 0, 0);
        host.cache(0, 0, 1, "32K", "0-1").cache(1, 0, 1, "32K", "0-1");

        let facts = collect_cpu_facts(&host.root()).unwrap();
        assert_eq!(facts.get(keys::CPU_CORES), Some("1"));
        assert_eq!(facts.get(keys::CPU_PKGS), Some("1"));
        assert_eq!(facts.get(keys::CPU_LOGICAL_PROCESSORS), Some("2"));
        assert_eq!(facts.get(keys::CACHE_SIZE_L1), Some("32768"));
        assert_eq!(facts.get(keys::CPU_NUMA_NODES), Some("0"));
        assert_eq!(facts.get(keys::MODEL_NAME), Some("Cortex-A72"));
        assert!(!facts.contains(keys::STEPPING));
    }

    #[test]
    fn test_descriptive_cache_size_fallback() {
        let host = FakeHost::new();
        host.cpuinfo("processor : 0\nvendor_id : GenuineIntel\nmodel name : Test CPU\ncpu MHz : 2400.000\ncache size : 36608 KB\n");

        let facts = collect_cpu_facts(&host.root()).unwrap();
        assert_eq!(facts.get(keys::VENDOR_ID), Some("GenuineIntel"));
        assert_eq!(facts.get(keys::MHZ), Some("2400.000"));
        assert_eq!(facts.get(keys::CACHE_SIZE), Some("36608 KB"));
        assert_eq!(facts.get(keys::CPU_LOGICAL_PROCESSORS), Some("1"));
    }

    #[test]
    fn test_descriptive_prefers_sysfs_caches() {
        let host = FakeHost::new();
        host.cpuinfo("processor : 0\nvendor_id : GenuineIntel\ncache size : 36608 KB\n");
        host.cache(0, 0, 1, "48K", "0").cache(0, 1, 2, "2048K", "0");

        let facts = collect_cpu_facts(&host.root()).unwrap();
        assert_eq!(facts.get(keys::CACHE_SIZE), Some("2096 KB"));
    }

    #[test]
    fn test_missing_stanza_file_is_fatal() {
        let host = FakeHost::new();
        let err = collect_cpu_facts(&host.root()).unwrap_err();
        assert!(matches!(err, HostFactsError::NotFound(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_collector_reports_missing_stanza_file() {
        let host = FakeHost::new();
        assert!(CpuCollector.collect(&host.root()).is_err());
    }

    #[test]
    fn test_collector_emits_string_values() {
        let host = graviton_host();
        let value = CpuCollector.collect(&host.root()).unwrap();
        assert_eq!(value["cpu_cores"], serde_json::json!("2"));
        assert_eq!(value["vendor_id"], serde_json::json!("ARM"));
        assert!(value.as_object().unwrap().values().all(|v| v.is_string()));
    }
}
