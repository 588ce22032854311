//! Physical topology reconstructed from per-processor sysfs attributes
//!
//! Every logical processor reports its own core id, package id and the
//! caches it can use. Shared caches show up identically under each sharer,
//! so a cache is only counted by the lowest-numbered processor that shares
//! it.

use crate::sysfs::{CpuSet, ProcessorStanza, SysRoot};
use std::collections::{BTreeMap, BTreeSet};

/// Cumulative cache bytes per cache level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheLevelTotals {
    levels: BTreeMap<u64, u64>,
}

impl CacheLevelTotals {
    /// Add one physical cache instance of `size` bytes at `level`
    pub fn add(&mut self, level: u64, size: u64) {
        let total = self.levels.entry(level).or_insert(0);
        *total = total.saturating_add(size);
    }

    /// Total bytes at a level (0 when nothing was seen)
    pub fn level(&self, level: u64) -> u64 {
        self.levels.get(&level).copied().unwrap_or(0)
    }

    /// Sum of levels 1 through 3
    pub fn l1_to_l3(&self) -> u64 {
        (1..=3).map(|level| self.level(level)).sum()
    }

    /// Whether any cache was counted
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Distinct core and package identifiers seen across processors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologySets {
    /// Distinct `core_id` values
    pub cores: BTreeSet<u64>,
    /// Distinct `physical_package_id` values
    pub packages: BTreeSet<u64>,
}

impl TopologySets {
    /// Record the core and package ids of one logical processor
    pub fn record(&mut self, root: &SysRoot, cpu: u64) {
        if let Some(core_id) = root.cpu_int(&format!("cpu{}/topology/core_id", cpu)) {
            self.cores.insert(core_id);
        }
        if let Some(package_id) = root.cpu_int(&format!("cpu{}/topology/physical_package_id", cpu)) {
            self.packages.insert(package_id);
        }
    }
}

/// Aggregated host CPU topology
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTopology {
    /// Number of distinct physical cores
    pub cores: usize,
    /// Number of distinct physical packages
    pub packages: usize,
    /// Number of logical processors
    pub logical_processors: usize,
    /// De-duplicated cache sizes per level
    pub caches: CacheLevelTotals,
}

impl CpuTopology {
    /// Levels 1-3 combined, formatted as `"<n> KB"`
    pub fn cache_size_text(&self) -> String {
        format!("{} KB", self.caches.l1_to_l3() / 1024)
    }
}

/// Whether a processor with a lower index than `cpu` shares this cache
/// (and therefore already counted it)
pub fn counted_by_earlier(cpu: u64, shared: &CpuSet) -> bool {
    shared.first().is_some_and(|&lowest| lowest < cpu)
}

/// Walk `cpuN/cache/index0..` for one processor, adding the caches it is
/// the first to report.
///
/// Enumeration stops at the first index without a readable, well-formed
/// `shared_cpu_list`, so levels after a gap in the numbering are not seen.
fn accumulate_caches(root: &SysRoot, cpu: u64, totals: &mut CacheLevelTotals) {
    for index in 0u64.. {
        let base = format!("cpu{}/cache/index{}", cpu, index);

        let Some(shared) = root.cpu_list(&format!("{}/shared_cpu_list", base)) else {
            break;
        };

        if counted_by_earlier(cpu, &shared) {
            continue;
        }

        if let Some(level) = root.cpu_int(&format!("{}/level", base)) {
            if let Some(size) = root.cpu_size(&format!("{}/size", base)) {
                totals.add(level, size);
            }
        }
    }
}

/// Aggregate topology over all processors listed in `stanzas`.
///
/// A processor's sysfs index is its `processor` attribute, or its position
/// when that attribute is missing. Unreadable attributes are skipped.
pub fn aggregate(root: &SysRoot, stanzas: &[ProcessorStanza]) -> CpuTopology {
    let mut sets = TopologySets::default();
    let mut caches = CacheLevelTotals::default();

    for (position, stanza) in stanzas.iter().enumerate() {
        let cpu = stanza.processor_index().unwrap_or(position as u64);
        sets.record(root, cpu);
        accumulate_caches(root, cpu, &mut caches);
    }

    let topology = CpuTopology {
        cores: sets.cores.len(),
        packages: sets.packages.len(),
        logical_processors: stanzas.len(),
        caches,
    };

    tracing::debug!(
        "Topology: {} cores, {} packages, {} logical, caches {:?}",
        topology.cores,
        topology.packages,
        topology.logical_processors,
        topology.caches
    );

    topology
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::fixture::FakeHost;

    fn stanzas(count: u64) -> Vec<ProcessorStanza> {
        (0..count)
            .map(|cpu| [("processor", cpu.to_string())].into_iter().collect())
            .collect()
    }

    #[test]
    fn test_two_threads_one_core() {
        let host = FakeHost::new();
        host.topology(0, 0, 0).topology(1, 0, 0);
        host.cache(0, 0, 1, "32K", "0-1").cache(1, 0, 1, "32K", "0-1");

        let topology = aggregate(&host.root(), &stanzas(2));
        assert_eq!(topology.cores, 1);
        assert_eq!(topology.packages, 1);
        assert_eq!(topology.logical_processors, 2);
        assert_eq!(topology.caches.level(1), 32768);
        assert_eq!(topology.caches.level(2), 0);
    }

    #[test]
    fn test_shared_cache_counted_by_lowest_sharer() {
        let host = FakeHost::new();
        for cpu in 0..5 {
            host.topology(cpu, cpu, 0);
            // private L1 each
            host.cache(cpu, 0, 1, "64K", &cpu.to_string());
        }
        // L2 shared by 2,3,4; cpus 0 and 1 have their own
        host.cache(0, 1, 2, "1M", "0").cache(1, 1, 2, "1M", "1");
        for cpu in 2..5 {
            host.cache(cpu, 1, 2, "1M", "2-4");
        }

        let topology = aggregate(&host.root(), &stanzas(5));
        assert_eq!(topology.cores, 5);
        assert_eq!(topology.caches.level(1), 5 * 64 * 1024);
        assert_eq!(topology.caches.level(2), 3 * 1024 * 1024);
    }

    #[test]
    fn test_counted_by_earlier() {
        let shared = CpuSet::from([2, 3, 4]);
        assert!(!counted_by_earlier(2, &shared));
        assert!(counted_by_earlier(3, &shared));
        assert!(counted_by_earlier(4, &shared));
        assert!(!counted_by_earlier(0, &CpuSet::new()));
    }

    #[test]
    fn test_enumeration_stops_at_gap() {
        let host = FakeHost::new();
        host.cache(0, 0, 1, "32K", "0");
        host.cache(0, 2, 3, "8M", "0");

        let topology = aggregate(&host.root(), &stanzas(1));
        assert_eq!(topology.caches.level(1), 32 * 1024);
        assert_eq!(topology.caches.level(3), 0);
    }

    #[test]
    fn test_malformed_attributes_are_skipped() {
        let host = FakeHost::new();
        host.topology(0, 0, 0);
        host.write("sys/devices/system/cpu/cpu1/topology/core_id", "garbage");
        host.cache(0, 0, 1, "eleventy", "0");
        host.cache(0, 1, 2, "512K", "0");

        let topology = aggregate(&host.root(), &stanzas(2));
        assert_eq!(topology.cores, 1);
        assert_eq!(topology.packages, 1);
        assert_eq!(topology.logical_processors, 2);
        assert_eq!(topology.caches.level(1), 0);
        assert_eq!(topology.caches.level(2), 512 * 1024);
    }

    #[test]
    fn test_missing_tree_yields_counts_without_sets() {
        let host = FakeHost::new();
        let topology = aggregate(&host.root(), &stanzas(4));
        assert_eq!(topology.cores, 0);
        assert_eq!(topology.packages, 0);
        assert_eq!(topology.logical_processors, 4);
        assert!(topology.caches.is_empty());
        assert_eq!(topology.cache_size_text(), "0 KB");
    }

    #[test]
    fn test_position_used_without_processor_attribute() {
        let host = FakeHost::new();
        host.topology(0, 0, 0).topology(1, 1, 0);
        let anonymous = vec![ProcessorStanza::default(), ProcessorStanza::default()];

        let topology = aggregate(&host.root(), &anonymous);
        assert_eq!(topology.cores, 2);
    }

    #[test]
    fn test_cache_size_text() {
        let mut caches = CacheLevelTotals::default();
        caches.add(1, 64 * 1024);
        caches.add(2, 1024 * 1024);
        caches.add(3, 8 * 1024 * 1024);
        caches.add(4, 64 * 1024 * 1024);
        let topology = CpuTopology {
            caches,
            ..Default::default()
        };
        assert_eq!(topology.cache_size_text(), "9280 KB");
    }
}
