//! Memory totals from `/proc/meminfo`

use crate::core::{Collector, FactRecord};
use crate::error::Result;
use crate::sysfs::{read_trimmed, SysRoot};
use serde::{Deserialize, Serialize};

/// `/proc/meminfo` keys and the fact each one feeds
const MEMINFO_FIELDS: &[(&str, &str)] = &[("MemTotal", "total"), ("SwapTotal", "swap_total")];

/// Extract the memory facts from `/proc/meminfo` text.
///
/// Values keep their unit with the space removed, e.g. `16318412kB`.
pub fn parse_meminfo(content: &str) -> FactRecord {
    let mut facts = FactRecord::new();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if let Some((_, fact)) = MEMINFO_FIELDS.iter().find(|(name, _)| *name == key.trim()) {
            facts.insert(*fact, value.split_whitespace().collect::<String>());
        }
    }

    facts
}

/// Memory information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total physical memory in bytes
    pub total: u64,
    /// Swap total in bytes
    pub swap_total: u64,
}

impl MemoryInfo {
    /// Build from a memory fact record. Values that do not parse read as 0.
    pub fn from_facts(facts: &FactRecord) -> Self {
        Self {
            total: kb_to_bytes(facts.get("total")),
            swap_total: kb_to_bytes(facts.get("swap_total")),
        }
    }

    /// Print memory summary to console
    pub fn print_summary(&self) {
        println!("Memory:");
        println!("  Total: {}", humansize::format_size(self.total, humansize::BINARY));
        println!("  Swap: {}", humansize::format_size(self.swap_total, humansize::BINARY));
    }
}

fn kb_to_bytes(value: Option<&str>) -> u64 {
    value
        .map(|v| v.to_ascii_lowercase())
        .and_then(|v| v.trim_end_matches("kb").parse::<u64>().ok())
        .map_or(0, |kb| kb.saturating_mul(1024))
}

/// The `memory` collector
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCollector;

impl Collector for MemoryCollector {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn collect(&self, root: &SysRoot) -> Result<serde_json::Value> {
        let content = read_trimmed(&root.proc_path("meminfo"))?;
        Ok(serde_json::to_value(parse_meminfo(&content))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostFactsError;
    use crate::sysfs::fixture::FakeHost;

    const MEMINFO: &str = "\
MemTotal:       16318412 kB
MemFree:         9871204 kB
MemAvailable:   13425108 kB
SwapCached:            0 kB
SwapTotal:       2097148 kB
SwapFree:        2097148 kB
HugePages_Total:       0
";

    #[test]
    fn test_parse_meminfo() {
        let facts = parse_meminfo(MEMINFO);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts.get("total"), Some("16318412kB"));
        assert_eq!(facts.get("swap_total"), Some("2097148kB"));
    }

    #[test]
    fn test_parse_meminfo_ignores_junk() {
        let facts = parse_meminfo("garbage\nMemTotal: 1024 kB\n\n");
        assert_eq!(facts.get("total"), Some("1024kB"));
        assert!(!facts.contains("swap_total"));
    }

    #[test]
    fn test_memory_info_in_bytes() {
        let info = MemoryInfo::from_facts(&parse_meminfo(MEMINFO));
        assert_eq!(info.total, 16318412 * 1024);
        assert_eq!(info.swap_total, 2097148 * 1024);

        let info = MemoryInfo::from_facts(&parse_meminfo("MemTotal: lots kB\n"));
        assert_eq!(info, MemoryInfo::default());
    }

    #[test]
    fn test_collector_reads_under_root() {
        let host = FakeHost::new();
        host.write("proc/meminfo", MEMINFO);

        let value = MemoryCollector.collect(&host.root()).unwrap();
        assert_eq!(value["total"], serde_json::json!("16318412kB"));
    }

    #[test]
    fn test_collector_missing_file() {
        let host = FakeHost::new();
        let err = MemoryCollector.collect(&host.root()).unwrap_err();
        assert!(matches!(err, HostFactsError::NotFound(_)));
    }
}
