//! Collector interface and selection

use crate::cpu::CpuCollector;
use crate::error::{HostFactsError, Result};
use crate::sysfs::SysRoot;
use crate::system::{FilesystemCollector, MemoryCollector, NetworkCollector, PlatformCollector};
use std::collections::BTreeSet;
use std::fmt;

/// A source of one snapshot section
pub trait Collector {
    /// Section name in the snapshot
    fn name(&self) -> &'static str;

    /// Gather the section. An error drops the section, not the snapshot.
    fn collect(&self, root: &SysRoot) -> Result<serde_json::Value>;
}

/// Names of every registered collector, in output order
pub const COLLECTOR_NAMES: &[&str] = &["cpu", "filesystem", "memory", "network", "platform"];

/// Every registered collector, in output order
pub fn all_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(CpuCollector),
        Box::new(FilesystemCollector),
        Box::new(MemoryCollector),
        Box::new(NetworkCollector),
        Box::new(PlatformCollector),
    ]
}

/// Which collectors to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorSelection {
    only: Option<BTreeSet<String>>,
    exclude: BTreeSet<String>,
}

impl CollectorSelection {
    /// Select every collector
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a selection from `--only` and `--exclude` lists.
    ///
    /// An empty `only` list means "all". Unknown names are rejected.
    pub fn new(only: &[String], exclude: &[String]) -> Result<Self> {
        for name in only.iter().chain(exclude) {
            if !COLLECTOR_NAMES.contains(&name.as_str()) {
                return Err(HostFactsError::UnknownCollector(name.clone()));
            }
        }

        Ok(Self {
            only: (!only.is_empty()).then(|| only.iter().cloned().collect()),
            exclude: exclude.iter().cloned().collect(),
        })
    }

    /// Whether the named collector should run
    pub fn includes(&self, name: &str) -> bool {
        let wanted = self.only.as_ref().map_or(true, |only| only.contains(name));
        wanted && !self.exclude.contains(name)
    }

    /// Names of the selected collectors, in output order
    pub fn names(&self) -> Vec<&'static str> {
        COLLECTOR_NAMES
            .iter()
            .copied()
            .filter(|name| self.includes(name))
            .collect()
    }
}

impl fmt::Display for CollectorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(" "))
    }
}
