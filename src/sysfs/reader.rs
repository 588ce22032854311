//! Root-relative file reader

use super::parse::{parse_cpu_list, parse_int, parse_size, CpuSet};
use crate::error::{IoResultExt, Result};
use std::path::{Path, PathBuf};

const CPU_DIR: &str = "sys/devices/system/cpu";
const NODE_DIR: &str = "sys/devices/system/node";
const NET_DIR: &str = "sys/class/net";

/// Read a file and return its content with surrounding whitespace removed.
///
/// A missing file is reported as [`crate::HostFactsError::NotFound`], any
/// other failure as [`crate::HostFactsError::Io`]; an empty file is `Ok("")`.
pub fn read_trimmed(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).with_path(path)?;
    Ok(content.trim().to_string())
}

/// Prefix under which `/proc` and `/sys` are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysRoot {
    prefix: PathBuf,
}

impl Default for SysRoot {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SysRoot {
    /// Create a root at the given prefix
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix itself
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Path of a file under `<prefix>/proc`
    pub fn proc_path(&self, rel: &str) -> PathBuf {
        self.prefix.join("proc").join(rel)
    }

    /// Path of an attribute under `<prefix>/sys/devices/system/cpu`
    pub fn cpu_path(&self, rel: &str) -> PathBuf {
        self.prefix.join(CPU_DIR).join(rel)
    }

    /// Directory holding the NUMA `nodeN` entries
    pub fn node_dir(&self) -> PathBuf {
        self.prefix.join(NODE_DIR)
    }

    /// Directory holding one entry per network interface
    pub fn net_dir(&self) -> PathBuf {
        self.prefix.join(NET_DIR)
    }

    /// Read an integer CPU attribute; absent or malformed yields `None`
    pub fn cpu_int(&self, rel: &str) -> Option<u64> {
        self.cpu_attr(rel, parse_int)
    }

    /// Read a K/M/G-suffixed size CPU attribute in bytes
    pub fn cpu_size(&self, rel: &str) -> Option<u64> {
        self.cpu_attr(rel, parse_size)
    }

    /// Read a CPU list attribute
    pub fn cpu_list(&self, rel: &str) -> Option<CpuSet> {
        self.cpu_attr(rel, parse_cpu_list)
    }

    fn cpu_attr<T>(&self, rel: &str, parse: impl FnOnce(&str) -> Result<T>) -> Option<T> {
        let path = self.cpu_path(rel);
        match read_trimmed(&path).and_then(|text| parse(&text)) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::trace!("Skipping attribute {}: {}", rel, e);
                None
            }
        }
    }
}
