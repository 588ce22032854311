//! Mounted filesystems

use crate::core::Collector;
use crate::error::Result;
use crate::sysfs::SysRoot;
use serde::{Deserialize, Serialize};
use sysinfo::Disks;

/// One mounted filesystem. Sizes are KiB rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountInfo {
    /// Device or source name
    pub name: String,
    /// Total size in KiB
    pub kb_size: String,
    /// Mount point
    pub mounted_on: String,
}

impl MountInfo {
    /// Build from a device name, a size in bytes and a mount point
    pub fn new(name: impl Into<String>, total_bytes: u64, mounted_on: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kb_size: (total_bytes / 1024).to_string(),
            mounted_on: mounted_on.into(),
        }
    }
}

/// List the mounted filesystems known to the OS
pub fn mounted_filesystems() -> Vec<MountInfo> {
    let disks = Disks::new_with_refreshed_list();

    disks
        .iter()
        .map(|disk| {
            MountInfo::new(
                disk.name().to_string_lossy(),
                disk.total_space(),
                disk.mount_point().to_string_lossy(),
            )
        })
        .collect()
}

/// The `filesystem` collector.
///
/// The mount table always comes from the running system, not the root prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemCollector;

impl Collector for FilesystemCollector {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn collect(&self, _root: &SysRoot) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(mounted_filesystems())?)
    }
}
