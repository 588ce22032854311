//! NUMA node counting

use crate::sysfs::SysRoot;

/// Whether a directory name is `node` followed by one or more digits
fn is_node_name(name: &str) -> bool {
    name.strip_prefix("node")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Count `nodeN` directories under `/sys/devices/system/node`.
///
/// A missing or unreadable directory counts as zero nodes.
pub fn count_numa_nodes(root: &SysRoot) -> usize {
    let node_dir = root.node_dir();

    let entries = match std::fs::read_dir(&node_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::trace!("No NUMA information at {}: {}", node_dir.display(), e);
            return 0;
        }
    };

    entries
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| is_node_name(&entry.file_name().to_string_lossy()))
        .count()
}
