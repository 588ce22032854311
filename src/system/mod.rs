//! Host facts outside the CPU
//!
//! Memory totals, platform identification, mounted filesystems and network
//! interfaces, each exposed as a [`crate::core::Collector`].

mod filesystem;
mod memory;
mod network;
mod platform;

pub use filesystem::{mounted_filesystems, FilesystemCollector, MountInfo};
pub use memory::{parse_meminfo, MemoryCollector, MemoryInfo};
pub use network::{
    build_network_info, interface_addresses, network_cidr, read_mac_address, AddressEntry,
    InterfaceInfo, NetworkCollector, NetworkInfo,
};
pub use platform::{collect_platform_facts, PlatformCollector, Uname};
