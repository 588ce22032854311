//! Kernel, host and architecture facts
//!
//! Each fact is gathered on its own; one that cannot be read is left out
//! and the rest are still reported.

use crate::core::{Collector, FactRecord};
use crate::error::Result;
use crate::sysfs::{read_trimmed, SysRoot};

/// `/proc/sys/kernel` files and the fact each one feeds
const KERNEL_FILES: &[(&str, &str)] = &[
    ("sys/kernel/ostype", "kernel_name"),
    ("sys/kernel/osrelease", "kernel_release"),
    ("sys/kernel/version", "kernel_version"),
    ("sys/kernel/hostname", "hostname"),
];

/// Machine identification returned by `uname(2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uname {
    /// Kernel name, e.g. `Linux`
    pub sysname: String,
    /// Hardware name, e.g. `aarch64`
    pub machine: String,
}

impl Uname {
    /// Query the running kernel
    #[cfg(unix)]
    pub fn current() -> Option<Self> {
        use std::ffi::CStr;
        use std::mem::MaybeUninit;

        let mut buf = MaybeUninit::<libc::utsname>::zeroed();
        // SAFETY: uname writes NUL-terminated fields into the buffer on success
        if unsafe { libc::uname(buf.as_mut_ptr()) } != 0 {
            tracing::debug!("uname failed: {}", std::io::Error::last_os_error());
            return None;
        }
        let uts = unsafe { buf.assume_init() };

        let field = |raw: &[libc::c_char]| {
            // SAFETY: the buffer was zeroed and uname terminates every field
            unsafe { CStr::from_ptr(raw.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        };

        Some(Self {
            sysname: field(&uts.sysname[..]),
            machine: field(&uts.machine[..]),
        })
    }

    /// Query the running kernel
    #[cfg(not(unix))]
    pub fn current() -> Option<Self> {
        None
    }
}

/// Gather the platform facts. Never fails; missing sources are skipped.
pub fn collect_platform_facts(root: &SysRoot) -> FactRecord {
    let mut facts = FactRecord::new();

    for (rel, fact) in KERNEL_FILES {
        match read_trimmed(&root.proc_path(rel)) {
            Ok(value) if !value.is_empty() => facts.insert(*fact, value),
            Ok(_) => {}
            Err(e) => tracing::debug!("Skipping {}: {}", fact, e),
        }
    }

    if !facts.contains("hostname") {
        match hostname::get() {
            Ok(name) => facts.insert("hostname", name.to_string_lossy()),
            Err(e) => tracing::debug!("Skipping hostname: {}", e),
        }
    }

    let uname = Uname::current();
    let machine = uname
        .as_ref()
        .map_or_else(|| std::env::consts::ARCH.to_string(), |u| u.machine.clone());
    facts.insert("machine", &machine);
    facts.insert("processor", &machine);
    facts.insert("hardware_platform", &machine);

    if !facts.contains("kernel_name") {
        if let Some(uname) = &uname {
            facts.insert("kernel_name", &uname.sysname);
        }
    }

    let os = if cfg!(target_os = "linux") {
        Some("GNU/Linux".to_string())
    } else {
        facts.get("kernel_name").map(str::to_string)
    };
    if let Some(os) = os {
        facts.insert("os", os);
    }

    facts.insert("target_os", std::env::consts::OS);
    facts.insert("target_arch", std::env::consts::ARCH);
    facts.insert("version", crate::VERSION);

    facts
}

/// The `platform` collector
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCollector;

impl Collector for PlatformCollector {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn collect(&self, root: &SysRoot) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(collect_platform_facts(root))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::fixture::FakeHost;

    #[test]
    fn test_kernel_files_under_root() {
        let host = FakeHost::new();
        host.write("proc/sys/kernel/ostype", "Linux\n")
            .write("proc/sys/kernel/osrelease", "6.1.0-18-arm64\n")
            .write("proc/sys/kernel/version", "#1 SMP Debian 6.1.76-1 (2024-02-01)\n")
            .write("proc/sys/kernel/hostname", "graviton-builder\n");

        let facts = collect_platform_facts(&host.root());
        assert_eq!(facts.get("kernel_name"), Some("Linux"));
        assert_eq!(facts.get("kernel_release"), Some("6.1.0-18-arm64"));
        assert_eq!(facts.get("kernel_version"), Some("#1 SMP Debian 6.1.76-1 (2024-02-01)"));
        assert_eq!(facts.get("hostname"), Some("graviton-builder"));
    }

    #[test]
    fn test_missing_sources_never_fail() {
        let host = FakeHost::new();
        let facts = collect_platform_facts(&host.root());

        assert!(!facts.contains("kernel_release"));
        assert_eq!(facts.get("target_os"), Some(std::env::consts::OS));
        assert_eq!(facts.get("target_arch"), Some(std::env::consts::ARCH));
        assert_eq!(facts.get("version"), Some(crate::VERSION));
        assert!(facts.contains("machine"));
        assert_eq!(facts.get("machine"), facts.get("processor"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_os_name() {
        let host = FakeHost::new();
        let facts = collect_platform_facts(&host.root());
        assert_eq!(facts.get("os"), Some("GNU/Linux"));
    }

    #[cfg(unix)]
    #[test]
    fn test_uname_reports_machine() {
        let uname = Uname::current().unwrap();
        assert!(!uname.sysname.is_empty());
        assert!(!uname.machine.is_empty());
    }

    #[test]
    fn test_collector_output_is_strings() {
        let host = FakeHost::new();
        let value = PlatformCollector.collect(&host.root()).unwrap();
        assert!(value.as_object().unwrap().values().all(|v| v.is_string()));
    }
}
