//! Synthetic `/proc` + `/sys` trees for tests

use super::reader::SysRoot;
use tempfile::TempDir;

pub(crate) struct FakeHost {
    dir: TempDir,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub(crate) fn root(&self) -> SysRoot {
        SysRoot::new(self.dir.path())
    }

    pub(crate) fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub(crate) fn mkdir(&self, rel: &str) -> &Self {
        std::fs::create_dir_all(self.dir.path().join(rel)).unwrap();
        self
    }

    pub(crate) fn cpuinfo(&self, content: &str) -> &Self {
        self.write("proc/cpuinfo", content)
    }

    pub(crate) fn topology(&self, cpu: u64, core_id: u64, package_id: u64) -> &Self {
        let base = format!("sys/devices/system/cpu/cpu{}/topology", cpu);
        self.write(&format!("{}/core_id", base), &format!("{}\n", core_id));
        self.write(&format!("{}/physical_package_id", base), &format!("{}\n", package_id))
    }

    pub(crate) fn cache(&self, cpu: u64, index: u64, level: u64, size: &str, shared: &str) -> &Self {
        let base = format!("sys/devices/system/cpu/cpu{}/cache/index{}", cpu, index);
        self.write(&format!("{}/level", base), &format!("{}\n", level));
        self.write(&format!("{}/size", base), &format!("{}\n", size));
        self.write(&format!("{}/shared_cpu_list", base), &format!("{}\n", shared))
    }
}
