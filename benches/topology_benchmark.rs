//! Performance benchmarks for HostFacts
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hostfacts::cpu::{aggregate, collect_cpu_facts};
use hostfacts::sysfs::{parse_cpu_list, parse_stanzas, SysRoot};
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Build an arm64-style tree: private L1/L2 per CPU, one L3 per cluster of 16
fn create_host(cpus: u64) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let mut cpuinfo = String::new();
    for cpu in 0..cpus {
        cpuinfo.push_str(&format!(
            "processor\t: {}\nCPU implementer\t: 0x41\nCPU variant\t: 0x3\nCPU part\t: 0xd0c\nCPU revision\t: 1\n\n",
            cpu
        ));

        let base = format!("sys/devices/system/cpu/cpu{}", cpu);
        write(root, &format!("{}/topology/core_id", base), &cpu.to_string());
        write(root, &format!("{}/topology/physical_package_id", base), "0");

        let cluster = cpu / 16 * 16;
        let caches = [
            (1, "64K", cpu.to_string()),
            (1, "64K", cpu.to_string()),
            (2, "1024K", cpu.to_string()),
            (3, "32768K", format!("{}-{}", cluster, (cluster + 15).min(cpus - 1))),
        ];
        for (index, (level, size, shared)) in caches.iter().enumerate() {
            let cache = format!("{}/cache/index{}", base, index);
            write(root, &format!("{}/level", cache), &level.to_string());
            write(root, &format!("{}/size", cache), size);
            write(root, &format!("{}/shared_cpu_list", cache), shared);
        }
    }
    write(root, "proc/cpuinfo", &cpuinfo);
    std::fs::create_dir_all(root.join("sys/devices/system/node/node0")).unwrap();

    dir
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for cpus in [4u64, 64, 256] {
        let dir = create_host(cpus);
        let root = SysRoot::new(dir.path());
        let text = std::fs::read_to_string(dir.path().join("proc/cpuinfo")).unwrap();
        let stanzas = parse_stanzas(&text);

        group.bench_with_input(BenchmarkId::from_parameter(cpus), &stanzas, |b, stanzas| {
            b.iter(|| black_box(aggregate(&root, stanzas)));
        });
    }

    group.finish();
}

fn bench_collect_cpu_facts(c: &mut Criterion) {
    let dir = create_host(64);
    let root = SysRoot::new(dir.path());

    c.bench_function("collect_cpu_facts_64", |b| {
        b.iter(|| black_box(collect_cpu_facts(&root).unwrap()));
    });
}

fn bench_parse_cpu_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_cpu_list");

    for list in ["0", "0-63", "0-15,32-47,64,66,68-127"] {
        group.bench_with_input(BenchmarkId::from_parameter(list), list, |b, list| {
            b.iter(|| black_box(parse_cpu_list(list).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_collect_cpu_facts,
    bench_parse_cpu_list
);

criterion_main!(benches);
