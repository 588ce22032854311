//! Point-in-time host snapshot
//!
//! Runs the selected collectors one after another and keys their output by
//! collector name. A collector that fails is logged and left out; the rest
//! of the snapshot is still produced.

use super::collector::{all_collectors, Collector, CollectorSelection};
use super::facts::FactRecord;
use crate::config::CollectConfig;
use crate::cpu::CpuInfo;
use crate::error::Result;
use crate::sysfs::SysRoot;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

/// Collected sections keyed by collector name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    sections: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Run every collector selected by `config`
    pub fn collect(config: &CollectConfig) -> Self {
        Self::collect_with(&all_collectors(), &config.root, &config.selection)
    }

    /// Run the selected subset of `collectors` against `root`
    pub fn collect_with(
        collectors: &[Box<dyn Collector>],
        root: &SysRoot,
        selection: &CollectorSelection,
    ) -> Self {
        let mut sections = BTreeMap::new();

        for collector in collectors.iter().filter(|c| selection.includes(c.name())) {
            let name = collector.name();
            let start = Instant::now();

            match collector.collect(root) {
                Ok(value) => {
                    sections.insert(name.to_string(), value);
                }
                Err(e) => {
                    tracing::warn!("[{}] {}", name, e);
                }
            }

            tracing::debug!("[{}] collected in {:.2?}", name, start.elapsed());
        }

        Self { sections }
    }

    /// A section by collector name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Names of the sections present
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no collector produced output
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Print snapshot summary to console
    pub fn print_summary(&self) {
        println!("=== Host Facts ===");

        for (name, value) in &self.sections {
            println!();
            if name == "cpu" {
                if let Ok(facts) = serde_json::from_value::<FactRecord>(value.clone()) {
                    CpuInfo::from_facts(&facts).print_summary();
                    continue;
                }
            }
            println!("{}:", capitalize(name));
            print_value(value, 1);
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_value(value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}:", indent, key);
                        print_value(value, depth + 1);
                    }
                    _ => println!("{}{}: {}", indent, key, scalar(value)),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}[{}]", indent, i);
                        print_value(item, depth + 1);
                    }
                    _ => println!("{}- {}", indent, scalar(item)),
                }
            }
        }
        _ => println!("{}{}", indent, scalar(value)),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
