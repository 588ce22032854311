//! `/proc/cpuinfo` stanza parsing
//!
//! The file is a sequence of blank-line-separated stanzas, one per logical
//! processor, each a list of `key : value` lines.

use super::parse::parse_int;
use super::reader::SysRoot;
use crate::error::{HostFactsError, IoResultExt, Result};
use std::collections::HashMap;

/// Attributes reported for one logical processor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorStanza {
    attributes: HashMap<String, String>,
}

impl ProcessorStanza {
    /// Record an attribute, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Raw attribute text
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute parsed as a decimal or hex integer
    pub fn get_int(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|value| parse_int(value).ok())
    }

    /// The kernel's logical processor number, when present
    pub fn processor_index(&self) -> Option<u64> {
        self.get_int("processor")
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the stanza holds no attribute
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProcessorStanza {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut stanza = Self::default();
        for (key, value) in iter {
            stanza.insert(key, value);
        }
        stanza
    }
}

/// Split stanza text into per-processor attribute maps
pub fn parse_stanzas(text: &str) -> Vec<ProcessorStanza> {
    let mut stanzas = Vec::new();
    let mut current: Option<ProcessorStanza> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if let Some(stanza) = current.take() {
                stanzas.push(stanza);
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        current
            .get_or_insert_with(ProcessorStanza::default)
            .insert(key.trim(), value.trim());
    }

    if let Some(stanza) = current {
        stanzas.push(stanza);
    }

    stanzas
}

/// Read and parse `<root>/proc/cpuinfo`.
///
/// Fails when the file is unreadable or lists no processor at all. Bytes
/// that are not valid UTF-8 are replaced rather than rejected.
pub fn read_stanzas(root: &SysRoot) -> Result<Vec<ProcessorStanza>> {
    let path = root.proc_path("cpuinfo");
    let bytes = std::fs::read(&path).with_path(&path)?;

    let stanzas = parse_stanzas(&String::from_utf8_lossy(&bytes));
    if stanzas.is_empty() {
        return Err(HostFactsError::NoProcessors(path));
    }

    Ok(stanzas)
}
