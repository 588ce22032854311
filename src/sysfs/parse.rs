//! Parsers for sysfs attribute text
//!
//! Attribute files hold plain integers (`0`, `0x41`), suffix-scaled sizes
//! (`32K`, `1M`) or CPU lists (`0-3,8-11`).

use crate::error::{HostFactsError, Result};
use std::collections::BTreeSet;

/// Set of logical processor indices
pub type CpuSet = BTreeSet<u64>;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Widest range accepted in a CPU list (the kernel caps NR_CPUS well below this)
const MAX_RANGE_SPAN: u64 = 1 << 20;

/// Parse a decimal or `0x`-prefixed hexadecimal integer
pub fn parse_int(text: &str) -> Result<u64> {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };

    // from_str_radix tolerates a leading '+', sysfs never writes one
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(HostFactsError::parse(text, "not a decimal or 0x-hex integer"));
    }

    u64::from_str_radix(digits, radix).map_err(|e| HostFactsError::parse(text, e.to_string()))
}

/// Parse a size with an optional `K`, `M` or `G` binary suffix into bytes
pub fn parse_size(text: &str) -> Result<u64> {
    let (number, multiplier) = match text.as_bytes().last() {
        Some(b'K') => (&text[..text.len() - 1], KIB),
        Some(b'M') => (&text[..text.len() - 1], MIB),
        Some(b'G') => (&text[..text.len() - 1], GIB),
        Some(_) => (text, 1),
        None => return Err(HostFactsError::parse(text, "empty size")),
    };

    parse_int(number)?
        .checked_mul(multiplier)
        .ok_or_else(|| HostFactsError::parse(text, "size overflows 64 bits"))
}

/// Parse CPU list syntax (e.g., "0-3,8,10-11") into a set of indices.
///
/// An empty list is a valid empty set. A single malformed element rejects
/// the whole list.
///
/// A range spanning `MAX_RANGE_SPAN` (2^20) ids or more is also rejected,
/// even though it is well formed. No kernel reports that many CPUs, and
/// expanding such a range would allocate without bound. A cache whose
/// `shared_cpu_list` is rejected this way ends enumeration for its processor.
pub fn parse_cpu_list(text: &str) -> Result<CpuSet> {
    let text = text.trim();
    let mut cpus = CpuSet::new();

    if text.is_empty() {
        return Ok(cpus);
    }

    for element in text.split(',') {
        match element.split_once('-') {
            Some((first, last)) => {
                let first = parse_int(first)?;
                let last = parse_int(last)?;
                if first > last {
                    return Err(HostFactsError::parse(element, "range end precedes start"));
                }
                if last - first >= MAX_RANGE_SPAN {
                    return Err(HostFactsError::parse(element, "range too wide"));
                }
                cpus.extend(first..=last);
            }
            None => {
                cpus.insert(parse_int(element)?);
            }
        }
    }

    Ok(cpus)
}

/// Render a set in canonical CPU list notation (runs collapsed to ranges)
pub fn format_cpu_list(cpus: &CpuSet) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = cpus.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(",")
}
