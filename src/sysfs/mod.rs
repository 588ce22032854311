//! Raw access to the kernel's flat-file fact sources
//!
//! Everything here is rooted at a configurable prefix ([`SysRoot`]) so that
//! collectors can be pointed at a synthetic tree instead of the live `/proc`
//! and `/sys` hierarchies.

mod parse;
mod reader;
mod stanza;

#[cfg(test)]
pub(crate) mod fixture;

pub use parse::{format_cpu_list, parse_cpu_list, parse_int, parse_size, CpuSet};
pub use reader::{read_trimmed, SysRoot};
pub use stanza::{parse_stanzas, read_stanzas, ProcessorStanza};
