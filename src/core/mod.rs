//! Core collection module
//!
//! Provides the collector interface, collector selection, and the snapshot
//! that runs the selected collectors and assembles their output.

mod collector;
mod facts;
mod snapshot;

pub use collector::*;
pub use facts::*;
pub use snapshot::*;
