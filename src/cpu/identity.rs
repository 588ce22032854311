//! Host-wide CPU identity from the first processor stanza
//!
//! The host is assumed to be homogeneous: vendor, model, family and
//! stepping are taken from the first stanza only. Big.LITTLE and other
//! mixed-core systems therefore report the identity of processor 0.

use super::catalog::CpuIdentity;
use super::keys;
use crate::core::FactRecord;
use crate::sysfs::ProcessorStanza;

/// How identity fields are laid out in the stanza file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// Numeric `CPU implementer` / `CPU part` codes (arm64)
    ImplementerPart,
    /// Descriptive `vendor_id` / `model name` text (x86 and others)
    Descriptive,
}

/// Descriptive stanza keys and the fact each one feeds
const DESCRIPTIVE_FIELDS: &[(&str, &str)] = &[
    ("vendor_id", keys::VENDOR_ID),
    ("model name", keys::MODEL_NAME),
    ("cpu family", keys::FAMILY),
    ("model", keys::MODEL),
    ("stepping", keys::STEPPING),
    ("cpu MHz", keys::MHZ),
];

impl IdentityStrategy {
    /// Pick the strategy matching a stanza
    pub fn detect(stanza: &ProcessorStanza) -> Self {
        if stanza.get("CPU implementer").is_some() {
            Self::ImplementerPart
        } else {
            Self::Descriptive
        }
    }

    /// Write the identity facts found in `stanza` into `facts`
    pub fn apply(self, stanza: &ProcessorStanza, facts: &mut FactRecord) {
        match self {
            Self::ImplementerPart => implementer_part_fields(stanza, facts),
            Self::Descriptive => descriptive_fields(stanza, facts),
        }
    }
}

/// `lscpu`-style stepping, `r<variant>p<revision>`
pub fn stepping(stanza: &ProcessorStanza) -> Option<String> {
    let variant = stanza.get_int("CPU variant")?;
    let revision = stanza.get_int("CPU revision")?;
    Some(format!("r{}p{}", variant, revision))
}

fn implementer_part_fields(stanza: &ProcessorStanza, facts: &mut FactRecord) {
    if let (Some(implementer), Some(part)) = (stanza.get("CPU implementer"), stanza.get("CPU part")) {
        if let Some(identity) = CpuIdentity::resolve(implementer, part) {
            facts.insert(keys::MODEL, part);
            facts.insert(keys::VENDOR_ID, identity.vendor);
            facts.insert(keys::MODEL_NAME, identity.model_name);
        }
    }

    // ARM has no notion of family
    facts.insert(keys::FAMILY, "none");

    if let Some(stepping) = stepping(stanza) {
        facts.insert(keys::STEPPING, stepping);
    }
}

fn descriptive_fields(stanza: &ProcessorStanza, facts: &mut FactRecord) {
    for (stanza_key, fact_key) in DESCRIPTIVE_FIELDS {
        if let Some(value) = stanza.get(stanza_key) {
            facts.insert(*fact_key, value);
        }
    }
}
