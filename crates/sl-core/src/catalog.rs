//! Closed selector sets.
//!
//! Every material, lattice or model selector is a plain enum implementing
//! [`Catalog`]. Evaluators match on the enum exhaustively; string ids only
//! appear at the outer boundary (CLI, config files).

use crate::{SlError, SlResult};

pub trait Catalog: Copy + Eq + 'static {
    /// Human-readable name of the selector, used in error messages.
    const KIND: &'static str;
    const ALL: &'static [Self];

    /// Stable identifier, e.g. `gallium_arsenide`.
    fn id(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_id(id: &str) -> SlResult<Self> {
        let query = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|entry| {
                entry.id().eq_ignore_ascii_case(query) || entry.label().eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| SlError::KindNotFound {
                kind: Self::KIND,
                id: id.to_string(),
            })
    }

    fn ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|entry| entry.id()).collect()
    }
}
