//! Type-safe identifier for household agents.
//!
//! Households are created one per social-graph node, and the identifier is
//! the node index itself. Keeping the id a plain `u32` (rather than a
//! generated UUID) means a fixed seed reproduces identical exports byte for
//! byte, which the determinism guarantees depend on.

use serde::{Deserialize, Serialize};

/// Unique identifier for a household, equal to its social-graph node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HouseholdId(pub u32);

impl HouseholdId {
    /// Create an identifier from a raw node index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the inner node index.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HouseholdId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<HouseholdId> for u32 {
    fn from(id: HouseholdId) -> Self {
        id.0
    }
}
