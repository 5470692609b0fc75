//! Social-network topology families.
//!
//! The topology names the graph family the network builder generates over
//! the household population. Family-specific parameters (edge probability,
//! edges per node, nearest neighbours) live in the network section of the
//! run configuration.

use serde::{Deserialize, Serialize};

/// Graph family used to connect households.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Erdős–Rényi random graph; every pair is connected independently
    /// with probability `nearest_neighbours / household_count`.
    Random,
    /// Barabási–Albert preferential attachment; each new node attaches
    /// `edges_per_node` edges to already well-connected nodes.
    PreferentialAttachment,
    /// Watts–Strogatz small world; a ring lattice of `nearest_neighbours`
    /// rewired with `connection_probability`.
    SmallWorld,
    /// Nodes only, no edges. Always rejected by validation: every
    /// household would be isolated and the neighbor-average perception
    /// update is undefined without neighbors.
    Disconnected,
}

impl core::fmt::Display for Topology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::PreferentialAttachment => "preferential-attachment",
            Self::SmallWorld => "small-world",
            Self::Disconnected => "disconnected",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trips_kebab_names() {
        for (topology, name) in [
            (Topology::Random, "\"random\""),
            (Topology::PreferentialAttachment, "\"preferential-attachment\""),
            (Topology::SmallWorld, "\"small-world\""),
            (Topology::Disconnected, "\"disconnected\""),
        ] {
            assert_eq!(serde_json::to_string(&topology).unwrap(), name);
            let back: Topology = serde_json::from_str(name).unwrap();
            assert_eq!(back, topology);
        }
    }
}
