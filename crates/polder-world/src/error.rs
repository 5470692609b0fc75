//! Error types for the `polder-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias. Every variant is a pre-run rejection:
//! once a world builds and validates, its queries are infallible.

use polder_types::{HouseholdId, Topology};

/// Errors that can occur while building the world or the social network.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The run was configured with zero households.
    #[error("household count must be positive")]
    EmptyPopulation,

    /// A generated network left a household with no neighbors, which makes
    /// the neighbor-average perception update undefined.
    #[error("household {household} has no neighbors under topology {topology}")]
    IsolatedHousehold {
        /// The isolated household.
        household: HouseholdId,
        /// The topology that produced the degenerate graph.
        topology: Topology,
    },

    /// A probability parameter fell outside [0, 1].
    #[error("probability {value} is outside [0, 1]")]
    InvalidProbability {
        /// The offending value.
        value: f64,
    },

    /// The small-world lattice needs more households than nearest
    /// neighbours.
    #[error(
        "small-world topology needs household count ({households}) > nearest neighbours ({nearest_neighbours}), with at least 2 neighbours"
    )]
    SmallWorldDegree {
        /// Configured household count.
        households: u32,
        /// Configured nearest-neighbour count.
        nearest_neighbours: u32,
    },

    /// Preferential attachment needs more households than edges per node.
    #[error(
        "preferential-attachment topology needs household count ({households}) > edges per node ({edges_per_node}), with at least 1 edge"
    )]
    AttachmentDegree {
        /// Configured household count.
        households: u32,
        /// Configured edges-per-node count.
        edges_per_node: u32,
    },

    /// The flood surface was configured with a zero-area or oversized grid.
    #[error("flood surface grid {width}x{height} is empty or too large")]
    InvalidSurfaceGrid {
        /// Configured grid width in cells.
        width: u32,
        /// Configured grid height in cells.
        height: u32,
    },
}
