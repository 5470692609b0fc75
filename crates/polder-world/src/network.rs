//! Social network over the household population.
//!
//! The [`SocialGraph`] is an undirected graph whose nodes are household
//! identifiers and whose edges carry social influence: each household's
//! political perception is blended with the mean perception of its
//! neighbors every period. Adjacency is stored per household as a sorted
//! neighbor list keyed by id, so iteration order is independent of the
//! order in which edges were generated.
//!
//! Four topology families are supported, mirroring the standard generators
//! for each family:
//!
//! - **random**: Erdős–Rényi with edge probability
//!   `nearest_neighbours / household_count` (expected degree close to the
//!   configured neighbour count)
//! - **preferential-attachment**: Barabási–Albert, `edges_per_node` edges
//!   from each newly attached node
//! - **small-world**: Watts–Strogatz ring lattice with
//!   `nearest_neighbours / 2` links on each side, rewired with
//!   `connection_probability`
//! - **disconnected**: nodes only
//!
//! Generation draws exclusively from the caller's RNG so a fixed run seed
//! reproduces the same graph. [`SocialGraph::validate`] rejects any graph
//! with an isolated household before the simulation starts; the
//! neighbor-average update has no defined value for a household with no
//! neighbors, and no fallback is invented.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use polder_types::{HouseholdId, Topology};

use crate::error::WorldError;

/// Topology family and family-specific generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Graph family to generate.
    #[serde(default = "default_topology")]
    pub topology: Topology,
    /// Rewiring probability for the small-world family.
    #[serde(default = "default_connection_probability")]
    pub connection_probability: f64,
    /// Edges attached per new node for the preferential-attachment family.
    #[serde(default = "default_edges_per_node")]
    pub edges_per_node: u32,
    /// Ring-lattice neighbour count for the small-world family; also sets
    /// the expected degree of the random family.
    #[serde(default = "default_nearest_neighbours")]
    pub nearest_neighbours: u32,
}

const fn default_topology() -> Topology {
    Topology::SmallWorld
}

const fn default_connection_probability() -> f64 {
    0.4
}

const fn default_edges_per_node() -> u32 {
    3
}

const fn default_nearest_neighbours() -> u32 {
    5
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            topology: default_topology(),
            connection_probability: default_connection_probability(),
            edges_per_node: default_edges_per_node(),
            nearest_neighbours: default_nearest_neighbours(),
        }
    }
}

/// Undirected social graph over household identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialGraph {
    /// Sorted neighbor lists keyed by household id.
    adjacency: BTreeMap<HouseholdId, Vec<HouseholdId>>,
    /// Topology family this graph was generated from.
    topology: Topology,
}

impl SocialGraph {
    /// Generate a graph over `household_count` nodes with the given
    /// parameters, drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyPopulation`] for a zero household count,
    /// [`WorldError::InvalidProbability`] for an out-of-range rewiring
    /// probability, and the family-specific degree errors when the
    /// parameters cannot produce a graph of the requested size.
    pub fn generate(
        household_count: u32,
        params: &NetworkParams,
        rng: &mut impl Rng,
    ) -> Result<Self, WorldError> {
        if household_count == 0 {
            return Err(WorldError::EmptyPopulation);
        }

        let edges = match params.topology {
            Topology::Random => {
                let probability =
                    f64::from(params.nearest_neighbours) / f64::from(household_count);
                generate_random(household_count, probability.clamp(0.0, 1.0), rng)
            }
            Topology::PreferentialAttachment => {
                generate_preferential(household_count, params.edges_per_node, rng)?
            }
            Topology::SmallWorld => generate_small_world(
                household_count,
                params.nearest_neighbours,
                params.connection_probability,
                rng,
            )?,
            Topology::Disconnected => BTreeSet::new(),
        };

        debug!(
            topology = %params.topology,
            households = household_count,
            edges = edges.len(),
            "Social graph generated"
        );

        Ok(Self::from_edges(household_count, &edges, params.topology))
    }

    /// Build a graph from an explicit edge set. Used by the generators and
    /// by tests that need a hand-crafted graph.
    pub fn from_edges(
        household_count: u32,
        edges: &BTreeSet<(u32, u32)>,
        topology: Topology,
    ) -> Self {
        let mut adjacency: BTreeMap<HouseholdId, Vec<HouseholdId>> = BTreeMap::new();
        for node in 0..household_count {
            adjacency.insert(HouseholdId::new(node), Vec::new());
        }
        for &(a, b) in edges {
            if a < household_count && b < household_count && a != b {
                if let Some(neighbors) = adjacency.get_mut(&HouseholdId::new(a)) {
                    neighbors.push(HouseholdId::new(b));
                }
                if let Some(neighbors) = adjacency.get_mut(&HouseholdId::new(b)) {
                    neighbors.push(HouseholdId::new(a));
                }
            }
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Self {
            adjacency,
            topology,
        }
    }

    /// Reject the graph if any household ended up with no neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IsolatedHousehold`] naming the first isolated
    /// household in id order.
    pub fn validate(&self) -> Result<(), WorldError> {
        for (id, neighbors) in &self.adjacency {
            if neighbors.is_empty() {
                return Err(WorldError::IsolatedHousehold {
                    household: *id,
                    topology: self.topology,
                });
            }
        }
        Ok(())
    }

    /// Number of households in the graph.
    pub fn household_count(&self) -> u32 {
        u32::try_from(self.adjacency.len()).unwrap_or(u32::MAX)
    }

    /// Iterate over all household ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = HouseholdId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of the given household, sorted by id. Unknown ids have no
    /// neighbors.
    pub fn neighbors(&self, id: HouseholdId) -> &[HouseholdId] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Degree of the given household.
    pub fn degree(&self, id: HouseholdId) -> u32 {
        u32::try_from(self.neighbors(id).len()).unwrap_or(u32::MAX)
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> u32 {
        let endpoint_sum: usize = self.adjacency.values().map(Vec::len).sum();
        u32::try_from(endpoint_sum / 2).unwrap_or(u32::MAX)
    }

    /// Topology family this graph was generated from.
    pub const fn topology(&self) -> Topology {
        self.topology
    }
}

/// Normalize an edge so the smaller index comes first.
const fn edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Erdős–Rényi: every pair connected independently with `probability`.
fn generate_random(n: u32, probability: f64, rng: &mut impl Rng) -> BTreeSet<(u32, u32)> {
    let mut edges = BTreeSet::new();
    for a in 0..n {
        for b in a.saturating_add(1)..n {
            if rng.random_bool(probability) {
                edges.insert(edge(a, b));
            }
        }
    }
    edges
}

/// Barabási–Albert: each node after the first `m` attaches `m` edges,
/// preferring already well-connected targets.
fn generate_preferential(
    n: u32,
    m: u32,
    rng: &mut impl Rng,
) -> Result<BTreeSet<(u32, u32)>, WorldError> {
    if m == 0 || m >= n {
        return Err(WorldError::AttachmentDegree {
            households: n,
            edges_per_node: m,
        });
    }

    let mut edges = BTreeSet::new();
    // Attachment targets for the next node; seeded with the first m nodes.
    let mut targets: Vec<u32> = (0..m).collect();
    // Every edge endpoint, repeated; sampling from this list weights
    // targets by their current degree.
    let mut repeated_endpoints: Vec<u32> = Vec::new();

    for source in m..n {
        for &target in &targets {
            edges.insert(edge(source, target));
            repeated_endpoints.push(target);
            repeated_endpoints.push(source);
        }
        targets = sample_distinct(&repeated_endpoints, m, rng);
    }

    Ok(edges)
}

/// Draw `count` distinct values from `pool`, degree-weighted by
/// multiplicity.
fn sample_distinct(pool: &[u32], count: u32, rng: &mut impl Rng) -> Vec<u32> {
    let mut picked = BTreeSet::new();
    let wanted = usize::try_from(count).unwrap_or(usize::MAX);
    if pool.is_empty() {
        return Vec::new();
    }
    // The pool holds at least `count` distinct values by construction, so
    // this loop terminates.
    while picked.len() < wanted {
        let index = rng.random_range(0..pool.len());
        if let Some(value) = pool.get(index) {
            picked.insert(*value);
        }
    }
    picked.into_iter().collect()
}

/// Watts–Strogatz: ring lattice with `k / 2` neighbors on each side, each
/// clockwise lattice edge rewired with probability `p`.
fn generate_small_world(
    n: u32,
    k: u32,
    p: f64,
    rng: &mut impl Rng,
) -> Result<BTreeSet<(u32, u32)>, WorldError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(WorldError::InvalidProbability { value: p });
    }
    let half = k / 2;
    if half == 0 || k >= n {
        return Err(WorldError::SmallWorldDegree {
            households: n,
            nearest_neighbours: k,
        });
    }

    let mut edges = BTreeSet::new();
    let mut degrees: BTreeMap<u32, u32> = (0..n).map(|node| (node, 0)).collect();
    let add_edge = |edges: &mut BTreeSet<(u32, u32)>,
                        degrees: &mut BTreeMap<u32, u32>,
                        a: u32,
                        b: u32| {
        if edges.insert(edge(a, b)) {
            if let Some(d) = degrees.get_mut(&a) {
                *d = d.saturating_add(1);
            }
            if let Some(d) = degrees.get_mut(&b) {
                *d = d.saturating_add(1);
            }
        }
    };

    for offset in 1..=half {
        for node in 0..n {
            let neighbor = node.wrapping_add(offset).checked_rem(n).unwrap_or(0);
            add_edge(&mut edges, &mut degrees, node, neighbor);
        }
    }

    // Rewire each clockwise lattice edge with probability p, keeping the
    // near endpoint and moving the far one to a uniformly random node.
    let max_degree = n.saturating_sub(1);
    for offset in 1..=half {
        for node in 0..n {
            if !rng.random_bool(p) {
                continue;
            }
            if degrees.get(&node).copied().unwrap_or(0) >= max_degree {
                // Already connected to everyone; nothing to rewire to.
                continue;
            }
            let old_neighbor = node.wrapping_add(offset).checked_rem(n).unwrap_or(0);
            let mut new_neighbor = rng.random_range(0..n);
            while new_neighbor == node || edges.contains(&edge(node, new_neighbor)) {
                new_neighbor = rng.random_range(0..n);
            }
            if edges.remove(&edge(node, old_neighbor)) {
                if let Some(d) = degrees.get_mut(&node) {
                    *d = d.saturating_sub(1);
                }
                if let Some(d) = degrees.get_mut(&old_neighbor) {
                    *d = d.saturating_sub(1);
                }
            }
            add_edge(&mut edges, &mut degrees, node, new_neighbor);
        }
    }

    Ok(edges)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn params(topology: Topology) -> NetworkParams {
        NetworkParams {
            topology,
            ..NetworkParams::default()
        }
    }

    #[test]
    fn small_world_keeps_minimum_degree() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let graph =
            SocialGraph::generate(50, &params(Topology::SmallWorld), &mut rng).unwrap();
        graph.validate().unwrap();
        for id in graph.ids() {
            // Each node keeps its k/2 outgoing lattice edges even when
            // every one of them is rewired.
            assert!(graph.degree(id) >= 2, "household {id} degree too low");
        }
    }

    #[test]
    fn small_world_matches_lattice_edge_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let graph =
            SocialGraph::generate(50, &params(Topology::SmallWorld), &mut rng).unwrap();
        // Rewiring moves edges but never changes their number: n * (k/2).
        assert_eq!(graph.edge_count(), 100);
    }

    #[test]
    fn preferential_attachment_adds_m_edges_per_node() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let graph =
            SocialGraph::generate(40, &params(Topology::PreferentialAttachment), &mut rng)
                .unwrap();
        graph.validate().unwrap();
        // (n - m) joining nodes with m distinct edges each.
        assert_eq!(graph.edge_count(), 111);
    }

    #[test]
    fn disconnected_graph_fails_validation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let graph =
            SocialGraph::generate(10, &params(Topology::Disconnected), &mut rng).unwrap();
        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            WorldError::IsolatedHousehold {
                household: HouseholdId(0),
                topology: Topology::Disconnected,
            }
        ));
    }

    #[test]
    fn zero_households_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = SocialGraph::generate(0, &params(Topology::Random), &mut rng).unwrap_err();
        assert!(matches!(err, WorldError::EmptyPopulation));
    }

    #[test]
    fn small_world_needs_more_households_than_neighbours() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = SocialGraph::generate(5, &params(Topology::SmallWorld), &mut rng).unwrap_err();
        assert!(matches!(err, WorldError::SmallWorldDegree { .. }));
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_seed() {
        let make = || {
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            SocialGraph::generate(30, &params(Topology::SmallWorld), &mut rng).unwrap()
        };
        let a = make();
        let b = make();
        for id in a.ids() {
            assert_eq!(a.neighbors(id), b.neighbors(id));
        }
    }

    #[test]
    fn neighbor_lists_are_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let graph = SocialGraph::generate(25, &params(Topology::Random), &mut rng).unwrap();
        for id in graph.ids() {
            for &neighbor in graph.neighbors(id) {
                assert!(graph.neighbors(neighbor).contains(&id));
            }
        }
    }

    #[test]
    fn hand_built_graph_exposes_sorted_neighbors() {
        let edges: BTreeSet<(u32, u32)> = [(2, 0), (0, 1), (2, 1)].iter().copied().collect();
        let graph = SocialGraph::from_edges(3, &edges, Topology::Random);
        assert_eq!(
            graph.neighbors(HouseholdId::new(2)),
            &[HouseholdId::new(0), HouseholdId::new(1)]
        );
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn partial_params_fill_in_defaults() {
        let params: NetworkParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, NetworkParams::default());

        let params: NetworkParams =
            serde_json::from_str(r#"{"topology": "random", "nearest_neighbours": 8}"#).unwrap();
        assert_eq!(params.topology, Topology::Random);
        assert_eq!(params.nearest_neighbours, 8);
        assert!((params.connection_probability - 0.4).abs() < f64::EPSILON);
        assert_eq!(params.edges_per_node, 3);
    }
}
