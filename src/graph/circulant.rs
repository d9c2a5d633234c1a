//! Integral circulant graph construction.
//!
//! An integral circulant graph on vertices `{0, .., n-1}` joins `i` and `j`
//! exactly when `gcd(|i - j|, n)` lies in a fixed divisor set. Adjacency
//! depends only on the difference class, so it is precomputed once for the
//! `n` residue classes instead of re-derived per vertex pair. The topology
//! is materialized into petgraph for neighbor and edge-list queries and is
//! immutable after construction.

use core::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::vertex::VertexId;

/// Rejected graph parameters.
///
/// Construction is the only fallible operation in the crate; every query on
/// a built graph is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfiguration {
    /// The order must be at least 1.
    ZeroOrder,
    /// The divisor set must be non-empty.
    EmptyDivisorSet,
    /// Each divisor must satisfy `1 <= d <= order`.
    DivisorOutOfRange { divisor: u32, order: u32 },
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroOrder => write!(f, "graph order must be at least 1"),
            Self::EmptyDivisorSet => write!(f, "divisor set must be non-empty"),
            Self::DivisorOutOfRange { divisor, order } => {
                write!(f, "divisor {divisor} out of range 1..={order}")
            }
        }
    }
}

impl std::error::Error for InvalidConfiguration {}

/// An integral circulant graph.
///
/// Vertices are the residue indices `0..order`; edges are derived once at
/// construction from the divisor set and never change.
pub struct CirculantGraph {
    order: u32,
    divisors: Vec<u32>,
    /// `class_adjacent[d]` answers adjacency for any pair at difference `d`.
    class_adjacent: Vec<bool>,
    topology: UnGraph<VertexId, ()>,
}

impl CirculantGraph {
    /// Build the graph for the given order and divisor set.
    ///
    /// Duplicate divisors are tolerated; the stored set is sorted and
    /// deduplicated.
    pub fn build(order: u32, divisors: &[u32]) -> Result<Self, InvalidConfiguration> {
        if order == 0 {
            return Err(InvalidConfiguration::ZeroOrder);
        }
        if divisors.is_empty() {
            return Err(InvalidConfiguration::EmptyDivisorSet);
        }
        for &divisor in divisors {
            if divisor == 0 || divisor > order {
                return Err(InvalidConfiguration::DivisorOutOfRange { divisor, order });
            }
        }

        let mut divisors = divisors.to_vec();
        divisors.sort_unstable();
        divisors.dedup();

        // gcd(d, n) == gcd(n - d, n), so the table is symmetric in the
        // difference and |i - j| can index it directly.
        let mut class_adjacent = vec![false; order as usize];
        for delta in 1..order {
            class_adjacent[delta as usize] = divisors.binary_search(&gcd(delta, order)).is_ok();
        }

        let mut topology = UnGraph::with_capacity(order as usize, 0);
        for i in 0..order {
            topology.add_node(VertexId(i));
        }
        for i in 0..order {
            for j in (i + 1)..order {
                if class_adjacent[(j - i) as usize] {
                    topology.add_edge(
                        NodeIndex::new(i as usize),
                        NodeIndex::new(j as usize),
                        (),
                    );
                }
            }
        }

        Ok(Self {
            order,
            divisors,
            class_adjacent,
            topology,
        })
    }

    /// Number of vertices.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Number of edges.
    pub fn size(&self) -> u32 {
        self.topology.edge_count() as u32
    }

    /// The sorted, deduplicated divisor set.
    pub fn divisors(&self) -> &[u32] {
        &self.divisors
    }

    /// Whether vertices `i` and `j` are adjacent.
    ///
    /// Symmetric and irreflexive; out-of-range indices answer false.
    pub fn is_adjacent(&self, i: u32, j: u32) -> bool {
        if i == j || i >= self.order || j >= self.order {
            return false;
        }
        self.class_adjacent[i.abs_diff(j) as usize]
    }

    /// Neighbors of a vertex.
    ///
    /// Returns an empty list for out-of-range indices.
    pub fn neighbors(&self, i: u32) -> Vec<u32> {
        if i >= self.order {
            return Vec::new();
        }
        self.topology
            .neighbors(NodeIndex::new(i as usize))
            .map(|n| self.topology[n].0)
            .collect()
    }

    /// Endpoint index pairs of every edge, order-irrelevant.
    pub fn edge_pairs(&self) -> Vec<(u32, u32)> {
        self.topology
            .edge_references()
            .map(|e| (e.source().index() as u32, e.target().index() as u32))
            .collect()
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
