//! Adjacency and ownership substrate for the river graph.
//!
//! An undirected river is stored as two opposite directed half-edges with
//! consecutive ids; the pair of half-edge `e` is `e ^ 1`. Claiming a river
//! sets the owner on both halves in one operation, so the two halves always
//! agree. Vertices are dense indices in `[0, num_sites)`; translation from
//! the map's arbitrary site ids happens in [`SiteIndex`] before construction.

pub mod index;
pub mod paths;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use index::SiteIndex;

/// A map-level site identifier, arbitrary and not necessarily dense.
pub type SiteId = i64;

/// A dense vertex index in `[0, num_sites)`.
pub type VertexId = usize;

/// A half-edge index into [`Graph::edges`].
pub type EdgeId = usize;

/// A player index in `[0, punters)`.
pub type PunterId = usize;

/// One directed half of a river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfEdge {
    pub id: EdgeId,
    pub src: VertexId,
    pub dst: VertexId,
    /// `None` while the river is unclaimed.
    pub owner: Option<PunterId>,
}

impl HalfEdge {
    /// Returns the id of the opposite half of the same river.
    pub fn pair(&self) -> EdgeId {
        self.id ^ 1
    }
}

/// Errors raised when claiming a river.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("no river between vertices {src} and {target}")]
    UnknownRiver { src: VertexId, target: VertexId },

    #[error("river {src}-{target} is owned by punter {owner}; punter {claimant} cannot claim it")]
    Conflict {
        src: VertexId,
        target: VertexId,
        owner: PunterId,
        claimant: PunterId,
    },
}

/// The river graph: doubled half-edges, per-vertex adjacency, mines, and the
/// mine-rooted shortest-path table.
///
/// The structure is built once per match and never changes shape afterwards;
/// only the `owner` fields mutate as rivers are claimed. Everything here is
/// serde-serializable so a driving process can snapshot the complete state
/// between turns and restore it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub num_sites: usize,
    /// Half-edges in pair order: river `i` occupies slots `2i` and `2i + 1`.
    pub edges: Vec<HalfEdge>,
    /// Outgoing half-edge ids per vertex.
    pub adj: Vec<Vec<EdgeId>>,
    /// Vertex indices of the mines.
    pub mines: Vec<VertexId>,
    /// `distance[i][j]` = shortest-path length from mine `i` to vertex `j`,
    /// `-1` if unreachable. Filled by [`Graph::init_shortest_paths`].
    pub distance: Vec<Vec<i32>>,
}

impl Graph {
    /// Builds the doubled half-edge adjacency structure in O(sites + rivers).
    ///
    /// `rivers` must already be in dense vertex space. The distance table is
    /// left empty; call [`Graph::init_shortest_paths`] once after building.
    pub fn build(num_sites: usize, rivers: &[(VertexId, VertexId)], mines: Vec<VertexId>) -> Self {
        let mut edges = Vec::with_capacity(2 * rivers.len());
        let mut adj = vec![Vec::new(); num_sites];

        for (i, &(a, b)) in rivers.iter().enumerate() {
            edges.push(HalfEdge {
                id: 2 * i,
                src: a,
                dst: b,
                owner: None,
            });
            edges.push(HalfEdge {
                id: 2 * i + 1,
                src: b,
                dst: a,
                owner: None,
            });
            adj[a].push(2 * i);
            adj[b].push(2 * i + 1);
        }

        Graph {
            num_sites,
            edges,
            adj,
            mines,
            distance: Vec::new(),
        }
    }

    /// Number of rivers (undirected edges).
    pub fn num_rivers(&self) -> usize {
        self.edges.len() / 2
    }

    /// Finds the first half-edge from `a` to `b`, if any river connects them.
    pub fn half_edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.adj[a]
            .iter()
            .copied()
            .find(|&eid| self.edges[eid].dst == b)
    }

    /// Returns the owner of the river between `a` and `b`, or `None` if no
    /// such river exists.
    pub fn river_owner(&self, a: VertexId, b: VertexId) -> Option<Option<PunterId>> {
        self.half_edge_between(a, b).map(|eid| self.edges[eid].owner)
    }

    /// Claims the river between `a` and `b` for `owner`.
    ///
    /// Every half-edge from `a` to `b` (parallel rivers included) is claimed
    /// together with its pair. Re-claiming a river already owned by the same
    /// punter is a no-op; a river owned by anyone else is a [`ClaimError::Conflict`].
    pub fn claim(&mut self, owner: PunterId, a: VertexId, b: VertexId) -> Result<(), ClaimError> {
        let mut found = false;
        for i in 0..self.adj[a].len() {
            let eid = self.adj[a][i];
            if self.edges[eid].dst != b {
                continue;
            }
            if let Some(existing) = self.edges[eid].owner {
                if existing != owner {
                    return Err(ClaimError::Conflict {
                        src: a,
                        target: b,
                        owner: existing,
                        claimant: owner,
                    });
                }
            }
            let pair = self.edges[eid].pair();
            self.edges[eid].owner = Some(owner);
            self.edges[pair].owner = Some(owner);
            found = true;
        }
        if !found {
            return Err(ClaimError::UnknownRiver {
                src: a,
                target: b,
            });
        }
        Ok(())
    }
}
