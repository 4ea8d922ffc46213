//! M-player future declaration.
//!
//! Edge selection is Baseline's; the only addition is the simplest future
//! rule: each mine bets on the globally farthest vertex reachable from it.
//! Unreachable vertices are never candidates, so an isolated mine declares
//! nothing.

use super::PunterState;
use crate::graph::VertexId;

/// Returns `(mine, target)` pairs in dense vertex space, one per mine with
/// at least one other reachable vertex.
pub(crate) fn declare_futures(state: &PunterState) -> Vec<(VertexId, VertexId)> {
    let g = &state.graph;
    let mut futures = Vec::new();

    for (i, &m) in g.mines.iter().enumerate() {
        let mut best: Option<(VertexId, i32)> = None;
        for u in 0..g.num_sites {
            if u == m {
                continue;
            }
            let d = g.distance[i][u];
            if d < 0 {
                continue;
            }
            if best.map_or(true, |(_, bd)| bd < d) {
                best = Some((u, d));
            }
        }
        if let Some((u, _)) = best {
            futures.push((m, u));
        }
    }

    futures
}
