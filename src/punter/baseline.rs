//! Baseline edge selection.
//!
//! Scans every unclaimed half-edge and computes the exact marginal score
//! gain of claiming it: for each mine with exactly one endpoint currently
//! reachable, the far endpoint's squared distance joins the score. The
//! strictly largest gain wins; ties keep the first edge found. A turn with
//! no gaining edge is a pass.

use super::PunterState;
use crate::graph::VertexId;

pub(crate) fn find_edge(state: &PunterState) -> Option<(VertexId, VertexId)> {
    let g = &state.graph;
    let mut best: Option<(VertexId, VertexId)> = None;
    let mut best_gain = 0i64;

    for e in &g.edges {
        if e.owner.is_some() {
            continue;
        }

        let mut gain = 0i64;
        for i in 0..g.mines.len() {
            let reach_src = state.reach[i][e.src];
            let reach_dst = state.reach[i][e.dst];
            if reach_src == reach_dst {
                continue;
            }
            let far = if reach_src { e.dst } else { e.src };
            let d = g.distance[i][far];
            if d < 0 {
                continue;
            }
            let d = i64::from(d);
            gain += d * d;
        }

        if best_gain < gain {
            best_gain = gain;
            best = Some((e.src, e.dst));
        }
    }

    best
}
