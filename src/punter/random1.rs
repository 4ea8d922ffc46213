//! Random1 edge selection.
//!
//! Random0's shape with the lookahead made affordable on large maps: the
//! walk is a breadth-first sweep with depth limit 20, a global adjacency
//! budget of `10_000_000 / mines / unclaimed-half-edges` per evaluation, and
//! one scratch array stamped with a monotonic `(mine, edge)` mark instead of
//! an O(sites) clear per edge. Selection keeps a running best with a seeded
//! reservoir over ties in a single pass.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{mine_grab, random0::RESERVOIR_SEED, PunterState};
use crate::graph::{EdgeId, HalfEdge, VertexId};

const DEPTH_LIMIT: usize = 20;
const DISCOUNT: f64 = 0.95;
const VISIT_BUDGET: usize = 10_000_000;

/// Reusable lookahead scratch: visit marks, per-vertex depth, BFS queue.
struct Scratch {
    marks: Vec<u64>,
    depth: Vec<usize>,
    queue: VecDeque<VertexId>,
}

impl Scratch {
    fn new(num_sites: usize) -> Self {
        Scratch {
            marks: vec![0; num_sites],
            depth: vec![0; num_sites],
            queue: VecDeque::with_capacity(num_sites),
        }
    }
}

pub(crate) fn select(state: &mut PunterState) -> Option<(VertexId, VertexId)> {
    if let Some(grab) = mine_grab(state) {
        return Some(grab);
    }

    state.prepare_lookahead();

    let g = &state.graph;
    let free_half_edges = g.edges.iter().filter(|e| e.owner.is_none()).count();
    if free_half_edges == 0 {
        return None;
    }
    let budget = (VISIT_BUDGET / g.mines.len().max(1) / free_half_edges).max(1);

    let mut scratch = Scratch::new(g.num_sites);
    let mut rng = SmallRng::seed_from_u64(RESERVOIR_SEED);
    let mut best = 0i64;
    let mut seen = 0u32;
    let mut pick = None;

    for e in &g.edges {
        let s = edge_score(state, e, &mut scratch, budget);
        if s == 0 {
            continue;
        }
        if best < s {
            best = s;
            seen = 1;
            pick = Some((e.src, e.dst));
            continue;
        }
        if s == best {
            seen += 1;
            if rng.gen_range(0..seen) == 0 {
                pick = Some((e.src, e.dst));
            }
        }
    }

    pick
}

fn edge_score(state: &PunterState, e: &HalfEdge, scratch: &mut Scratch, budget: usize) -> i64 {
    if e.owner.is_some() {
        return 0;
    }

    let mut total = 0i64;
    for mine in 0..state.graph.mines.len() {
        let reach_src = state.reach[mine][e.src];
        let reach_dst = state.reach[mine][e.dst];
        if reach_src == reach_dst {
            continue;
        }
        let start = if reach_src { e.dst } else { e.src };
        let est = expected_score(state, start, mine, e.id, scratch, budget) as i64;
        total += est * est;
    }
    total
}

/// Budgeted breadth-first lookahead from `start` over unclaimed rivers.
///
/// Each `(mine, edge)` evaluation gets a distinct mark, strictly increasing
/// across a turn, so the scratch array never needs clearing; the `+ 1`
/// keeps the first mark above the array's zero initialization.
fn expected_score(
    state: &PunterState,
    start: VertexId,
    mine: usize,
    edge_id: EdgeId,
    scratch: &mut Scratch,
    budget: usize,
) -> f64 {
    let g = &state.graph;
    let mark = (mine * g.edges.len() + edge_id) as u64 + 1;

    scratch.queue.clear();
    scratch.marks[start] = mark;
    scratch.depth[start] = 0;
    scratch.queue.push_back(start);

    let mut score = 0f64;
    let mut visited_edges = 0usize;

    while visited_edges < budget {
        let u = match scratch.queue.pop_front() {
            Some(u) => u,
            None => break,
        };

        let d = g.distance[mine][u];
        if d >= 0 {
            let d = f64::from(d);
            score += DISCOUNT.powi(scratch.depth[u] as i32) * d * d;
        }
        if scratch.depth[u] == DEPTH_LIMIT {
            continue;
        }
        for &eid in &g.adj[u] {
            visited_edges += 1;
            let edge = &g.edges[eid];
            if edge.owner.is_none() && scratch.marks[edge.dst] != mark {
                scratch.marks[edge.dst] = mark;
                scratch.depth[edge.dst] = scratch.depth[u] + 1;
                scratch.queue.push_back(edge.dst);
            }
        }
    }

    score
}
