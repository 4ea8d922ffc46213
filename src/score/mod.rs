//! Reachability and scoring.
//!
//! A punter's score is the sum, over every mine and every site reachable
//! from that mine through rivers the punter owns, of the squared
//! shortest-path distance from the mine to the site. Futures add or
//! subtract the cubed distance depending on whether the declared target was
//! reached. Sums are 64-bit; vertices unreachable in the full graph
//! (distance `-1`) never contribute to any total.

use thiserror::Error;

use crate::graph::{Graph, PunterId, VertexId};
use crate::protocol::Settings;

/// Errors raised during final scoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("future source vertex {0} is not a mine")]
    FutureSourceNotMine(VertexId),
}

/// Marks every vertex reachable from `start` through rivers owned by
/// `owner`, using an explicit stack so deep maps cannot overflow the call
/// stack.
pub fn mark_reachable(graph: &Graph, owner: PunterId, start: VertexId, visited: &mut [bool]) {
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(u) = stack.pop() {
        for &eid in &graph.adj[u] {
            let e = &graph.edges[eid];
            if e.owner != Some(owner) {
                continue;
            }
            if !visited[e.dst] {
                visited[e.dst] = true;
                stack.push(e.dst);
            }
        }
    }
}

/// One reachability array per mine, restricted to `owner`'s rivers.
/// Recomputed every turn since ownership changes every turn.
pub fn reachability_from_mines(graph: &Graph, owner: PunterId) -> Vec<Vec<bool>> {
    graph
        .mines
        .iter()
        .map(|&m| {
            let mut visited = vec![false; graph.num_sites];
            mark_reachable(graph, owner, m, &mut visited);
            visited
        })
        .collect()
}

/// The canonical scoring rule: Σ over mines and reachable vertices of `d²`.
pub fn score(graph: &Graph, reach: &[Vec<bool>]) -> i64 {
    let mut total = 0i64;
    for (i, row) in reach.iter().enumerate() {
        for (j, &reachable) in row.iter().enumerate() {
            if !reachable {
                continue;
            }
            let d = graph.distance[i][j];
            if d < 0 {
                continue;
            }
            let d = i64::from(d);
            total += d * d;
        }
    }
    total
}

/// Full end-of-game score for `owner`: the canonical score plus, when
/// futures are enabled, `+d³` for each satisfied future and `-d³` for each
/// missed one. A future whose source is not a mine is a configuration
/// error, not a missed bet.
pub fn full_score(
    graph: &Graph,
    owner: PunterId,
    futures: &[(VertexId, VertexId)],
    settings: Settings,
) -> Result<i64, ScoreError> {
    let reach = reachability_from_mines(graph, owner);
    let mut total = score(graph, &reach);

    if settings.futures {
        for &(source, target) in futures {
            let i = graph
                .mines
                .iter()
                .position(|&m| m == source)
                .ok_or(ScoreError::FutureSourceNotMine(source))?;
            let d = graph.distance[i][target];
            if d < 0 {
                continue;
            }
            let d = i64::from(d);
            let d3 = d * d * d;
            if reach[i][target] {
                total += d3;
            } else {
                total -= d3;
            }
        }
    }

    Ok(total)
}

/// Σ over all mines and all vertices of `d²` — what a punter owning every
/// river would score. Used to normalize reported scores, not in gameplay.
pub fn score_upper_bound(graph: &Graph) -> i64 {
    let mut total = 0i64;
    for row in &graph.distance {
        for &d in row {
            if d < 0 {
                continue;
            }
            let d = i64::from(d);
            total += d * d;
        }
    }
    total
}

/// The largest single-future payoff on this map: the maximum distance in
/// the table, cubed.
pub fn future_upper_bound(graph: &Graph) -> i64 {
    let mut max = 0i64;
    for row in &graph.distance {
        for &d in row {
            if i64::from(d) > max {
                max = i64::from(d);
            }
        }
    }
    max * max * max
}
