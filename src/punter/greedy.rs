//! Greedy0 edge selection.
//!
//! Works on the union of all mines' reachability (one shared array) rather
//! than per-mine arrays. An edge with exactly one reachable endpoint is
//! scored by the unreachable endpoint's squared distance summed over every
//! mine; an edge with both endpoints already reachable is remembered as a
//! zero-gain fallback so the turn is not wasted when nothing better exists.

use super::PunterState;
use crate::graph::VertexId;
use crate::score;

pub(crate) fn find_edge(state: &PunterState) -> Option<(VertexId, VertexId)> {
    let g = &state.graph;

    let mut reachable = vec![false; g.num_sites];
    for &m in &g.mines {
        if !reachable[m] {
            score::mark_reachable(g, state.punter, m, &mut reachable);
        }
    }

    let mut best: Option<(VertexId, VertexId)> = None;
    let mut best_score = 0i64;

    for e in &g.edges {
        if e.owner.is_some() {
            continue;
        }
        let reach_src = reachable[e.src];
        let reach_dst = reachable[e.dst];
        if !reach_src && !reach_dst {
            continue;
        }
        if reach_src && reach_dst {
            if best.is_none() {
                best = Some((e.src, e.dst));
            }
            continue;
        }

        let mut cur = 0i64;
        for v in [e.src, e.dst] {
            if reachable[v] {
                continue;
            }
            for i in 0..g.mines.len() {
                let d = g.distance[i][v];
                if d < 0 {
                    continue;
                }
                let d = i64::from(d);
                cur += d * d;
            }
        }

        if best_score < cur {
            best_score = cur;
            best = Some((e.src, e.dst));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MapDef, Move, River, Settings, Site};
    use crate::punter::{Punter, Strategy};

    fn setup(map: &MapDef) -> Punter {
        let mut p = Punter::new(Strategy::Greedy0);
        p.setup(0, 2, map, Settings::default()).unwrap();
        p
    }

    fn line4_map() -> MapDef {
        MapDef {
            sites: (0..4).map(|id| Site { id }).collect(),
            rivers: vec![
                River { source: 0, target: 1 },
                River { source: 1, target: 2 },
                River { source: 2, target: 3 },
            ],
            mines: vec![0],
        }
    }

    #[test]
    fn walks_the_line_outwards() {
        let mut p = setup(&line4_map());
        let mut moves = vec![Move::Pass { punter: 0 }, Move::Pass { punter: 1 }];
        for expected in [(0, 1), (1, 2), (2, 3)] {
            let mv = p.make_move(&moves).unwrap();
            assert_eq!(
                mv,
                Move::Claim { punter: 0, source: expected.0, target: expected.1 }
            );
            moves[0] = mv;
        }
    }

    #[test]
    fn sums_gains_over_every_mine() {
        // Mines at both ends of the line; the middle river scores for both.
        let map = MapDef {
            sites: (0..3).map(|id| Site { id }).collect(),
            rivers: vec![
                River { source: 0, target: 1 },
                River { source: 1, target: 2 },
            ],
            mines: vec![0, 2],
        };
        let mut p = setup(&map);
        p.state.prepare_for_move(&[]).unwrap();
        // Vertex 1 is one hop from each mine: claiming either river scores
        // 1 + 1 from the shared endpoint.
        assert_eq!(find_edge(&p.state), Some((0, 1)));
    }

    #[test]
    fn takes_the_free_edge_when_no_gain_exists() {
        // A triangle hanging off the mine: after claiming (0,1) and (0,2),
        // river (1,2) connects two already-reachable vertices. It is still
        // claimed rather than passed.
        let map = MapDef {
            sites: (0..3).map(|id| Site { id }).collect(),
            rivers: vec![
                River { source: 0, target: 1 },
                River { source: 0, target: 2 },
                River { source: 1, target: 2 },
            ],
            mines: vec![0],
        };
        let mut p = setup(&map);
        let mut moves = vec![Move::Pass { punter: 0 }, Move::Pass { punter: 1 }];
        moves[0] = p.make_move(&moves).unwrap();
        moves[0] = p.make_move(&moves).unwrap();
        let mv = p.make_move(&moves).unwrap();
        assert_eq!(mv, Move::Claim { punter: 0, source: 1, target: 2 });
    }

    #[test]
    fn passes_when_cut_off() {
        let mut p = setup(&line4_map());
        let moves = vec![
            Move::Pass { punter: 0 },
            Move::Claim { punter: 1, source: 0, target: 1 },
        ];
        assert_eq!(p.make_move(&moves).unwrap(), Move::Pass { punter: 0 });
    }
}
