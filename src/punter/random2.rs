//! Random2 future declaration.
//!
//! Moves are selected exactly as Random1's; the difference is made before
//! play starts. Every vertex is assigned to its strictly nearest mine (the
//! mine's own vertex excluded), and each mine bets on the farthest vertex
//! assigned to it. Partitioning by nearest mine keeps two mines from
//! betting on the same corner of the map.

use super::PunterState;
use crate::graph::VertexId;

/// Returns `(mine, target)` pairs in dense vertex space, at most one per
/// mine. Mines whose partition is empty declare nothing.
pub(crate) fn declare_futures(state: &PunterState) -> Vec<(VertexId, VertexId)> {
    let g = &state.graph;
    let mut chosen: Vec<Option<VertexId>> = vec![None; g.mines.len()];
    let mut chosen_dist = vec![-1i32; g.mines.len()];

    for u in 0..g.num_sites {
        let mut nearest: Option<usize> = None;
        let mut nearest_dist = g.num_sites as i32;
        for (i, &m) in g.mines.iter().enumerate() {
            if u == m {
                continue;
            }
            let d = g.distance[i][u];
            if d >= 0 && d < nearest_dist {
                nearest = Some(i);
                nearest_dist = d;
            }
        }

        if let Some(i) = nearest {
            if chosen_dist[i] < nearest_dist {
                chosen[i] = Some(u);
                chosen_dist[i] = nearest_dist;
            }
        }
    }

    g.mines
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| chosen[i].map(|u| (m, u)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Future, MapDef, River, Settings, Site};
    use crate::punter::{Punter, Strategy};

    fn futures_map() -> MapDef {
        // Two mines at the ends of a 6-vertex line.
        MapDef {
            sites: (0..6).map(|id| Site { id }).collect(),
            rivers: (0..5)
                .map(|i| River { source: i, target: i + 1 })
                .collect(),
            mines: vec![0, 5],
        }
    }

    fn futures_on() -> Settings {
        Settings { futures: true, splurges: false }
    }

    #[test]
    fn each_mine_bets_on_the_farthest_vertex_of_its_partition() {
        let mut p = Punter::new(Strategy::Random2);
        p.setup(0, 2, &futures_map(), futures_on()).unwrap();
        // A mine's own vertex is excluded from its partition but not from
        // the other mine's, so the two end mines bet on each other: vertex
        // 5 is the farthest vertex assigned to mine 0 and vice versa.
        assert_eq!(
            p.futures(),
            &[
                Future { source: 0, target: 5 },
                Future { source: 5, target: 0 },
            ]
        );
    }

    #[test]
    fn no_futures_without_the_setting() {
        let mut p = Punter::new(Strategy::Random2);
        p.setup(0, 2, &futures_map(), Settings::default()).unwrap();
        assert!(p.futures().is_empty());
    }

    #[test]
    fn unreachable_vertices_are_never_bet_on() {
        let map = MapDef {
            sites: (0..4).map(|id| Site { id }).collect(),
            rivers: vec![
                River { source: 0, target: 1 },
                River { source: 2, target: 3 },
            ],
            mines: vec![0],
        };
        let mut p = Punter::new(Strategy::Random2);
        p.setup(0, 2, &map, futures_on()).unwrap();
        assert_eq!(p.futures(), &[Future { source: 0, target: 1 }]);
    }

    #[test]
    fn an_isolated_mine_declares_nothing() {
        let map = MapDef {
            sites: (0..3).map(|id| Site { id }).collect(),
            rivers: vec![River { source: 1, target: 2 }],
            mines: vec![0],
        };
        let mut p = Punter::new(Strategy::Random2);
        p.setup(0, 2, &map, futures_on()).unwrap();
        assert!(p.futures().is_empty());
    }
}
