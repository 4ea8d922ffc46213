//! Breadth-first shortest paths over the full river set.
//!
//! Distances are unweighted hop counts, computed over every river regardless
//! of ownership. Unreached vertices carry the sentinel `-1`; no score sum
//! may include a negative distance.

use std::collections::VecDeque;

use super::{Graph, VertexId};

impl Graph {
    /// Fills the per-mine distance table, one BFS per mine.
    pub fn init_shortest_paths(&mut self) {
        self.distance = self.mines.iter().map(|&m| self.sssp(m)).collect();
    }

    /// Single-source BFS from `root`. Returns one distance per vertex.
    pub fn sssp(&self, root: VertexId) -> Vec<i32> {
        let mut dist = vec![-1i32; self.num_sites];
        let mut queue = VecDeque::with_capacity(self.num_sites);
        dist[root] = 0;
        queue.push_back(root);

        while let Some(u) = queue.pop_front() {
            for &eid in &self.adj[u] {
                let v = self.edges[eid].dst;
                if dist[v] < 0 {
                    dist[v] = dist[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    /// Multi-source BFS: every vertex with `seeds[v] == true` starts at
    /// distance 0. Used to measure how far unclaimed territory lies from a
    /// punter's current holdings.
    pub fn mssp(&self, seeds: &[bool]) -> Vec<i32> {
        let mut dist = vec![-1i32; self.num_sites];
        let mut queue = VecDeque::with_capacity(self.num_sites);
        for (v, &seeded) in seeds.iter().enumerate() {
            if seeded {
                dist[v] = 0;
                queue.push_back(v);
            }
        }

        while let Some(u) = queue.pop_front() {
            for &eid in &self.adj[u] {
                let v = self.edges[eid].dst;
                if dist[v] < 0 {
                    dist[v] = dist[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        dist
    }
}
