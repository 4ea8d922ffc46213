//! Move strategies.
//!
//! Seven strategies share one state type: the compressed graph, the
//! mine-rooted distance table, and the per-turn reachability and score.
//! Every turn follows the same protocol — replay the previous round's moves
//! into the graph, recompute reachability and the current score — and only
//! the edge selection differs per strategy. The set is closed: a strategy is
//! a variant, not a trait object.

pub mod baseline;
pub mod greedy;
pub mod mplayer;
pub mod random0;
pub mod random1;
pub mod random2;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{ClaimError, Graph, PunterId, SiteId, SiteIndex, VertexId};
use crate::protocol::{Future, MapDef, MapError, Move, Settings};
use crate::score;

/// The closed set of move strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Always passes.
    Zombie,
    /// Exhaustive marginal-gain scan, first-found tie-break.
    Baseline,
    /// Union-reachability greedy with a zero-gain fallback pick.
    Greedy0,
    /// Mine-grab, then discounted depth-10 lookahead with reservoir ties.
    Random0,
    /// Budgeted depth-20 lookahead with monotonic visit marks.
    Random1,
    /// Random1 plus per-mine future declaration.
    Random2,
    /// Baseline edge selection plus farthest-vertex futures.
    M,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Zombie,
        Strategy::Baseline,
        Strategy::Greedy0,
        Strategy::Random0,
        Strategy::Random1,
        Strategy::Random2,
        Strategy::M,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Zombie => "zombie",
            Strategy::Baseline => "baseline",
            Strategy::Greedy0 => "greedy0",
            Strategy::Random0 => "random0",
            Strategy::Random1 => "random1",
            Strategy::Random2 => "random2",
            Strategy::M => "m",
        }
    }
}

/// Error for an unrecognized strategy name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}'")]
pub struct StrategyParseError(pub String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| StrategyParseError(s.to_string()))
    }
}

/// Errors raised while replaying a round of moves into a punter's graph.
///
/// Both variants indicate state corruption between the referee and the
/// punter; they are never recovered from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("move references unknown site {0}")]
    UnknownSite(SiteId),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// State shared by every strategy: the compressed graph and distance table
/// (fixed at setup) and the reachability/score snapshot (rebuilt per turn).
///
/// The whole struct serializes, so a stateless driving process can thread
/// it through the external message format between turns and restore it
/// losslessly. The per-turn fields are skipped; they are a function of the
/// graph and are rebuilt on the next `prepare_for_move`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunterState {
    pub punter: PunterId,
    pub punters: usize,
    pub settings: Settings,
    pub index: SiteIndex,
    pub graph: Graph,
    /// Futures declared at setup, in original site-id space.
    pub futures: Vec<Future>,
    /// Per-mine reachability over this punter's rivers.
    #[serde(skip)]
    pub reach: Vec<Vec<bool>>,
    /// Current canonical score.
    #[serde(skip)]
    pub score: i64,
    /// Per-mine distance from the currently reachable set, for the
    /// lookahead strategies.
    #[serde(skip)]
    pub distance_from_owned: Vec<Vec<i32>>,
}

impl PunterState {
    /// Compresses the map and builds the graph and distance table.
    pub fn setup(
        &mut self,
        punter: PunterId,
        punters: usize,
        map: &MapDef,
        settings: Settings,
    ) -> Result<(), MapError> {
        self.punter = punter;
        self.punters = punters;
        self.settings = settings;
        self.index = SiteIndex::build(&map.sites);

        let mut rivers = Vec::with_capacity(map.rivers.len());
        for r in &map.rivers {
            let a = self
                .index
                .to_index(r.source)
                .ok_or(MapError::UnknownRiverEndpoint(r.source))?;
            let b = self
                .index
                .to_index(r.target)
                .ok_or(MapError::UnknownRiverEndpoint(r.target))?;
            rivers.push((a, b));
        }

        let mut mines = Vec::with_capacity(map.mines.len());
        for &m in &map.mines {
            mines.push(self.index.to_index(m).ok_or(MapError::UnknownMine(m))?);
        }

        self.graph = Graph::build(self.index.len(), &rivers, mines);
        self.graph.init_shortest_paths();
        Ok(())
    }

    /// Replays a round of moves into the graph: claims and splurges mutate
    /// ownership, passes are ignored.
    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<(), ReplayError> {
        for mv in moves {
            match mv {
                Move::Pass { .. } => {}
                Move::Claim {
                    punter,
                    source,
                    target,
                } => self.apply_claim(*punter, *source, *target)?,
                Move::Splurge { punter, route } => {
                    for leg in route.windows(2) {
                        self.apply_claim(*punter, leg[0], leg[1])?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_claim(&mut self, owner: PunterId, source: SiteId, target: SiteId) -> Result<(), ReplayError> {
        let a = self
            .index
            .to_index(source)
            .ok_or(ReplayError::UnknownSite(source))?;
        let b = self
            .index
            .to_index(target)
            .ok_or(ReplayError::UnknownSite(target))?;
        self.graph.claim(owner, a, b)?;
        Ok(())
    }

    /// The shared turn protocol: replay, then rebuild reachability and the
    /// current score.
    pub fn prepare_for_move(&mut self, moves: &[Move]) -> Result<(), ReplayError> {
        self.apply_moves(moves)?;
        self.reach = score::reachability_from_mines(&self.graph, self.punter);
        self.score = score::score(&self.graph, &self.reach);
        Ok(())
    }

    /// Rebuilds `distance_from_owned`: one multi-source BFS per mine,
    /// seeded from that mine's currently reachable set.
    pub fn prepare_lookahead(&mut self) {
        let mut tables = Vec::with_capacity(self.reach.len());
        for seeds in &self.reach {
            tables.push(self.graph.mssp(seeds));
        }
        self.distance_from_owned = tables;
    }
}

/// Finds the first unclaimed half-edge leaving a mine, if any.
pub(crate) fn mine_grab(state: &PunterState) -> Option<(VertexId, VertexId)> {
    state
        .graph
        .edges
        .iter()
        .find(|e| e.owner.is_none() && state.graph.mines.contains(&e.src))
        .map(|e| (e.src, e.dst))
}

/// A player: one strategy over the shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Punter {
    pub strategy: Strategy,
    pub state: PunterState,
}

impl Punter {
    pub fn new(strategy: Strategy) -> Self {
        Punter {
            strategy,
            state: PunterState::default(),
        }
    }

    /// Builds the internal state for a match and, for the future-declaring
    /// strategies, picks this punter's futures.
    pub fn setup(
        &mut self,
        punter: PunterId,
        punters: usize,
        map: &MapDef,
        settings: Settings,
    ) -> Result<(), MapError> {
        self.state.setup(punter, punters, map, settings)?;

        if settings.futures {
            let declared = match self.strategy {
                Strategy::Random2 => random2::declare_futures(&self.state),
                Strategy::M => mplayer::declare_futures(&self.state),
                _ => Vec::new(),
            };
            self.state.futures = declared
                .into_iter()
                .map(|(m, u)| Future {
                    source: self.state.index.to_site(m),
                    target: self.state.index.to_site(u),
                })
                .collect();
        }
        Ok(())
    }

    /// Produces this punter's move for the turn, given every punter's move
    /// from the previous round.
    pub fn make_move(&mut self, moves: &[Move]) -> Result<Move, ReplayError> {
        if self.strategy == Strategy::Zombie {
            return Ok(self.pass_move());
        }

        self.state.prepare_for_move(moves)?;

        let choice = match self.strategy {
            Strategy::Zombie => None,
            Strategy::Baseline | Strategy::M => baseline::find_edge(&self.state),
            Strategy::Greedy0 => greedy::find_edge(&self.state),
            Strategy::Random0 => random0::select(&mut self.state),
            Strategy::Random1 | Strategy::Random2 => random1::select(&mut self.state),
        };

        Ok(match choice {
            Some((u, v)) => self.claim_move(u, v),
            None => self.pass_move(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn punter_id(&self) -> PunterId {
        self.state.punter
    }

    /// Futures declared at setup, in original site-id space.
    pub fn futures(&self) -> &[Future] {
        &self.state.futures
    }

    fn claim_move(&self, u: VertexId, v: VertexId) -> Move {
        Move::Claim {
            punter: self.state.punter,
            source: self.state.index.to_site(u),
            target: self.state.index.to_site(v),
        }
    }

    fn pass_move(&self) -> Move {
        Move::Pass {
            punter: self.state.punter,
        }
    }
}
