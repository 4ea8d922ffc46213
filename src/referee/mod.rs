//! Match refereeing and scoring.
//!
//! Drives a full match: punters move in round-robin order, claims are
//! checked against the referee's own graph, a punter passing ten times in a
//! row is retired ("zombie") and skipped from then on, and splurges are
//! honored only against banked passes. The match ends when every river is
//! claimed or every punter is retired; final scores include futures and are
//! reported against the theoretical upper bound.

use std::io::{self, Write};

use thiserror::Error;

use crate::graph::{Graph, PunterId, SiteId, SiteIndex, VertexId};
use crate::protocol::{MapDef, MapError, Move, Settings};
use crate::punter::{Punter, ReplayError, Strategy};
use crate::score::{self, ScoreError};

/// Consecutive passes before a punter is retired.
pub const MAX_PASSES: u32 = 10;

/// Errors that end a match abnormally.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("punter {punter} claimed river ({src}, {target}) already owned by punter {owner}")]
    DoubleClaim {
        punter: PunterId,
        src: SiteId,
        target: SiteId,
        owner: PunterId,
    },

    #[error("move references unknown river ({src}, {target})")]
    UnknownRiver { src: SiteId, target: SiteId },

    #[error("move references unknown site {0}")]
    UnknownSite(SiteId),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One punter's line in the final report.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub punter: PunterId,
    pub name: &'static str,
    pub score: i64,
    /// Score as a percentage of the map's upper bound.
    pub normalized: f64,
    pub winner: bool,
}

/// Everything a match produced.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub scores: Vec<ScoreReport>,
    pub score_upper_bound: i64,
    pub future_upper_bound: i64,
    /// Every accepted move, in play order.
    pub moves: Vec<Move>,
}

/// Referee-side match state: its own graph plus per-punter bookkeeping.
struct Referee {
    graph: Graph,
    index: SiteIndex,
    settings: Settings,
    pass_counts: Vec<u32>,
    retired: Vec<bool>,
    claimed_rivers: usize,
}

impl Referee {
    fn new(map: &MapDef, punters: usize, settings: Settings) -> Result<Self, MatchError> {
        let index = SiteIndex::build(&map.sites);
        let mut rivers = Vec::with_capacity(map.rivers.len());
        for r in &map.rivers {
            let a = index
                .to_index(r.source)
                .ok_or(MapError::UnknownRiverEndpoint(r.source))?;
            let b = index
                .to_index(r.target)
                .ok_or(MapError::UnknownRiverEndpoint(r.target))?;
            rivers.push((a, b));
        }
        let mut mines = Vec::with_capacity(map.mines.len());
        for &m in &map.mines {
            mines.push(index.to_index(m).ok_or(MapError::UnknownMine(m))?);
        }

        let mut graph = Graph::build(index.len(), &rivers, mines);
        graph.init_shortest_paths();

        Ok(Referee {
            graph,
            index,
            settings,
            pass_counts: vec![0; punters],
            retired: vec![false; punters],
            claimed_rivers: 0,
        })
    }

    fn finished(&self) -> bool {
        self.claimed_rivers == self.graph.num_rivers() || self.retired.iter().all(|&r| r)
    }

    /// Applies one punter's move, enforcing legality. Illegal splurges
    /// degrade to a pass; double-claims are fatal.
    fn apply(&mut self, punter: PunterId, mv: &Move) -> Result<(), MatchError> {
        match mv {
            Move::Pass { .. } => {
                self.pass_counts[punter] += 1;
            }
            Move::Claim { source, target, .. } => {
                self.claim_river(punter, *source, *target)?;
                self.pass_counts[punter] = 0;
            }
            Move::Splurge { route, .. } => {
                let honored = self.settings.splurges
                    && route.len() >= 2
                    && self.pass_counts[punter] + 1 >= route.len() as u32;
                if honored {
                    for leg in route.windows(2) {
                        self.claim_river(punter, leg[0], leg[1])?;
                    }
                    self.pass_counts[punter] = 0;
                } else {
                    self.pass_counts[punter] += 1;
                }
            }
        }

        if self.pass_counts[punter] >= MAX_PASSES {
            self.retired[punter] = true;
        }
        Ok(())
    }

    fn claim_river(&mut self, punter: PunterId, source: SiteId, target: SiteId) -> Result<(), MatchError> {
        let a = self
            .index
            .to_index(source)
            .ok_or(MatchError::UnknownSite(source))?;
        let b = self
            .index
            .to_index(target)
            .ok_or(MatchError::UnknownSite(target))?;

        match self.graph.river_owner(a, b) {
            None => return Err(MatchError::UnknownRiver { src: source, target }),
            Some(Some(owner)) => {
                return Err(MatchError::DoubleClaim {
                    punter,
                    src: source,
                    target,
                    owner,
                })
            }
            Some(None) => {}
        }

        self.graph.claim(punter, a, b).map_err(ReplayError::from)?;
        self.claimed_rivers += 1;
        Ok(())
    }

    /// Converts a punter's declared futures into dense vertex space.
    fn dense_futures(&self, punter: &Punter) -> Result<Vec<(VertexId, VertexId)>, MatchError> {
        punter
            .futures()
            .iter()
            .map(|f| {
                let s = self
                    .index
                    .to_index(f.source)
                    .ok_or(MatchError::UnknownSite(f.source))?;
                let t = self
                    .index
                    .to_index(f.target)
                    .ok_or(MatchError::UnknownSite(f.target))?;
                Ok((s, t))
            })
            .collect()
    }
}

/// Plays one full match and returns the outcome. Per-move log lines are
/// written to `log`; pass `std::io::sink()` to silence them.
pub fn run_match(
    map: &MapDef,
    strategies: &[Strategy],
    settings: Settings,
    log: &mut impl Write,
) -> Result<MatchOutcome, MatchError> {
    map.validate()?;

    let num_punters = strategies.len();
    let mut punters = Vec::with_capacity(num_punters);
    for (i, &strategy) in strategies.iter().enumerate() {
        let mut p = Punter::new(strategy);
        p.setup(i, num_punters, map, settings)?;
        punters.push(p);
    }

    let mut referee = Referee::new(map, num_punters, settings)?;
    let mut last_moves: Vec<Move> = (0..num_punters).map(|i| Move::Pass { punter: i }).collect();
    let mut move_log = Vec::new();

    'game: while !referee.finished() {
        for p in 0..num_punters {
            if referee.finished() {
                break 'game;
            }
            if referee.retired[p] {
                continue;
            }

            let mv = punters[p].make_move(&last_moves)?;
            writeln!(log, "Move: {}", mv)?;
            referee.apply(p, &mv)?;
            last_moves[p] = mv.clone();
            move_log.push(mv);
        }
    }

    let mut scores = Vec::with_capacity(num_punters);
    let mut max_score = i64::MIN;
    for (p, punter) in punters.iter().enumerate() {
        let futures = referee.dense_futures(punter)?;
        let score = score::full_score(&referee.graph, p, &futures, settings)?;
        max_score = max_score.max(score);
        scores.push(ScoreReport {
            punter: p,
            name: punter.name(),
            score,
            normalized: 0.0,
            winner: false,
        });
    }

    let sub = score::score_upper_bound(&referee.graph);
    let fub = score::future_upper_bound(&referee.graph);
    for report in &mut scores {
        report.winner = report.score == max_score;
        report.normalized = if sub > 0 {
            report.score as f64 * 100.0 / sub as f64
        } else {
            0.0
        };
    }

    Ok(MatchOutcome {
        scores,
        score_upper_bound: sub,
        future_upper_bound: fub,
        moves: move_log,
    })
}

/// Writes the end-of-game report in the simulator's line format.
pub fn write_report(outcome: &MatchOutcome, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Score upper bound (no futures): {}",
        outcome.score_upper_bound
    )?;
    writeln!(out, "Future upper bound: {}", outcome.future_upper_bound)?;
    for r in &outcome.scores {
        let marker = if r.winner { '*' } else { ' ' };
        writeln!(
            out,
            "{} Punter {} {}, score: {} ({:.2}%)",
            marker, r.punter, r.name, r.score, r.normalized
        )?;
    }
    Ok(())
}
