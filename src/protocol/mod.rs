//! Wire data model shared with external collaborators.
//!
//! Everything a driving process exchanges with the engine lives here: the
//! JSON map definition, the tagged move variants, match settings, declared
//! futures, and score entries. All ids at this boundary are original
//! map-level site ids. The module performs no I/O; socket framing and file
//! loading belong to the callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{PunterId, SiteId};

/// A site entry in a map definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
}

/// An undirected river between two sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct River {
    pub source: SiteId,
    pub target: SiteId,
}

/// Errors raised while parsing or validating a map definition.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to parse map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("river references unknown site {0}")]
    UnknownRiverEndpoint(SiteId),

    #[error("mine references unknown site {0}")]
    UnknownMine(SiteId),
}

/// A complete map definition as delivered by the server or a map file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDef {
    pub sites: Vec<Site>,
    pub rivers: Vec<River>,
    #[serde(default)]
    pub mines: Vec<SiteId>,
}

impl MapDef {
    /// Parses and validates a JSON map definition.
    pub fn from_json(data: &str) -> Result<MapDef, MapError> {
        let map: MapDef = serde_json::from_str(data)?;
        map.validate()?;
        Ok(map)
    }

    /// Checks that every river endpoint and mine refers to a declared site.
    pub fn validate(&self) -> Result<(), MapError> {
        for r in &self.rivers {
            for id in [r.source, r.target] {
                if !self.sites.iter().any(|s| s.id == id) {
                    return Err(MapError::UnknownRiverEndpoint(id));
                }
            }
        }
        for &m in &self.mines {
            if !self.sites.iter().any(|s| s.id == m) {
                return Err(MapError::UnknownMine(m));
            }
        }
        Ok(())
    }
}

/// One move, exchanged each turn. Site ids are in original map space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Claim {
        punter: PunterId,
        source: SiteId,
        target: SiteId,
    },
    Pass {
        punter: PunterId,
    },
    /// Claims every consecutive river along `route` in one move.
    Splurge {
        punter: PunterId,
        route: Vec<SiteId>,
    },
}

impl Move {
    /// The punter who made this move.
    pub fn punter(&self) -> PunterId {
        match *self {
            Move::Claim { punter, .. } | Move::Pass { punter } | Move::Splurge { punter, .. } => {
                punter
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Claim {
                punter,
                source,
                target,
            } => write!(f, "Punter={}, Claim River=({}, {})", punter, source, target),
            Move::Pass { punter } => write!(f, "Punter={}, Pass", punter),
            Move::Splurge { punter, route } => {
                write!(f, "Punter={}, Splurge Route={:?}", punter, route)
            }
        }
    }
}

/// Match-wide extension flags, fixed for the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub futures: bool,
    #[serde(default)]
    pub splurges: bool,
}

/// Error for an unrecognized settings flag.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown setting '{0}'")]
pub struct SettingsParseError(pub String);

impl FromStr for Settings {
    type Err = SettingsParseError;

    /// Parses the simulator's comma-separated flag form, e.g.
    /// `futures,splurges`. The empty string enables nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut settings = Settings::default();
        if s.is_empty() {
            return Ok(settings);
        }
        for part in s.split(',') {
            match part {
                "futures" => settings.futures = true,
                "splurges" => settings.splurges = true,
                other => return Err(SettingsParseError(other.to_string())),
            }
        }
        Ok(settings)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.futures {
            names.push("futures");
        }
        if self.splurges {
            names.push("splurges");
        }
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(","))
        }
    }
}

/// A pre-declared bet that `source` (a mine) will reach `target` by game end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Future {
    pub source: SiteId,
    pub target: SiteId,
}

/// One punter's final score, as reported at game end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub punter: PunterId,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_parses_from_json() {
        let data = r#"{
            "sites": [{"id": 4}, {"id": 1}, {"id": 3}, {"id": 6}],
            "rivers": [{"source": 4, "target": 1}, {"source": 1, "target": 3}],
            "mines": [4]
        }"#;
        let map = MapDef::from_json(data).unwrap();
        assert_eq!(map.sites.len(), 4);
        assert_eq!(map.rivers[1], River { source: 1, target: 3 });
        assert_eq!(map.mines, vec![4]);
    }

    #[test]
    fn map_without_mines_key_is_valid() {
        let map = MapDef::from_json(r#"{"sites": [{"id": 0}], "rivers": []}"#).unwrap();
        assert!(map.mines.is_empty());
    }

    #[test]
    fn river_to_undeclared_site_is_rejected() {
        let data = r#"{"sites": [{"id": 0}], "rivers": [{"source": 0, "target": 9}], "mines": []}"#;
        assert!(matches!(
            MapDef::from_json(data),
            Err(MapError::UnknownRiverEndpoint(9))
        ));
    }

    #[test]
    fn mine_at_undeclared_site_is_rejected() {
        let data = r#"{"sites": [{"id": 0}], "rivers": [], "mines": [7]}"#;
        assert!(matches!(MapDef::from_json(data), Err(MapError::UnknownMine(7))));
    }

    #[test]
    fn moves_use_the_tagged_wire_encoding() {
        let claim = Move::Claim {
            punter: 1,
            source: 4,
            target: 7,
        };
        let json = serde_json::to_string(&claim).unwrap();
        assert_eq!(json, r#"{"claim":{"punter":1,"source":4,"target":7}}"#);
        assert_eq!(serde_json::from_str::<Move>(&json).unwrap(), claim);

        let pass: Move = serde_json::from_str(r#"{"pass":{"punter":0}}"#).unwrap();
        assert_eq!(pass, Move::Pass { punter: 0 });

        let splurge: Move =
            serde_json::from_str(r#"{"splurge":{"punter":2,"route":[1,2,3]}}"#).unwrap();
        assert_eq!(
            splurge,
            Move::Splurge {
                punter: 2,
                route: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn settings_parse_from_flag_string() {
        assert_eq!(Settings::from_str("").unwrap(), Settings::default());
        assert_eq!(
            Settings::from_str("futures,splurges").unwrap(),
            Settings {
                futures: true,
                splurges: true,
            }
        );
        assert_eq!(
            Settings::from_str("splurges").unwrap(),
            Settings {
                futures: false,
                splurges: true,
            }
        );
        assert_eq!(
            Settings::from_str("futures,bogus"),
            Err(SettingsParseError("bogus".to_string()))
        );
    }

    #[test]
    fn settings_display_lists_enabled_flags() {
        assert_eq!(Settings::default().to_string(), "none");
        let s = Settings {
            futures: true,
            splurges: true,
        };
        assert_eq!(s.to_string(), "futures,splurges");
    }

    #[test]
    fn move_display_names_the_variant() {
        let m = Move::Claim {
            punter: 0,
            source: 1,
            target: 2,
        };
        assert_eq!(m.to_string(), "Punter=0, Claim River=(1, 2)");
        assert_eq!(Move::Pass { punter: 3 }.to_string(), "Punter=3, Pass");
    }
}
