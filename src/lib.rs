//! Riverclaim engine library.
//!
//! Exposes the graph substrate, scoring, move strategies, referee, and wire
//! protocol modules for use by integration tests and the simulator binaries.

pub mod graph;
pub mod protocol;
pub mod punter;
pub mod referee;
pub mod score;
pub mod tournament;
