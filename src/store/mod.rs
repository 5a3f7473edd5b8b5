//! Persistence of rounds, holes and shots
//!
//! The screen talks to storage only through [`ScoreStore`]. Two backends are
//! provided: [`MemoryStore`] for tests and ephemeral sessions, and
//! [`JsonFileStore`] which writes the whole object graph to a JSON file.

pub mod graph;
pub mod json;
pub mod memory;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::domain::{Hole, HoleId, Round, RoundId, Shot};
use crate::geometry::Coordinate;

pub use graph::StoreGraph;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("round {0} not found")]
    RoundNotFound(RoundId),

    #[error("hole {0} not found")]
    HoleNotFound(HoleId),

    #[error("round {round} already has hole {number}")]
    DuplicateHole { round: RoundId, number: u16 },

    #[error("store I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("store file {path:?} is not valid JSON: {source}")]
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Synchronous object store the scorecard reads from and writes to.
///
/// Mutations are staged in memory and made durable by [`ScoreStore::save`].
pub trait ScoreStore {
    fn fetch_rounds(&self) -> Result<Vec<Round>>;
    fn fetch_round(&self, round: RoundId) -> Result<Round>;
    fn create_round(&mut self, course_name: Option<String>) -> Result<Round>;
    fn mark_completed(&mut self, round: RoundId) -> Result<()>;

    /// Holes of a round ordered by ascending number
    fn fetch_holes(&self, round: RoundId) -> Result<Vec<Hole>>;
    fn create_hole(&mut self, round: RoundId, number: u16) -> Result<Hole>;
    /// Replace par and flag of an existing hole
    fn update_hole(&mut self, hole: &Hole) -> Result<()>;

    /// Shots of a hole, oldest first
    fn fetch_shots(&self, hole: HoleId) -> Result<Vec<Shot>>;
    fn create_shot(
        &mut self,
        hole: HoleId,
        coordinate: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<Shot>;
    /// Remove the latest shot of a hole; `Ok(None)` when it has none
    fn delete_most_recent_shot(&mut self, hole: HoleId) -> Result<Option<Shot>>;

    fn save(&mut self) -> Result<()>;
}
