use chrono::{DateTime, Utc};

use super::{Result, ScoreStore, StoreGraph};
use crate::domain::{Hole, HoleId, Round, RoundId, Shot};
use crate::geometry::Coordinate;

/// Store that lives only as long as the process; `save` is a no-op
#[derive(Debug, Default)]
pub struct MemoryStore {
    graph: StoreGraph,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graph(graph: StoreGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &StoreGraph {
        &self.graph
    }

    pub fn into_graph(self) -> StoreGraph {
        self.graph
    }
}

impl ScoreStore for MemoryStore {
    fn fetch_rounds(&self) -> Result<Vec<Round>> {
        Ok(self.graph.rounds())
    }

    fn fetch_round(&self, round: RoundId) -> Result<Round> {
        self.graph.round(round).cloned()
    }

    fn create_round(&mut self, course_name: Option<String>) -> Result<Round> {
        Ok(self.graph.create_round(course_name))
    }

    fn mark_completed(&mut self, round: RoundId) -> Result<()> {
        self.graph.mark_completed(round)
    }

    fn fetch_holes(&self, round: RoundId) -> Result<Vec<Hole>> {
        self.graph.holes(round)
    }

    fn create_hole(&mut self, round: RoundId, number: u16) -> Result<Hole> {
        self.graph.create_hole(round, number)
    }

    fn update_hole(&mut self, hole: &Hole) -> Result<()> {
        self.graph.update_hole(hole)
    }

    fn fetch_shots(&self, hole: HoleId) -> Result<Vec<Shot>> {
        self.graph.shots(hole)
    }

    fn create_shot(
        &mut self,
        hole: HoleId,
        coordinate: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<Shot> {
        self.graph.create_shot(hole, coordinate, timestamp)
    }

    fn delete_most_recent_shot(&mut self, hole: HoleId) -> Result<Option<Shot>> {
        self.graph.delete_most_recent_shot(hole)
    }

    fn save(&mut self) -> Result<()> {
        Ok(())
    }
}
