use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Result, StoreError};
use crate::domain::{Hole, HoleId, Round, RoundId, Shot, ShotId};
use crate::geometry::Coordinate;

/// The full set of persisted records plus the id allocator.
///
/// Both store backends keep one of these in memory; the JSON backend also
/// serializes it verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreGraph {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    rounds: Vec<Round>,
    #[serde(default)]
    holes: Vec<Hole>,
    #[serde(default)]
    shots: Vec<Shot>,
}

impl StoreGraph {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn rounds(&self) -> Vec<Round> {
        self.rounds.clone()
    }

    pub fn round(&self, id: RoundId) -> Result<&Round> {
        self.rounds
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::RoundNotFound(id))
    }

    fn round_mut(&mut self, id: RoundId) -> Result<&mut Round> {
        self.rounds
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::RoundNotFound(id))
    }

    pub fn create_round(&mut self, course_name: Option<String>) -> Round {
        let round = Round::new(RoundId(self.allocate_id()), course_name);
        self.rounds.push(round.clone());
        round
    }

    pub fn mark_completed(&mut self, id: RoundId) -> Result<()> {
        self.round_mut(id)?.completed = true;
        Ok(())
    }

    pub fn holes(&self, round: RoundId) -> Result<Vec<Hole>> {
        self.round(round)?;
        let mut holes: Vec<Hole> = self
            .holes
            .iter()
            .filter(|h| h.round == round)
            .cloned()
            .collect();
        holes.sort_by_key(|h| h.number);
        Ok(holes)
    }

    pub fn create_hole(&mut self, round: RoundId, number: u16) -> Result<Hole> {
        self.round(round)?;
        if self
            .holes
            .iter()
            .any(|h| h.round == round && h.number == number)
        {
            return Err(StoreError::DuplicateHole { round, number });
        }

        let hole = Hole::new(HoleId(self.allocate_id()), round, number);
        self.holes.push(hole.clone());
        Ok(hole)
    }

    pub fn update_hole(&mut self, hole: &Hole) -> Result<()> {
        let stored = self
            .holes
            .iter_mut()
            .find(|h| h.id == hole.id)
            .ok_or(StoreError::HoleNotFound(hole.id))?;
        stored.par = hole.par;
        stored.flag = hole.flag;
        Ok(())
    }

    fn ensure_hole(&self, id: HoleId) -> Result<()> {
        if self.holes.iter().any(|h| h.id == id) {
            Ok(())
        } else {
            Err(StoreError::HoleNotFound(id))
        }
    }

    pub fn shots(&self, hole: HoleId) -> Result<Vec<Shot>> {
        self.ensure_hole(hole)?;
        let mut shots: Vec<Shot> = self
            .shots
            .iter()
            .filter(|s| s.hole == hole)
            .cloned()
            .collect();
        shots.sort_by_key(Shot::recency);
        Ok(shots)
    }

    pub fn create_shot(
        &mut self,
        hole: HoleId,
        coordinate: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<Shot> {
        self.ensure_hole(hole)?;
        let shot = Shot {
            id: ShotId(self.allocate_id()),
            hole,
            coordinate,
            timestamp,
        };
        self.shots.push(shot.clone());
        Ok(shot)
    }

    pub fn delete_most_recent_shot(&mut self, hole: HoleId) -> Result<Option<Shot>> {
        self.ensure_hole(hole)?;
        let latest = self
            .shots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.hole == hole)
            .max_by_key(|(_, s)| s.recency())
            .map(|(index, _)| index);

        Ok(latest.map(|index| self.shots.remove(index)))
    }
}
