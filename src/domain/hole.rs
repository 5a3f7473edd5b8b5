use serde::{Deserialize, Serialize};
use std::fmt;

use super::RoundId;
use crate::geometry::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleId(pub u64);

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One hole of a round with its par and flag position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub id: HoleId,
    pub round: RoundId,
    /// 1-based ordinal within the round
    pub number: u16,
    #[serde(default)]
    pub par: u8,
    #[serde(default)]
    pub flag: Coordinate,
}

impl Hole {
    /// A freshly started hole: par and flag stay zeroed until edited
    pub fn new(id: HoleId, round: RoundId, number: u16) -> Self {
        Self {
            id,
            round,
            number,
            par: 0,
            flag: Coordinate::default(),
        }
    }

    pub fn with_details(mut self, par: u8, flag: Coordinate) -> Self {
        self.par = par;
        self.flag = flag;
        self
    }
}
