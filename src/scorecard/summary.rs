use std::fmt;

use crate::domain::{Hole, Round};
use crate::store::{Result, ScoreStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleSummary {
    pub number: u16,
    pub par: u8,
    pub shots: usize,
}

/// What the player sees after finishing a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub course: String,
    pub completed: bool,
    pub holes: Vec<HoleSummary>,
}

impl RoundSummary {
    /// Build from the store: one entry per hole with its recorded shots
    pub fn collect(store: &impl ScoreStore, round: &Round) -> Result<Self> {
        let holes = store.fetch_holes(round.id)?;
        let mut summaries = Vec::with_capacity(holes.len());
        for hole in &holes {
            summaries.push(HoleSummary {
                number: hole.number,
                par: hole.par,
                shots: store.fetch_shots(hole.id)?.len(),
            });
        }
        Ok(Self {
            course: round.title().to_string(),
            completed: round.completed,
            holes: summaries,
        })
    }

    /// Summary from holes already in memory, without shot counts
    pub fn from_holes(round: &Round, holes: &[Hole]) -> Self {
        Self {
            course: round.title().to_string(),
            completed: round.completed,
            holes: holes
                .iter()
                .map(|h| HoleSummary {
                    number: h.number,
                    par: h.par,
                    shots: 0,
                })
                .collect(),
        }
    }

    pub fn total_shots(&self) -> usize {
        self.holes.iter().map(|h| h.shots).sum()
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed {
            "completed"
        } else {
            "in progress"
        };
        writeln!(f, "{} ({})", self.course, status)?;
        for hole in &self.holes {
            writeln!(
                f,
                "  Hole {:>2}  par {}  shots {}",
                hole.number, hole.par, hole.shots
            )?;
        }
        write!(
            f,
            "  Total: {} shots over {} holes (par {})",
            self.total_shots(),
            self.holes.len(),
            self.total_par()
        )
    }
}
