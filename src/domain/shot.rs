use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HoleId;
use crate::geometry::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotId(pub u64);

/// A recorded stroke location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: ShotId,
    pub hole: HoleId,
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl Shot {
    /// Ordering key for "most recent": latest timestamp, then latest id
    pub fn recency(&self) -> (DateTime<Utc>, ShotId) {
        (self.timestamp, self.id)
    }
}
