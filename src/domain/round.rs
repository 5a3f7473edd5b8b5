use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFAULT_COURSE_TITLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One full game session across multiple holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Round {
    pub fn new(id: RoundId, course_name: Option<String>) -> Self {
        Self {
            id,
            course_name,
            completed: false,
        }
    }

    /// Screen title: the course name, or a generic fallback
    pub fn title(&self) -> &str {
        self.course_name.as_deref().unwrap_or(DEFAULT_COURSE_TITLE)
    }
}
