use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use super::{MemoryStore, Result, ScoreStore, StoreError, StoreGraph};
use crate::domain::{Hole, HoleId, Round, RoundId, Shot};
use crate::geometry::Coordinate;

/// Store persisted as a single pretty-printed JSON document.
///
/// Records are edited in memory; `save` rewrites the file through a
/// temporary sibling and a rename so a failed write never truncates the
/// previous contents.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let graph = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| StoreError::Serialization {
                path: path.clone(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            StoreGraph::default()
        };

        Ok(Self {
            path,
            inner: MemoryStore::from_graph(graph),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn fetch_rounds(&self) -> Result<Vec<Round>> {
        self.inner.fetch_rounds()
    }

    fn fetch_round(&self, round: RoundId) -> Result<Round> {
        self.inner.fetch_round(round)
    }

    fn create_round(&mut self, course_name: Option<String>) -> Result<Round> {
        self.inner.create_round(course_name)
    }

    fn mark_completed(&mut self, round: RoundId) -> Result<()> {
        self.inner.mark_completed(round)
    }

    fn fetch_holes(&self, round: RoundId) -> Result<Vec<Hole>> {
        self.inner.fetch_holes(round)
    }

    fn create_hole(&mut self, round: RoundId, number: u16) -> Result<Hole> {
        self.inner.create_hole(round, number)
    }

    fn update_hole(&mut self, hole: &Hole) -> Result<()> {
        self.inner.update_hole(hole)
    }

    fn fetch_shots(&self, hole: HoleId) -> Result<Vec<Shot>> {
        self.inner.fetch_shots(hole)
    }

    fn create_shot(
        &mut self,
        hole: HoleId,
        coordinate: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<Shot> {
        self.inner.create_shot(hole, coordinate, timestamp)
    }

    fn delete_most_recent_shot(&mut self, hole: HoleId) -> Result<Option<Shot>> {
        self.inner.delete_most_recent_shot(hole)
    }

    fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(self.inner.graph()).map_err(|source| {
            StoreError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|source| StoreError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "store saved");
        Ok(())
    }
}
