//! Scripted sessions for driving a scorecard without a device
//!
//! A script is a TOML document with one `[[event]]` table per step:
//!
//! ```toml
//! [[event]]
//! kind = "appear"
//!
//! [[event]]
//! kind = "location"
//! lat = 36.5680
//! lon = -121.9500
//!
//! [[event]]
//! kind = "digit"
//! digit = 4
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geometry::Coordinate;
use crate::location::{LocationSender, LocationService};
use crate::map::MapSurface;
use crate::scorecard::{ScorecardScreen, ScreenEffect, ScreenEvent};
use crate::store::ScoreStore;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Appear,
    Disappear,
    /// A fix pushed by the location service
    Location {
        lat: f64,
        lon: f64,
    },
    Tap {
        lat: f64,
        lon: f64,
    },
    Digit {
        digit: u8,
    },
    Previous,
    Next,
    StartHole,
    RecordShot,
    DeleteLastShot,
    Finish,
    ConfirmFinish,
    CancelFinish,
}

impl ScriptEvent {
    pub fn to_screen_event(self) -> ScreenEvent {
        match self {
            ScriptEvent::Appear => ScreenEvent::Appear,
            ScriptEvent::Disappear => ScreenEvent::Disappear,
            ScriptEvent::Location { .. } => ScreenEvent::LocationChanged,
            ScriptEvent::Tap { lat, lon } => ScreenEvent::MapTapped(Coordinate::new(lat, lon)),
            ScriptEvent::Digit { digit } => ScreenEvent::KeypadDigit(digit),
            ScriptEvent::Previous => ScreenEvent::PreviousHole,
            ScriptEvent::Next => ScreenEvent::NextHole,
            ScriptEvent::StartHole => ScreenEvent::StartHole,
            ScriptEvent::RecordShot => ScreenEvent::RecordShot,
            ScriptEvent::DeleteLastShot => ScreenEvent::DeleteLastShot,
            ScriptEvent::Finish => ScreenEvent::RequestFinish,
            ScriptEvent::ConfirmFinish => ScreenEvent::ConfirmFinish,
            ScriptEvent::CancelFinish => ScreenEvent::CancelFinish,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionScript {
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

impl SessionScript {
    pub fn parse(contents: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Feed every event to the screen, presenting the map after each one.
    ///
    /// Location events go through `sender` so they reach the screen the same
    /// way device fixes do. `on_step` sees the screen after each event.
    pub fn run<S, L, M, F>(
        &self,
        screen: &mut ScorecardScreen<S, L>,
        sender: &LocationSender,
        surface: &mut M,
        mut on_step: F,
    ) where
        S: ScoreStore,
        L: LocationService,
        M: MapSurface,
        F: FnMut(usize, &ScriptEvent, &ScorecardScreen<S, L>, &M, &ScreenEffect),
    {
        for (step, event) in self.events.iter().enumerate() {
            if let ScriptEvent::Location { lat, lon } = *event
                && !sender.send(Coordinate::new(lat, lon))
            {
                tracing::warn!(step, "location feed closed");
            }

            let effect = screen.handle(event.to_screen_event());
            screen.present(surface);
            on_step(step, event, screen, surface, &effect);
        }
    }
}
