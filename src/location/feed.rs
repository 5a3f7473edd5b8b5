use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::LocationService;
use crate::geometry::Coordinate;

/// Producer half of a location stream
#[derive(Debug, Clone)]
pub struct LocationSender {
    tx: Sender<Coordinate>,
}

impl LocationSender {
    /// Push a fix. Returns `false` once the feed has been dropped.
    pub fn send(&self, fix: Coordinate) -> bool {
        self.tx.send(fix).is_ok()
    }
}

/// Channel-backed location service.
///
/// Only the latest pending fix matters; intermediate ones are skipped when
/// several arrive between polls. Fixes received while stopped are discarded.
#[derive(Debug)]
pub struct LocationFeed {
    rx: Receiver<Coordinate>,
    current: Option<Coordinate>,
    active: bool,
}

impl LocationFeed {
    pub fn channel() -> (LocationSender, LocationFeed) {
        let (tx, rx) = mpsc::channel();
        (
            LocationSender { tx },
            LocationFeed {
                rx,
                current: None,
                active: false,
            },
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl LocationService for LocationFeed {
    fn start_updates(&mut self) {
        if !self.active {
            tracing::debug!("location updates started");
        }
        self.active = true;
    }

    fn stop_heading_updates(&mut self) {
        if self.active {
            tracing::debug!("location updates stopped");
        }
        self.active = false;
    }

    fn current_location(&self) -> Option<Coordinate> {
        self.current
    }

    fn poll(&mut self) -> bool {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(fix) => latest = Some(fix),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        match latest {
            Some(fix) if self.active => {
                let changed = self.current != Some(fix);
                self.current = Some(fix);
                changed
            }
            Some(_) => {
                tracing::trace!("dropping location fix while stopped");
                false
            }
            None => false,
        }
    }
}
