//! Device location as seen by the scorecard
//!
//! Fixes are pushed by the platform into a [`LocationSender`] and picked up by
//! the screen through the [`LocationService`] it was constructed with.

pub mod feed;

pub use feed::{LocationFeed, LocationSender};

use crate::geometry::Coordinate;

pub trait LocationService {
    fn start_updates(&mut self);
    fn stop_heading_updates(&mut self);
    /// Most recent fix, if any arrived since updates started
    fn current_location(&self) -> Option<Coordinate>;
    /// Take pending fixes; returns `true` when the current location changed
    fn poll(&mut self) -> bool;
}
