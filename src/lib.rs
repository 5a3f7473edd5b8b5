//! condor - hole-by-hole golf scorecard with a live hole map, distance
//! overlays and a stroke keypad

pub mod config;
pub mod domain;
pub mod geometry;
pub mod location;
pub mod logging;
pub mod map;
pub mod replay;
pub mod scorecard;
pub mod store;
