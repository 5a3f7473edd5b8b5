pub mod hole;
pub mod round;
pub mod shot;

pub use hole::{Hole, HoleId};
pub use round::{Round, RoundId};
pub use shot::{Shot, ShotId};
