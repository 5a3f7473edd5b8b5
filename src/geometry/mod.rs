pub mod coordinate;
pub mod region;

pub use coordinate::{Coordinate, distance_label};
pub use region::{Bounds, Region, RegionFramer};
