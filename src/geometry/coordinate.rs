use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 position in decimal degrees.
///
/// Values are taken as given; out-of-range latitudes or longitudes are not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Arithmetic (planar) midpoint of both axes
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }

    /// Great-circle surface distance in meters (haversine, mean earth radius)
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        Haversine::distance(self.to_point(), other.to_point())
    }

    /// Distance truncated to whole meters, as shown on labels and the hole banner
    pub fn whole_meters_to(&self, other: &Coordinate) -> i64 {
        self.distance_to(other) as i64
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Build from a `(lat, lon)` pair
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.5}{} / {:.5}{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}

/// Format a distance label the way the map and banner show it
pub fn distance_label(meters: i64) -> String {
    format!("{} m", meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let a = Coordinate::new(37.0, -122.0);
        let b = Coordinate::new(38.0, -121.0);
        let mid = a.midpoint(&b);
        assert_eq!(mid, Coordinate::new(37.5, -121.5));
    }

    #[test]
    fn test_distance_one_thousandth_degree_latitude() {
        // 0.001 degrees of latitude ≈ 111 m
        let a = Coordinate::new(51.5, -0.12);
        let b = Coordinate::new(51.501, -0.12);
        let meters = a.whole_meters_to(&b);
        assert!((110..=112).contains(&meters), "got {meters}");
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let a = Coordinate::new(40.0, 10.0);
        let b = Coordinate::new(40.002, 10.003);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_whole_meters_truncates() {
        // ~111.19 m must show as 111, never rounded up
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.001, 0.0);
        assert_eq!(a.whole_meters_to(&b), 111);
        assert_eq!(distance_label(111), "111 m");
    }

    #[test]
    fn test_display() {
        let c = Coordinate::new(37.7749, -122.4194);
        assert_eq!(c.to_string(), "37.77490N / 122.41940W");
    }
}
