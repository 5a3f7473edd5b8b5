use super::Coordinate;
use crate::config::FramingConfig;

/// A map viewport: center plus visible angular span on each axis (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

/// Bounding box of a set of coordinates, in degrees
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Create bounds from a set of coordinates
    pub fn from_coordinates(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;

        let mut bounds = Self {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };
        bounds.expand(&points[1..]);
        Some(bounds)
    }

    /// Expand bounds to include another set of coordinates
    pub fn expand(&mut self, points: &[Coordinate]) {
        for p in points {
            self.min_lat = self.min_lat.min(p.latitude);
            self.max_lat = self.max_lat.max(p.latitude);
            self.min_lon = self.min_lon.min(p.longitude);
            self.max_lon = self.max_lon.max(p.longitude);
        }
    }

    pub fn latitude_extent(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn longitude_extent(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Frames a viewport around the player and a target with some margin
///
/// Each axis span is the coordinate extent times the framing factor, floored
/// at the minimum span so that two nearly coincident points still give a
/// usable zoom level.
#[derive(Debug, Clone, Copy)]
pub struct RegionFramer {
    factor: f64,
    minimum_span: f64,
}

impl Default for RegionFramer {
    fn default() -> Self {
        Self::new(&FramingConfig::default())
    }
}

impl RegionFramer {
    pub fn new(config: &FramingConfig) -> Self {
        Self {
            factor: config.factor,
            minimum_span: config.minimum_span,
        }
    }

    /// Frame two coordinates: centered on their midpoint
    pub fn frame(&self, a: Coordinate, b: Coordinate) -> Region {
        let center = a.midpoint(&b);
        Region {
            center,
            latitude_span: self.span((a.latitude - b.latitude).abs()),
            longitude_span: self.span((a.longitude - b.longitude).abs()),
        }
    }

    /// Frame any number of coordinates through their bounding box.
    ///
    /// Returns `None` for an empty slice.
    pub fn frame_all(&self, points: &[Coordinate]) -> Option<Region> {
        let bounds = Bounds::from_coordinates(points)?;
        Some(Region {
            center: bounds.center(),
            latitude_span: self.span(bounds.latitude_extent()),
            longitude_span: self.span(bounds.longitude_extent()),
        })
    }

    fn span(&self, extent: f64) -> f64 {
        (extent * self.factor).max(self.minimum_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_coordinates() {
        let points = vec![
            Coordinate::new(1.0, 5.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(2.0, 4.0),
        ];
        let bounds = Bounds::from_coordinates(&points).unwrap();

        assert_eq!(bounds.min_lat, 1.0);
        assert_eq!(bounds.max_lat, 3.0);
        assert_eq!(bounds.min_lon, 2.0);
        assert_eq!(bounds.max_lon, 5.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_coordinates(&[]).is_none());
        assert!(RegionFramer::default().frame_all(&[]).is_none());
    }

    #[test]
    fn test_frame_center_is_midpoint() {
        let framer = RegionFramer::default();
        let user = Coordinate::new(36.5680, -121.9500);
        let flag = Coordinate::new(36.5710, -121.9460);
        let region = framer.frame(user, flag);

        assert!((region.center.latitude - 36.5695).abs() < 1e-12);
        assert!((region.center.longitude - -121.9480).abs() < 1e-12);
    }

    #[test]
    fn test_frame_span_scales_extent() {
        let framer = RegionFramer::default();
        let region = framer.frame(Coordinate::new(10.0, 20.0), Coordinate::new(10.01, 20.004));

        assert!((region.latitude_span - 0.025).abs() < 1e-9);
        assert!((region.longitude_span - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_frame_minimum_span_floor() {
        let framer = RegionFramer::default();
        // 2.5 * 0.001 = 0.0025 < 0.005 on both axes
        let region = framer.frame(Coordinate::new(10.0, 20.0), Coordinate::new(10.001, 20.0));
        assert_eq!(region.latitude_span, 0.005);
        assert_eq!(region.longitude_span, 0.005);

        let same = framer.frame(Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.0));
        assert_eq!(same.latitude_span, 0.005);
        assert_eq!(same.center, Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn test_frame_all_matches_frame_for_two_points() {
        let framer = RegionFramer::default();
        let a = Coordinate::new(48.1, 11.5);
        let b = Coordinate::new(48.098, 11.507);
        let pair = framer.frame(a, b);
        let all = framer.frame_all(&[a, b]).unwrap();

        assert!((pair.center.latitude - all.center.latitude).abs() < 1e-12);
        assert!((pair.center.longitude - all.center.longitude).abs() < 1e-12);
        assert!((pair.latitude_span - all.latitude_span).abs() < 1e-12);
        assert!((pair.longitude_span - all.longitude_span).abs() < 1e-12);
    }

    #[test]
    fn test_custom_framing() {
        let framer = RegionFramer::new(&FramingConfig {
            factor: 3.0,
            minimum_span: 0.01,
        });
        let region = framer.frame(Coordinate::new(0.0, 0.0), Coordinate::new(0.02, 0.001));
        assert!((region.latitude_span - 0.06).abs() < 1e-9);
        assert_eq!(region.longitude_span, 0.01);
    }
}
